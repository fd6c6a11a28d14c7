use brewhaven_shared::models::{Order, Product, Reservation};
use brewhaven_shared::protocol::NewProduct;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::icons::ShieldIcon;
use crate::session::handle::use_session;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tab {
    Products,
    Reservations,
    Orders,
}

const ORDER_STATUSES: &[&str] = &["pending", "preparing", "ready", "delivered"];

/// 后台管理页（路由守卫保证只有 admin 能到达）
#[component]
pub fn AdminPage() -> impl IntoView {
    let session = use_session();
    let api = session.api();

    let (tab, set_tab) = signal(Tab::Products);
    let (products, set_products) = signal(Vec::<Product>::new());
    let (reservations, set_reservations) = signal(Vec::<Reservation>::new());
    let (orders, set_orders) = signal(Vec::<Order>::new());
    let (loading, set_loading) = signal(true);
    let (notification, set_notification) = signal(Option::<(String, bool)>::None);

    // 商品编辑器：None 关闭；Some(None) 新建；Some(Some(id)) 编辑
    let (editor, set_editor) = signal(Option::<Option<i64>>::None);
    let (form_name, set_form_name) = signal(String::new());
    let (form_description, set_form_description) = signal(String::new());
    let (form_price, set_form_price) = signal(String::new());
    let (form_category, set_form_category) = signal(String::new());
    let (form_stock, set_form_stock) = signal(String::new());

    let notify = move |message: String, is_err: bool| {
        set_notification.set(Some((message, is_err)));
    };

    let reload = {
        let api = api.clone();
        move || {
            let api = api.clone();
            set_loading.set(true);
            spawn_local(async move {
                // 三个列表相互独立，逐个拉取即可
                match api.products().await {
                    Ok(list) => set_products.set(list),
                    Err(err) => notify(err.message, true),
                }
                match api.all_reservations().await {
                    Ok(list) => set_reservations.set(list),
                    Err(err) => notify(err.message, true),
                }
                match api.all_orders().await {
                    Ok(list) => set_orders.set(list),
                    Err(err) => notify(err.message, true),
                }
                set_loading.set(false);
            });
        }
    };
    reload();

    let open_editor = move |product: Option<Product>| {
        match &product {
            Some(product) => {
                set_form_name.set(product.name.clone());
                set_form_description.set(product.description.clone());
                set_form_price.set(format!("{}", product.price));
                set_form_category.set(product.category.clone());
                set_form_stock.set(product.stock.to_string());
                set_editor.set(Some(Some(product.id)));
            }
            None => {
                set_form_name.set(String::new());
                set_form_description.set(String::new());
                set_form_price.set(String::new());
                set_form_category.set(String::new());
                set_form_stock.set(String::new());
                set_editor.set(Some(None));
            }
        }
    };

    let save_product = {
        let api = api.clone();
        let reload = reload.clone();
        move |_| {
            let price = form_price.get_untracked().parse::<f64>().unwrap_or(-1.0);
            let stock = form_stock.get_untracked().parse::<i64>().unwrap_or(-1);
            if form_name.get_untracked().is_empty() || price < 0.0 || stock < 0 {
                notify("Name, price and stock are required".to_string(), true);
                return;
            }
            let payload = NewProduct {
                name: form_name.get_untracked(),
                description: form_description.get_untracked(),
                price,
                category: form_category.get_untracked(),
                image: None,
                stock,
            };
            let target = editor.get_untracked().flatten();
            let api = api.clone();
            let reload = reload.clone();
            spawn_local(async move {
                let result = match target {
                    Some(id) => api.update_product(id, &payload).await.map(|_| ()),
                    None => api.create_product(&payload).await.map(|_| ()),
                };
                match result {
                    Ok(()) => {
                        notify("Product saved".to_string(), false);
                        set_editor.set(None);
                        reload();
                    }
                    Err(err) => notify(err.message, true),
                }
            });
        }
    };

    let delete_product = {
        let api = api.clone();
        move |id: i64| {
            let api = api.clone();
            spawn_local(async move {
                match api.delete_product(id).await {
                    Ok(()) => {
                        notify("Product deleted".to_string(), false);
                        set_products.update(|list| list.retain(|product| product.id != id));
                    }
                    Err(err) => notify(err.message, true),
                }
            });
        }
    };

    let set_reservation_status = {
        let api = api.clone();
        let reload = reload.clone();
        move |id: i64, status: &'static str| {
            let api = api.clone();
            let reload = reload.clone();
            spawn_local(async move {
                match api.set_reservation_status(id, status).await {
                    Ok(_) => reload(),
                    Err(err) => notify(err.message, true),
                }
            });
        }
    };

    let set_order_status = {
        let api = api.clone();
        let reload = reload.clone();
        move |id: i64, status: String| {
            let api = api.clone();
            let reload = reload.clone();
            spawn_local(async move {
                match api.set_order_status(id, &status).await {
                    Ok(_) => reload(),
                    Err(err) => notify(err.message, true),
                }
            });
        }
    };

    // StoredValue 是 Copy 句柄，行级闭包可重复取用而不移动处理函数
    let delete_product = StoredValue::new(delete_product);
    let set_reservation_status = StoredValue::new(set_reservation_status);
    let set_order_status = StoredValue::new(set_order_status);

    Effect::new(move |_| {
        if notification.get().is_some() {
            set_timeout(
                move || set_notification.set(None),
                std::time::Duration::from_secs(3),
            );
        }
    });

    let tab_class = move |own: Tab| {
        if tab.get() == own {
            "tab tab-active"
        } else {
            "tab"
        }
    };

    view! {
        <div class="min-h-screen bg-base-200 p-4 md:p-8">
            <div class="max-w-6xl mx-auto space-y-6">
                <Show when=move || notification.get().is_some()>
                    <div class="toast toast-top toast-end z-50">
                        <div class=move || {
                            if notification.get().map(|(_, is_err)| is_err).unwrap_or(false) {
                                "alert alert-error shadow-lg"
                            } else {
                                "alert alert-success shadow-lg"
                            }
                        }>
                            <span>{move || notification.get().map(|(msg, _)| msg).unwrap_or_default()}</span>
                        </div>
                    </div>
                </Show>

                <h1 class="text-3xl font-bold flex items-center gap-2">
                    <ShieldIcon class="h-7 w-7 text-primary" />
                    "Back office"
                </h1>

                <div role="tablist" class="tabs tabs-boxed w-fit">
                    <button role="tab" class=move || tab_class(Tab::Products) on:click=move |_| set_tab.set(Tab::Products)>
                        "Products"
                    </button>
                    <button role="tab" class=move || tab_class(Tab::Reservations) on:click=move |_| set_tab.set(Tab::Reservations)>
                        "Reservations"
                    </button>
                    <button role="tab" class=move || tab_class(Tab::Orders) on:click=move |_| set_tab.set(Tab::Orders)>
                        "Orders"
                    </button>
                </div>

                <Show
                    when=move || !loading.get()
                    fallback=|| view! {
                        <div class="flex justify-center py-16">
                            <span class="loading loading-spinner loading-lg text-primary"></span>
                        </div>
                    }
                >
                    // ---- 商品管理 ----
                    <Show when=move || tab.get() == Tab::Products>
                        <div class="space-y-4">
                            <button class="btn btn-primary btn-sm" on:click=move |_| open_editor(None)>
                                "New product"
                            </button>
                            <div class="overflow-x-auto">
                                <table class="table bg-base-100 shadow-md">
                                    <thead>
                                        <tr>
                                            <th>"Name"</th>
                                            <th>"Category"</th>
                                            <th>"Price"</th>
                                            <th>"Stock"</th>
                                            <th></th>
                                        </tr>
                                    </thead>
                                    <tbody>
                                        <For
                                            each=move || products.get()
                                            // 价格按位纳入 key，编辑后强制重渲染该行
                                            key=|product| (product.id, product.name.clone(), product.price.to_bits(), product.stock)
                                            let:product
                                        >
                                            {
                                                let delete_product = delete_product.get_value();
                                                let id = product.id;
                                                let for_edit = product.clone();
                                                view! {
                                                    <tr>
                                                        <td>{product.name.clone()}</td>
                                                        <td>{product.category.clone()}</td>
                                                        <td>{format!("${:.2}", product.price)}</td>
                                                        <td>{product.stock}</td>
                                                        <td class="flex gap-2">
                                                            <button
                                                                class="btn btn-xs btn-outline"
                                                                on:click=move |_| open_editor(Some(for_edit.clone()))
                                                            >
                                                                "Edit"
                                                            </button>
                                                            <button
                                                                class="btn btn-xs btn-error btn-outline"
                                                                on:click=move |_| delete_product(id)
                                                            >
                                                                "Delete"
                                                            </button>
                                                        </td>
                                                    </tr>
                                                }
                                            }
                                        </For>
                                    </tbody>
                                </table>
                            </div>
                        </div>
                    </Show>

                    // ---- 预约管理 ----
                    <Show when=move || tab.get() == Tab::Reservations>
                        <div class="overflow-x-auto">
                            <table class="table bg-base-100 shadow-md">
                                <thead>
                                    <tr>
                                        <th>"User"</th>
                                        <th>"Date"</th>
                                        <th>"Time"</th>
                                        <th>"People"</th>
                                        <th>"Status"</th>
                                        <th></th>
                                    </tr>
                                </thead>
                                <tbody>
                                    <For
                                        each=move || reservations.get()
                                        key=|reservation| (reservation.id, reservation.status.clone())
                                        let:reservation
                                    >
                                        {
                                            let confirm = set_reservation_status.get_value();
                                            let cancel = set_reservation_status.get_value();
                                            let id = reservation.id;
                                            let open = reservation.status == "pending";
                                            view! {
                                                <tr>
                                                    <td>{format!("#{}", reservation.user_id)}</td>
                                                    <td>{reservation.date.to_string()}</td>
                                                    <td>{reservation.time.format("%H:%M").to_string()}</td>
                                                    <td>{reservation.people_count}</td>
                                                    <td>{reservation.status.clone()}</td>
                                                    <td class="flex gap-2">
                                                        <button
                                                            class="btn btn-xs btn-success btn-outline"
                                                            disabled=!open
                                                            on:click=move |_| confirm(id, "confirmed")
                                                        >
                                                            "Confirm"
                                                        </button>
                                                        <button
                                                            class="btn btn-xs btn-error btn-outline"
                                                            disabled=!open
                                                            on:click=move |_| cancel(id, "cancelled")
                                                        >
                                                            "Cancel"
                                                        </button>
                                                    </td>
                                                </tr>
                                            }
                                        }
                                    </For>
                                </tbody>
                            </table>
                        </div>
                    </Show>

                    // ---- 订单管理 ----
                    <Show when=move || tab.get() == Tab::Orders>
                        <div class="overflow-x-auto">
                            <table class="table bg-base-100 shadow-md">
                                <thead>
                                    <tr>
                                        <th>"Order"</th>
                                        <th>"User"</th>
                                        <th>"Total"</th>
                                        <th>"Placed"</th>
                                        <th>"Status"</th>
                                    </tr>
                                </thead>
                                <tbody>
                                    <For
                                        each=move || orders.get()
                                        key=|order| (order.id, order.status.clone())
                                        let:order
                                    >
                                        {
                                            let set_order_status = set_order_status.get_value();
                                            let id = order.id;
                                            let current = order.status.clone();
                                            view! {
                                                <tr>
                                                    <td>{format!("#{id}")}</td>
                                                    <td>{format!("#{}", order.user_id)}</td>
                                                    <td>{format!("${:.2}", order.total)}</td>
                                                    <td>{order.created_at.format("%Y-%m-%d %H:%M").to_string()}</td>
                                                    <td>
                                                        <select
                                                            class="select select-bordered select-xs"
                                                            on:change=move |ev| set_order_status(id, event_target_value(&ev))
                                                        >
                                                            {ORDER_STATUSES.iter().map(|status| {
                                                                let selected = *status == current;
                                                                view! {
                                                                    <option value=*status selected=selected>{*status}</option>
                                                                }
                                                            }).collect_view()}
                                                        </select>
                                                    </td>
                                                </tr>
                                            }
                                        }
                                    </For>
                                </tbody>
                            </table>
                        </div>
                    </Show>
                </Show>

                // ---- 商品编辑对话框 ----
                <Show when=move || editor.get().is_some()>
                    <div class="modal modal-open">
                        <div class="modal-box space-y-3">
                            <h3 class="font-bold text-lg">
                                {move || if editor.get().flatten().is_some() { "Edit product" } else { "New product" }}
                            </h3>
                            <div class="form-control">
                                <label class="label"><span class="label-text">"Name"</span></label>
                                <input
                                    type="text"
                                    class="input input-bordered"
                                    on:input=move |ev| set_form_name.set(event_target_value(&ev))
                                    prop:value=form_name
                                />
                            </div>
                            <div class="form-control">
                                <label class="label"><span class="label-text">"Description"</span></label>
                                <textarea
                                    class="textarea textarea-bordered"
                                    on:input=move |ev| set_form_description.set(event_target_value(&ev))
                                    prop:value=form_description
                                ></textarea>
                            </div>
                            <div class="grid grid-cols-3 gap-3">
                                <div class="form-control">
                                    <label class="label"><span class="label-text">"Price"</span></label>
                                    <input
                                        type="number"
                                        step="0.01"
                                        min="0"
                                        class="input input-bordered"
                                        on:input=move |ev| set_form_price.set(event_target_value(&ev))
                                        prop:value=form_price
                                    />
                                </div>
                                <div class="form-control">
                                    <label class="label"><span class="label-text">"Category"</span></label>
                                    <input
                                        type="text"
                                        class="input input-bordered"
                                        on:input=move |ev| set_form_category.set(event_target_value(&ev))
                                        prop:value=form_category
                                    />
                                </div>
                                <div class="form-control">
                                    <label class="label"><span class="label-text">"Stock"</span></label>
                                    <input
                                        type="number"
                                        min="0"
                                        class="input input-bordered"
                                        on:input=move |ev| set_form_stock.set(event_target_value(&ev))
                                        prop:value=form_stock
                                    />
                                </div>
                            </div>
                            <div class="modal-action">
                                <button class="btn btn-ghost" on:click=move |_| set_editor.set(None)>
                                    "Close"
                                </button>
                                <button class="btn btn-primary" on:click=save_product.clone()>
                                    "Save"
                                </button>
                            </div>
                        </div>
                    </div>
                </Show>
            </div>
        </div>
    }
}
