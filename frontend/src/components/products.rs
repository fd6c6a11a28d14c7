use brewhaven_shared::models::Product;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::session::handle::use_session;
use crate::web::route::AppRoute;
use crate::web::router::use_router;

#[component]
pub fn ProductsPage() -> impl IntoView {
    let session = use_session();
    let router = use_router();
    let is_authenticated = session.is_authenticated();

    let (products, set_products) = signal(Vec::<Product>::new());
    let (loading, set_loading) = signal(true);
    let (search, set_search) = signal(String::new());
    let (category, set_category) = signal(String::from("all"));
    let (notification, set_notification) = signal(Option::<(String, bool)>::None);

    let api = session.api();
    {
        let api = api.clone();
        spawn_local(async move {
            match api.products().await {
                Ok(list) => set_products.set(list),
                Err(err) => set_notification.set(Some((err.message, true))),
            }
            set_loading.set(false);
        });
    }

    let categories = move || {
        let mut seen: Vec<String> = products
            .get()
            .iter()
            .map(|product| product.category.clone())
            .collect();
        seen.sort();
        seen.dedup();
        seen
    };

    let visible = move || {
        let needle = search.get().to_lowercase();
        let wanted = category.get();
        products
            .get()
            .into_iter()
            .filter(|product| wanted == "all" || product.category == wanted)
            .filter(|product| {
                needle.is_empty() || product.name.to_lowercase().contains(&needle)
            })
            .collect::<Vec<_>>()
    };

    let add_to_cart = {
        let api = api.clone();
        move |product_id: i64| {
            if !is_authenticated.get_untracked() {
                router.navigate_to(AppRoute::Auth);
                return;
            }
            let api = api.clone();
            spawn_local(async move {
                match api.add_to_cart(product_id, 1).await {
                    Ok(reply) => set_notification.set(Some((reply.message, false))),
                    Err(err) => set_notification.set(Some((err.message, true))),
                }
            });
        }
    };
    // StoredValue 是 Copy 句柄，行级闭包可重复取用而不移动处理函数
    let add_to_cart = StoredValue::new(add_to_cart);

    // 3 秒后清除通知
    Effect::new(move |_| {
        if notification.get().is_some() {
            set_timeout(
                move || set_notification.set(None),
                std::time::Duration::from_secs(3),
            );
        }
    });

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

                <div class="flex flex-col md:flex-row gap-4 items-center justify-between">
                    <h1 class="text-3xl font-bold">"Menu & gear"</h1>
                    <div class="flex gap-2 w-full md:w-auto">
                        <input
                            type="text"
                            placeholder="Search..."
                            class="input input-bordered w-full md:w-64"
                            on:input=move |ev| set_search.set(event_target_value(&ev))
                            prop:value=search
                        />
                        <select
                            class="select select-bordered"
                            on:change=move |ev| set_category.set(event_target_value(&ev))
                        >
                            <option value="all">"All"</option>
                            <For each=categories key=|cat| cat.clone() let:cat>
                                <option value=cat.clone()>{cat.clone()}</option>
                            </For>
                        </select>
                    </div>
                </div>

                <Show
                    when=move || !loading.get()
                    fallback=|| view! {
                        <div class="flex justify-center py-16">
                            <span class="loading loading-spinner loading-lg text-primary"></span>
                        </div>
                    }
                >
                    <div class="grid sm:grid-cols-2 lg:grid-cols-3 gap-6">
                        <For each=visible key=|product| product.id let:product>
                            {
                                let add_to_cart = add_to_cart.get_value();
                                let id = product.id;
                                let out_of_stock = product.stock <= 0;
                                view! {
                                    <div class="card bg-base-100 shadow-md">
                                        <div class="card-body">
                                            <h2 class="card-title">{product.name.clone()}</h2>
                                            <p class="text-sm text-base-content/70">
                                                {product.description.clone()}
                                            </p>
                                            <div class="flex items-center justify-between mt-2">
                                                <span class="text-lg font-semibold text-primary">
                                                    {format!("${:.2}", product.price)}
                                                </span>
                                                <span class="badge badge-ghost">{product.category.clone()}</span>
                                            </div>
                                            <div class="card-actions justify-end mt-2">
                                                <button
                                                    class="btn btn-primary btn-sm"
                                                    disabled=out_of_stock
                                                    on:click=move |_| add_to_cart(id)
                                                >
                                                    {if out_of_stock { "Out of stock" } else { "Add to cart" }}
                                                </button>
                                            </div>
                                        </div>
                                    </div>
                                }
                            }
                        </For>
                    </div>
                </Show>
            </div>
        </div>
    }
}
