use brewhaven_shared::models::Cart;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::icons::CartIcon;
use crate::session::handle::use_session;
use crate::web::route::AppRoute;
use crate::web::router::use_router;

#[component]
pub fn CartPage() -> impl IntoView {
    let session = use_session();
    let router = use_router();

    let (cart, set_cart) = signal(Cart::default());
    let (loading, set_loading) = signal(true);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    // 守卫保证到这里一定已认证
    let user_id = session.current_user().map(|user| user.id).unwrap_or(0);
    let api = session.api();

    let reload = {
        let api = api.clone();
        move || {
            let api = api.clone();
            set_loading.set(true);
            spawn_local(async move {
                match api.cart(user_id).await {
                    Ok(data) => set_cart.set(data),
                    Err(err) => set_error_msg.set(Some(err.message)),
                }
                set_loading.set(false);
            });
        }
    };
    reload();

    let change_quantity = {
        let api = api.clone();
        let reload = reload.clone();
        move |item_id: i64, quantity: u32| {
            if quantity == 0 {
                return;
            }
            let api = api.clone();
            let reload = reload.clone();
            spawn_local(async move {
                match api.update_cart_item(item_id, quantity).await {
                    Ok(_) => reload(),
                    Err(err) => set_error_msg.set(Some(err.message)),
                }
            });
        }
    };

    let remove_item = {
        let api = api.clone();
        let reload = reload.clone();
        move |item_id: i64| {
            let api = api.clone();
            let reload = reload.clone();
            spawn_local(async move {
                match api.remove_cart_item(item_id).await {
                    Ok(_) => reload(),
                    Err(err) => set_error_msg.set(Some(err.message)),
                }
            });
        }
    };

    // StoredValue 是 Copy 句柄，行级闭包可重复取用而不移动处理函数
    let change_quantity = StoredValue::new(change_quantity);
    let remove_item = StoredValue::new(remove_item);

    let is_empty = move || cart.get().items.is_empty();

    view! {
        <div class="min-h-screen bg-base-200 p-4 md:p-8">
            <div class="max-w-3xl mx-auto space-y-6">
                <h1 class="text-3xl font-bold flex items-center gap-2">
                    <CartIcon class="h-7 w-7" />
                    "Your cart"
                </h1>

                <Show when=move || error_msg.get().is_some()>
                    <div role="alert" class="alert alert-error">
                        <span>{move || error_msg.get().unwrap_or_default()}</span>
                    </div>
                </Show>

                <Show
                    when=move || !loading.get()
                    fallback=|| view! {
                        <div class="flex justify-center py-16">
                            <span class="loading loading-spinner loading-lg text-primary"></span>
                        </div>
                    }
                >
                    <Show
                        when=move || !is_empty()
                        fallback=move || view! {
                            <div class="card bg-base-100 shadow-md">
                                <div class="card-body items-center text-center space-y-2">
                                    <p class="text-base-content/70">"Nothing here yet."</p>
                                    <button
                                        class="btn btn-primary"
                                        on:click=move |_| router.navigate_to(AppRoute::Products)
                                    >
                                        "Browse the menu"
                                    </button>
                                </div>
                            </div>
                        }
                    >
                        <div class="card bg-base-100 shadow-md">
                            <div class="card-body space-y-4">
                                <For
                                    each=move || cart.get().items
                                    key=|item| (item.id, item.quantity)
                                    let:item
                                >
                                    {
                                        let change_quantity = change_quantity.get_value();
                                        let change_quantity2 = change_quantity.clone();
                                        let remove_item = remove_item.get_value();
                                        let item_id = item.id;
                                        let quantity = item.quantity;
                                        view! {
                                            <div class="flex items-center justify-between gap-4 border-b border-base-200 pb-3">
                                                <div>
                                                    <p class="font-semibold">{item.product.name.clone()}</p>
                                                    <p class="text-sm text-base-content/70">
                                                        {format!("${:.2} each", item.product.price)}
                                                    </p>
                                                </div>
                                                <div class="flex items-center gap-2">
                                                    <button
                                                        class="btn btn-xs btn-outline"
                                                        disabled=quantity <= 1
                                                        on:click=move |_| change_quantity(item_id, quantity - 1)
                                                    >
                                                        "-"
                                                    </button>
                                                    <span class="w-6 text-center">{quantity}</span>
                                                    <button
                                                        class="btn btn-xs btn-outline"
                                                        on:click=move |_| change_quantity2(item_id, quantity + 1)
                                                    >
                                                        "+"
                                                    </button>
                                                    <button
                                                        class="btn btn-xs btn-error btn-outline ml-2"
                                                        on:click=move |_| remove_item(item_id)
                                                    >
                                                        "Remove"
                                                    </button>
                                                </div>
                                            </div>
                                        }
                                    }
                                </For>

                                <div class="flex items-center justify-between pt-2">
                                    <span class="text-lg font-bold">
                                        {move || format!("Total: ${:.2}", cart.get().total)}
                                    </span>
                                    <button
                                        class="btn btn-primary"
                                        on:click=move |_| router.navigate_to(AppRoute::Payment)
                                    >
                                        "Proceed to payment"
                                    </button>
                                </div>
                            </div>
                        </div>
                    </Show>
                </Show>
            </div>
        </div>
    }
}
