use brewhaven_shared::models::Cart;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::icons::CheckCircleIcon;
use crate::session::handle::use_session;
use crate::web::route::AppRoute;
use crate::web::router::use_router;

/// 模拟支付页
///
/// 卡片表单只做展示，不接触任何真实支付通道；
/// "支付"动作就是调用后端的购物车结算端点。
#[component]
pub fn PaymentPage() -> impl IntoView {
    let session = use_session();
    let router = use_router();

    let (cart, set_cart) = signal(Cart::default());
    let (card_number, set_card_number) = signal(String::new());
    let (card_holder, set_card_holder) = signal(String::new());
    let (processing, set_processing) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let user_id = session.current_user().map(|user| user.id).unwrap_or(0);
    let api = session.api();

    {
        let api = api.clone();
        spawn_local(async move {
            match api.cart(user_id).await {
                Ok(data) => set_cart.set(data),
                Err(err) => set_error_msg.set(Some(err.message)),
            }
        });
    }

    let on_submit = {
        let api = api.clone();
        move |ev: leptos::web_sys::SubmitEvent| {
            ev.prevent_default();
            if card_number.get().is_empty() || card_holder.get().is_empty() {
                set_error_msg.set(Some("Please fill in the card details".to_string()));
                return;
            }
            set_processing.set(true);
            set_error_msg.set(None);

            let api = api.clone();
            spawn_local(async move {
                match api.checkout().await {
                    Ok(_) => router.navigate_to(AppRoute::PaymentSuccess),
                    Err(err) => {
                        set_error_msg.set(Some(err.message));
                        set_processing.set(false);
                    }
                }
            });
        }
    };

    view! {
        <div class="min-h-screen bg-base-200 p-4 md:p-8">
            <div class="max-w-md mx-auto space-y-6">
                <h1 class="text-3xl font-bold">"Payment"</h1>
                <p class="text-sm text-base-content/60">
                    "Demo checkout: no real charge is made."
                </p>

                <Show when=move || error_msg.get().is_some()>
                    <div role="alert" class="alert alert-error">
                        <span>{move || error_msg.get().unwrap_or_default()}</span>
                    </div>
                </Show>

                <div class="card bg-base-100 shadow-xl">
                    <form class="card-body" on:submit=on_submit>
                        <div class="stat px-0">
                            <div class="stat-title">"Order total"</div>
                            <div class="stat-value text-primary">
                                {move || format!("${:.2}", cart.get().total)}
                            </div>
                        </div>

                        <div class="form-control">
                            <label class="label" for="card-number">
                                <span class="label-text">"Card number"</span>
                            </label>
                            <input
                                id="card-number"
                                type="text"
                                placeholder="4242 4242 4242 4242"
                                class="input input-bordered"
                                on:input=move |ev| set_card_number.set(event_target_value(&ev))
                                prop:value=card_number
                            />
                        </div>
                        <div class="form-control">
                            <label class="label" for="card-holder">
                                <span class="label-text">"Name on card"</span>
                            </label>
                            <input
                                id="card-holder"
                                type="text"
                                placeholder="ADA LOVELACE"
                                class="input input-bordered"
                                on:input=move |ev| set_card_holder.set(event_target_value(&ev))
                                prop:value=card_holder
                            />
                        </div>

                        <div class="form-control mt-4">
                            <button class="btn btn-primary" disabled=move || processing.get()>
                                {move || if processing.get() {
                                    view! { <span class="loading loading-spinner"></span> "Processing..." }.into_any()
                                } else {
                                    "Pay now".into_any()
                                }}
                            </button>
                        </div>
                        <button
                            type="button"
                            class="btn btn-ghost btn-sm"
                            on:click=move |_| router.navigate_to(AppRoute::Cart)
                        >
                            "Back to cart"
                        </button>
                    </form>
                </div>
            </div>
        </div>
    }
}

#[component]
pub fn PaymentSuccessPage() -> impl IntoView {
    let router = use_router();

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content text-center">
                <div class="max-w-md space-y-4">
                    <CheckCircleIcon class="h-16 w-16 text-success mx-auto" />
                    <h1 class="text-4xl font-bold">"Order confirmed!"</h1>
                    <p class="text-base-content/70">
                        "Your order is on its way to the counter. Grab a seat, we will call your name."
                    </p>
                    <div class="flex justify-center gap-4">
                        <button
                            class="btn btn-primary"
                            on:click=move |_| router.navigate_to(AppRoute::Products)
                        >
                            "Keep browsing"
                        </button>
                        <button
                            class="btn btn-ghost"
                            on:click=move |_| router.navigate_to(AppRoute::Home)
                        >
                            "Home"
                        </button>
                    </div>
                </div>
            </div>
        </div>
    }
}
