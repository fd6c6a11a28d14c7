use brewhaven_shared::models::Product;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::icons::{CalendarIcon, TrophyIcon};
use crate::session::handle::use_session;
use crate::web::route::AppRoute;
use crate::web::router::use_router;

#[component]
pub fn HomePage() -> impl IntoView {
    let session = use_session();
    let router = use_router();

    let (featured, set_featured) = signal(Vec::<Product>::new());

    // 首页亮点位：取目录前三件商品
    let api = session.api();
    spawn_local(async move {
        if let Ok(products) = api.products().await {
            set_featured.set(products.into_iter().take(3).collect());
        }
    });

    view! {
        <div class="min-h-screen bg-base-200">
            <div class="hero bg-gradient-to-br from-primary/20 to-base-200 py-20">
                <div class="hero-content text-center">
                    <div class="max-w-2xl space-y-6">
                        <h1 class="text-5xl font-bold">"Coffee, dice & high scores"</h1>
                        <p class="text-lg text-base-content/70">
                            "Specialty brews, gaming lounges and tabletop nights under one roof. Order at the counter or book your table before the rush."
                        </p>
                        <div class="flex justify-center gap-4">
                            <button
                                class="btn btn-primary"
                                on:click=move |_| router.navigate_to(AppRoute::Products)
                            >
                                "Browse the menu"
                            </button>
                            <button
                                class="btn btn-outline gap-2"
                                on:click=move |_| router.navigate_to(AppRoute::Reservations)
                            >
                                <CalendarIcon class="h-5 w-5" />
                                "Book a space"
                            </button>
                        </div>
                    </div>
                </div>
            </div>

            <div class="max-w-6xl mx-auto p-8 space-y-6">
                <h2 class="text-3xl font-bold text-center">"Featured this week"</h2>
                <Show
                    when=move || !featured.get().is_empty()
                    fallback=|| view! {
                        <div class="flex justify-center py-8">
                            <span class="loading loading-dots loading-md"></span>
                        </div>
                    }
                >
                    <div class="grid md:grid-cols-3 gap-6">
                        <For
                            each=move || featured.get()
                            key=|product| product.id
                            let:product
                        >
                            <div class="card bg-base-100 shadow-md">
                                <div class="card-body">
                                    <h3 class="card-title">{product.name.clone()}</h3>
                                    <p class="text-sm text-base-content/70">
                                        {product.description.clone()}
                                    </p>
                                    <div class="card-actions justify-between items-center mt-2">
                                        <span class="text-lg font-semibold text-primary">
                                            {format!("${:.2}", product.price)}
                                        </span>
                                        <span class="badge badge-ghost">{product.category.clone()}</span>
                                    </div>
                                </div>
                            </div>
                        </For>
                    </div>
                </Show>

                <div class="card bg-base-100 shadow-md">
                    <div class="card-body md:flex-row items-center justify-between gap-4">
                        <div class="flex items-center gap-4">
                            <TrophyIcon class="h-10 w-10 text-primary" />
                            <div>
                                <h3 class="text-xl font-bold">"Host your own tournament"</h3>
                                <p class="text-sm text-base-content/70">
                                    "From casual brackets to season finals, tell us what you are planning."
                                </p>
                            </div>
                        </div>
                        <button
                            class="btn btn-secondary"
                            on:click=move |_| router.navigate_to(AppRoute::Tournament)
                        >
                            "Request an event"
                        </button>
                    </div>
                </div>
            </div>
        </div>
    }
}
