use crate::components::icons::{CartIcon, CoffeeIcon};
use crate::session::handle::use_session;
use crate::web::route::AppRoute;
use crate::web::router::use_router;
use leptos::prelude::*;

#[component]
pub fn Navbar() -> impl IntoView {
    let session = use_session();
    let router = use_router();

    let state = session.session_signal();
    let is_authenticated = session.is_authenticated();
    let is_admin = session.is_admin();
    let user_name = move || {
        state
            .get()
            .user()
            .map(|user| user.name.clone())
            .unwrap_or_default()
    };

    let on_logout = {
        let session = session.clone();
        move |_| {
            // 路由服务监听会话变化，受保护页会自动改道登录
            session.logout();
        }
    };

    view! {
        <div class="navbar bg-base-100 shadow-md sticky top-0 z-40">
            <div class="navbar-start">
                <button
                    class="btn btn-ghost text-xl gap-2"
                    on:click=move |_| router.navigate_to(AppRoute::Home)
                >
                    <CoffeeIcon class="h-6 w-6 text-primary" />
                    "BrewHaven"
                </button>
            </div>
            <div class="navbar-center hidden lg:flex">
                <ul class="menu menu-horizontal px-1">
                    <li><button on:click=move |_| router.navigate_to(AppRoute::Products)>"Menu"</button></li>
                    <li><button on:click=move |_| router.navigate_to(AppRoute::Reservations)>"Reservations"</button></li>
                    <li><button on:click=move |_| router.navigate_to(AppRoute::Tournament)>"Tournaments"</button></li>
                    <Show when=move || is_admin.get()>
                        <li><button on:click=move |_| router.navigate_to(AppRoute::Admin)>"Back office"</button></li>
                    </Show>
                </ul>
            </div>
            <div class="navbar-end gap-2">
                <button
                    class="btn btn-ghost btn-circle"
                    on:click=move |_| router.navigate_to(AppRoute::Cart)
                >
                    <CartIcon class="h-5 w-5" />
                </button>
                <Show
                    when=move || is_authenticated.get()
                    fallback=move || view! {
                        <button
                            class="btn btn-primary btn-sm"
                            on:click=move |_| router.navigate_to(AppRoute::Auth)
                        >
                            "Sign in"
                        </button>
                    }
                >
                    <span class="text-sm hidden md:inline">{user_name}</span>
                    <button class="btn btn-outline btn-sm" on:click=on_logout.clone()>
                        "Sign out"
                    </button>
                </Show>
            </div>
        </div>
    }
}
