//! BrewHaven 前端应用
//!
//! 主题桌游/电竞咖啡馆的浏览器端门店，持久化全部依赖远端 REST 后端。
//! 采用 Context-Driven 的高内聚低耦合架构：
//! - `api`: HTTP 客户端（唯一的后端通信通道）
//! - `session`: 会话存储（认证状态的独占所有者）
//! - `guard`: 路由守卫（纯决策函数）
//! - `web::route` / `web::router`: 路由领域模型与服务
//! - `components`: UI 组件层

pub mod api;
pub mod config;
pub mod error;
pub mod guard;
pub mod session;
pub mod web;

mod components {
    pub mod admin;
    pub mod auth_page;
    pub mod cart;
    pub mod home;
    mod icons;
    pub mod navbar;
    pub mod payment;
    pub mod products;
    pub mod reservations;
    pub mod tournament;
}

use leptos::prelude::*;

use crate::components::admin::AdminPage;
use crate::components::auth_page::AuthPage;
use crate::components::cart::CartPage;
use crate::components::home::HomePage;
use crate::components::navbar::Navbar;
use crate::components::payment::{PaymentPage, PaymentSuccessPage};
use crate::components::products::ProductsPage;
use crate::components::reservations::ReservationsPage;
use crate::components::tournament::TournamentPage;
use crate::session::handle::provide_session;
use crate::web::route::AppRoute;
use crate::web::router::{Router, RouterOutlet};

/// 路由匹配函数
///
/// 根据 AppRoute 枚举返回对应的视图组件。
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Home => view! { <HomePage /> }.into_any(),
        AppRoute::Products => view! { <ProductsPage /> }.into_any(),
        AppRoute::Cart => view! { <CartPage /> }.into_any(),
        AppRoute::Reservations => view! { <ReservationsPage /> }.into_any(),
        AppRoute::Tournament => view! { <TournamentPage /> }.into_any(),
        AppRoute::Payment => view! { <PaymentPage /> }.into_any(),
        AppRoute::PaymentSuccess => view! { <PaymentSuccessPage /> }.into_any(),
        AppRoute::Auth => view! { <AuthPage /> }.into_any(),
        AppRoute::Admin => view! { <AdminPage /> }.into_any(),
        AppRoute::NotFound => view! {
            <div class="flex items-center justify-center min-h-screen bg-base-200">
                <div class="text-center">
                    <h1 class="text-6xl font-bold text-error">"404"</h1>
                    <p class="text-xl mt-4">"Page not found"</p>
                </div>
            </div>
        }
        .into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 1. 构造会话句柄并注入 Context（整个进程只此一次）
    let session = provide_session();

    // 2. 路由器组件：注入会话信号实现守卫
    view! {
        <Router session=session.session_signal()>
            <Navbar />
            <RouterOutlet matcher=route_matcher />
        </Router>
    }
}
