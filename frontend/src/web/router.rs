//! 路由服务模块 - 核心引擎
//!
//! 封装 History API，所有对 window.history 的操作集中在此。
//! 通过注入的会话信号执行守卫决策："请求 -> 验证(Guard) -> 处理 -> 加载"。
//! 未认证跳转会记住原始目标，登录成功后自动返回。

use leptos::prelude::*;
use wasm_bindgen::prelude::*;

use crate::guard::{self, GuardOutcome};
use crate::session::Session;

use super::route::AppRoute;

/// 获取当前浏览器路径
fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

/// 推送 History 状态
fn push_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.push_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// 替换 History 状态（用于重定向）
fn replace_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// 路由器服务
///
/// 路由状态通过 Signal 驱动界面更新；守卫所需的会话状态
/// 以注入信号的形式提供，与会话系统解耦。
#[derive(Clone, Copy)]
pub struct RouterService {
    current_route: ReadSignal<AppRoute>,
    set_route: WriteSignal<AppRoute>,
    /// 注入的会话状态（守卫输入）
    session: Signal<Session>,
    /// 未认证跳转时记下的原始目标，登录成功后返回
    pending_target: RwSignal<Option<AppRoute>>,
}

impl RouterService {
    fn new(session: Signal<Session>) -> Self {
        let initial_route = AppRoute::from_path(&current_path());
        let (current_route, set_route) = signal(initial_route);

        Self {
            current_route,
            set_route,
            session,
            pending_target: RwSignal::new(None),
        }
    }

    /// 当前路由信号
    pub fn current_route(&self) -> ReadSignal<AppRoute> {
        self.current_route
    }

    /// 守卫使用的会话信号
    pub fn session(&self) -> Signal<Session> {
        self.session
    }

    /// 按路径导航
    pub fn navigate(&self, path: &str) {
        self.navigate_to(AppRoute::from_path(path));
    }

    /// **核心方法：导航与守卫**
    pub fn navigate_to(&self, target: AppRoute) {
        self.resolve(target, true);
    }

    /// 导航到目标路由
    ///
    /// 未认证访问受保护路由时改道登录页并保留原始目标；
    /// 权限不足与加载中由出口组件就地渲染，不在这里改道。
    fn resolve(&self, target: AppRoute, use_push: bool) {
        let session = self.session.get_untracked();

        // 已认证用户访问登录页：直接送回记下的目标（默认首页）
        if target.should_redirect_when_authenticated() && session.is_authenticated() {
            let target = self
                .pending_target
                .get_untracked()
                .unwrap_or(AppRoute::Home);
            self.pending_target.set(None);
            if use_push {
                push_history_state(target.to_path());
            } else {
                replace_history_state(target.to_path());
            }
            self.set_route.set(target);
            return;
        }

        let destination = match guard::evaluate(&session, target.access()) {
            GuardOutcome::RedirectToLogin => {
                web_sys::console::log_1(
                    &"[router] sign-in required, redirecting to /auth".into(),
                );
                self.pending_target.set(Some(target));
                AppRoute::Auth
            }
            _ => target,
        };

        if use_push {
            push_history_state(destination.to_path());
        } else {
            replace_history_state(destination.to_path());
        }
        self.set_route.set(destination);
    }

    /// 初始化浏览器后退/前进按钮监听
    fn init_popstate_listener(&self) {
        let service = *self;

        let closure = Closure::<dyn Fn()>::new(move || {
            // popstate 也要走守卫，且用 replace 避免污染历史栈
            service.resolve(AppRoute::from_path(&current_path()), false);
        });

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
        }

        // 泄漏闭包以保持监听器存活
        closure.forget();
    }

    /// 会话状态变化时的自动重定向
    ///
    /// - 登录成功且停在登录页：返回记下的原始目标（默认首页）
    /// - 登出（或启动校验失败）且停在受保护页：改道登录页
    fn setup_session_redirects(&self) {
        let service = *self;

        Effect::new(move |_| {
            let session = service.session.get();
            let route = service.current_route.get_untracked();

            match &session {
                Session::Authenticated { .. } if route.should_redirect_when_authenticated() => {
                    let target = service
                        .pending_target
                        .get_untracked()
                        .unwrap_or(AppRoute::Home);
                    service.pending_target.set(None);
                    web_sys::console::log_1(
                        &format!("[router] signed in, continuing to {target}").into(),
                    );
                    push_history_state(target.to_path());
                    service.set_route.set(target);
                }
                Session::Unauthenticated
                    if guard::evaluate(&session, route.access())
                        == GuardOutcome::RedirectToLogin =>
                {
                    service.pending_target.set(Some(route));
                    replace_history_state(AppRoute::Auth.to_path());
                    service.set_route.set(AppRoute::Auth);
                }
                _ => {}
            }
        });
    }
}

/// 提供路由服务到 Context 并初始化
fn provide_router(session: Signal<Session>) -> RouterService {
    let router = RouterService::new(session);

    router.init_popstate_listener();
    router.setup_session_redirects();

    provide_context(router);
    router
}

/// 从 Context 获取路由服务
pub fn use_router() -> RouterService {
    use_context::<RouterService>()
        .expect("RouterService not found in context. Ensure Router is provided.")
}

// ============================================================================
// UI 组件
// ============================================================================

/// 路由器根组件，应在 App 根部使用
#[component]
pub fn Router(
    /// 会话状态信号（守卫输入）
    session: Signal<Session>,
    /// 子组件
    children: Children,
) -> impl IntoView {
    provide_router(session);

    children()
}

/// 路由出口组件
///
/// 根据当前路由与守卫决策渲染对应视图。
/// 会话信号变化会触发重新求值，已渲染的受保护视图随登出即时撤销。
#[component]
pub fn RouterOutlet(
    /// 路由匹配函数：接收当前路由，返回对应视图
    matcher: fn(AppRoute) -> AnyView,
) -> impl IntoView {
    let router = use_router();

    move || {
        let route = router.current_route().get();
        let session = router.session().get();

        match guard::evaluate(&session, route.access()) {
            GuardOutcome::Allow => matcher(route),
            GuardOutcome::Loading | GuardOutcome::RedirectToLogin => view! {
                <div class="flex items-center justify-center min-h-screen bg-base-200">
                    <span class="loading loading-spinner loading-lg text-primary"></span>
                </div>
            }
            .into_any(),
            GuardOutcome::Denied => view! { <AccessDenied /> }.into_any(),
        }
    }
}

/// 权限不足提示页（就地渲染，不改道）
#[component]
fn AccessDenied() -> impl IntoView {
    let router = use_router();

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content text-center">
                <div class="max-w-md space-y-4">
                    <h1 class="text-4xl font-bold text-error">"Access denied"</h1>
                    <p class="text-base-content/70">
                        "You do not have permission to view this page. Only administrators can access the back office."
                    </p>
                    <button
                        class="btn btn-primary"
                        on:click=move |_| router.navigate_to(AppRoute::Home)
                    >
                        "Back to home"
                    </button>
                </div>
            </div>
        </div>
    }
}
