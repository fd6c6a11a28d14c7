//! 会话的 Leptos 绑定
//!
//! 会话存储在 App 根部构造一次，以显式句柄（而非隐式全局态）
//! 注入 Context 供各视图使用。存储通过订阅机制把状态变更
//! 镜像到只读信号上，守卫与视图据此重新求值。

use std::rc::Rc;

use leptos::prelude::*;
use send_wrapper::SendWrapper;
use leptos::task::spawn_local;

use crate::api::ApiClient;
use crate::config;
use crate::error::ApiError;
use crate::web::storage::BrowserTokenSlot;

use super::{Session, SessionStore, TokenSlot};

type AppStore = SessionStore<ApiClient, Rc<BrowserTokenSlot>>;

/// 会话句柄：存储的共享引用 + 状态镜像信号
#[derive(Clone)]
pub struct SessionHandle {
    // SendWrapper 满足 Leptos Context 的 Send + Sync 约束；CSR 单线程下安全
    store: SendWrapper<Rc<AppStore>>,
    api: ApiClient,
    state: ReadSignal<Session>,
}

impl SessionHandle {
    fn new() -> Self {
        let slot = Rc::new(BrowserTokenSlot);
        let api = ApiClient::new(config::api_base_url(), slot.clone() as Rc<dyn TokenSlot>);
        let store = Rc::new(SessionStore::new(api.clone(), slot));

        let (state, set_state) = signal(Session::Initializing);
        store.subscribe(move |session| set_state.set(session.clone()));

        // 启动时校验持久化令牌；失败是静默恢复路径
        let startup = store.clone();
        spawn_local(async move { startup.restore().await });

        Self {
            store: SendWrapper::new(store),
            api,
            state,
        }
    }

    /// 状态镜像信号（守卫与路由的输入）
    pub fn session_signal(&self) -> Signal<Session> {
        self.state.into()
    }

    pub fn is_authenticated(&self) -> Signal<bool> {
        let state = self.state;
        Signal::derive(move || state.get().is_authenticated())
    }

    pub fn is_admin(&self) -> Signal<bool> {
        let state = self.state;
        Signal::derive(move || state.get().is_admin())
    }

    /// 当前身份快照（非响应式读取）
    pub fn current_user(&self) -> Option<brewhaven_shared::models::User> {
        self.state.get_untracked().user().cloned()
    }

    /// 共享的 HTTP 客户端
    pub fn api(&self) -> ApiClient {
        self.api.clone()
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<(), ApiError> {
        self.store.login(email, password).await
    }

    pub async fn register(&self, name: &str, email: &str, password: &str) -> Result<(), ApiError> {
        self.store.register(name, email, password).await
    }

    pub fn logout(&self) {
        self.store.logout();
    }
}

/// 构造会话句柄并注入 Context（App 根部调用一次）
pub fn provide_session() -> SessionHandle {
    let handle = SessionHandle::new();
    provide_context(handle.clone());
    handle
}

/// 从 Context 获取会话句柄
pub fn use_session() -> SessionHandle {
    use_context::<SessionHandle>().expect("SessionHandle should be provided")
}
