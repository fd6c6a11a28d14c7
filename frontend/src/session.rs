//! 会话存储 (Session Store)
//!
//! 拥有客户端对"当前用户是谁"的全部信念，并提供唯一合法的变更入口。
//! 状态机：`Initializing -> {Unauthenticated, Authenticated}`，
//! 登录/登出在后两者之间切换，不存在其他迁移。
//!
//! 不变量由类型本身编码：用户与令牌只存在于 `Authenticated` 变体中，
//! 因此"有用户无令牌"或"有令牌无用户"的中间态不可表示。
//!
//! 网络与持久化通过 [`AuthGateway`] / [`TokenSlot`] 适配器注入，
//! 核心逻辑可在原生测试中以 mock 驱动。

use std::cell::RefCell;
use std::rc::Rc;

use async_trait::async_trait;

use brewhaven_shared::models::User;
use brewhaven_shared::protocol::TokenGrant;

use crate::error::ApiError;

pub mod handle;

#[cfg(test)]
mod tests;

// =========================================================
// 会话状态 (Session)
// =========================================================

/// 客户端会话状态
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Session {
    /// 启动中：持久化令牌的校验尚未完成
    #[default]
    Initializing,
    /// 未认证
    Unauthenticated,
    /// 已认证：身份与令牌同生共死
    Authenticated { user: User, token: String },
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Session::Authenticated { .. })
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Session::Authenticated { user, .. } if user.is_admin())
    }

    pub fn user(&self) -> Option<&User> {
        match self {
            Session::Authenticated { user, .. } => Some(user),
            _ => None,
        }
    }

    pub fn token(&self) -> Option<&str> {
        match self {
            Session::Authenticated { token, .. } => Some(token.as_str()),
            _ => None,
        }
    }
}

// =========================================================
// 适配器 (Adapters)
// =========================================================

/// 认证后端网关
#[async_trait(?Send)]
pub trait AuthGateway {
    /// 凭据交换：成功返回不透明令牌
    async fn login(&self, email: &str, password: &str) -> Result<TokenGrant, ApiError>;
    /// 创建账户，返回新建身份
    async fn register(&self, name: &str, email: &str, password: &str) -> Result<User, ApiError>;
    /// 以给定令牌拉取当前身份
    async fn profile(&self, token: &str) -> Result<User, ApiError>;
}

/// 持久化令牌槽：单一槽位，后写覆盖
pub trait TokenSlot {
    fn load(&self) -> Option<String>;
    fn store(&self, token: &str);
    fn clear(&self);
}

// Rc 句柄可直接当作槽使用，方便与 HTTP 客户端共享同一槽位
impl<T: TokenSlot + ?Sized> TokenSlot for Rc<T> {
    fn load(&self) -> Option<String> {
        (**self).load()
    }
    fn store(&self, token: &str) {
        (**self).store(token)
    }
    fn clear(&self) {
        (**self).clear()
    }
}

// =========================================================
// 会话存储 (SessionStore)
// =========================================================

type Listener = Box<dyn Fn(&Session)>;

/// 会话的独占所有者
///
/// 其他组件只读状态或调用这里的操作，绝不直接改写。
/// 状态变更通过显式订阅机制向外发布。
pub struct SessionStore<G, S> {
    gateway: G,
    tokens: S,
    state: RefCell<Session>,
    listeners: RefCell<Vec<Listener>>,
}

impl<G: AuthGateway, S: TokenSlot> SessionStore<G, S> {
    /// 创建存储，初始状态为 `Initializing`
    pub fn new(gateway: G, tokens: S) -> Self {
        Self {
            gateway,
            tokens,
            state: RefCell::new(Session::Initializing),
            listeners: RefCell::new(Vec::new()),
        }
    }

    /// 订阅状态变更通知
    pub fn subscribe(&self, listener: impl Fn(&Session) + 'static) {
        self.listeners.borrow_mut().push(Box::new(listener));
    }

    /// 当前状态快照
    pub fn snapshot(&self) -> Session {
        self.state.borrow().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_authenticated()
    }

    pub fn is_admin(&self) -> bool {
        self.state.borrow().is_admin()
    }

    /// 同步写入新状态并通知订阅者。借用不跨越任何挂起点，
    /// 通知时不持有状态借用，订阅者可安全回读。
    fn transition(&self, next: Session) {
        *self.state.borrow_mut() = next.clone();
        for listener in self.listeners.borrow().iter() {
            listener(&next);
        }
    }

    /// 启动恢复：校验持久化令牌
    ///
    /// 任何失败（令牌失效、网络故障）都静默清槽并落到 `Unauthenticated`，
    /// 这是预期的恢复路径，绝不向用户冒泡错误。
    pub async fn restore(&self) {
        let Some(token) = self.tokens.load() else {
            self.transition(Session::Unauthenticated);
            return;
        };
        match self.gateway.profile(&token).await {
            Ok(user) => self.transition(Session::Authenticated { user, token }),
            Err(_) => {
                self.tokens.clear();
                self.transition(Session::Unauthenticated);
            }
        }
    }

    /// 登录：凭据交换 -> 持久化令牌 -> 拉取身份
    ///
    /// 凭据交换失败时状态保持不变；
    /// 身份拉取失败时必须清槽并落到 `Unauthenticated`，
    /// 不允许出现"半认证"状态。
    pub async fn login(&self, email: &str, password: &str) -> Result<(), ApiError> {
        let grant = self.gateway.login(email, password).await?;
        self.tokens.store(&grant.access_token);

        match self.gateway.profile(&grant.access_token).await {
            Ok(user) => {
                self.transition(Session::Authenticated {
                    user,
                    token: grant.access_token,
                });
                Ok(())
            }
            Err(err) => {
                self.tokens.clear();
                self.transition(Session::Unauthenticated);
                Err(err)
            }
        }
    }

    /// 注册：创建账户后以相同凭据登录，报告最先发生的失败
    pub async fn register(&self, name: &str, email: &str, password: &str) -> Result<(), ApiError> {
        self.gateway.register(name, email, password).await?;
        self.login(email, password).await
    }

    /// 登出：清槽并复位，无条件成功且幂等
    pub fn logout(&self) {
        self.tokens.clear();
        self.transition(Session::Unauthenticated);
    }
}
