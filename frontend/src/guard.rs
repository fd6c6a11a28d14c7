//! 路由守卫 (Route Guard)
//!
//! 纯决策函数：给定会话状态与路由的访问级别，决定受保护视图
//! 渲染、等待、跳转登录还是展示拒绝页。无任何副作用，
//! 会话状态每次变化都必须重新求值（由响应式外层保证），
//! 例如并发登出要立即撤销已渲染的受保护视图。

use crate::session::Session;

/// 路由的访问级别
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// 任何人可见
    Public,
    /// 需要登录
    SignedIn,
    /// 需要登录且角色为 admin
    Admin,
}

/// 守卫决策
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardOutcome {
    /// 渲染受保护内容
    Allow,
    /// 启动校验未完成：渲染中性加载指示，不跳转、不渲染、不拒绝
    Loading,
    /// 未认证：跳转登录页，并保留原始目标以便登录后返回
    RedirectToLogin,
    /// 已认证但权限不足：就地告知，而非静默弹走
    Denied,
}

/// 守卫决策函数
pub fn evaluate(session: &Session, access: Access) -> GuardOutcome {
    if access == Access::Public {
        return GuardOutcome::Allow;
    }
    match session {
        Session::Initializing => GuardOutcome::Loading,
        Session::Unauthenticated => GuardOutcome::RedirectToLogin,
        Session::Authenticated { user, .. } => {
            if access == Access::Admin && !user.is_admin() {
                GuardOutcome::Denied
            } else {
                GuardOutcome::Allow
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use brewhaven_shared::models::User;

    fn authenticated(role: &str) -> Session {
        Session::Authenticated {
            user: User {
                id: 1,
                name: "Ana".to_string(),
                email: "a@b.com".to_string(),
                role: role.to_string(),
            },
            token: "tok-1".to_string(),
        }
    }

    #[test]
    fn initializing_always_waits_on_guarded_routes() {
        for access in [Access::SignedIn, Access::Admin] {
            assert_eq!(
                evaluate(&Session::Initializing, access),
                GuardOutcome::Loading
            );
        }
    }

    #[test]
    fn unauthenticated_redirects_to_login() {
        for access in [Access::SignedIn, Access::Admin] {
            assert_eq!(
                evaluate(&Session::Unauthenticated, access),
                GuardOutcome::RedirectToLogin
            );
        }
    }

    #[test]
    fn ordinary_user_is_denied_on_admin_routes() {
        assert_eq!(
            evaluate(&authenticated("user"), Access::Admin),
            GuardOutcome::Denied
        );
    }

    #[test]
    fn admin_renders_admin_routes() {
        assert_eq!(
            evaluate(&authenticated("admin"), Access::Admin),
            GuardOutcome::Allow
        );
    }

    #[test]
    fn signed_in_routes_render_for_any_role() {
        assert_eq!(
            evaluate(&authenticated("user"), Access::SignedIn),
            GuardOutcome::Allow
        );
        assert_eq!(
            evaluate(&authenticated("admin"), Access::SignedIn),
            GuardOutcome::Allow
        );
    }

    #[test]
    fn public_routes_render_regardless_of_session() {
        for session in [
            Session::Initializing,
            Session::Unauthenticated,
            authenticated("user"),
        ] {
            assert_eq!(evaluate(&session, Access::Public), GuardOutcome::Allow);
        }
    }
}
