//! 路由定义模块 - 领域模型
//!
//! 纯业务逻辑层，不依赖 DOM 或 web_sys。
//! 定义应用的所有路由、其 URL 及访问级别。

use std::fmt::Display;

use crate::guard::Access;

/// 应用路由枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppRoute {
    /// 首页（默认路由）
    #[default]
    Home,
    /// 商品目录
    Products,
    /// 购物车（需要登录）
    Cart,
    /// 场地预约（需要登录）
    Reservations,
    /// 赛事申请表单
    Tournament,
    /// 模拟支付（需要登录）
    Payment,
    /// 支付完成
    PaymentSuccess,
    /// 登录/注册
    Auth,
    /// 后台管理（需要 admin）
    Admin,
    /// 页面未找到
    NotFound,
}

impl AppRoute {
    /// 将 URL path 解析为路由枚举
    pub fn from_path(path: &str) -> Self {
        match path {
            "/" => Self::Home,
            "/products" => Self::Products,
            "/cart" => Self::Cart,
            "/reservations" => Self::Reservations,
            "/tournament" => Self::Tournament,
            "/payment" => Self::Payment,
            "/payment-success" => Self::PaymentSuccess,
            "/auth" | "/login" => Self::Auth,
            "/admin" => Self::Admin,
            _ => Self::NotFound,
        }
    }

    /// 获取路由对应的 URL path
    pub fn to_path(&self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Products => "/products",
            Self::Cart => "/cart",
            Self::Reservations => "/reservations",
            Self::Tournament => "/tournament",
            Self::Payment => "/payment",
            Self::PaymentSuccess => "/payment-success",
            Self::Auth => "/auth",
            Self::Admin => "/admin",
            Self::NotFound => "/404",
        }
    }

    /// **核心守卫输入：该路由的访问级别**
    pub fn access(&self) -> Access {
        match self {
            Self::Cart | Self::Reservations | Self::Payment | Self::PaymentSuccess => {
                Access::SignedIn
            }
            Self::Admin => Access::Admin,
            _ => Access::Public,
        }
    }

    /// 已认证用户是否应离开此路由（登录页）
    pub fn should_redirect_when_authenticated(&self) -> bool {
        matches!(self, Self::Auth)
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_paths_round_trip() {
        for route in [
            AppRoute::Home,
            AppRoute::Products,
            AppRoute::Cart,
            AppRoute::Reservations,
            AppRoute::Tournament,
            AppRoute::Payment,
            AppRoute::PaymentSuccess,
            AppRoute::Auth,
            AppRoute::Admin,
        ] {
            assert_eq!(AppRoute::from_path(route.to_path()), route);
        }
    }

    #[test]
    fn unknown_path_is_not_found() {
        assert_eq!(AppRoute::from_path("/bogus"), AppRoute::NotFound);
    }

    #[test]
    fn login_alias_resolves_to_auth() {
        assert_eq!(AppRoute::from_path("/login"), AppRoute::Auth);
    }

    #[test]
    fn access_levels_match_the_storefront_rules() {
        assert_eq!(AppRoute::Products.access(), Access::Public);
        assert_eq!(AppRoute::Tournament.access(), Access::Public);
        assert_eq!(AppRoute::Cart.access(), Access::SignedIn);
        assert_eq!(AppRoute::Reservations.access(), Access::SignedIn);
        assert_eq!(AppRoute::Payment.access(), Access::SignedIn);
        assert_eq!(AppRoute::Admin.access(), Access::Admin);
    }
}
