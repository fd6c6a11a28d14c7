//! 领域模型 (Domain Models)
//!
//! 服务端拥有的记录快照：客户端只读取，不推导。
//! 例如用户角色由服务端下发，客户端绝不自行计算。

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::ROLE_ADMIN;

/// 已登录主体的身份记录
///
/// 由 `GET /auth/profile` 返回，服务端视角下不可变。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    /// 角色标签："user" 或 "admin"
    pub role: String,
}

impl User {
    /// 是否拥有后台管理权限
    pub fn is_admin(&self) -> bool {
        self.role == ROLE_ADMIN
    }
}

/// 商品记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub stock: i64,
}

/// 购物车条目（携带商品快照）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: i64,
    pub product_id: i64,
    pub quantity: u32,
    pub product: Product,
}

/// 购物车整体视图，总价由服务端计算
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Cart {
    pub items: Vec<CartItem>,
    pub total: f64,
}

/// 场地预约记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reservation {
    pub id: i64,
    pub user_id: i64,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub people_count: u32,
    /// 状态标签："pending" / "confirmed" / "cancelled"，以服务端为准
    pub status: String,
    pub created_at: NaiveDateTime,
}

/// 订单记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    pub user_id: i64,
    pub total: f64,
    pub status: String,
    pub created_at: NaiveDateTime,
    pub items: Vec<OrderItem>,
}

/// 订单条目，`price` 为下单时的成交单价
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: i64,
    pub product_id: i64,
    pub quantity: u32,
    pub price: f64,
    pub product: Product,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_parses_backend_shape() {
        let raw = r#"{"id":7,"name":"Ana","email":"ana@example.com","role":"admin"}"#;
        let user: User = serde_json::from_str(raw).unwrap();
        assert_eq!(user.id, 7);
        assert!(user.is_admin());
    }

    #[test]
    fn ordinary_role_is_not_admin() {
        let user = User {
            id: 1,
            name: "Bob".into(),
            email: "bob@example.com".into(),
            role: "user".into(),
        };
        assert!(!user.is_admin());
    }

    #[test]
    fn product_image_is_optional() {
        let raw = r#"{"id":1,"name":"Latte","description":"","price":4.5,"category":"drinks","stock":12}"#;
        let product: Product = serde_json::from_str(raw).unwrap();
        assert_eq!(product.image, None);
        assert_eq!(product.stock, 12);
    }

    #[test]
    fn reservation_parses_fastapi_datetimes() {
        let raw = r#"{
            "id": 3,
            "user_id": 7,
            "date": "2026-09-01",
            "time": "19:30:00",
            "people_count": 4,
            "status": "pending",
            "created_at": "2026-08-23T14:02:11"
        }"#;
        let reservation: Reservation = serde_json::from_str(raw).unwrap();
        assert_eq!(reservation.people_count, 4);
        assert_eq!(reservation.date.to_string(), "2026-09-01");
        assert_eq!(reservation.time.to_string(), "19:30:00");
    }

    #[test]
    fn cart_defaults_to_empty() {
        let cart = Cart::default();
        assert!(cart.items.is_empty());
        assert_eq!(cart.total, 0.0);
    }
}
