//! 请求/响应载荷 (Request Payloads)
//!
//! REST API 各端点的请求体与轻量响应体定义。

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

// =========================================================
// 认证 (Auth)
// =========================================================

/// `POST /auth/login` 请求体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// 凭据交换成功后下发的不透明令牌
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenGrant {
    pub access_token: String,
    pub token_type: String,
}

/// `POST /auth/register` 请求体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

// =========================================================
// 商品与购物车 (Products & Cart)
// =========================================================

/// 商品创建/更新载荷（管理端）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub stock: i64,
}

/// `POST /cart/add` 请求体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddCartItem {
    pub product_id: i64,
    pub quantity: u32,
}

/// `PUT /cart/update/:itemId` 请求体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateQuantity {
    pub quantity: u32,
}

// =========================================================
// 预约与订单 (Reservations & Orders)
// =========================================================

/// `POST /reservations` 请求体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewReservation {
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub people_count: u32,
}

/// `PUT /reservations/:id` 请求体，所有字段可选
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReservationUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<NaiveTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub people_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// `PUT /reservations/:id/status` 与 `PUT /orders/:id/status` 请求体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusUpdate {
    pub status: String,
}

/// 操作型端点的通用确认响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionReply {
    pub message: String,
    #[serde(default)]
    pub detail: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reservation_update_skips_absent_fields() {
        let update = ReservationUpdate {
            people_count: Some(6),
            ..Default::default()
        };
        let raw = serde_json::to_string(&update).unwrap();
        assert_eq!(raw, r#"{"people_count":6}"#);
    }

    #[test]
    fn token_grant_parses_login_response() {
        let raw = r#"{"access_token":"abc.def.ghi","token_type":"bearer"}"#;
        let grant: TokenGrant = serde_json::from_str(raw).unwrap();
        assert_eq!(grant.access_token, "abc.def.ghi");
    }

    #[test]
    fn action_reply_detail_is_optional() {
        let reply: ActionReply = serde_json::from_str(r#"{"message":"ok"}"#).unwrap();
        assert_eq!(reply.detail, None);
    }
}
