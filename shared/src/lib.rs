//! BrewHaven 共享数据模型
//!
//! 前端与后端 REST API 之间的线上契约（wire contract）。
//! 所有类型均可序列化，字段命名与后端 JSON 保持一致。

pub mod models;
pub mod protocol;

pub use models::{Cart, CartItem, Order, OrderItem, Product, Reservation, User};
pub use protocol::{
    ActionReply, AddCartItem, LoginRequest, NewProduct, NewReservation, RegisterRequest,
    ReservationUpdate, StatusUpdate, TokenGrant, UpdateQuantity,
};

// =========================================================
// 常量定义 (Constants)
// =========================================================

/// 后台管理权限对应的角色标签
pub const ROLE_ADMIN: &str = "admin";
