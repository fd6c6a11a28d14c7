//! HTTP 客户端 (API Client)
//!
//! 与后端通信的唯一通道：负责基地址解析、请求头构造、
//! 响应解码与错误分类。每次调用只尝试一次，不做重试与超时，
//! 是否重试由调用方决定。本模块不修改会话状态。

use std::rc::Rc;

use async_trait::async_trait;
use gloo_net::http::{Method, RequestBuilder};
use send_wrapper::SendWrapper;
use serde::Serialize;
use serde::de::DeserializeOwned;

use brewhaven_shared::models::{Cart, Order, Product, Reservation, User};
use brewhaven_shared::protocol::{
    ActionReply, AddCartItem, LoginRequest, NewProduct, NewReservation, RegisterRequest,
    ReservationUpdate, StatusUpdate, TokenGrant, UpdateQuantity,
};

use crate::error::ApiError;
use crate::session::{AuthGateway, TokenSlot};

/// 单次请求的鉴权方式
enum Auth<'a> {
    /// 公开端点，不附带令牌（未认证调用是合法的，如商品列表）
    Public,
    /// 从会话的持久化令牌槽读取；槽为空时静默不附带，而非报错
    Session,
    /// 显式令牌（会话恢复/登录流程中令牌尚未进入常规读取路径）
    Bearer(&'a str),
}

/// REST 后端客户端
///
/// 克隆开销极小（基地址字符串 + 令牌槽句柄），
/// 各视图可自由持有副本。
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    // SendWrapper 满足 Leptos 视图的 Send + Sync 约束；CSR 单线程下安全
    tokens: SendWrapper<Rc<dyn TokenSlot>>,
}

impl ApiClient {
    pub fn new(base_url: String, tokens: Rc<dyn TokenSlot>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            tokens: SendWrapper::new(tokens),
        }
    }

    fn url(&self, endpoint: &str) -> String {
        debug_assert!(endpoint.starts_with('/'));
        format!("{}{}", self.base_url, endpoint)
    }

    /// 请求核心：构造 -> 发送 -> 解码
    async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<String>,
        auth: Auth<'_>,
    ) -> Result<T, ApiError> {
        let (status, text) = self.perform(method, endpoint, body, auth).await?;
        decode_response(status, &text)
    }

    /// 同上，但丢弃响应体（用于只关心成败的端点）
    async fn request_ignore_body(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<String>,
        auth: Auth<'_>,
    ) -> Result<(), ApiError> {
        let (status, text) = self.perform(method, endpoint, body, auth).await?;
        if (200..300).contains(&status) {
            Ok(())
        } else {
            Err(ApiError::from_response(status, &text))
        }
    }

    async fn perform(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<String>,
        auth: Auth<'_>,
    ) -> Result<(u16, String), ApiError> {
        let url = self.url(endpoint);
        web_sys::console::log_1(&format!("[api] {:?} {}", method, url).into());

        let mut builder = RequestBuilder::new(&url)
            .method(method)
            .header("Content-Type", "application/json");

        let session_token;
        let bearer = match auth {
            Auth::Public => None,
            Auth::Bearer(token) => Some(token),
            Auth::Session => {
                session_token = self.tokens.load();
                session_token.as_deref()
            }
        };
        if let Some(token) = bearer {
            builder = builder.header("Authorization", &format!("Bearer {token}"));
        }

        let request = match body {
            Some(json) => builder.body(json),
            None => builder.build(),
        }
        .map_err(|_| ApiError::connection())?;

        // 未收到任何响应（DNS/连接失败）-> 哨兵状态码 0
        let response = request.send().await.map_err(|_| ApiError::connection())?;
        let status = response.status();
        let text = response.text().await.unwrap_or_default();
        Ok((status, text))
    }
}

/// 序列化请求体
fn encode<B: Serialize>(body: &B) -> Result<String, ApiError> {
    serde_json::to_string(body).map_err(|_| ApiError::new(0, "Failed to encode request body."))
}

/// 解码响应：2xx 解析 JSON，204/空体视为空载荷，其余归类为 [`ApiError`]
fn decode_response<T: DeserializeOwned>(status: u16, body: &str) -> Result<T, ApiError> {
    if !(200..300).contains(&status) {
        return Err(ApiError::from_response(status, body));
    }
    if status == 204 || body.is_empty() {
        // 空体按 JSON null 解码，只有单元载荷接受
        return serde_json::from_str("null")
            .map_err(|_| ApiError::new(status, "Unexpected empty response."));
    }
    serde_json::from_str(body).map_err(|_| ApiError::new(status, "Malformed response body."))
}

// =========================================================
// 类型化端点 (Typed Endpoints)
// =========================================================

impl ApiClient {
    // ---- 商品 ----

    pub async fn products(&self) -> Result<Vec<Product>, ApiError> {
        self.request(Method::GET, "/products", None, Auth::Public)
            .await
    }

    pub async fn product(&self, id: i64) -> Result<Product, ApiError> {
        self.request(Method::GET, &format!("/products/{id}"), None, Auth::Public)
            .await
    }

    pub async fn create_product(&self, product: &NewProduct) -> Result<Product, ApiError> {
        self.request(
            Method::POST,
            "/products",
            Some(encode(product)?),
            Auth::Session,
        )
        .await
    }

    pub async fn update_product(
        &self,
        id: i64,
        product: &NewProduct,
    ) -> Result<Product, ApiError> {
        self.request(
            Method::PUT,
            &format!("/products/{id}"),
            Some(encode(product)?),
            Auth::Session,
        )
        .await
    }

    pub async fn delete_product(&self, id: i64) -> Result<(), ApiError> {
        self.request_ignore_body(
            Method::DELETE,
            &format!("/products/{id}"),
            None,
            Auth::Session,
        )
        .await
    }

    // ---- 购物车 ----

    pub async fn cart(&self, user_id: i64) -> Result<Cart, ApiError> {
        self.request(Method::GET, &format!("/cart/{user_id}"), None, Auth::Session)
            .await
    }

    pub async fn add_to_cart(
        &self,
        product_id: i64,
        quantity: u32,
    ) -> Result<ActionReply, ApiError> {
        let payload = AddCartItem {
            product_id,
            quantity,
        };
        self.request(
            Method::POST,
            "/cart/add",
            Some(encode(&payload)?),
            Auth::Session,
        )
        .await
    }

    pub async fn update_cart_item(
        &self,
        item_id: i64,
        quantity: u32,
    ) -> Result<ActionReply, ApiError> {
        let payload = UpdateQuantity { quantity };
        self.request(
            Method::PUT,
            &format!("/cart/update/{item_id}"),
            Some(encode(&payload)?),
            Auth::Session,
        )
        .await
    }

    pub async fn remove_cart_item(&self, item_id: i64) -> Result<ActionReply, ApiError> {
        self.request(
            Method::DELETE,
            &format!("/cart/remove/{item_id}"),
            None,
            Auth::Session,
        )
        .await
    }

    pub async fn checkout(&self) -> Result<ActionReply, ApiError> {
        self.request(Method::POST, "/cart/checkout", None, Auth::Session)
            .await
    }

    // ---- 预约 ----

    pub async fn create_reservation(
        &self,
        reservation: &NewReservation,
    ) -> Result<Reservation, ApiError> {
        self.request(
            Method::POST,
            "/reservations",
            Some(encode(reservation)?),
            Auth::Session,
        )
        .await
    }

    pub async fn update_reservation(
        &self,
        id: i64,
        update: &ReservationUpdate,
    ) -> Result<Reservation, ApiError> {
        self.request(
            Method::PUT,
            &format!("/reservations/{id}"),
            Some(encode(update)?),
            Auth::Session,
        )
        .await
    }

    pub async fn cancel_reservation(&self, id: i64) -> Result<ActionReply, ApiError> {
        self.request(
            Method::DELETE,
            &format!("/reservations/{id}"),
            None,
            Auth::Session,
        )
        .await
    }

    pub async fn user_reservations(&self, user_id: i64) -> Result<Vec<Reservation>, ApiError> {
        self.request(
            Method::GET,
            &format!("/reservations/user/{user_id}"),
            None,
            Auth::Session,
        )
        .await
    }

    pub async fn all_reservations(&self) -> Result<Vec<Reservation>, ApiError> {
        self.request(Method::GET, "/reservations", None, Auth::Session)
            .await
    }

    pub async fn set_reservation_status(
        &self,
        id: i64,
        status: &str,
    ) -> Result<Reservation, ApiError> {
        let payload = StatusUpdate {
            status: status.to_string(),
        };
        self.request(
            Method::PUT,
            &format!("/reservations/{id}/status"),
            Some(encode(&payload)?),
            Auth::Session,
        )
        .await
    }

    // ---- 订单 ----

    pub async fn user_orders(&self, user_id: i64) -> Result<Vec<Order>, ApiError> {
        self.request(
            Method::GET,
            &format!("/orders/user/{user_id}"),
            None,
            Auth::Session,
        )
        .await
    }

    pub async fn all_orders(&self) -> Result<Vec<Order>, ApiError> {
        self.request(Method::GET, "/orders", None, Auth::Session)
            .await
    }

    pub async fn set_order_status(&self, id: i64, status: &str) -> Result<Order, ApiError> {
        let payload = StatusUpdate {
            status: status.to_string(),
        };
        self.request(
            Method::PUT,
            &format!("/orders/{id}/status"),
            Some(encode(&payload)?),
            Auth::Session,
        )
        .await
    }
}

// =========================================================
// 会话网关实现 (AuthGateway)
// =========================================================

#[async_trait(?Send)]
impl AuthGateway for ApiClient {
    async fn login(&self, email: &str, password: &str) -> Result<TokenGrant, ApiError> {
        let payload = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        self.request(
            Method::POST,
            "/auth/login",
            Some(encode(&payload)?),
            Auth::Public,
        )
        .await
    }

    async fn register(&self, name: &str, email: &str, password: &str) -> Result<User, ApiError> {
        let payload = RegisterRequest {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        };
        self.request(
            Method::POST,
            "/auth/register",
            Some(encode(&payload)?),
            Auth::Public,
        )
        .await
    }

    async fn profile(&self, token: &str) -> Result<User, ApiError> {
        self.request(Method::GET, "/auth/profile", None, Auth::Bearer(token))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_content_decodes_to_empty_payload() {
        let result: Result<(), ApiError> = decode_response(204, "");
        assert!(result.is_ok());
    }

    #[test]
    fn empty_2xx_body_decodes_to_empty_payload() {
        let result: Result<(), ApiError> = decode_response(200, "");
        assert!(result.is_ok());
    }

    #[test]
    fn ok_body_parses_as_json() {
        let user: User =
            decode_response(200, r#"{"id":1,"name":"Ana","email":"a@b.com","role":"user"}"#)
                .unwrap();
        assert_eq!(user.name, "Ana");
    }

    #[test]
    fn not_found_carries_server_detail() {
        let err = decode_response::<User>(404, r#"{"detail":"Not found"}"#).unwrap_err();
        assert_eq!(err, ApiError::new(404, "Not found"));
    }

    #[test]
    fn server_error_without_detail_is_generic() {
        let err = decode_response::<User>(500, "").unwrap_err();
        assert_eq!(err.status, 500);
        assert_eq!(err.message, "HTTP 500");
    }

    #[test]
    fn malformed_2xx_body_keeps_real_status() {
        let err = decode_response::<User>(200, "not json").unwrap_err();
        assert_eq!(err.status, 200);
    }
}
