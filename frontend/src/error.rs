//! API 错误分类 (Error Taxonomy)
//!
//! 所有后端通信失败统一归类为 [`ApiError`]：
//! - 网络层失败（未收到任何响应）使用哨兵状态码 `0`，
//!   UI 据此展示"检查网络连接"而非业务校验信息；
//! - 服务端报告的 4xx/5xx 携带真实状态码，
//!   消息优先取响应体的 `detail` 字段。

use thiserror::Error;

/// 网络失败（无响应）的哨兵状态码
pub const STATUS_CONNECTION_FAILED: u16 = 0;

/// 网络失败时的固定用户提示
pub const CONNECTION_FAILED_MESSAGE: &str =
    "Connection failed. Check your network and try again.";

/// 后端调用的统一错误类型
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ApiError {
    /// HTTP 状态码；`0` 表示未收到响应
    pub status: u16,
    /// 面向用户的可读消息
    pub message: String,
}

impl ApiError {
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// 未收到响应（DNS/连接失败等）
    pub fn connection() -> Self {
        Self::new(STATUS_CONNECTION_FAILED, CONNECTION_FAILED_MESSAGE)
    }

    /// 从非 2xx 响应体构造错误
    ///
    /// 响应体若为携带 `detail` 字符串字段的 JSON，则取其为消息；
    /// 否则退化为通用的 `HTTP <status>` 消息。
    pub fn from_response(status: u16, body: &str) -> Self {
        let detail = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|value| value.get("detail")?.as_str().map(str::to_owned));

        match detail {
            Some(message) => Self::new(status, message),
            None => Self::new(status, format!("HTTP {status}")),
        }
    }

    /// 是否为网络层失败（未收到响应）
    pub fn is_connection_failure(&self) -> bool {
        self.status == STATUS_CONNECTION_FAILED
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_field_becomes_message() {
        let err = ApiError::from_response(404, r#"{"detail":"Not found"}"#);
        assert_eq!(err.status, 404);
        assert_eq!(err.message, "Not found");
    }

    #[test]
    fn missing_detail_falls_back_to_status() {
        let err = ApiError::from_response(500, r#"{"error":"boom"}"#);
        assert_eq!(err.message, "HTTP 500");
    }

    #[test]
    fn non_json_body_falls_back_to_status() {
        let err = ApiError::from_response(502, "Bad Gateway");
        assert_eq!(err.status, 502);
        assert_eq!(err.message, "HTTP 502");
    }

    #[test]
    fn connection_failure_uses_sentinel_status() {
        let err = ApiError::connection();
        assert_eq!(err.status, STATUS_CONNECTION_FAILED);
        assert!(err.is_connection_failure());
        assert_eq!(err.message, CONNECTION_FAILED_MESSAGE);
    }
}
