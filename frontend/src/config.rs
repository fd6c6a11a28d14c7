//! 部署环境配置
//!
//! 唯一的环境配置项是后端源地址，在 HTTP 客户端初始化之前静态确定。
//! 编译期可通过 `API_BASE_URL` 覆盖，否则按构建模式选择。

/// 生产环境后端源
const PROD_ORIGIN: &str = "https://api.brewhaven.app";

/// 本地开发后端源
const DEV_ORIGIN: &str = "http://localhost:8000";

/// 解析后端 API 基地址（含 `/api` 前缀，末尾无斜杠）
pub fn api_base_url() -> String {
    let origin = match option_env!("API_BASE_URL") {
        Some(url) => url,
        None if cfg!(debug_assertions) => DEV_ORIGIN,
        None => PROD_ORIGIN,
    };
    format!("{}/api", origin.trim_end_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_has_api_prefix_and_no_trailing_slash() {
        let url = api_base_url();
        assert!(url.ends_with("/api"));
        assert!(!url.ends_with("//api"));
    }
}
