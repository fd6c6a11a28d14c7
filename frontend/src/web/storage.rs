//! LocalStorage 封装模块
//!
//! 唯一持久化的客户端状态是 bearer 令牌，占用固定键名的单一槽位。
//! 启动时由会话存储读取，其余时间只由会话存储写入/清除。

use gloo_storage::{LocalStorage, Storage};

use crate::session::TokenSlot;

/// 持久化令牌的固定键名
const TOKEN_KEY: &str = "brewhaven_access_token";

/// 浏览器 LocalStorage 实现的令牌槽
#[derive(Debug, Default)]
pub struct BrowserTokenSlot;

impl TokenSlot for BrowserTokenSlot {
    fn load(&self) -> Option<String> {
        LocalStorage::get(TOKEN_KEY).ok()
    }

    fn store(&self, token: &str) {
        // 写失败（隐私模式下配额为 0 等）退化为"本次会话内有效"
        let _ = LocalStorage::set(TOKEN_KEY, token);
    }

    fn clear(&self) {
        LocalStorage::delete(TOKEN_KEY);
    }
}
