//! 原生 Web API 封装模块
//!
//! 路由与持久化对浏览器 API 的轻量级封装。
//! 纯业务部分（路由枚举、守卫决策）不触碰 DOM，可原生测试。

pub mod route;
pub mod router;
pub mod storage;
