//! 原生 Web API 封装模块
//!
//! 对浏览器 fetch、LocalStorage 与 History API 的轻量级封装。

mod http;
pub mod route;
pub mod router;
mod storage;

pub use http::BrowserHttpClient;
pub use storage::LocalStorage;
