//! 原生 Web API 封装模块
//!
//! 此模块提供对浏览器原生 API 的轻量级封装，替代 gloo-* 系列 crate，
//! 以减小 WASM 二进制体积。

mod http;
pub mod route;
pub mod router;
mod storage;

pub use http::FetchHttpClient;
pub use storage::{BrowserStore, LocalStorage};

/// 窄屏（手机）使用紧凑布局
pub fn is_compact_viewport() -> bool {
    web_sys::window()
        .and_then(|w| w.inner_width().ok())
        .and_then(|v| v.as_f64())
        .is_some_and(|width| width < 640.0)
}

/// 浏览器首选语言标签
pub fn browser_language() -> Option<String> {
    web_sys::window()?.navigator().language()
}

/// 在 `<body>` 上切换主题 class
pub fn set_body_class(class: &str) {
    if let Some(body) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.body())
    {
        body.set_class_name(class);
    }
}
