//! MentorAI 客户端核心
//!
//! 与平台无关的 API 客户端：类型化请求、令牌注入、401 处理和错误模型。
//! 浏览器前端和原生工具共用这一层，HTTP、存储和导航都通过 trait 注入。

// =========================================================
// 跨平台日志宏
// =========================================================

#[doc(hidden)]
pub mod logging {
    #[cfg(target_arch = "wasm32")]
    pub fn info(msg: &str) {
        web_sys::console::log_1(&msg.into());
    }

    #[cfg(target_arch = "wasm32")]
    pub fn warn(msg: &str) {
        web_sys::console::warn_1(&msg.into());
    }

    #[cfg(target_arch = "wasm32")]
    pub fn error(msg: &str) {
        web_sys::console::error_1(&msg.into());
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn info(msg: &str) {
        println!("{}", msg);
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn warn(msg: &str) {
        eprintln!("{}", msg);
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn error(msg: &str) {
        eprintln!("{}", msg);
    }
}

#[macro_export]
macro_rules! log_info {
    ($($t:tt)*) => ($crate::logging::info(&format!($($t)*)))
}

#[macro_export]
macro_rules! log_warn {
    ($($t:tt)*) => ($crate::logging::warn(&format!($($t)*)))
}

#[macro_export]
macro_rules! log_error {
    ($($t:tt)*) => ($crate::logging::error(&format!($($t)*)))
}

pub mod api;
pub mod config;
pub mod error;
pub mod request;
pub mod session;

pub use mentorai_shared as shared;

pub use api::MentorApi;
pub use config::ClientConfig;
pub use error::{ApiError, ApiErrorKind, ApiResult};
