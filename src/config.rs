use mentorai_shared::{STORAGE_ACCESS_TOKEN, STORAGE_LOCALE, STORAGE_REFRESH_TOKEN};

/// 这些是默认值，构建时或运行时没有覆盖则使用这些值
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";
pub const API_URL_VAR: &str = "MENTORAI_API_URL";
pub const DEFAULT_LOGIN_PATH: &str = "/login";

/// 客户端配置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// API 根地址，不带末尾斜杠
    pub base_url: String,
    pub access_token_key: String,
    pub refresh_token_key: String,
    pub locale_key: String,
    /// 401 时跳转的页面
    pub login_path: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: normalize(base_url.into()),
            access_token_key: STORAGE_ACCESS_TOKEN.to_string(),
            refresh_token_key: STORAGE_REFRESH_TOKEN.to_string(),
            locale_key: STORAGE_LOCALE.to_string(),
            login_path: DEFAULT_LOGIN_PATH.to_string(),
        }
    }

    /// 读取 `MENTORAI_API_URL`
    ///
    /// 原生平台上运行时环境变量优先，其次是构建时注入的值，最后是默认地址。
    pub fn from_env() -> Self {
        #[cfg(not(target_arch = "wasm32"))]
        if let Ok(url) = std::env::var(API_URL_VAR) {
            if !url.trim().is_empty() {
                return Self::new(url);
            }
        }

        match option_env!("MENTORAI_API_URL") {
            Some(url) if !url.trim().is_empty() => Self::new(url),
            _ => Self::default(),
        }
    }

    /// 拼接完整请求地址
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

fn normalize(url: String) -> String {
    url.trim().trim_end_matches('/').to_string()
}
