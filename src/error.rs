use std::collections::BTreeMap;
use std::fmt;

// =========================================================
// 错误类型枚举
// =========================================================

/// 错误类型
/// 包含错误对应的语义（状态码类别）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    /// 请求未到达服务端或没有响应
    Network,
    /// 401: 令牌缺失或过期
    Unauthorized,
    /// 400: 表单字段校验失败
    Validation,
    /// 404: 资源不存在
    NotFound,
    /// 5xx 以及其他非 2xx 状态
    Server,
    /// 响应体无法解析
    Decode,
    /// 请求体无法构建
    Request,
}

impl ApiErrorKind {
    pub fn from_status(status: u16) -> Self {
        match status {
            400 => ApiErrorKind::Validation,
            401 => ApiErrorKind::Unauthorized,
            404 => ApiErrorKind::NotFound,
            _ => ApiErrorKind::Server,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            ApiErrorKind::Network => "NETWORK_ERROR",
            ApiErrorKind::Unauthorized => "UNAUTHORIZED",
            ApiErrorKind::Validation => "INVALID_INPUT",
            ApiErrorKind::NotFound => "RESOURCE_NOT_FOUND",
            ApiErrorKind::Server => "SERVER_ERROR",
            ApiErrorKind::Decode => "JSON_PARSE_ERROR",
            ApiErrorKind::Request => "REQUEST_BUILD_ERROR",
        }
    }
}

// =========================================================
// 核心错误类型
// =========================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ApiError {
    pub kind: ApiErrorKind,
    /// HTTP 状态码，网络错误时为空
    pub status: Option<u16>,
    pub message: String,
    /// `{"field": ["msg", ...]}` 形式的字段错误
    pub field_errors: BTreeMap<String, Vec<String>>,
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn new(kind: ApiErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            status: None,
            message: message.into(),
            field_errors: BTreeMap::new(),
        }
    }

    // --- Convenience constructors ---

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Network, message)
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Decode, message)
    }

    pub fn request(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Request, message)
    }

    /// 根据非 2xx 响应构建错误
    pub fn from_response(status: u16, body: &str) -> Self {
        let kind = ApiErrorKind::from_status(status);
        let field_errors = if kind == ApiErrorKind::Validation {
            parse_field_errors(body)
        } else {
            BTreeMap::new()
        };
        let message = detail_message(body).unwrap_or_else(|| format!("HTTP {}", status));
        Self {
            kind,
            status: Some(status),
            message,
            field_errors,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.kind == ApiErrorKind::Unauthorized
    }

    /// 优先返回指定字段的第一条消息，否则返回任意字段的第一条
    pub fn first_field_error(&self, preferred: &str) -> Option<&str> {
        self.field_errors
            .get(preferred)
            .and_then(|msgs| msgs.first())
            .or_else(|| self.field_errors.values().find_map(|msgs| msgs.first()))
            .map(String::as_str)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            Some(status) => write!(f, "[{}] {}: {}", status, self.kind.error_code(), self.message),
            None => write!(f, "{}: {}", self.kind.error_code(), self.message),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::decode(e.to_string())
    }
}

/// 解析字段错误，字段值可以是字符串数组或单个字符串
fn parse_field_errors(body: &str) -> BTreeMap<String, Vec<String>> {
    let Ok(serde_json::Value::Object(map)) = serde_json::from_str::<serde_json::Value>(body) else {
        return BTreeMap::new();
    };
    map.into_iter()
        .filter_map(|(field, value)| {
            let msgs: Vec<String> = match value {
                serde_json::Value::String(s) => vec![s],
                serde_json::Value::Array(items) => items
                    .into_iter()
                    .filter_map(|v| v.as_str().map(str::to_string))
                    .collect(),
                _ => return None,
            };
            (!msgs.is_empty()).then_some((field, msgs))
        })
        .collect()
}

/// `{"detail": "..."}` 或 `{"error": "..."}`
fn detail_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    ["detail", "error", "message"]
        .iter()
        .find_map(|key| value.get(key)?.as_str().map(str::to_string))
}
