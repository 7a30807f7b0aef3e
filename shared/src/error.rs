//! 错误类型模块
//!
//! 与后端交互时可能出现的错误分为五类：
//! - 网络失败（后端不可达）
//! - 后端校验失败（`detail` 字段，字符串或结构化对象）
//! - 鉴权失败
//! - 成功响应但无法解析
//! - 本地输入非法（在发出请求之前就被拒绝）

use serde::Deserialize;
use thiserror::Error;

/// 后端返回的 `detail` 字段
///
/// FastAPI 对业务错误返回字符串，对请求体校验错误返回数组/对象。
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Detail {
    Text(String),
    Structured(serde_json::Value),
}

impl Detail {
    /// 渲染为可直接展示给用户的文本
    ///
    /// 结构化内容按缩进 JSON 输出，保持原样不做改写。
    pub fn render(&self) -> String {
        match self {
            Detail::Text(text) => text.clone(),
            Detail::Structured(value) => {
                serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
            }
        }
    }
}

impl std::fmt::Display for Detail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.render())
    }
}

/// 错误响应体 `{"detail": ...}`
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub detail: Option<Detail>,
}

#[derive(Debug, Error)]
pub enum ApiError {
    /// 请求未能到达后端
    #[error("network error: {0}")]
    Network(String),

    /// 后端返回非 2xx 状态
    #[error("backend rejected request ({status}): {detail}")]
    Backend { status: u16, detail: Detail },

    /// 401 或本地缺少 token
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// 2xx 响应体无法解析
    #[error("failed to decode response: {0}")]
    Decode(String),

    /// 本地输入校验失败
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl ApiError {
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized(message.into())
    }

    /// 后端给出的 detail（如有）
    pub fn detail(&self) -> Option<&Detail> {
        match self {
            ApiError::Backend { detail, .. } => Some(detail),
            _ => None,
        }
    }

    /// 是否应让用户重新登录
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized(_))
    }

    /// 面向用户的提示文本
    ///
    /// 网络错误统一为通用提示；后端 detail 原样透出；本地输入错误给出字段提示。
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Network(_) => "Backend unreachable. Check your connection.".to_string(),
            ApiError::Backend { detail, .. } => detail.render(),
            ApiError::Unauthorized(msg) => msg.clone(),
            ApiError::Decode(_) => "Unexpected response from server.".to_string(),
            ApiError::InvalidInput(msg) => msg.clone(),
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::Decode(e.to_string())
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_detail_text_renders_verbatim() {
        let body: ErrorBody = serde_json::from_str(r#"{"detail":"Email already registered"}"#).unwrap();
        assert_eq!(body.detail.unwrap().render(), "Email already registered");
    }

    #[test]
    fn test_detail_structured_renders_pretty_json() {
        let raw = json!({"detail": [{"loc": ["body", "cost"], "msg": "field required"}]});
        let body: ErrorBody = serde_json::from_value(raw).unwrap();
        let rendered = body.detail.unwrap().render();
        assert!(rendered.contains('\n'));
        assert!(rendered.contains("\"msg\": \"field required\""));
    }

    #[test]
    fn test_network_error_message_is_generic() {
        let err = ApiError::network("TypeError: Failed to fetch");
        assert!(!err.user_message().contains("TypeError"));
    }

    #[test]
    fn test_backend_error_message_is_detail() {
        let err = ApiError::Backend {
            status: 400,
            detail: Detail::Text("VIN already enrolled".into()),
        };
        assert_eq!(err.user_message(), "VIN already enrolled");
        assert_eq!(err.detail(), Some(&Detail::Text("VIN already enrolled".into())));
    }
}
