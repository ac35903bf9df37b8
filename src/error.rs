// src/error.rs

use reqwest::StatusCode;
use thiserror::Error;

/// 面向调用方的通用提示，避免泄露内部字段路径
pub const MSG_MISSING_URL: &str = "URL parameter is required";
pub const MSG_NOT_FOUND: &str = "Podcast data not found";
pub const MSG_UPSTREAM_FAILED: &str = "Failed to fetch podcast page";
pub const MSG_INTERNAL: &str = "Failed to fetch podcast info";

#[derive(Error, Debug)]
pub enum AppError {
    #[error("缺少必需的 URL 参数")]
    MissingInput,
    #[error("请求 '{url}' 失败 (状态: {}): {message}", fmt_status(.status))]
    Fetch {
        url: String,
        status: Option<StatusCode>,
        message: String,
    },
    #[error("结构化数据缺少字段: {0}")]
    ShapeMismatch(String),
    #[error("{0}")]
    NotFound(String),
    #[error("I/O 错误: {0}")]
    Io(#[from] std::io::Error),
    #[error("临时文件持久化失败: {0}")]
    TempFilePersist(#[from] tempfile::PersistError),
    #[error("JSON 解析错误: {0}")]
    Json(#[from] serde_json::Error),
    #[error("URL 解析错误: {0}")]
    Url(#[from] url::ParseError),
    #[error("用户中断")]
    UserInterrupt,
    #[error("未知错误: {0}")]
    Other(#[from] anyhow::Error),
}

impl AppError {
    pub fn not_found(what: impl Into<String>) -> Self {
        AppError::NotFound(what.into())
    }

    /// 上游返回非 2xx 状态
    pub fn upstream_status(url: impl Into<String>, status: StatusCode) -> Self {
        AppError::Fetch {
            url: url.into(),
            status: Some(status),
            message: format!("上游返回 {}", status),
        }
    }

    /// 对外暴露的 HTTP 状态码
    pub fn http_status(&self) -> StatusCode {
        match self {
            AppError::MissingInput => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) | AppError::ShapeMismatch(_) => StatusCode::NOT_FOUND,
            AppError::Fetch {
                status: Some(status),
                ..
            } if status.is_client_error() || status.is_server_error() => *status,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 对外暴露的错误信息，不包含任何内部细节
    pub fn public_message(&self) -> &'static str {
        match self {
            AppError::MissingInput => MSG_MISSING_URL,
            AppError::NotFound(_) | AppError::ShapeMismatch(_) => MSG_NOT_FOUND,
            AppError::Fetch { status: Some(_), .. }
                if self.http_status() != StatusCode::INTERNAL_SERVER_ERROR =>
            {
                MSG_UPSTREAM_FAILED
            }
            _ => MSG_INTERNAL,
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(e: reqwest::Error) -> Self {
        let url = e.url().map(|u| u.to_string()).unwrap_or_default();
        let message = if e.is_timeout() {
            "请求超时".to_string()
        } else {
            e.to_string()
        };
        AppError::Fetch {
            url,
            status: e.status(),
            message,
        }
    }
}

impl From<reqwest_middleware::Error> for AppError {
    fn from(e: reqwest_middleware::Error) -> Self {
        match e {
            reqwest_middleware::Error::Reqwest(inner) => AppError::from(inner),
            reqwest_middleware::Error::Middleware(inner) => AppError::Fetch {
                url: String::new(),
                status: None,
                message: inner.to_string(),
            },
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;

fn fmt_status(status: &Option<StatusCode>) -> String {
    status.map_or_else(|| "无".to_string(), |s| s.as_u16().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(AppError::MissingInput.http_status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AppError::not_found("diffusion id not found").http_status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::ShapeMismatch("image.url".into()).http_status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::upstream_status("https://x", StatusCode::NOT_FOUND).http_status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::upstream_status("https://x", StatusCode::BAD_GATEWAY).http_status(),
            StatusCode::BAD_GATEWAY
        );
        let transport = AppError::Fetch {
            url: "https://x".into(),
            status: None,
            message: "连接被拒绝".into(),
        };
        assert_eq!(transport.http_status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_public_message_hides_internal_paths() {
        let e = AppError::ShapeMismatch("mainEntity.contentUrl".into());
        assert_eq!(e.public_message(), MSG_NOT_FOUND);
        assert!(!e.public_message().contains("contentUrl"));
        assert_eq!(AppError::MissingInput.public_message(), MSG_MISSING_URL);
        assert_eq!(
            AppError::upstream_status("https://x", StatusCode::NOT_FOUND).public_message(),
            MSG_UPSTREAM_FAILED
        );
        assert_eq!(
            AppError::Other(anyhow::anyhow!("boom")).public_message(),
            MSG_INTERNAL
        );
    }
}
