// src/api.rs
//
// `GET extract?url=<单集页面链接>` 的请求/响应边界。
// 具体的 HTTP 框架只需把查询参数交给 `handle_extract`，再原样写回状态码与 JSON。

use crate::{
    error::{AppError, AppResult},
    extractor::PodcastExtractor,
    models::PodcastRecord,
};
use log::error;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::{Value, json};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExtractQuery {
    pub url: Option<String>,
}

impl ExtractQuery {
    /// 从原始查询串 (`url=...&...`) 中读取 `url` 参数
    pub fn from_query_string(query: &str) -> Self {
        let url = url::form_urlencoded::parse(query.trim_start_matches('?').as_bytes())
            .find(|(key, _)| key == "url")
            .map(|(_, value)| value.into_owned());
        Self { url }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiReply {
    pub status: StatusCode,
    pub body: Value,
}

impl ApiReply {
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}

pub async fn handle_extract(extractor: &PodcastExtractor, query: &ExtractQuery) -> ApiReply {
    let url = match query.url.as_deref().map(str::trim) {
        Some(url) if !url.is_empty() => url,
        _ => return error_reply(&AppError::MissingInput),
    };

    let result = extractor.extract_podcast(url).await;
    if let Err(e) = &result {
        error!("解析 '{}' 失败: {}", url, e);
    }
    reply_for(&result)
}

/// 将一次提取的结果转换为接口响应
pub fn reply_for(result: &AppResult<PodcastRecord>) -> ApiReply {
    match result {
        Ok(record) => match serde_json::to_value(record) {
            Ok(body) => ApiReply {
                status: StatusCode::OK,
                body,
            },
            Err(e) => error_reply(&AppError::from(e)),
        },
        Err(e) => error_reply(e),
    }
}

/// 内部错误只以状态码与通用提示的形式对外暴露
pub fn error_reply(e: &AppError) -> ApiReply {
    ApiReply {
        status: e.http_status(),
        body: json!({ "error": e.public_message() }),
    }
}
