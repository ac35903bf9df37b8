// src/extractor/api_enricher.rs

use super::normalize;
use crate::{
    client::RobustClient,
    config::AppConfig,
    constants::{api, messages},
    error::*,
    models::{DiffusionId, PodcastRecord},
};
use log::{debug, info};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde_json::Value;
use std::sync::Arc;

const ID_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_');

/// 策略 B 第二步：按 diffusion id 查询内部 API，并映射为 `PodcastRecord`
pub struct ApiEnricher {
    http_client: Arc<RobustClient>,
    api_template: String,
    playlist_base_url: String,
}

impl ApiEnricher {
    pub fn new(http_client: Arc<RobustClient>, config: &AppConfig) -> Self {
        Self {
            http_client,
            api_template: config.enrichment_api_template.clone(),
            playlist_base_url: config.playlist_base_url.clone(),
        }
    }

    pub fn api_url(&self, id: &DiffusionId) -> String {
        let encoded = utf8_percent_encode(id.as_str(), ID_ENCODE_SET).to_string();
        self.api_template
            .replace(api::DIFFUSION_ID_PLACEHOLDER, &encoded)
    }

    pub async fn enrich(&self, id: &DiffusionId) -> AppResult<PodcastRecord> {
        let url = self.api_url(id);
        debug!("查询单集 API: {}", url);
        let payload = self.http_client.fetch_json(&url).await?;

        let item = first_item(&payload)
            .ok_or_else(|| AppError::not_found(messages::PODCAST_NOT_FOUND))?;
        let record = normalize::apply_field_rules(item, &self.playlist_base_url);
        let record = normalize::require_audio(record)?;
        info!("通过 API 提取到单集: '{}' (diffusion id: {})", record.title, id);
        Ok(record)
    }
}

pub fn first_item(payload: &Value) -> Option<&Value> {
    payload
        .get(api::ITEMS_KEY)
        .and_then(Value::as_array)
        .and_then(|items| items.first())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_first_item() {
        assert!(first_item(&json!({ "items": [] })).is_none());
        assert!(first_item(&json!({ "data": [1] })).is_none());
        assert_eq!(
            first_item(&json!({ "items": [{ "title": "a" }, { "title": "b" }] })),
            Some(&json!({ "title": "a" }))
        );
    }
}
