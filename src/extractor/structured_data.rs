// src/extractor/structured_data.rs

use super::{ExtractionStrategy, normalize};
use crate::{
    config::StrategyKind,
    constants::{messages, page},
    error::*,
    models::{PodcastRecord, RawEpisodeNode},
};
use async_trait::async_trait;
use log::{debug, info, warn};
use scraper::{Html, Selector};
use serde_json::Value;
use std::sync::LazyLock;

static JSON_LD_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(page::JSON_LD_SELECTOR).unwrap());

/// 策略 A：从页面内嵌的 JSON-LD 中定位 `RadioEpisode` 节点
#[derive(Debug, Clone, Copy, Default)]
pub struct StructuredDataExtractor;

impl StructuredDataExtractor {
    pub fn new() -> Self {
        Self
    }

    pub fn extract(&self, html: &str) -> AppResult<PodcastRecord> {
        let blocks = parse_json_ld_blocks(html);
        debug!("页面中共解析出 {} 个 JSON-LD 块", blocks.len());

        let node = find_episode_node(&blocks)
            .ok_or_else(|| AppError::not_found(messages::PODCAST_NOT_FOUND))?;
        let record = map_episode_node(node)?;
        info!("通过结构化数据提取到单集: '{}'", record.title);
        normalize::require_audio(record)
    }
}

#[async_trait]
impl ExtractionStrategy for StructuredDataExtractor {
    fn kind(&self) -> StrategyKind {
        StrategyKind::StructuredData
    }

    async fn extract(&self, html: &str) -> AppResult<PodcastRecord> {
        StructuredDataExtractor::extract(self, html)
    }
}

/// 按文档顺序解析所有 JSON-LD 块，无法解析的块记录日志后跳过
pub fn parse_json_ld_blocks(html: &str) -> Vec<Value> {
    let document = Html::parse_document(html);
    document
        .select(&JSON_LD_SELECTOR)
        .enumerate()
        .filter_map(|(i, script)| {
            let text: String = script.text().collect();
            match serde_json::from_str::<Value>(&text) {
                Ok(tree) => Some(tree),
                Err(e) => {
                    warn!("第 {} 个 JSON-LD 块解析失败，已跳过: {}", i + 1, e);
                    None
                }
            }
        })
        .collect()
}

/// `@graph` 包装展开为其成员，顶层数组展开为其元素，单个对象视为单元素数组
fn graph_entries(tree: &Value) -> Vec<&Value> {
    match tree {
        Value::Array(items) => items.iter().collect(),
        _ => match tree.get(page::GRAPH_KEY) {
            Some(Value::Array(items)) => items.iter().collect(),
            _ => vec![tree],
        },
    }
}

fn is_episode(entry: &Value) -> bool {
    entry.get(page::TYPE_KEY).and_then(Value::as_str) == Some(page::EPISODE_TYPE)
}

/// 取扫描顺序中的第一个单集节点，其余忽略
pub fn find_episode_node(blocks: &[Value]) -> Option<&Value> {
    blocks
        .iter()
        .flat_map(graph_entries)
        .find(|entry| is_episode(entry))
}

/// 节点缺少任一嵌套字段即视为结构不匹配，不使用缺省值
pub fn map_episode_node(node: &Value) -> AppResult<PodcastRecord> {
    let raw: RawEpisodeNode = serde_json::from_value(node.clone())
        .map_err(|e| AppError::ShapeMismatch(format!("单集节点结构异常: {}", e)))?;

    let title = raw
        .name
        .ok_or_else(|| AppError::ShapeMismatch("name".into()))?;
    let image_url = raw
        .image
        .ok_or_else(|| AppError::ShapeMismatch("image".into()))?
        .url
        .ok_or_else(|| AppError::ShapeMismatch("image.url".into()))?;
    let audio_url = raw
        .main_entity
        .ok_or_else(|| AppError::ShapeMismatch("mainEntity".into()))?
        .content_url
        .ok_or_else(|| AppError::ShapeMismatch("mainEntity.contentUrl".into()))?;

    Ok(PodcastRecord {
        title,
        image_url,
        audio_url,
        ..Default::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page_with(blocks: &[&str]) -> String {
        let scripts: String = blocks
            .iter()
            .map(|b| format!(r#"<script type="application/ld+json">{}</script>"#, b))
            .collect();
        format!("<html><head>{}</head><body></body></html>", scripts)
    }

    const EPISODE: &str = r#"{
        "@type": "RadioEpisode",
        "name": "Ep1",
        "image": { "@type": "ImageObject", "url": "https://img/1.jpg" },
        "mainEntity": { "@type": "AudioObject", "contentUrl": "https://a/1.mp3" }
    }"#;

    #[test]
    fn test_bare_object_is_matched() {
        let record = StructuredDataExtractor::new().extract(&page_with(&[EPISODE])).unwrap();
        assert_eq!(record.title, "Ep1");
        assert_eq!(record.image_url, "https://img/1.jpg");
        assert_eq!(record.audio_url, "https://a/1.mp3");
        assert_eq!(record.playlist_url, "");
    }

    #[test]
    fn test_graph_wrapper_is_scanned() {
        let graph = format!(
            r#"{{ "@context": "https://schema.org", "@graph": [ {{ "@type": "WebPage" }}, {} ] }}"#,
            EPISODE
        );
        let record = StructuredDataExtractor::new().extract(&page_with(&[graph.as_str()])).unwrap();
        assert_eq!(record.audio_url, "https://a/1.mp3");
    }

    #[test]
    fn test_first_episode_wins() {
        let second = EPISODE.replace("Ep1", "Ep2").replace("1.mp3", "2.mp3");
        let html = page_with(&[r#"{ "@type": "Organization" }"#, EPISODE, second.as_str()]);
        let record = StructuredDataExtractor::new().extract(&html).unwrap();
        assert_eq!(record.title, "Ep1");

        let html = page_with(&[second.as_str(), EPISODE]);
        let record = StructuredDataExtractor::new().extract(&html).unwrap();
        assert_eq!(record.title, "Ep2");
    }

    #[test]
    fn test_broken_block_is_skipped() {
        let html = page_with(&["{ not json", EPISODE]);
        let record = StructuredDataExtractor::new().extract(&html).unwrap();
        assert_eq!(record.title, "Ep1");
    }

    #[test]
    fn test_no_blocks_is_not_found() {
        let err = StructuredDataExtractor::new()
            .extract("<html><body><p>rien</p></body></html>")
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(ref m) if m == messages::PODCAST_NOT_FOUND));
    }

    #[test]
    fn test_no_episode_type_is_not_found() {
        let html = page_with(&[r#"{ "@type": "PodcastSeries", "name": "Show" }"#]);
        let err = StructuredDataExtractor::new().extract(&html).unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[test]
    fn test_missing_nested_field_is_shape_mismatch() {
        let html = page_with(&[r#"{ "@type": "RadioEpisode", "name": "Ep1", "image": { "url": "https://img/1.jpg" } }"#]);
        let err = StructuredDataExtractor::new().extract(&html).unwrap_err();
        assert!(matches!(err, AppError::ShapeMismatch(ref f) if f == "mainEntity"));

        let html = page_with(&[r#"{ "@type": "RadioEpisode", "image": { "url": "x" }, "mainEntity": { "contentUrl": "y" } }"#]);
        let err = StructuredDataExtractor::new().extract(&html).unwrap_err();
        assert!(matches!(err, AppError::ShapeMismatch(ref f) if f == "name"));
    }

    #[test]
    fn test_empty_content_url_is_not_found() {
        let emptied = EPISODE.replace("https://a/1.mp3", "");
        let html = page_with(&[emptied.as_str()]);
        let err = StructuredDataExtractor::new().extract(&html).unwrap_err();
        assert!(matches!(err, AppError::NotFound(ref m) if m == messages::AUDIO_URL_NOT_FOUND));
    }
}
