// src/extractor/normalize.rs

use crate::{
    constants::{api, messages},
    error::*,
    models::PodcastRecord,
};
use log::debug;
use serde_json::Value;

/// `PodcastRecord` 中由 API 载荷填充的字段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordField {
    Title,
    ImageUrl,
    AudioUrl,
    PlaylistImageUrl,
    PlaylistTitle,
    /// 节目页路径，最终与基础域名拼接为 `playlist_url`
    PlaylistPath,
}

/// 单个字段的来源路径 (JSON Pointer) 与缺省值
#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub field: RecordField,
    pub pointer: &'static str,
    pub default: &'static str,
}

/// API 载荷到 `PodcastRecord` 的映射表，每个字段独立取缺省值
pub const FIELD_RULES: &[FieldRule] = &[
    FieldRule {
        field: RecordField::Title,
        pointer: "/title",
        default: api::DEFAULT_TITLE,
    },
    FieldRule {
        field: RecordField::ImageUrl,
        pointer: "/visual/webpSrc",
        default: "",
    },
    FieldRule {
        field: RecordField::AudioUrl,
        pointer: "/playerInfo/media/sources/0/url",
        default: "",
    },
    FieldRule {
        field: RecordField::PlaylistImageUrl,
        pointer: "/playerInfo/playerMetadata/cover/src",
        default: "",
    },
    FieldRule {
        field: RecordField::PlaylistTitle,
        pointer: "/playerInfo/playerMetadata/firstLine",
        default: "",
    },
    FieldRule {
        field: RecordField::PlaylistPath,
        pointer: "/playerInfo/playerMetadata/firstLinePath",
        default: "",
    },
];

/// 按规则取值；缺失、非字符串或空字符串均视为缺省
pub fn lookup<'a>(item: &'a Value, rule: &FieldRule) -> &'a str {
    item.pointer(rule.pointer)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .unwrap_or(rule.default)
}

pub fn apply_field_rules(item: &Value, playlist_base_url: &str) -> PodcastRecord {
    let mut record = PodcastRecord::default();
    for rule in FIELD_RULES {
        let value = lookup(item, rule);
        match rule.field {
            RecordField::Title => record.title = value.to_string(),
            RecordField::ImageUrl => record.image_url = value.to_string(),
            RecordField::AudioUrl => record.audio_url = value.to_string(),
            RecordField::PlaylistImageUrl => record.playlist_image_url = value.to_string(),
            RecordField::PlaylistTitle => record.playlist_title = value.to_string(),
            RecordField::PlaylistPath => {
                record.playlist_url = join_playlist_url(playlist_base_url, value)
            }
        }
    }
    debug!("API 载荷映射结果: {:?}", record);
    record
}

pub fn join_playlist_url(base: &str, path: &str) -> String {
    match (base.ends_with('/'), path.strip_prefix('/')) {
        (true, Some(rest)) => format!("{}{}", base, rest),
        _ => format!("{}{}", base, path),
    }
}

/// `audio_url` 是判定提取成功的唯一前提
pub fn require_audio(record: PodcastRecord) -> AppResult<PodcastRecord> {
    if record.audio_url.trim().is_empty() {
        return Err(AppError::not_found(messages::AUDIO_URL_NOT_FOUND));
    }
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const BASE: &str = "https://radiofrance.fr/";

    #[test]
    fn test_full_payload_mapping() {
        let item = json!({
            "title": "Le jour où",
            "visual": { "webpSrc": "https://img/ep.webp" },
            "playerInfo": {
                "media": { "sources": [{ "url": "https://a/ep.mp3" }, { "url": "https://a/ep.m4a" }] },
                "playerMetadata": {
                    "cover": { "src": "https://img/show.webp" },
                    "firstLine": "Affaires sensibles",
                    "firstLinePath": "franceinter/podcasts/affaires-sensibles"
                }
            }
        });
        let record = apply_field_rules(&item, BASE);
        assert_eq!(
            record,
            PodcastRecord {
                title: "Le jour où".into(),
                image_url: "https://img/ep.webp".into(),
                audio_url: "https://a/ep.mp3".into(),
                playlist_image_url: "https://img/show.webp".into(),
                playlist_title: "Affaires sensibles".into(),
                playlist_url: "https://radiofrance.fr/franceinter/podcasts/affaires-sensibles".into(),
            }
        );
    }

    #[test]
    fn test_each_field_defaults_independently() {
        let item = json!({ "playerInfo": { "media": { "sources": [{ "url": "https://a/x.mp3" }] } } });
        let record = require_audio(apply_field_rules(&item, BASE)).unwrap();
        assert_eq!(record.title, api::DEFAULT_TITLE);
        assert_eq!(record.image_url, "");
        assert_eq!(record.audio_url, "https://a/x.mp3");
        assert_eq!(record.playlist_image_url, "");
        assert_eq!(record.playlist_title, "");
        assert_eq!(record.playlist_url, BASE);
    }

    #[test]
    fn test_missing_sources_is_fatal() {
        let item = json!({ "title": "Ep1", "visual": { "webpSrc": "https://img/x.webp" } });
        let err = require_audio(apply_field_rules(&item, BASE)).unwrap_err();
        assert!(matches!(err, AppError::NotFound(ref m) if m == messages::AUDIO_URL_NOT_FOUND));
    }

    #[test]
    fn test_empty_and_non_string_values_use_default() {
        let item = json!({ "title": "", "visual": { "webpSrc": 42 } });
        let title_rule = FIELD_RULES.iter().find(|r| r.field == RecordField::Title).unwrap();
        let image_rule = FIELD_RULES.iter().find(|r| r.field == RecordField::ImageUrl).unwrap();
        assert_eq!(lookup(&item, title_rule), api::DEFAULT_TITLE);
        assert_eq!(lookup(&item, image_rule), "");
    }

    #[test]
    fn test_join_playlist_url() {
        assert_eq!(join_playlist_url(BASE, ""), "https://radiofrance.fr/");
        assert_eq!(join_playlist_url(BASE, "/fip/podcasts/a"), "https://radiofrance.fr/fip/podcasts/a");
        assert_eq!(join_playlist_url(BASE, "fip/podcasts/a"), "https://radiofrance.fr/fip/podcasts/a");
        assert_eq!(join_playlist_url("https://radiofrance.fr", "/fip"), "https://radiofrance.fr/fip");
    }
}
