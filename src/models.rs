// src/models.rs

use serde::{Deserialize, Serialize};
use std::fmt;

/// 归一化后的单集信息，两种提取策略最终都汇入此结构
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PodcastRecord {
    pub title: String,
    pub image_url: String,
    pub audio_url: String,
    pub playlist_image_url: String,
    pub playlist_title: String,
    pub playlist_url: String,
}

/// JSON-LD 图中的单集节点 (`@type == RadioEpisode`)
#[derive(Debug, Clone, Deserialize)]
pub struct RawEpisodeNode {
    pub name: Option<String>,
    pub image: Option<NodeImage>,
    #[serde(rename = "mainEntity")]
    pub main_entity: Option<NodeMainEntity>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NodeImage {
    pub url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NodeMainEntity {
    #[serde(rename = "contentUrl")]
    pub content_url: Option<String>,
}

/// 内部 API 使用的 diffusion id，仅作为查询键
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffusionId(String);

impl DiffusionId {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DiffusionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum DownloadStatus {
    Success,
    Skipped,
}
