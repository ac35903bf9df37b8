// src/extractor/diffusion.rs

use crate::{
    constants::{messages, page},
    error::*,
    models::DiffusionId,
};
use log::debug;
use regex::Regex;
use scraper::{Html, Selector};
use std::sync::LazyLock;

static DEEP_LINK_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(&format!(
        r#"meta[property="{}"]"#,
        page::DEEP_LINK_META_PROPERTY
    ))
    .unwrap()
});
static DIFFUSION_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"diffusionId=([A-Za-z0-9_-]+)").unwrap());

/// 策略 B 第一步：从移动端深度链接 meta 标签中取出 diffusion id
#[derive(Debug, Clone, Copy, Default)]
pub struct DiffusionIdResolver;

impl DiffusionIdResolver {
    pub fn new() -> Self {
        Self
    }

    pub fn resolve_id(&self, html: &str) -> AppResult<DiffusionId> {
        let document = Html::parse_document(html);
        let id = document
            .select(&DEEP_LINK_SELECTOR)
            .filter_map(|meta| meta.value().attr("content"))
            .find_map(match_diffusion_id)
            .ok_or_else(|| AppError::not_found(messages::DIFFUSION_ID_NOT_FOUND))?;
        debug!("解析到 diffusion id: {}", id);
        Ok(id)
    }
}

/// 只截取 `diffusionId=` 之后的单词与连字符，后续查询参数不计入
pub fn match_diffusion_id(content: &str) -> Option<DiffusionId> {
    DIFFUSION_ID_RE
        .captures(content)
        .and_then(|caps| caps.get(1))
        .map(|m| DiffusionId::new(m.as_str()))
}
