// src/extractor/mod.rs

pub mod api_enricher;
pub mod diffusion;
pub mod normalize;
pub mod structured_data;

use crate::{
    client::RobustClient,
    config::{AppConfig, StrategyKind},
    constants::messages,
    error::*,
    models::PodcastRecord,
};
use api_enricher::ApiEnricher;
use async_trait::async_trait;
use diffusion::DiffusionIdResolver;
use log::{debug, info, warn};
use std::sync::Arc;
use structured_data::StructuredDataExtractor;

/// 一种从单集页面 HTML 得到 `PodcastRecord` 的方式
#[async_trait]
pub trait ExtractionStrategy: Send + Sync {
    fn kind(&self) -> StrategyKind;

    async fn extract(&self, html: &str) -> AppResult<PodcastRecord>;
}

/// 策略 B：diffusion id 解析 + API 查询
pub struct DiffusionApiStrategy {
    resolver: DiffusionIdResolver,
    enricher: ApiEnricher,
}

impl DiffusionApiStrategy {
    pub fn new(http_client: Arc<RobustClient>, config: &AppConfig) -> Self {
        Self {
            resolver: DiffusionIdResolver::new(),
            enricher: ApiEnricher::new(http_client, config),
        }
    }
}

#[async_trait]
impl ExtractionStrategy for DiffusionApiStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::DiffusionApi
    }

    async fn extract(&self, html: &str) -> AppResult<PodcastRecord> {
        // scraper::Html 不是 Send，DOM 不能跨越 await
        let id = self.resolver.resolve_id(html)?;
        self.enricher.enrich(&id).await
    }
}

pub fn build_strategy(
    kind: StrategyKind,
    http_client: Arc<RobustClient>,
    config: &AppConfig,
) -> Box<dyn ExtractionStrategy> {
    match kind {
        StrategyKind::StructuredData => Box::new(StructuredDataExtractor::new()),
        StrategyKind::DiffusionApi => Box::new(DiffusionApiStrategy::new(http_client, config)),
    }
}

/// 提取入口：抓取页面一次，再按顺序尝试各策略
pub struct PodcastExtractor {
    http_client: Arc<RobustClient>,
    strategies: Vec<Box<dyn ExtractionStrategy>>,
}

impl PodcastExtractor {
    pub fn new(http_client: Arc<RobustClient>, config: &AppConfig) -> Self {
        let mut kinds: Vec<StrategyKind> = Vec::with_capacity(config.strategies.len());
        for kind in &config.strategies {
            if !kinds.contains(kind) {
                kinds.push(*kind);
            }
        }
        let strategies = kinds
            .into_iter()
            .map(|kind| build_strategy(kind, http_client.clone(), config))
            .collect();
        Self::with_strategies(http_client, strategies)
    }

    pub fn with_strategies(
        http_client: Arc<RobustClient>,
        strategies: Vec<Box<dyn ExtractionStrategy>>,
    ) -> Self {
        Self {
            http_client,
            strategies,
        }
    }

    pub fn strategy_kinds(&self) -> Vec<StrategyKind> {
        self.strategies.iter().map(|s| s.kind()).collect()
    }

    pub async fn extract_podcast(&self, url: &str) -> AppResult<PodcastRecord> {
        info!("开始解析单集页面: {}", url);
        let html = self.http_client.fetch_text(url).await?;
        debug!("页面抓取完成，共 {} 字节", html.len());
        self.extract_from_html(&html).await
    }

    /// 返回第一个成功的结果；全部失败时返回最后一个错误
    pub async fn extract_from_html(&self, html: &str) -> AppResult<PodcastRecord> {
        let mut last_error = None;
        for strategy in &self.strategies {
            match strategy.extract(html).await {
                Ok(record) => {
                    debug!("策略 {:?} 提取成功", strategy.kind());
                    return Ok(record);
                }
                Err(e) => {
                    warn!("策略 {:?} 提取失败: {}", strategy.kind(), e);
                    last_error = Some(e);
                }
            }
        }
        Err(last_error.unwrap_or_else(|| AppError::not_found(messages::PODCAST_NOT_FOUND)))
    }
}
