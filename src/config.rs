// src/config.rs

pub mod file;

use self::file::load_or_create_external_config;
use crate::{cli::Cli, constants, error::AppResult};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// 提取策略，按配置顺序依次尝试
#[derive(ValueEnum, Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub enum StrategyKind {
    /// 解析页面内嵌的 JSON-LD 结构化数据
    #[value(name = "structured-data")]
    StructuredData,
    /// 从深度链接中取得 diffusion id，再查询内部 API
    #[value(name = "diffusion-api")]
    DiffusionApi,
}

pub fn default_strategies() -> Vec<StrategyKind> {
    vec![StrategyKind::StructuredData, StrategyKind::DiffusionApi]
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct NetworkConfig {
    pub connect_timeout_secs: Option<u64>,
    pub timeout_secs: Option<u64>,
    pub download_timeout_secs: Option<u64>,
    pub download_max_retries: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointConfig {
    pub enrichment_api_template: String,
    pub playlist_base_url: String,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            enrichment_api_template: constants::api::ENRICHMENT_API_TEMPLATE.into(),
            playlist_base_url: constants::api::PLAYLIST_BASE_URL.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionConfig {
    #[serde(default = "default_strategies")]
    pub strategies: Vec<StrategyKind>,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            strategies: default_strategies(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ExternalConfig {
    #[serde(default)]
    pub network: NetworkConfig,
    #[serde(default)]
    pub endpoints: EndpointConfig,
    #[serde(default)]
    pub extraction: ExtractionConfig,
}

impl ExternalConfig {
    pub(crate) fn default_app_config() -> Self {
        let network = NetworkConfig {
            connect_timeout_secs: Some(constants::DEFAULT_CONNECT_TIMEOUT_SECS),
            timeout_secs: Some(constants::DEFAULT_TIMEOUT_SECS),
            download_timeout_secs: Some(constants::DEFAULT_DOWNLOAD_TIMEOUT_SECS),
            download_max_retries: Some(constants::DEFAULT_DOWNLOAD_MAX_RETRIES),
        };
        Self {
            network,
            endpoints: EndpointConfig::default(),
            extraction: ExtractionConfig::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub user_agent: String,
    pub connect_timeout: Duration,
    /// 页面抓取与 API 查询的单次超时
    pub timeout: Duration,
    pub download_timeout: Duration,
    pub download_max_retries: u32,
    pub enrichment_api_template: String,
    pub playlist_base_url: String,
    pub strategies: Vec<StrategyKind>,
}

impl AppConfig {
    pub fn new(args: &Cli) -> AppResult<Self> {
        let external_config = load_or_create_external_config()?;
        Ok(Self::from_external(external_config, args))
    }

    /// 合并配置文件与命令行参数，命令行优先
    pub fn from_external(external_config: ExternalConfig, args: &Cli) -> Self {
        let network = external_config.network;

        let strategies = if !args.strategy.is_empty() {
            args.strategy.clone()
        } else if external_config.extraction.strategies.is_empty() {
            default_strategies()
        } else {
            external_config.extraction.strategies
        };

        Self {
            user_agent: constants::USER_AGENT.into(),
            connect_timeout: Duration::from_secs(
                network
                    .connect_timeout_secs
                    .unwrap_or(constants::DEFAULT_CONNECT_TIMEOUT_SECS),
            ),
            timeout: Duration::from_secs(
                args.timeout
                    .or(network.timeout_secs)
                    .unwrap_or(constants::DEFAULT_TIMEOUT_SECS),
            ),
            download_timeout: Duration::from_secs(
                network
                    .download_timeout_secs
                    .unwrap_or(constants::DEFAULT_DOWNLOAD_TIMEOUT_SECS),
            ),
            download_max_retries: network
                .download_max_retries
                .unwrap_or(constants::DEFAULT_DOWNLOAD_MAX_RETRIES),
            enrichment_api_template: external_config.endpoints.enrichment_api_template,
            playlist_base_url: external_config.endpoints.playlist_base_url,
            strategies,
        }
    }
}

#[cfg(feature = "testing")]
impl Default for AppConfig {
    fn default() -> Self {
        Self {
            user_agent: "test-agent/1.0".to_string(),
            connect_timeout: Duration::from_secs(2),
            timeout: Duration::from_secs(5),
            download_timeout: Duration::from_secs(15),
            download_max_retries: 0,
            enrichment_api_template: constants::api::ENRICHMENT_API_TEMPLATE.to_string(),
            playlist_base_url: constants::api::PLAYLIST_BASE_URL.to_string(),
            strategies: default_strategies(),
        }
    }
}
