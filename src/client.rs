// src/client.rs

use crate::{config::AppConfig, constants::messages, error::*};
use log::{debug, warn};
use reqwest::Response;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{RetryTransientMiddleware, policies::ExponentialBackoff};
use serde_json::Value;
use std::time::Duration;
use url::Url;

#[derive(Clone)]
pub struct RobustClient {
    pub client: ClientWithMiddleware,
}

impl RobustClient {
    /// 页面抓取与 API 查询使用的客户端，不做任何重试
    pub fn for_extraction(config: &AppConfig) -> AppResult<Self> {
        Self::build(config, config.timeout, 0)
    }

    /// 音频下载使用的客户端，对瞬时错误做指数退避重试
    pub fn for_download(config: &AppConfig) -> AppResult<Self> {
        Self::build(config, config.download_timeout, config.download_max_retries)
    }

    fn build(config: &AppConfig, timeout: Duration, max_retries: u32) -> AppResult<Self> {
        let inner = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .connect_timeout(config.connect_timeout)
            .timeout(timeout)
            .build()?;

        let mut builder = ClientBuilder::new(inner);
        if max_retries > 0 {
            let retry_policy = ExponentialBackoff::builder().build_with_max_retries(max_retries);
            builder = builder.with(RetryTransientMiddleware::new_with_policy(retry_policy));
        }

        Ok(Self {
            client: builder.build(),
        })
    }

    /// 发起一次 GET，非 2xx 状态转换为携带上游状态码的 `AppError::Fetch`
    pub async fn get(&self, url: &str) -> AppResult<Response> {
        let url = parse_target_url(url)?;
        debug!("GET {}", url);
        let res = self.client.get(url.clone()).send().await?;
        let status = res.status();
        if !status.is_success() {
            warn!("请求 '{}' 返回非成功状态: {}", url, status);
            return Err(AppError::upstream_status(url.as_str(), status));
        }
        Ok(res)
    }

    pub async fn fetch_text(&self, url: &str) -> AppResult<String> {
        let res = self.get(url).await?;
        Ok(res.text().await?)
    }

    pub async fn fetch_json(&self, url: &str) -> AppResult<Value> {
        let res = self.get(url).await?;
        Ok(res.json().await?)
    }
}

/// 仅接受非空的 http(s) 绝对地址
fn parse_target_url(raw: &str) -> AppResult<Url> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(AppError::MissingInput);
    }
    match Url::parse(raw) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(url),
        _ => {
            warn!("输入 '{}' 不是有效的 http(s) 链接", raw);
            Err(AppError::not_found(messages::PODCAST_NOT_FOUND))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_target_url() {
        assert!(matches!(parse_target_url("   "), Err(AppError::MissingInput)));
        assert!(matches!(
            parse_target_url("not a url"),
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            parse_target_url("ftp://example.com/a"),
            Err(AppError::NotFound(_))
        ));
        let url = parse_target_url(" https://www.radiofrance.fr/franceinter/podcasts/x ").unwrap();
        assert_eq!(url.host_str(), Some("www.radiofrance.fr"));
    }
}
