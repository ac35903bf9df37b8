// src/downloader/mod.rs

use crate::{
    client::RobustClient,
    error::*,
    models::{DownloadStatus, PodcastRecord},
    ui, utils,
};
use anyhow::anyhow;
use futures::StreamExt;
use indicatif::HumanBytes;
use log::{debug, info, warn};
use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
    sync::Arc,
};
use tempfile::NamedTempFile;

#[derive(Debug, Clone)]
pub struct DownloadOutcome {
    pub status: DownloadStatus,
    pub path: PathBuf,
    pub bytes: u64,
}

/// 将 `audio_url` 指向的音频保存到本地目录
pub struct AudioDownloader {
    http_client: Arc<RobustClient>,
    output_dir: PathBuf,
    force_redownload: bool,
}

impl AudioDownloader {
    pub fn new(http_client: Arc<RobustClient>, output_dir: PathBuf, force_redownload: bool) -> Self {
        Self {
            http_client,
            output_dir,
            force_redownload,
        }
    }

    pub fn target_path(&self, record: &PodcastRecord) -> PathBuf {
        self.output_dir.join(utils::audio_filename(record))
    }

    pub async fn download(&self, record: &PodcastRecord) -> AppResult<DownloadOutcome> {
        let target = self.target_path(record);
        if let Some(size) = existing_size(&target) {
            if !self.force_redownload {
                info!("文件 '{}' 已存在 ({} 字节)，跳过下载", target.display(), size);
                return Ok(DownloadOutcome {
                    status: DownloadStatus::Skipped,
                    path: target,
                    bytes: size,
                });
            }
            info!("用户强制重新下载文件: {:?}", target);
        }

        fs::create_dir_all(&self.output_dir)?;
        let res = self.http_client.get(&record.audio_url).await?;
        let expected = res.content_length();
        debug!("开始下载 '{}'，预期大小: {:?}", record.audio_url, expected);

        // 先写入同目录下的临时文件，完成后再原子替换
        let mut tmp = NamedTempFile::new_in(&self.output_dir)?;
        let pbar = ui::new_bytes_progress_bar(expected, "下载");
        let mut written: u64 = 0;
        let mut stream = res.bytes_stream();
        while let Some(chunk_result) = stream.next().await {
            let chunk = chunk_result?;
            tmp.write_all(&chunk)?;
            written += chunk.len() as u64;
            pbar.inc(chunk.len() as u64);
        }
        tmp.flush()?;
        pbar.finish_and_clear();

        if let Some(expected) = expected {
            if written != expected {
                warn!(
                    "文件大小不符: 预期 {}, 实际 {}",
                    HumanBytes(expected),
                    HumanBytes(written)
                );
                return Err(AppError::Other(anyhow!(
                    "下载不完整 (预期: {}, 实际: {})",
                    HumanBytes(expected),
                    HumanBytes(written)
                )));
            }
        }
        if written == 0 {
            return Err(AppError::Other(anyhow!("下载的音频为空(0字节)")));
        }

        tmp.persist(&target)?;
        info!("音频已保存至 '{}' ({})", target.display(), HumanBytes(written));
        Ok(DownloadOutcome {
            status: DownloadStatus::Success,
            path: target,
            bytes: written,
        })
    }
}

fn existing_size(path: &Path) -> Option<u64> {
    path.metadata()
        .ok()
        .filter(|m| m.is_file() && m.len() > 0)
        .map(|m| m.len())
}
