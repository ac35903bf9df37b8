// src/lib.rs

pub mod api;
pub mod cli;
pub mod client;
pub mod config;
pub mod constants;
pub mod downloader;
pub mod error;
pub mod extractor;
pub mod logging;
pub mod models;
pub mod symbols;
pub mod ui;
pub mod utils;

use crate::{
    cli::Cli,
    client::RobustClient,
    config::AppConfig,
    downloader::AudioDownloader,
    error::{AppError, AppResult},
    extractor::PodcastExtractor,
    models::{DownloadStatus, PodcastRecord},
};
use anyhow::anyhow;
use colored::*;
use indicatif::HumanBytes;
use log::{debug, info};
use std::{path::Path, sync::Arc};

/// 单次运行共享的上下文
#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<AppConfig>,
    pub extractor: Arc<PodcastExtractor>,
    pub downloader: Option<Arc<AudioDownloader>>,
    pub args: Arc<Cli>,
}

impl AppContext {
    pub fn new(args: Arc<Cli>, config: Arc<AppConfig>) -> AppResult<Self> {
        let extraction_client = Arc::new(RobustClient::for_extraction(&config)?);
        let extractor = Arc::new(PodcastExtractor::new(extraction_client, &config));
        debug!("提取策略顺序: {:?}", extractor.strategy_kinds());

        let downloader = if args.download {
            let download_client = Arc::new(RobustClient::for_download(&config)?);
            Some(Arc::new(AudioDownloader::new(
                download_client,
                args.output.clone(),
                args.force_redownload,
            )))
        } else {
            None
        };

        Ok(Self {
            config,
            extractor,
            downloader,
            args,
        })
    }
}

/// 库的公共入口点，由 `main.rs` 调用
pub async fn run_from_cli(args: Arc<Cli>) -> AppResult<()> {
    debug!("CLI 参数: {:?}", args);
    let config = Arc::new(AppConfig::new(&args)?);
    debug!("加载的应用配置: {:?}", config);

    let context = AppContext::new(args.clone(), config)?;

    if args.interactive {
        handle_interactive_mode(context).await?;
    } else if let Some(batch_file) = &args.batch_file {
        process_batch_tasks(batch_file, context).await?;
    } else if let Some(url) = &args.url {
        process_single_task(url, &context).await?;
    }

    Ok(())
}

/// 解析单个链接，按需输出 JSON 或信息卡片，并可选地下载音频
pub async fn process_single_task(url: &str, context: &AppContext) -> AppResult<PodcastRecord> {
    let result = context.extractor.extract_podcast(url).await;

    if context.args.json {
        let reply = api::reply_for(&result);
        println!("{}", serde_json::to_string_pretty(&reply.body)?);
    }
    let record = result?;
    if !context.args.json {
        ui::print_record(&record);
    }

    if let Some(downloader) = &context.downloader {
        let outcome = downloader.download(&record).await?;
        let message = match outcome.status {
            DownloadStatus::Success => format!(
                "{} 已保存: {} ({})",
                *symbols::OK,
                outcome.path.display(),
                HumanBytes(outcome.bytes)
            ),
            DownloadStatus::Skipped => format!(
                "{} 文件已存在，跳过: {}",
                *symbols::INFO,
                outcome.path.display()
            ),
        };
        // JSON 模式下 stdout 只留给响应体
        if context.args.json {
            eprintln!("{}", message);
        } else {
            println!("{}", message);
        }
    }

    Ok(record)
}

async fn handle_interactive_mode(context: AppContext) -> AppResult<()> {
    ui::print_header("交互模式");
    println!("逐一输入单集页面链接，直接回车退出。按 {} 可随时退出。", *symbols::CTRL_C);

    loop {
        match ui::prompt("请输入单集链接", None) {
            Ok(input) if !input.is_empty() => {
                if let Err(e) = process_single_task(&input, &context).await {
                    log::error!("交互模式任务 '{}' 失败: {}", input, e);
                    eprintln!("\n{} 处理任务时发生错误: {}", *symbols::ERROR, e.to_string().red());
                }
            }
            Ok(_) => break,
            Err(_) => return Err(AppError::UserInterrupt),
        }
    }

    println!("\n{} 退出交互模式。", *symbols::INFO);
    Ok(())
}

async fn process_batch_tasks(batch_file: &Path, context: AppContext) -> AppResult<()> {
    let content = std::fs::read_to_string(batch_file).map_err(|e| {
        log::error!("读取批量文件 '{}' 失败: {}", batch_file.display(), e);
        AppError::from(e)
    })?;

    let tasks: Vec<String> = content
        .lines()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty() && !s.starts_with('#'))
        .collect();
    if tasks.is_empty() {
        log::warn!("批量文件 '{}' 为空或不含有效行。", batch_file.display());
        println!("{} 批量文件 '{}' 为空。", *symbols::WARN, batch_file.display());
        return Ok(());
    }

    let mut success = 0;
    let mut failed = 0;
    if !context.args.json {
        ui::print_header(&format!("开始批量处理 {} 个链接", tasks.len()));
    }
    for (i, task) in tasks.iter().enumerate() {
        if !context.args.json {
            ui::print_sub_header(&format!(
                "批量任务 {}/{} - {}",
                i + 1,
                tasks.len(),
                utils::truncate_text(task, 60)
            ));
        }
        match process_single_task(task, &context).await {
            Ok(_) => success += 1,
            Err(e) => {
                failed += 1;
                log::error!("批量任务 '{}' 失败: {}", task, e);
                eprintln!("\n{} 处理任务时发生错误: {}", *symbols::ERROR, e);
            }
        }
    }

    info!("批量任务完成: 成功 {}, 失败 {}", success, failed);
    if !context.args.json {
        ui::print_header("批量任务报告");
        println!(
            "{} | {} | 总计: {}",
            format!("成功任务: {}", success).green(),
            format!("失败任务: {}", failed).red(),
            tasks.len()
        );
    }
    if failed > 0 {
        Err(AppError::Other(anyhow!("{} 个批量任务执行失败。", failed)))
    } else {
        Ok(())
    }
}
