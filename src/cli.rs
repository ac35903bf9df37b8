// src/cli.rs

use crate::{config::StrategyKind, constants};
use clap::{Parser, ValueEnum, command, crate_version};
use std::path::PathBuf;

/// 定义日志输出级别
#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Parser, Debug, Clone)]
#[command(
    version = crate_version!(),
    about,
    long_about = None,
    arg_required_else_help = true,
    disable_help_flag = true,
    disable_version_flag = true,
)]
#[command(group(
    clap::ArgGroup::new("mode")
        .required(true)
        .args(&["interactive", "url", "batch_file"]),
))]
pub struct Cli {
    // --- 运行模式 (Mode) ---
    /// 启动交互式会话，逐一输入单集链接
    #[arg(short, long, action = clap::ArgAction::SetTrue, help_heading = "Mode")]
    pub interactive: bool,
    /// 指定要解析的单集页面链接
    #[arg(long, help_heading = "Mode")]
    pub url: Option<String>,
    /// 从文本文件批量解析多个链接 (每行一个)
    #[arg(short, long, value_name = "FILE", help_heading = "Mode")]
    pub batch_file: Option<PathBuf>,

    // --- 选项 (Options) ---
    /// 以 JSON 形式输出结果 (与 HTTP 接口的响应体一致)
    #[arg(long, action = clap::ArgAction::SetTrue, help_heading = "Options")]
    pub json: bool,
    /// 解析成功后下载音频文件
    #[arg(short, long, action = clap::ArgAction::SetTrue, help_heading = "Options")]
    pub download: bool,
    /// 强制重新下载已存在的文件
    #[arg(short, long, action = clap::ArgAction::SetTrue, help_heading = "Options")]
    pub force_redownload: bool,
    /// 指定提取策略及其顺序 (可重复)，默认先结构化数据后 API
    #[arg(long, value_enum, help_heading = "Options")]
    pub strategy: Vec<StrategyKind>,
    /// 页面抓取与 API 查询的超时秒数
    #[arg(long, value_name = "SECS", help_heading = "Options")]
    pub timeout: Option<u64>,
    /// 设置音频保存目录
    #[arg(short, long, value_name = "DIR", default_value_os_t = PathBuf::from(constants::DEFAULT_SAVE_DIR), help_heading = "Options")]
    pub output: PathBuf,

    // --- 通用选项 (General) ---
    /// 显示此帮助信息并退出
    #[arg(short = 'h', long, action = clap::ArgAction::Help, global = true, help_heading = "General")]
    _help: Option<bool>,
    /// 显示版本信息并退出
    #[arg(short = 'V', long, action = clap::ArgAction::Version, global = true, help_heading = "General")]
    _version: Option<bool>,
    /// (隐藏参数) 设置日志文件的输出级别，用于调试
    #[arg(long, value_enum, default_value_t = LogLevel::Off, global = true, hide = true)]
    pub log_level: LogLevel,
}
