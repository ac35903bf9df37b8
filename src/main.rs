// src/main.rs

use clap::{CommandFactory, FromArgMatches};
use colored::*;
use rf_podcast::{cli::Cli, logging, run_from_cli};
use std::{env, sync::Arc, time::Duration};

#[tokio::main]
async fn main() {
    // 为 Windows 终端启用 ANSI 颜色支持。
    #[cfg(windows)]
    {
        colored::control::set_virtual_terminal(true).ok();
    }
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            println!("\n{} 用户强制中断程序。", "[!]".yellow());
            tokio::time::sleep(Duration::from_millis(100)).await;
            std::process::exit(130);
        }
    });

    let bin_name = env::var("CARGO_BIN_NAME").unwrap_or_else(|_| "rf-podcast".to_string());

    let after_help = format!(
        "示例:\n  # 解析单集并显示信息\n  {bin} --url \"https://www.radiofrance.fr/franceinter/podcasts/...\"\n\n  # 以 JSON 输出并下载音频\n  {bin} --url \"https://...\" --json -d -o ./podcasts\n\n  # 批量解析\n  {bin} -b my_links.txt\n\n  # 启动交互模式\n  {bin} -i",
        bin = bin_name
    );

    let cmd = Cli::command().after_help(after_help);
    let args = match Cli::from_arg_matches(&cmd.get_matches()) {
        Ok(args) => Arc::new(args),
        Err(e) => e.exit(),
    };

    logging::init_logger(args.log_level);

    if let Err(e) = run_from_cli(args).await {
        eprintln!("\n{} {}", "[X]".red(), format!("程序执行出错: {}", e).red());
        std::process::exit(1);
    }
}
