// src/ui.rs

use crate::{constants, models::PodcastRecord, symbols};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::{
    io::{self, Write},
    time::Duration,
};

pub fn print_header(title: &str) {
    println!("\n{}", "═".repeat(constants::UI_WIDTH));
    println!(" {}", title.cyan().bold());
    println!("{}", "═".repeat(constants::UI_WIDTH));
}

pub fn print_sub_header(title: &str) {
    println!("\n--- {} ---", title.bold());
}

pub fn box_message(title: &str, content: &[&str], color_func: fn(ColoredString) -> ColoredString) {
    println!("\n┌{}┐", "─".repeat(constants::UI_WIDTH - 2));
    println!("  {}", color_func(title.bold()));
    println!("├{}┤", "─".repeat(constants::UI_WIDTH - 2));
    for line in content {
        println!("  {}", line);
    }
    println!("└{}┘", "─".repeat(constants::UI_WIDTH - 2));
}

/// 单集信息卡片，空字段不显示
pub fn print_record(record: &PodcastRecord) {
    let rows = record_rows(record);
    let lines: Vec<&str> = rows.iter().map(String::as_str).collect();
    box_message(&record.title, &lines, |s| s.green());
}

fn record_rows(record: &PodcastRecord) -> Vec<String> {
    [
        ("节目", &record.playlist_title),
        ("节目页", &record.playlist_url),
        ("封面", &record.image_url),
        ("节目封面", &record.playlist_image_url),
    ]
    .into_iter()
    .filter(|(_, value)| !value.is_empty())
    .map(|(label, value)| format!("{:<6} {}", label, value))
    .chain(std::iter::once(format!("{} {}", *symbols::AUDIO, record.audio_url)))
    .collect()
}

/// 已知总大小时按字节显示进度，否则只显示已下载量
pub fn new_bytes_progress_bar(total: Option<u64>, prefix: &str) -> ProgressBar {
    let (pbar, template) = match total {
        Some(len) => (
            ProgressBar::new(len),
            "{prefix:7.bold.cyan} [{elapsed_precise}] [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({bytes_per_sec}, ETA: {eta})",
        ),
        None => (
            ProgressBar::new_spinner(),
            "{prefix:7.bold.cyan} [{elapsed_precise}] {spinner} {bytes} ({bytes_per_sec})",
        ),
    };
    let style = ProgressStyle::with_template(template)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-");
    pbar.set_style(style);
    pbar.set_prefix(prefix.to_string());
    pbar.enable_steady_tick(Duration::from_millis(100));
    pbar
}

pub fn prompt(message: &str, default: Option<&str>) -> io::Result<String> {
    let default_str = default.map_or("".to_string(), |d| format!(" (默认: {})", d));
    print!("\n>>> {}{}: ", message, default_str);
    io::stdout().flush()?;
    let mut input = String::new();
    if io::stdin().read_line(&mut input)? == 0 {
        return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "输入已结束"));
    }
    let input = input.trim().to_string();
    if input.is_empty() {
        Ok(default.unwrap_or("").to_string())
    } else {
        Ok(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_rows_skip_empty_fields() {
        let record = PodcastRecord {
            title: "Ep1".into(),
            audio_url: "https://a/x.mp3".into(),
            playlist_title: "Show".into(),
            ..Default::default()
        };
        let rows = record_rows(&record);
        assert_eq!(rows.len(), 2);
        assert!(rows[0].contains("Show"));
        assert!(rows[1].ends_with("https://a/x.mp3"));
    }
}
