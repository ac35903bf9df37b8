// tests/cli_dispatch_test.rs

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs::File;
use std::io::Write;
use tempfile::{TempDir, tempdir};

// 使用临时 HOME，避免写入真实的配置目录
fn main_command(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin(env!("CARGO_PKG_NAME")).unwrap();
    cmd.env("HOME", home.path());
    cmd
}

#[test]
fn test_help_flag() {
    let home = tempdir().unwrap();
    main_command(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("显示此帮助信息并退出"));
}

#[test]
fn test_missing_mode_shows_help() {
    let home = tempdir().unwrap();
    main_command(&home)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage:"));
}

#[test]
fn test_invalid_strategy_is_rejected() {
    let home = tempdir().unwrap();
    main_command(&home)
        .args(["--url", "https://www.radiofrance.fr/x", "--strategy", "scraping"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value 'scraping'"));
}

#[test]
fn test_json_mode_prints_error_body() {
    let home = tempdir().unwrap();
    main_command(&home)
        .args(["--url", "pas-une-url", "--json"])
        .assert()
        .failure()
        .stdout(predicate::str::contains(r#""error": "Podcast data not found""#));

    // 首次运行会生成默认配置文件
    assert!(home.path().join(".rf-podcast").join("config.json").is_file());
}

#[test]
fn test_empty_batch_file() {
    let home = tempdir().unwrap();
    let file_path = home.path().join("links.txt");
    let mut file = File::create(&file_path).unwrap();
    writeln!(file, "\n# commentaire\n").unwrap();

    main_command(&home)
        .arg("-b")
        .arg(&file_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("为空"));
}

#[test]
fn test_batch_mode_reports_failures() {
    let home = tempdir().unwrap();
    let file_path = home.path().join("links.txt");
    let mut file = File::create(&file_path).unwrap();
    writeln!(file, "pas-une-url").unwrap();
    writeln!(file, "ftp://example.com/ep").unwrap();

    main_command(&home)
        .arg("-b")
        .arg(&file_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("2 个批量任务执行失败"));
}
