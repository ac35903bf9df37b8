// src/utils.rs

use crate::{constants, models::PodcastRecord};
use regex::Regex;
use std::{ffi::OsStr, path::Path, sync::LazyLock};
use url::Url;

static ILLEGAL_CHARS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"[\\/*?:"<>|]"#).unwrap());
static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());
static AUDIO_EXT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?i)(mp3|m4a|aac|ogg|opus|wav|flac)$").unwrap());

pub fn sanitize_filename(name: &str) -> String {
    let original_name = name.trim();
    if original_name.is_empty() { return "unknown".to_string(); }

    let stem = Path::new(original_name)
        .file_stem()
        .unwrap_or_else(|| OsStr::new(original_name))
        .to_string_lossy()
        .to_uppercase();
    let windows_reserved = [
        "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7",
        "COM8", "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
    ];

    let mut name = if windows_reserved.contains(&stem.as_ref()) {
        format!("_{}", original_name)
    } else {
        original_name.to_string()
    };

    name = ILLEGAL_CHARS_RE.replace_all(&name, " ").into_owned();
    name = WHITESPACE_RE.replace_all(&name, " ").trim().to_string();
    name = name.trim_matches(|c: char| c == '.' || c.is_whitespace()).to_string();
    if name.is_empty() { return "unnamed".to_string(); }

    if name.len() > constants::MAX_FILENAME_BYTES {
        name = safe_truncate_utf8(&name, constants::MAX_FILENAME_BYTES).to_string();
    }
    name
}

fn safe_truncate_utf8(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes { return s; }
    let mut i = max_bytes;
    while i > 0 && !s.is_char_boundary(i) { i -= 1; }
    &s[..i]
}

pub fn truncate_text(text: &str, max_width: usize) -> String {
    let mut width = 0;
    let mut end_pos = 0;
    for (i, c) in text.char_indices() {
        width += if c.is_ascii() { 1 } else { 2 };
        if width > max_width.saturating_sub(3) {
            end_pos = i;
            break;
        }
    }
    if end_pos == 0 { text.to_string() } else { format!("{}...", &text[..end_pos]) }
}

/// 从音频地址的路径中推断扩展名，无法识别时回落为 mp3
pub fn audio_extension(audio_url: &str) -> String {
    Url::parse(audio_url)
        .ok()
        .and_then(|url| {
            let decoded = percent_encoding::percent_decode_str(url.path())
                .decode_utf8_lossy()
                .into_owned();
            Path::new(&decoded)
                .extension()
                .map(|ext| ext.to_string_lossy().to_lowercase())
        })
        .filter(|ext| AUDIO_EXT_RE.is_match(ext))
        .unwrap_or_else(|| constants::DEFAULT_AUDIO_EXTENSION.to_string())
}

/// 下载文件名：`<单集标题>.<扩展名>`
pub fn audio_filename(record: &PodcastRecord) -> String {
    let stem = sanitize_filename(&record.title);
    let ext = audio_extension(&record.audio_url);
    let max_stem = constants::MAX_FILENAME_BYTES.saturating_sub(ext.len() + 1);
    format!("{}.{}", safe_truncate_utf8(&stem, max_stem), ext)
}
