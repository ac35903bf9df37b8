// src/constants.rs

pub const UI_WIDTH: usize = 88;
pub const MAX_FILENAME_BYTES: usize = 200;
pub const CONFIG_DIR_NAME: &str = concat!(".", clap::crate_name!());
pub const CONFIG_FILE_NAME: &str = "config.json";
pub const LOG_FILE_NAME: &str = concat!(clap::crate_name!(), ".log");
pub const LOG_FALLBACK_FILE_NAME: &str = "fallback.log";
pub const DEFAULT_SAVE_DIR: &str = "downloads";
pub const DEFAULT_AUDIO_EXTENSION: &str = "mp3";
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 5;
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_DOWNLOAD_TIMEOUT_SECS: u64 = 600;
pub const DEFAULT_DOWNLOAD_MAX_RETRIES: u32 = 3;

pub mod page {
    /// JSON-LD 脚本块选择器
    pub const JSON_LD_SELECTOR: &str = r#"script[type="application/ld+json"]"#;
    /// 单集节点的 `@type`
    pub const EPISODE_TYPE: &str = "RadioEpisode";
    pub const TYPE_KEY: &str = "@type";
    pub const GRAPH_KEY: &str = "@graph";
    /// 移动端深度链接 meta 标签
    pub const DEEP_LINK_META_PROPERTY: &str = "al:ios:url";
}

pub mod api {
    pub const DIFFUSION_ID_PLACEHOLDER: &str = "{diffusion_id}";
    pub const ENRICHMENT_API_TEMPLATE: &str =
        "https://www.radiofrance.fr/api/v2.1/items?ids={diffusion_id}";
    pub const PLAYLIST_BASE_URL: &str = "https://radiofrance.fr/";
    pub const ITEMS_KEY: &str = "items";
    pub const DEFAULT_TITLE: &str = "Untitled Podcast";
}

pub mod messages {
    pub const PODCAST_NOT_FOUND: &str = "podcast data not found";
    pub const DIFFUSION_ID_NOT_FOUND: &str = "diffusion id not found";
    pub const AUDIO_URL_NOT_FOUND: &str = "audio url not found";
}
