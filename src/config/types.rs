use serde::Deserialize;

/// Desktop browser user agent sent with every request, rendered or plain.
/// Sites that serve crawler-specific markup get the same page a visitor would.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Main configuration structure for Brandsift
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub crawler: CrawlerConfig,
    pub downloader: DownloaderConfig,

    /// User-Agent header used by the HTTP client and the browser session
    #[serde(rename = "user-agent")]
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            crawler: CrawlerConfig::default(),
            downloader: DownloaderConfig::default(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Maximum number of pages scheduled for fetch per run, homepage included
    #[serde(rename = "max-pages")]
    pub max_pages: usize,

    /// Number of concurrent secondary-page fetches
    #[serde(rename = "page-concurrency")]
    pub page_concurrency: usize,

    /// Timeout for a single secondary-page fetch (milliseconds)
    #[serde(rename = "page-timeout-ms")]
    pub page_timeout_ms: u64,

    /// Timeout for the rendered homepage load (milliseconds)
    #[serde(rename = "homepage-timeout-ms")]
    pub homepage_timeout_ms: u64,

    /// Number of incremental scroll passes on the rendered homepage
    #[serde(rename = "scroll-passes")]
    pub scroll_passes: u32,

    /// Settle time after each scroll pass, for lazy-loaded content (milliseconds)
    #[serde(rename = "scroll-settle-ms")]
    pub scroll_settle_ms: u64,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_pages: 15,
            page_concurrency: 5,
            page_timeout_ms: 5_000,
            homepage_timeout_ms: 30_000,
            scroll_passes: 3,
            scroll_settle_ms: 500,
        }
    }
}

/// Asset download and post-processing configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DownloaderConfig {
    /// Root directory under which per-site asset directories are created
    #[serde(rename = "download-root")]
    pub download_root: String,

    /// Number of concurrent asset downloads
    pub concurrency: usize,

    /// Timeout for a single asset fetch (milliseconds)
    #[serde(rename = "request-timeout-ms")]
    pub request_timeout_ms: u64,

    /// Images with either dimension below this are rejected (pixels)
    #[serde(rename = "min-dimension")]
    pub min_dimension: u32,

    /// Images with their larger dimension above this are downscaled (pixels)
    #[serde(rename = "max-dimension")]
    pub max_dimension: u32,

    /// JPEG quality used when re-saving downscaled images
    #[serde(rename = "jpeg-quality")]
    pub jpeg_quality: u8,
}

impl Default for DownloaderConfig {
    fn default() -> Self {
        Self {
            download_root: "assets".to_string(),
            concurrency: 10,
            request_timeout_ms: 5_000,
            min_dimension: 300,
            max_dimension: 1500,
            jpeg_quality: 85,
        }
    }
}
