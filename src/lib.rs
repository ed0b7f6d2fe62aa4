//! Brandsift: a brand asset harvester
//!
//! This crate implements a bounded breadth-first crawler that discovers a
//! website's image assets and typography, downloads the assets under
//! concurrency limits, and filters them for visual quality.

pub mod analysis;
pub mod config;
pub mod crawler;
pub mod downloader;
pub mod progress;
pub mod url;

use thiserror::Error;

/// Main error type for Brandsift operations
///
/// Only browser-session and homepage failures abort a run; deeper page and
/// per-asset failures are absorbed by the crawl and reported through the
/// progress sink instead.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to launch browser session: {0}")]
    BrowserLaunch(String),

    #[error("Failed to load homepage {url}: {message}")]
    Homepage { url: String, message: String },

    #[error("URL error: {0}")]
    UrlError(#[from] UrlError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing domain in URL")]
    MissingDomain,
}

/// Result type alias for Brandsift operations
pub type Result<T> = std::result::Result<T, ScrapeError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use analysis::AssetAnalyzer;
pub use config::Config;
pub use crawler::{scrape, Coordinator, CrawlPhase, CrawlTarget, FontMap};
pub use downloader::DownloadedAsset;
pub use progress::ProgressReporter;
