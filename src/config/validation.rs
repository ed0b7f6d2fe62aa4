use crate::config::types::{Config, CrawlerConfig, DownloaderConfig};
use crate::ConfigError;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_downloader_config(&config.downloader)?;

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.max_pages < 1 {
        return Err(ConfigError::Validation(format!(
            "max_pages must be >= 1, got {}",
            config.max_pages
        )));
    }

    if config.page_concurrency < 1 || config.page_concurrency > 100 {
        return Err(ConfigError::Validation(format!(
            "page_concurrency must be between 1 and 100, got {}",
            config.page_concurrency
        )));
    }

    if config.page_timeout_ms < 100 {
        return Err(ConfigError::Validation(format!(
            "page_timeout_ms must be >= 100ms, got {}ms",
            config.page_timeout_ms
        )));
    }

    if config.homepage_timeout_ms < config.page_timeout_ms {
        return Err(ConfigError::Validation(format!(
            "homepage_timeout_ms must be >= page_timeout_ms, got {}ms",
            config.homepage_timeout_ms
        )));
    }

    Ok(())
}

/// Validates downloader configuration
fn validate_downloader_config(config: &DownloaderConfig) -> Result<(), ConfigError> {
    if config.download_root.trim().is_empty() {
        return Err(ConfigError::Validation(
            "download_root cannot be empty".to_string(),
        ));
    }

    if config.concurrency < 1 || config.concurrency > 100 {
        return Err(ConfigError::Validation(format!(
            "concurrency must be between 1 and 100, got {}",
            config.concurrency
        )));
    }

    if config.request_timeout_ms < 100 {
        return Err(ConfigError::Validation(format!(
            "request_timeout_ms must be >= 100ms, got {}ms",
            config.request_timeout_ms
        )));
    }

    if config.min_dimension >= config.max_dimension {
        return Err(ConfigError::Validation(format!(
            "min_dimension ({}) must be smaller than max_dimension ({})",
            config.min_dimension, config.max_dimension
        )));
    }

    if config.jpeg_quality < 1 || config.jpeg_quality > 100 {
        return Err(ConfigError::Validation(format!(
            "jpeg_quality must be between 1 and 100, got {}",
            config.jpeg_quality
        )));
    }

    Ok(())
}
