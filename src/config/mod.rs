//! Configuration module for Brandsift
//!
//! This module handles loading, parsing, and validating TOML configuration
//! files. Every field has a sensible default, so a config file is optional.
//!
//! # Example
//!
//! ```no_run
//! use brandsift::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("brandsift.toml")).unwrap();
//! println!("Crawler will scan at most {} pages", config.crawler.max_pages);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, CrawlerConfig, DownloaderConfig, DEFAULT_USER_AGENT};

// Re-export parser functions
pub use parser::load_config;
