//! Crawler module for page fetching and asset discovery
//!
//! This module contains the core crawling logic, including:
//! - Rendered homepage fetching with a headless browser
//! - Fast HTTP fetching for secondary pages
//! - Asset URL and internal-link extraction
//! - Frontier scheduling with a whole-run page budget
//! - Phase coordination across crawl and download

mod coordinator;
mod extractor;
mod fetcher;
mod renderer;
mod scheduler;

pub use coordinator::{Coordinator, CrawlTarget};
pub use extractor::{extract_asset_urls, extract_internal_links};
pub use fetcher::{build_http_client, fetch_page};
pub use renderer::{BrowserSession, FontMap, RenderedPage};
pub use scheduler::Scheduler;

use crate::config::Config;
use crate::downloader::DownloadedAsset;
use crate::progress::ProgressReporter;
use crate::Result;
use std::fmt;

/// Lifecycle of a single crawl run
///
/// Phases advance strictly forward; `Failed` is only reached when the
/// browser session or the homepage fetch fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrawlPhase {
    /// Run created, browser not yet launched
    Init,

    /// Homepage rendered; fonts and seed assets extracted
    HomepageLoaded,

    /// Secondary pages being fetched
    Crawling,

    /// Accumulated asset URLs being downloaded
    Downloading,

    /// Run finished; results are final
    Done,

    /// Browser launch or homepage fetch failed; no results
    Failed,
}

impl CrawlPhase {
    /// Returns true if no further transitions can happen
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::Failed)
    }
}

impl fmt::Display for CrawlPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Init => "init",
            Self::HomepageLoaded => "homepage-loaded",
            Self::Crawling => "crawling",
            Self::Downloading => "downloading",
            Self::Done => "done",
            Self::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Runs a complete harvest of one site
///
/// This is the main entry point. It will:
/// 1. Launch the browser session and render the start URL
/// 2. Extract fonts, seed assets, and internal links from the homepage
/// 3. Fetch up to `max_pages - 1` further pages concurrently
/// 4. Download and quality-gate the accumulated asset URLs
/// 5. Return the retained assets and the font map
///
/// The call fails only when the browser cannot start or the homepage cannot
/// be loaded; page and asset failures reduce the output instead.
///
/// # Arguments
///
/// * `start_url` - Absolute http(s) URL to start from
/// * `max_pages` - Page budget for the run, homepage included
/// * `progress` - Sink receiving human-readable status messages
pub async fn scrape(
    start_url: &str,
    max_pages: usize,
    progress: ProgressReporter,
) -> Result<(Vec<DownloadedAsset>, FontMap)> {
    let mut config = Config::default();
    config.crawler.max_pages = max_pages;

    let target = CrawlTarget::new(start_url, max_pages)?;
    Coordinator::new(target, config, progress)?.run().await
}
