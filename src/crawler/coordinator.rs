//! Crawl coordination across the homepage, crawl, and download phases
//!
//! The coordinator drives one run through its phases with hard barriers in
//! between: the homepage is fully processed before any secondary page is
//! dispatched, and every page fetch has finished before the first asset
//! download starts. Worker tasks never touch shared state; each returns its
//! findings and the coordinator merges them between barriers.

use crate::config::Config;
use crate::crawler::extractor::{extract_asset_urls, extract_internal_links};
use crate::crawler::fetcher::{build_http_client, fetch_page};
use crate::crawler::renderer::{BrowserSession, FontMap};
use crate::crawler::scheduler::Scheduler;
use crate::crawler::CrawlPhase;
use crate::downloader::{download_assets, DownloadedAsset};
use crate::progress::ProgressReporter;
use crate::url::extract_domain;
use crate::{Result, UrlError};
use futures::{stream, StreamExt};
use reqwest::Client;
use std::collections::HashSet;
use std::time::Duration;
use url::Url;

/// Immutable description of a single crawl run
#[derive(Debug, Clone)]
pub struct CrawlTarget {
    /// The page the crawl starts from
    pub start_url: Url,

    /// The crawl domain, lowercase with any leading "www." stripped
    pub domain: String,

    /// Maximum pages scheduled for fetch, homepage included
    pub max_pages: usize,
}

impl CrawlTarget {
    /// Builds a crawl target from a raw start URL
    ///
    /// # Arguments
    ///
    /// * `start_url` - Absolute http(s) URL of the page to start from
    /// * `max_pages` - Page budget for the run, homepage included
    ///
    /// # Returns
    ///
    /// * `Ok(CrawlTarget)` - Parsed target with its derived domain
    /// * `Err(ScrapeError)` - The URL is malformed, non-http(s), or hostless
    pub fn new(start_url: &str, max_pages: usize) -> Result<Self> {
        let url = Url::parse(start_url)?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(UrlError::InvalidScheme(url.scheme().to_string()).into());
        }

        let domain = extract_domain(&url).ok_or(UrlError::MissingDomain)?;

        Ok(Self {
            start_url: url,
            domain,
            max_pages,
        })
    }
}

/// Main crawler coordinator structure
pub struct Coordinator {
    target: CrawlTarget,
    config: Config,
    client: Client,
    progress: ProgressReporter,
    phase: CrawlPhase,
}

impl Coordinator {
    /// Creates a new coordinator instance
    ///
    /// # Arguments
    ///
    /// * `target` - The crawl target
    /// * `config` - The crawler configuration
    /// * `progress` - Sink for human-readable progress messages
    pub fn new(target: CrawlTarget, config: Config, progress: ProgressReporter) -> Result<Self> {
        let client = build_http_client(
            &config.user_agent,
            Duration::from_millis(config.crawler.page_timeout_ms),
        )?;

        Ok(Self {
            target,
            config,
            client,
            progress,
            phase: CrawlPhase::Init,
        })
    }

    /// Runs the crawl to completion
    ///
    /// The browser session is the only resource with run lifetime: it is
    /// created first and torn down exactly once whether the phases succeed
    /// or fail. Only a browser-launch or homepage failure aborts the run;
    /// everything later degrades output instead of failing it.
    pub async fn run(mut self) -> Result<(Vec<DownloadedAsset>, FontMap)> {
        self.progress.report(&format!(
            "Starting smart crawl of {} (max {} pages)...",
            self.target.domain, self.target.max_pages
        ));

        let session = BrowserSession::launch(&self.config.user_agent).await?;

        let outcome = self.run_phases(&session).await;

        session.close().await;

        if outcome.is_err() {
            self.enter_phase(CrawlPhase::Failed);
        }
        outcome
    }

    /// Drives the homepage, crawl, and download phases in order
    async fn run_phases(
        &mut self,
        session: &BrowserSession,
    ) -> Result<(Vec<DownloadedAsset>, FontMap)> {
        // Phase 1: rendered homepage fetch. The only fatal fetch of the run.
        let rendered = session
            .render_homepage(&self.target.start_url, &self.config.crawler)
            .await?;
        self.enter_phase(CrawlPhase::HomepageLoaded);

        let mut assets = extract_asset_urls(&rendered.html, &self.target.start_url);

        let mut scheduler = Scheduler::new(self.target.max_pages);
        scheduler.charge_start(&self.target.start_url);
        for link in extract_internal_links(&rendered.html, &self.target.start_url, &self.target.domain)
        {
            scheduler.enqueue(link);
        }

        self.progress.report(&format!(
            "Homepage scanned. Found {} links. Crawling...",
            scheduler.queued()
        ));

        // Phase 2: secondary pages, one level beyond the homepage.
        self.enter_phase(CrawlPhase::Crawling);
        self.crawl_secondary_pages(&mut scheduler, &mut assets).await;

        // Phase 3: every page fetch has completed; download the full set.
        self.enter_phase(CrawlPhase::Downloading);
        self.progress
            .report(&format!("Downloading {} assets...", assets.len()));

        let downloaded = download_assets(
            &self.client,
            assets,
            &self.target.domain,
            &self.config.downloader,
            &self.progress,
        )
        .await;

        self.enter_phase(CrawlPhase::Done);
        self.progress.report(&format!(
            "Done. {} assets retained from {} pages.",
            downloaded.len(),
            scheduler.pages_scheduled()
        ));

        Ok((downloaded, rendered.fonts))
    }

    /// Fetches the budgeted secondary pages over a bounded worker pool
    ///
    /// Each worker fetches one page and extracts its asset URLs; the results
    /// are merged here as they complete. A failed page contributes nothing
    /// and is not retried. Links discovered on secondary pages are not
    /// re-enqueued: breadth stays one level beyond the homepage, which
    /// bounds crawl time.
    async fn crawl_secondary_pages(&self, scheduler: &mut Scheduler, assets: &mut HashSet<Url>) {
        let mut batch = Vec::new();
        while let Some(url) = scheduler.next_page() {
            batch.push(url);
        }

        let mut fetches = stream::iter(batch)
            .map(|url| {
                let client = self.client.clone();
                async move {
                    let found = match fetch_page(&client, &url).await {
                        Some(body) => Some(extract_asset_urls(&body, &url)),
                        None => None,
                    };
                    (url, found)
                }
            })
            .buffer_unordered(self.config.crawler.page_concurrency);

        while let Some((url, found)) = fetches.next().await {
            match found {
                Some(page_assets) => {
                    assets.extend(page_assets);
                    self.progress.report(&format!(
                        "Scanned: {}... ({} assets found)",
                        truncate(url.path(), 20),
                        assets.len()
                    ));
                }
                None => {
                    tracing::debug!("Page {} contributed no content", url);
                }
            }
        }
    }

    /// Records a phase transition
    fn enter_phase(&mut self, phase: CrawlPhase) {
        tracing::info!("Crawl phase: {} -> {}", self.phase, phase);
        self.phase = phase;
    }
}

/// Truncates a string to at most `limit` characters
fn truncate(text: &str, limit: usize) -> &str {
    match text.char_indices().nth(limit) {
        Some((index, _)) => &text[..index],
        None => text,
    }
}
