//! Rendered homepage fetching via a headless browser
//!
//! The homepage is the one page fetched through Chromium: JavaScript-driven
//! navigation and lazy-loaded imagery only materialize after a real render,
//! and the computed font styles are only observable there. Every other page
//! goes through the plain HTTP fetcher.

use crate::config::CrawlerConfig;
use crate::{Result, ScrapeError};
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::Page;
use futures::StreamExt;
use serde::Deserialize;
use std::time::Duration;
use tokio::task::JoinHandle;
use url::Url;

/// Computed typography read from the rendered homepage
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FontMap {
    /// Font family of the first header element
    #[serde(default = "unknown")]
    pub headers: String,

    /// Font family of the first body text element
    #[serde(default = "unknown")]
    pub body: String,
}

fn unknown() -> String {
    "Unknown".to_string()
}

impl Default for FontMap {
    fn default() -> Self {
        Self {
            headers: unknown(),
            body: unknown(),
        }
    }
}

/// A rendered page: final markup plus the typography read from it
#[derive(Debug, Clone)]
pub struct RenderedPage {
    pub html: String,
    pub fonts: FontMap,
}

/// Reads the computed font-family of the first header and paragraph.
/// Each field falls back to "Unknown" on its own.
const FONT_PROBE_SCRIPT: &str = r#"
(() => {
    const getFont = (selector) => {
        const el = document.querySelector(selector);
        return el ? window.getComputedStyle(el).fontFamily : null;
    };
    return {
        headers: getFont('h1') || getFont('h2') || 'Unknown',
        body: getFont('p') || getFont('body') || 'Unknown'
    };
})()
"#;

/// Exclusively-owned headless browser session
///
/// One session exists per crawl run. It is created before the homepage fetch
/// and must be torn down exactly once via [`BrowserSession::close`] on every
/// exit path; dropping the session aborts the CDP event loop as a backstop.
pub struct BrowserSession {
    browser: Browser,
    handler: JoinHandle<()>,
}

impl BrowserSession {
    /// Launches a headless Chromium instance
    ///
    /// # Arguments
    ///
    /// * `user_agent` - User-Agent the browser identifies as
    ///
    /// # Returns
    ///
    /// * `Ok(BrowserSession)` - Browser is up and its event loop is running
    /// * `Err(ScrapeError::BrowserLaunch)` - Chromium could not be started;
    ///   this aborts the whole run
    pub async fn launch(user_agent: &str) -> Result<Self> {
        let config = BrowserConfig::builder()
            .no_sandbox()
            .window_size(1920, 1080)
            .arg("--disable-gpu")
            .arg("--disable-dev-shm-usage")
            .arg(format!("--user-agent={}", user_agent))
            .build()
            .map_err(ScrapeError::BrowserLaunch)?;

        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| ScrapeError::BrowserLaunch(e.to_string()))?;

        // The handler stream must be pumped for the browser connection to
        // make progress; event errors are not actionable here.
        let handler_task = tokio::task::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    tracing::trace!("Browser event loop error: {}", e);
                }
            }
        });

        Ok(Self {
            browser,
            handler: handler_task,
        })
    }

    /// Loads a page, runs the scroll passes, and returns markup plus fonts
    ///
    /// Scrolling happens in `scroll_passes` increasing fractions of the page
    /// height with a settle pause after each, which triggers most
    /// lazy-loading schemes. Scroll and font-probe failures are soft; a
    /// navigation failure or timeout is fatal to the run.
    pub async fn render_homepage(&self, url: &Url, config: &CrawlerConfig) -> Result<RenderedPage> {
        let timeout = Duration::from_millis(config.homepage_timeout_ms);

        let rendered = tokio::time::timeout(timeout, self.render_inner(url, config)).await;

        match rendered {
            Ok(result) => result.map_err(|e| ScrapeError::Homepage {
                url: url.as_str().to_string(),
                message: e.to_string(),
            }),
            Err(_) => Err(ScrapeError::Homepage {
                url: url.as_str().to_string(),
                message: format!("render timed out after {:?}", timeout),
            }),
        }
    }

    async fn render_inner(
        &self,
        url: &Url,
        config: &CrawlerConfig,
    ) -> std::result::Result<RenderedPage, chromiumoxide::error::CdpError> {
        let page = self.browser.new_page(url.as_str()).await?;
        page.wait_for_navigation().await?;

        self.scroll_page(&page, config).await;

        let html = page.content().await?;
        let fonts = probe_fonts(&page).await;

        if let Err(e) = page.close().await {
            tracing::debug!("Failed to close homepage tab: {}", e);
        }

        Ok(RenderedPage { html, fonts })
    }

    /// Scrolls through the page in increasing fractions of its height
    async fn scroll_page(&self, page: &Page, config: &CrawlerConfig) {
        let settle = Duration::from_millis(config.scroll_settle_ms);
        for pass in 1..=config.scroll_passes {
            let script = format!(
                "window.scrollTo(0, document.body.scrollHeight * {} / {})",
                pass, config.scroll_passes
            );
            if let Err(e) = page.evaluate(script).await {
                tracing::debug!("Scroll pass {} failed: {}", pass, e);
                return;
            }
            tokio::time::sleep(settle).await;
        }
    }

    /// Tears the session down; must be called exactly once per run
    pub async fn close(mut self) {
        if let Err(e) = self.browser.close().await {
            tracing::debug!("Browser close failed: {}", e);
        }
        if let Err(e) = self.browser.wait().await {
            tracing::debug!("Browser wait failed: {}", e);
        }
        self.handler.abort();
    }
}

impl Drop for BrowserSession {
    fn drop(&mut self) {
        // Backstop for panics between launch and close: without this the
        // CDP event loop task would outlive the session.
        self.handler.abort();
    }
}

/// Reads the FontMap out of the live page, defaulting on any failure
async fn probe_fonts(page: &Page) -> FontMap {
    match page.evaluate(FONT_PROBE_SCRIPT).await {
        Ok(result) => match result.into_value::<FontMap>() {
            Ok(fonts) => fonts,
            Err(e) => {
                tracing::warn!("Font probe returned unexpected shape: {}", e);
                FontMap::default()
            }
        },
        Err(e) => {
            tracing::warn!("Font probe failed: {}", e);
            FontMap::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_font_map_defaults_to_unknown() {
        let fonts = FontMap::default();
        assert_eq!(fonts.headers, "Unknown");
        assert_eq!(fonts.body, "Unknown");
    }

    #[test]
    fn test_font_map_fields_default_independently() {
        let fonts: FontMap = serde_json::from_str(r#"{"headers": "Futura"}"#).unwrap();
        assert_eq!(fonts.headers, "Futura");
        assert_eq!(fonts.body, "Unknown");
    }

    // Rendering itself needs a Chromium binary and is not exercised in unit
    // tests.
}
