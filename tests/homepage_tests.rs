//! Fatal-path tests for the rendered homepage fetch
//!
//! These launch a real Chromium binary, so they are ignored by default.
//! Run with `cargo test -- --ignored` on a machine with Chrome installed.

use brandsift::{scrape, ProgressReporter, ScrapeError};

#[tokio::test]
#[ignore = "launches a real Chromium binary"]
async fn test_unreachable_homepage_fails_the_run() {
    // Port 1 refuses connections; the homepage can never load.
    let result = scrape("http://127.0.0.1:1/", 3, ProgressReporter::noop()).await;

    match result {
        Err(ScrapeError::Homepage { .. }) | Err(ScrapeError::BrowserLaunch(_)) => {}
        Ok((assets, fonts)) => panic!(
            "expected a fatal error, got {} assets and fonts {:?}",
            assets.len(),
            fonts
        ),
        Err(other) => panic!("expected a fatal homepage error, got {}", other),
    }
}
