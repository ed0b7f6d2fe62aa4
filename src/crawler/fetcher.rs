//! Fast HTTP page fetching
//!
//! Secondary pages are fetched with a plain GET and a short timeout; anything
//! other than a clean 200 with a body is a soft miss that costs the run one
//! page of coverage and nothing else.

use reqwest::{Client, StatusCode};
use std::time::Duration;
use url::Url;

/// Builds the HTTP client shared by page fetches and asset downloads
///
/// # Arguments
///
/// * `user_agent` - User-Agent header sent with every request
/// * `timeout` - Per-request timeout
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(user_agent: &str, timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent)
        .timeout(timeout)
        .connect_timeout(timeout)
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a page body over plain HTTP
///
/// Returns `None` on any non-200 response, network error, or timeout. The
/// caller treats a miss as zero assets contributed by that page; nothing is
/// retried and nothing propagates.
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `url` - The page URL to fetch
pub async fn fetch_page(client: &Client, url: &Url) -> Option<String> {
    match client.get(url.clone()).send().await {
        Ok(response) if response.status() == StatusCode::OK => match response.text().await {
            Ok(body) => Some(body),
            Err(e) => {
                tracing::debug!("Failed to read body of {}: {}", url, e);
                None
            }
        },
        Ok(response) => {
            tracing::debug!("Skipping {}: HTTP {}", url, response.status());
            None
        }
        Err(e) => {
            tracing::debug!("Skipping {}: {}", url, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_http_client() {
        let client = build_http_client("TestAgent/1.0", Duration::from_secs(5));
        assert!(client.is_ok());
    }

    // Response handling is exercised against wiremock servers in the
    // integration tests.
}
