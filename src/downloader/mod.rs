//! Concurrent asset downloading and persistence
//!
//! Takes the deduplicated candidate URL set accumulated by the crawl and
//! fetches it over a bounded worker pool. Every per-URL failure (network,
//! HTTP status, decode, quality gate) is absorbed; the run keeps whatever
//! survives. Identical bytes fetched twice, typically via a thumbnail URL
//! and its high-resolution rewrite, are stored once.

mod quality;

pub use quality::{apply_quality_gate, extension_for_content_type, AcceptedImage};

use crate::config::DownloaderConfig;
use crate::progress::ProgressReporter;
use chrono::Utc;
use futures::{stream, StreamExt};
use reqwest::{Client, StatusCode};
use sha2::{Digest, Sha256};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use url::Url;

/// A retained asset on local storage
///
/// Created only after the quality gate; the crawler core exclusively names
/// and writes these files, downstream consumers only read them. Vector
/// assets (SVG) skip the gate and report zero pixel dimensions.
#[derive(Debug, Clone)]
pub struct DownloadedAsset {
    /// Absolute or root-relative path of the saved file
    pub path: PathBuf,

    /// The URL the bytes came from, when known
    pub source_url: Option<Url>,

    /// Size of the saved file in bytes, after any downscale
    pub byte_size: u64,

    /// Pixel width of the saved image (0 for vector formats)
    pub pixel_width: u32,

    /// Pixel height of the saved image (0 for vector formats)
    pub pixel_height: u32,
}

/// Downloads a set of candidate asset URLs into the per-site directory
///
/// Files land flat under `<download_root>/<domain>/` with
/// `asset_<sequence>_<time-suffix><ext>` names, so nothing is overwritten
/// within a run. Results arrive in completion order; no ordering guarantee
/// is made and none is needed downstream.
///
/// # Arguments
///
/// * `client` - The HTTP client to fetch with
/// * `urls` - Deduplicated candidate asset URLs
/// * `domain` - Crawl domain, names the target directory
/// * `config` - Concurrency, dimension bounds, download root
/// * `progress` - Sink for periodic download progress
pub async fn download_assets(
    client: &Client,
    urls: HashSet<Url>,
    domain: &str,
    config: &DownloaderConfig,
    progress: &ProgressReporter,
) -> Vec<DownloadedAsset> {
    let directory = Path::new(&config.download_root).join(domain);
    if let Err(e) = std::fs::create_dir_all(&directory) {
        tracing::error!(
            "Cannot create download directory {}: {}",
            directory.display(),
            e
        );
        progress.report("Download directory could not be created; no assets saved.");
        return Vec::new();
    }

    let total = urls.len();
    let mut downloads = stream::iter(urls.into_iter().enumerate())
        .map(|(index, url)| {
            let client = client.clone();
            let directory = directory.clone();
            let config = config.clone();
            async move { download_single(&client, url, &directory, index, &config).await }
        })
        .buffer_unordered(config.concurrency);

    let mut seen_digests: HashSet<String> = HashSet::new();
    let mut assets = Vec::new();
    let mut attempted = 0usize;

    while let Some(outcome) = downloads.next().await {
        attempted += 1;

        if let Some((asset, digest)) = outcome {
            if seen_digests.insert(digest) {
                assets.push(asset);
            } else {
                // Same bytes arrived through another URL; keep the first copy.
                tracing::debug!(
                    "Dropping duplicate content from {:?}",
                    asset.source_url.as_ref().map(Url::as_str)
                );
                if let Err(e) = std::fs::remove_file(&asset.path) {
                    tracing::debug!("Failed to remove duplicate {}: {}", asset.path.display(), e);
                }
            }
        }

        if attempted % 10 == 0 || attempted == total {
            progress.report_fraction("Downloading assets", attempted, total);
        }
    }

    assets
}

/// Fetches, persists, and gates a single asset URL
///
/// Returns the retained asset together with the SHA-256 of the fetched
/// bytes, or `None` on any failure along the way.
async fn download_single(
    client: &Client,
    url: Url,
    directory: &Path,
    index: usize,
    config: &DownloaderConfig,
) -> Option<(DownloadedAsset, String)> {
    let response = match client.get(url.clone()).send().await {
        Ok(response) => response,
        Err(e) => {
            tracing::debug!("Asset fetch failed for {}: {}", url, e);
            return None;
        }
    };

    if response.status() != StatusCode::OK {
        tracing::debug!("Asset fetch for {} returned HTTP {}", url, response.status());
        return None;
    }

    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("")
        .to_string();
    let extension = extension_for_content_type(&content_type);

    let bytes = match response.bytes().await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::debug!("Asset body read failed for {}: {}", url, e);
            return None;
        }
    };

    let digest = hex::encode(Sha256::digest(&bytes));

    let suffix = Utc::now().timestamp_millis().rem_euclid(10_000);
    let path = directory.join(format!("asset_{}_{}{}", index, suffix, extension));

    // File and image work is blocking; keep it off the fetch workers.
    let gate_config = config.clone();
    let saved = tokio::task::spawn_blocking(move || {
        if let Err(e) = std::fs::write(&path, &bytes) {
            tracing::debug!("Failed to write {}: {}", path.display(), e);
            return None;
        }

        if extension == ".svg" {
            let byte_size = bytes.len() as u64;
            return Some((path, 0, 0, byte_size));
        }

        let accepted = apply_quality_gate(&path, &gate_config)?;
        Some((path, accepted.width, accepted.height, accepted.byte_size))
    })
    .await
    .ok()??;

    let (path, pixel_width, pixel_height, byte_size) = saved;

    Some((
        DownloadedAsset {
            path,
            source_url: Some(url),
            byte_size,
            pixel_width,
            pixel_height,
        },
        digest,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    // Download behavior is exercised against wiremock servers in the
    // integration tests; the gate itself is covered in `quality`.

    #[test]
    fn test_asset_filename_shape() {
        let directory = Path::new("assets/example.com");
        let path = directory.join(format!("asset_{}_{}{}", 3, 1234, ".png"));
        assert_eq!(path, Path::new("assets/example.com/asset_3_1234.png"));
    }
}
