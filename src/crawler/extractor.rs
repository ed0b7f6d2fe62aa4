//! Asset URL and link extraction from page markup
//!
//! Finds image references in `<img>` tags (direct sources, responsive
//! candidate lists, lazy-load attributes) and inline `url(...)` backgrounds,
//! resolves them against the page URL, and pairs each direct reference with
//! its high-resolution rewrite when the heuristic produces one.

use crate::url::{resolve_absolute, resolve_internal, upgrade_to_high_res};
use scraper::{Html, Selector};
use std::collections::HashSet;
use url::Url;

/// Single-source attributes checked on `<img>` tags, first match wins
const SOURCE_ATTRIBUTES: &[&str] = &["src", "data-src", "data-original"];

/// Extensions that mark a URL as an image asset candidate
const ASSET_EXTENSIONS: &[&str] = &[".jpg", ".jpeg", ".png", ".webp", ".svg", ".gif"];

/// Extracts candidate asset URLs from a page
///
/// # Extraction Rules
///
/// 1. `srcset`/`data-srcset`: every candidate is parsed as (url, width
///    descriptor) and the widest one is kept (weight 0 when the descriptor
///    is absent).
/// 2. `src`, `data-src`, `data-original` (first present wins): resolved
///    against the page URL; kept only when the result is absolute http(s).
/// 3. Inline `style` attributes: the first `url(...)` reference.
/// 4. URLs from rules 2-3 are additionally run through the high-resolution
///    rewrite; when it changes the URL, both variants are kept and the
///    downloader sorts out which one actually exists.
///
/// The final set keeps only URLs whose path ends in a known image extension
/// or contains an "images" segment.
///
/// # Arguments
///
/// * `html` - The page markup
/// * `base` - The URL the page was fetched from
pub fn extract_asset_urls(html: &str, base: &Url) -> HashSet<Url> {
    let document = Html::parse_document(html);
    let mut urls = HashSet::new();

    if let Ok(img_selector) = Selector::parse("img") {
        for element in document.select(&img_selector) {
            let srcset = element
                .value()
                .attr("srcset")
                .or_else(|| element.value().attr("data-srcset"));
            if let Some(srcset) = srcset {
                if let Some(best) = best_srcset_candidate(srcset, base) {
                    urls.insert(best);
                }
            }

            let source = SOURCE_ATTRIBUTES
                .iter()
                .find_map(|attr| element.value().attr(attr));
            if let Some(source) = source {
                insert_with_upgrade(&mut urls, source, base);
            }
        }
    }

    if let Ok(styled_selector) = Selector::parse("[style]") {
        for element in document.select(&styled_selector) {
            if let Some(style) = element.value().attr("style") {
                if let Some(reference) = first_css_url(style) {
                    insert_with_upgrade(&mut urls, reference, base);
                }
            }
        }
    }

    urls.retain(is_candidate_asset);
    urls
}

/// Resolves a reference and stores it together with its high-res rewrite
fn insert_with_upgrade(urls: &mut HashSet<Url>, reference: &str, base: &Url) {
    if let Some(resolved) = resolve_absolute(reference, base) {
        let upgraded = upgrade_to_high_res(&resolved);
        if upgraded != resolved {
            urls.insert(upgraded);
        }
        urls.insert(resolved);
    }
}

/// Picks the widest candidate from a srcset attribute value
///
/// Each comma-separated candidate is `url [descriptor]`; a `NNNw` descriptor
/// weighs the candidate, anything else (or no descriptor) weighs 0. The
/// first candidate with the maximum weight wins.
fn best_srcset_candidate(srcset: &str, base: &Url) -> Option<Url> {
    let mut best: Option<(Url, u64)> = None;

    for candidate in srcset.split(',') {
        let mut parts = candidate.split_whitespace();
        let reference = match parts.next() {
            Some(r) => r,
            None => continue,
        };

        let weight = parts
            .next()
            .and_then(|descriptor| descriptor.strip_suffix('w'))
            .and_then(|digits| digits.parse::<u64>().ok())
            .unwrap_or(0);

        let resolved = match resolve_absolute(reference, base) {
            Some(r) => r,
            None => continue,
        };

        match &best {
            Some((_, best_weight)) if *best_weight >= weight => {}
            _ => best = Some((resolved, weight)),
        }
    }

    best.map(|(url, _)| url)
}

/// Extracts the first `url(...)` reference from an inline style value
fn first_css_url(style: &str) -> Option<&str> {
    let after_open = style.split_once("url(")?.1;
    let reference = after_open.split(')').next()?;
    Some(reference.trim().trim_matches(|c| c == '"' || c == '\''))
}

/// Keeps only URLs that plausibly point at an image
fn is_candidate_asset(url: &Url) -> bool {
    let path = url.path().to_lowercase();
    ASSET_EXTENSIONS.iter().any(|ext| path.ends_with(ext)) || path.contains("images")
}

/// Extracts internal page links from a page, in document order, deduplicated
///
/// # Arguments
///
/// * `html` - The page markup
/// * `base` - The URL the page was fetched from
/// * `domain` - The crawl domain (lowercase, www-stripped)
pub fn extract_internal_links(html: &str, base: &Url, domain: &str) -> Vec<Url> {
    let document = Html::parse_document(html);
    let mut seen = HashSet::new();
    let mut links = Vec::new();

    if let Ok(anchor_selector) = Selector::parse("a[href]") {
        for element in document.select(&anchor_selector) {
            if let Some(href) = element.value().attr("href") {
                if let Some(link) = resolve_internal(href, base, domain) {
                    if seen.insert(link.clone()) {
                        links.push(link);
                    }
                }
            }
        }
    }

    links
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_url() -> Url {
        Url::parse("https://example.com/lookbook").unwrap()
    }

    fn extract(html: &str) -> HashSet<String> {
        extract_asset_urls(html, &base_url())
            .into_iter()
            .map(|u| u.as_str().to_string())
            .collect()
    }

    #[test]
    fn test_srcset_picks_widest_candidate() {
        let html = r#"<img srcset="a.jpg 400w, b.jpg 1200w, c.jpg 800w">"#;
        let urls = extract(html);
        assert!(urls.contains("https://example.com/b.jpg"), "urls={urls:?}");
        assert!(!urls.contains("https://example.com/a.jpg"));
        assert!(!urls.contains("https://example.com/c.jpg"));
    }

    #[test]
    fn test_srcset_without_descriptors_keeps_first() {
        let html = r#"<img srcset="first.jpg, second.jpg">"#;
        let urls = extract(html);
        assert!(urls.contains("https://example.com/first.jpg"));
        assert!(!urls.contains("https://example.com/second.jpg"));
    }

    #[test]
    fn test_data_srcset_honored() {
        let html = r#"<img data-srcset="/lazy.jpg 900w">"#;
        let urls = extract(html);
        assert!(urls.contains("https://example.com/lazy.jpg"));
    }

    #[test]
    fn test_src_resolved_against_base() {
        let html = r#"<img src="/img/hero.png">"#;
        let urls = extract(html);
        assert!(urls.contains("https://example.com/img/hero.png"));
    }

    #[test]
    fn test_src_wins_over_lazy_attributes() {
        let html = r#"<img src="/real.jpg" data-src="/lazy.jpg">"#;
        let urls = extract(html);
        assert!(urls.contains("https://example.com/real.jpg"));
        assert!(!urls.contains("https://example.com/lazy.jpg"));
    }

    #[test]
    fn test_lazy_attribute_fallback_order() {
        let html = r#"<img data-original="/original.jpg">"#;
        let urls = extract(html);
        assert!(urls.contains("https://example.com/original.jpg"));
    }

    #[test]
    fn test_upgrade_keeps_both_variants() {
        let html = r#"<img src="/p/shirt_small.jpg">"#;
        let urls = extract(html);
        assert!(urls.contains("https://example.com/p/shirt_small.jpg"));
        assert!(urls.contains("https://example.com/p/shirt.jpg"));
    }

    #[test]
    fn test_inline_background_extracted_and_upgraded() {
        let html = r#"<div style="background-image: url('/bg/hero-1920x800.jpg'); color: red"></div>"#;
        let urls = extract(html);
        assert!(urls.contains("https://example.com/bg/hero-1920x800.jpg"));
        assert!(urls.contains("https://example.com/bg/hero.jpg"));
    }

    #[test]
    fn test_extension_filter() {
        let html = r#"
            <img src="/video/clip.mp4">
            <img src="/img/logo.svg">
            <img src="/img/photo.webp">
        "#;
        let urls = extract(html);
        assert!(!urls.iter().any(|u| u.contains("clip.mp4")));
        assert!(urls.contains("https://example.com/img/logo.svg"));
        assert!(urls.contains("https://example.com/img/photo.webp"));
    }

    #[test]
    fn test_images_path_segment_accepted_without_extension() {
        let html = r#"<img src="/cdn/images/12345">"#;
        let urls = extract(html);
        assert!(urls.contains("https://example.com/cdn/images/12345"));
    }

    #[test]
    fn test_data_uri_ignored() {
        let html = r#"<img src="data:image/png;base64,AAAA">"#;
        assert!(extract(html).is_empty());
    }

    #[test]
    fn test_duplicates_collapse() {
        let html = r#"
            <img src="/img/hero.jpg">
            <img src="/img/hero.jpg">
            <div style="background: url(/img/hero.jpg)"></div>
        "#;
        let urls = extract(html);
        assert_eq!(urls.len(), 1);
    }

    #[test]
    fn test_internal_links_deduplicated_in_order() {
        let html = r#"
            <a href="/about">About</a>
            <a href="/shop">Shop</a>
            <a href="/about">About again</a>
            <a href="https://other.com/">External</a>
            <a href="/login">Login</a>
        "#;
        let links = extract_internal_links(html, &base_url(), "example.com");
        let link_strs: Vec<_> = links.iter().map(|u| u.as_str()).collect();
        assert_eq!(
            link_strs,
            vec!["https://example.com/about", "https://example.com/shop"]
        );
    }
}
