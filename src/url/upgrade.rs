use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

/// Dimension suffix immediately before the extension: photo-800x600.jpg
static DIMENSION_SUFFIX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)[-_]\d{2,}x\d+(\.[a-z0-9]+)$").unwrap());

/// Width prefix at the start of a path segment: 500x_photo.jpg
static WIDTH_PREFIX_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)(^|/)\d{2,}x[-_]").unwrap());

/// Size/quality tokens immediately before the extension: photo_small.jpg
static SIZE_TOKEN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)_(?:small|thumb|medium|large|grande|icon|square|compact|portrait|landscape|cropped|\d+x)\.",
    )
    .unwrap()
});

/// Query keys that indicate server-side resizing
const RESIZE_QUERY_KEYS: &[&str] = &["width", "w", "height", "h", "size", "quality", "q"];

/// Attempts to rewrite a thumbnail URL into its original-resolution source
///
/// The path is rewritten by stripping, to a fixpoint:
/// 1. `-NNNxMMM`/`_NNNxMMM` dimension suffixes before the extension
/// 2. `NNNx_`/`NNNx-` width prefixes on a path segment
/// 3. common size/quality tokens (`_small`, `_thumb`, `_grande`, `_1024x`, ...)
///    before the extension, case-insensitively
///
/// Only when none of those change the path, a query string carrying a
/// resize-related key (width, w, height, h, size, quality, q) is dropped
/// entirely. A URL with no matching pattern is returned unchanged; that is
/// the expected steady state, not a failure. Re-applying the rewrite to its
/// own output is a no-op.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use brandsift::url::upgrade_to_high_res;
///
/// let thumb = Url::parse("https://cdn.example.com/img/hero-600x400.jpg").unwrap();
/// assert_eq!(
///     upgrade_to_high_res(&thumb).as_str(),
///     "https://cdn.example.com/img/hero.jpg"
/// );
/// ```
pub fn upgrade_to_high_res(url: &Url) -> Url {
    let original_path = url.path().to_string();
    let mut path = original_path.clone();

    // Strip patterns until the path stops changing, so stacked markers
    // (photo_small-100x100.jpg) collapse in a single call.
    loop {
        let mut next = DIMENSION_SUFFIX_RE.replace_all(&path, "$1").into_owned();
        next = WIDTH_PREFIX_RE.replace_all(&next, "$1").into_owned();
        next = SIZE_TOKEN_RE.replace_all(&next, ".").into_owned();

        if next == path {
            break;
        }
        path = next;
    }

    if path != original_path {
        let mut upgraded = url.clone();
        upgraded.set_path(&path);
        return upgraded;
    }

    if has_resize_query(url) {
        let mut upgraded = url.clone();
        upgraded.set_query(None);
        return upgraded;
    }

    url.clone()
}

/// Checks whether the query string carries a resize-related key
fn has_resize_query(url: &Url) -> bool {
    url.query_pairs().any(|(key, _)| {
        RESIZE_QUERY_KEYS
            .iter()
            .any(|resize| key.eq_ignore_ascii_case(resize))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upgrade(input: &str) -> String {
        upgrade_to_high_res(&Url::parse(input).unwrap())
            .as_str()
            .to_string()
    }

    #[test]
    fn test_strip_dimension_suffix_dash() {
        assert_eq!(
            upgrade("https://cdn.example.com/img/hero-600x400.jpg"),
            "https://cdn.example.com/img/hero.jpg"
        );
    }

    #[test]
    fn test_strip_dimension_suffix_underscore() {
        assert_eq!(
            upgrade("https://cdn.example.com/img/hero_1024x768.png"),
            "https://cdn.example.com/img/hero.png"
        );
    }

    #[test]
    fn test_strip_width_prefix() {
        assert_eq!(
            upgrade("https://cdn.example.com/products/500x_lookbook.jpg"),
            "https://cdn.example.com/products/lookbook.jpg"
        );
    }

    #[test]
    fn test_strip_size_tokens() {
        assert_eq!(
            upgrade("https://cdn.example.com/p/shirt_small.jpg"),
            "https://cdn.example.com/p/shirt.jpg"
        );
        assert_eq!(
            upgrade("https://cdn.example.com/p/shirt_grande.webp"),
            "https://cdn.example.com/p/shirt.webp"
        );
        assert_eq!(
            upgrade("https://cdn.example.com/p/shirt_200x.jpg"),
            "https://cdn.example.com/p/shirt.jpg"
        );
    }

    #[test]
    fn test_size_tokens_case_insensitive() {
        assert_eq!(
            upgrade("https://cdn.example.com/p/shirt_Large.JPG"),
            "https://cdn.example.com/p/shirt.JPG"
        );
    }

    #[test]
    fn test_stacked_markers_collapse() {
        assert_eq!(
            upgrade("https://cdn.example.com/p/photo_thumb_small.jpg"),
            "https://cdn.example.com/p/photo.jpg"
        );
        assert_eq!(
            upgrade("https://cdn.example.com/p/photo_small-100x100.jpg"),
            "https://cdn.example.com/p/photo.jpg"
        );
    }

    #[test]
    fn test_path_rules_are_idempotent() {
        for input in [
            "https://cdn.example.com/img/hero-600x400.jpg",
            "https://cdn.example.com/products/500x_lookbook.jpg",
            "https://cdn.example.com/p/photo_thumb_small.jpg",
            "https://cdn.example.com/p/plain.jpg",
        ] {
            let once = upgrade_to_high_res(&Url::parse(input).unwrap());
            let twice = upgrade_to_high_res(&once);
            assert_eq!(once, twice, "re-applying changed {}", input);
        }
    }

    #[test]
    fn test_query_stripped_when_resize_key_present() {
        assert_eq!(
            upgrade("https://x.com/img.jpg?width=200&v=3"),
            "https://x.com/img.jpg"
        );
        assert_eq!(
            upgrade("https://x.com/img.jpg?q=60"),
            "https://x.com/img.jpg"
        );
    }

    #[test]
    fn test_query_kept_without_resize_key() {
        assert_eq!(
            upgrade("https://x.com/img.jpg?v=3"),
            "https://x.com/img.jpg?v=3"
        );
    }

    #[test]
    fn test_query_kept_when_path_rule_matched() {
        // The filename rewrite already changed the URL, so the cache-busting
        // query survives.
        assert_eq!(
            upgrade("https://x.com/img_small.jpg?width=200"),
            "https://x.com/img.jpg?width=200"
        );
    }

    #[test]
    fn test_resize_key_match_is_exact() {
        // "view" contains "w" but is not a resize key
        assert_eq!(
            upgrade("https://x.com/img.jpg?view=large"),
            "https://x.com/img.jpg?view=large"
        );
    }

    #[test]
    fn test_no_pattern_returns_unchanged() {
        assert_eq!(
            upgrade("https://cdn.example.com/img/hero.jpg"),
            "https://cdn.example.com/img/hero.jpg"
        );
    }

    #[test]
    fn test_small_dimension_numbers_kept() {
        // Single-digit dimensions are more likely part of the name than a
        // resize marker.
        assert_eq!(
            upgrade("https://cdn.example.com/img/v-1x1.jpg"),
            "https://cdn.example.com/img/v-1x1.jpg"
        );
    }
}
