use crate::url::domain::strip_www;
use url::Url;

/// Path substrings that mark a page as noise for asset discovery
const PATH_BLOCKLIST: &[&str] = &["login", "signup", "cart", "account", "policy", "terms"];

/// Non-page extensions that internal links must not end in
const EXTENSION_BLOCKLIST: &[&str] = &[".pdf", ".zip", ".png", ".jpg"];

/// Resolves a reference against a base URL, keeping only http(s) results
///
/// Special schemes (`javascript:`, `mailto:`, `tel:`, `data:`) and
/// fragment-only references are dropped, as are references that fail to
/// resolve. This is a filter, not an error path.
///
/// # Arguments
///
/// * `reference` - The (possibly relative) reference to resolve
/// * `base` - The base URL of the page the reference was found on
pub fn resolve_absolute(reference: &str, base: &Url) -> Option<Url> {
    let reference = reference.trim();

    if reference.is_empty() {
        return None;
    }

    if reference.starts_with("javascript:")
        || reference.starts_with("mailto:")
        || reference.starts_with("tel:")
        || reference.starts_with("data:")
    {
        return None;
    }

    if reference.starts_with('#') {
        return None;
    }

    match base.join(reference) {
        Ok(absolute) if absolute.scheme() == "http" || absolute.scheme() == "https" => {
            Some(absolute)
        }
        _ => None,
    }
}

/// Resolves a reference and returns it only if it is an internal page link
///
/// A link is internal when its host equals the crawl domain (ignoring a
/// leading "www."), its scheme is http(s), its path contains none of the
/// noise substrings (login, signup, cart, account, policy, terms), and it
/// does not end in a non-page extension (.pdf, .zip, .png, .jpg).
/// Everything else is silently dropped.
///
/// # Arguments
///
/// * `reference` - The (possibly relative) href to resolve
/// * `base` - The base URL of the page the link was found on
/// * `domain` - The crawl domain, already www-stripped and lowercase
pub fn resolve_internal(reference: &str, base: &Url, domain: &str) -> Option<Url> {
    let resolved = resolve_absolute(reference, base)?;

    let host = resolved.host_str()?;
    if strip_www(host).to_lowercase() != domain {
        return None;
    }

    let path = resolved.path().to_lowercase();

    if PATH_BLOCKLIST.iter().any(|noise| path.contains(noise)) {
        return None;
    }

    if EXTENSION_BLOCKLIST.iter().any(|ext| path.ends_with(ext)) {
        return None;
    }

    Some(resolved)
}
