use url::Url;

/// Extracts the crawl domain from a URL
///
/// The crawl domain is the lowercase host with any leading "www." stripped,
/// so `https://www.Example.com/` and `https://example.com/` describe the
/// same crawl target.
///
/// # Arguments
///
/// * `url` - The URL to extract the domain from
///
/// # Returns
///
/// * `Some(String)` - The lowercase, www-stripped domain
/// * `None` - If the URL has no host
///
/// # Examples
///
/// ```
/// use url::Url;
/// use brandsift::url::extract_domain;
///
/// let url = Url::parse("https://www.example.com/shop").unwrap();
/// assert_eq!(extract_domain(&url), Some("example.com".to_string()));
/// ```
pub fn extract_domain(url: &Url) -> Option<String> {
    url.host_str().map(|h| strip_www(h).to_lowercase())
}

/// Strips a leading "www." from a host name, if present
pub fn strip_www(host: &str) -> &str {
    host.strip_prefix("www.").unwrap_or(host)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_simple_domain() {
        let url = Url::parse("https://example.com/").unwrap();
        assert_eq!(extract_domain(&url), Some("example.com".to_string()));
    }

    #[test]
    fn test_extract_strips_www() {
        let url = Url::parse("https://www.example.com/").unwrap();
        assert_eq!(extract_domain(&url), Some("example.com".to_string()));
    }

    #[test]
    fn test_extract_keeps_other_subdomains() {
        let url = Url::parse("https://shop.example.com/catalog").unwrap();
        assert_eq!(extract_domain(&url), Some("shop.example.com".to_string()));
    }

    #[test]
    fn test_extract_lowercases() {
        let url = Url::parse("https://WWW.EXAMPLE.COM/").unwrap();
        assert_eq!(extract_domain(&url), Some("example.com".to_string()));
    }

    #[test]
    fn test_strip_www_only_leading() {
        assert_eq!(strip_www("www.example.com"), "example.com");
        assert_eq!(strip_www("example.com"), "example.com");
        assert_eq!(strip_www("wwwexample.com"), "wwwexample.com");
    }
}
