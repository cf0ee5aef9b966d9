//! URL helper functions

use percent_encoding::{AsciiSet, CONTROLS};

use crate::config::SiteConfig;

/// Characters escaped when a value is embedded in a query string.
const QUERY_VALUE: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'&')
    .add(b'+')
    .add(b'<')
    .add(b'=')
    .add(b'>')
    .add(b'?');

/// Generate a URL with the root path
///
/// # Examples
/// ```ignore
/// url_for(&config, "/assets/gazette.css") // -> "/blog-site/assets/gazette.css"
/// ```
pub fn url_for(config: &SiteConfig, path: &str) -> String {
    let root = config.root.trim_end_matches('/');
    let path = path.trim_start_matches('/');

    if path.is_empty() {
        format!("{}/", root)
    } else {
        format!("{}/{}", root, path)
    }
}

/// Generate a full URL including the domain
///
/// # Examples
/// ```ignore
/// full_url_for(&config, "/blog/my-post/") // -> "https://example.com/blog/my-post/"
/// ```
pub fn full_url_for(config: &SiteConfig, path: &str) -> String {
    let base = config.url.trim_end_matches('/');
    format!("{}{}", base, url_for(config, path))
}

/// Final non-empty segment of a URL path.
///
/// Related-post navigation slugs are derived this way from the canonical
/// `link` the API returns.
///
/// # Examples
/// ```ignore
/// last_path_segment("https://site.example/2024/my-post/") // -> Some("my-post")
/// ```
pub fn last_path_segment(link: &str) -> Option<&str> {
    link.split('/').filter(|s| !s.is_empty()).next_back()
}

/// Percent-encode a value for use in a query string.
pub fn encode_query(value: &str) -> String {
    percent_encoding::utf8_percent_encode(value, QUERY_VALUE).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> SiteConfig {
        let mut config = SiteConfig::default();
        config.url = "https://example.com".to_string();
        config.root = "/".to_string();
        config
    }

    #[test]
    fn test_url_for() {
        let config = test_config();
        assert_eq!(url_for(&config, "/blog/"), "/blog/");
        assert_eq!(url_for(&config, "assets/gazette.css"), "/assets/gazette.css");
        assert_eq!(url_for(&config, ""), "/");
    }

    #[test]
    fn test_url_for_with_subdir_root() {
        let mut config = test_config();
        config.root = "/site/".to_string();
        assert_eq!(url_for(&config, "/blog/"), "/site/blog/");
    }

    #[test]
    fn test_full_url_for() {
        let config = test_config();
        assert_eq!(
            full_url_for(&config, "/blog/my-post/"),
            "https://example.com/blog/my-post/"
        );
    }

    #[test]
    fn test_last_path_segment() {
        assert_eq!(
            last_path_segment("https://site.example/2024/my-post/"),
            Some("my-post")
        );
        assert_eq!(
            last_path_segment("https://site.example/2024/my-post"),
            Some("my-post")
        );
        assert_eq!(last_path_segment(""), None);
        assert_eq!(last_path_segment("///"), None);
    }

    #[test]
    fn test_encode_query() {
        assert_eq!(encode_query("my-post"), "my-post");
        assert_eq!(encode_query("my post"), "my%20post");
        assert_eq!(encode_query("a&b=c"), "a%26b%3Dc");
    }
}
