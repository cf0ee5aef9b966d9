//! Post model for the WordPress REST API

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::helpers::url::last_path_segment;

/// A field whose value WordPress ships as pre-rendered HTML
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Rendered {
    /// Rendered HTML markup
    #[serde(default)]
    pub rendered: String,
}

/// Featured image URLs, keyed by size
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeaturedImage {
    /// Full-size variants; the first entry is the canonical URL
    #[serde(default)]
    pub full: Vec<String>,
}

/// A blog post as returned by `/wp-json/wp/v2/posts`
///
/// Only the fields the site renders are modeled; everything else in the
/// payload is ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemotePost {
    /// Post id
    pub id: u64,

    /// URL-friendly name
    #[serde(default)]
    pub slug: String,

    /// Post title
    #[serde(default)]
    pub title: Rendered,

    /// Post body
    #[serde(default)]
    pub content: Rendered,

    /// Post excerpt
    #[serde(default)]
    pub excerpt: Rendered,

    /// Publication date, in the site's local time without an offset
    pub date: NaiveDateTime,

    /// Featured image, when the theme exposes one
    #[serde(default, rename = "uagb_featured_image_src")]
    pub featured_image: Option<FeaturedImage>,

    /// Canonical URL on the source site
    #[serde(default)]
    pub link: String,
}

impl RemotePost {
    /// Full-size featured image URL, if the post has one
    pub fn featured_url(&self) -> Option<&str> {
        self.featured_image
            .as_ref()
            .and_then(|image| image.full.first())
            .map(String::as_str)
    }

    /// Slug for routing, derived from the canonical link
    ///
    /// The `link` field reflects the source site's permalink structure,
    /// which may nest the slug under date segments. The last segment is
    /// the slug itself.
    pub fn route_slug(&self) -> Option<&str> {
        last_path_segment(&self.link)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const POST_JSON: &str = r#"{
        "id": 42,
        "slug": "my-post",
        "title": { "rendered": "Hello <em>World</em>" },
        "content": { "rendered": "<p>Body text</p>" },
        "excerpt": { "rendered": "<p>Summary</p>" },
        "date": "2024-03-04T10:30:00",
        "uagb_featured_image_src": {
            "full": ["https://site.example/img/cover.jpg"]
        },
        "link": "https://site.example/2024/my-post/"
    }"#;

    #[test]
    fn test_parse_post() {
        let post: RemotePost = serde_json::from_str(POST_JSON).unwrap();
        assert_eq!(post.id, 42);
        assert_eq!(post.slug, "my-post");
        assert_eq!(post.title.rendered, "Hello <em>World</em>");
        assert_eq!(post.date.format("%Y-%m-%d").to_string(), "2024-03-04");
        assert_eq!(
            post.featured_url(),
            Some("https://site.example/img/cover.jpg")
        );
    }

    #[test]
    fn test_parse_post_without_image() {
        let json = r#"{
            "id": 7,
            "slug": "bare",
            "title": { "rendered": "Bare" },
            "content": { "rendered": "" },
            "excerpt": { "rendered": "" },
            "date": "2023-01-01T00:00:00",
            "link": "https://site.example/bare/"
        }"#;
        let post: RemotePost = serde_json::from_str(json).unwrap();
        assert_eq!(post.featured_url(), None);
    }

    #[test]
    fn test_route_slug_from_dated_permalink() {
        let post: RemotePost = serde_json::from_str(POST_JSON).unwrap();
        assert_eq!(post.route_slug(), Some("my-post"));
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let json = r#"{
            "id": 1,
            "slug": "s",
            "title": { "rendered": "T" },
            "content": { "rendered": "C", "protected": false },
            "excerpt": { "rendered": "E" },
            "date": "2024-06-01T08:00:00",
            "link": "https://site.example/s/",
            "status": "publish",
            "categories": [3, 9]
        }"#;
        let post: RemotePost = serde_json::from_str(json).unwrap();
        assert_eq!(post.id, 1);
    }
}
