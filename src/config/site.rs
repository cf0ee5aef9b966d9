//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    pub author: String,
    pub language: String,

    // URL
    pub url: String,
    pub root: String,

    // Directory
    pub public_dir: String,
    /// Path segment the blog section lives under, e.g. `blog` for `/blog/<slug>/`
    pub blog_dir: String,
    /// Where the "Shop" navigation entry points
    pub shop_path: String,

    // Content source
    #[serde(default)]
    pub api: ApiConfig,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Pressroom".to_string(),
            description: String::new(),
            author: "John Doe".to_string(),
            language: "en".to_string(),

            url: "http://example.com".to_string(),
            root: "/".to_string(),

            public_dir: "public".to_string(),
            blog_dir: "blog".to_string(),
            shop_path: "/shop".to_string(),

            api: ApiConfig::default(),
            extra: HashMap::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }
}

/// WordPress REST API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the wp-json v2 endpoint, without a trailing slash
    pub base_url: String,
    /// How many posts a single listing request may return
    pub page_size: usize,
    /// How many recent posts to pull when picking related articles
    pub sample_size: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://example.com/wp-json/wp/v2".to_string(),
            page_size: 100,
            sample_size: 3,
        }
    }
}
