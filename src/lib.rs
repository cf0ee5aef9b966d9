//! pressroom: a static site generator for WordPress-backed blogs
//!
//! This crate pre-renders the blog section of a site whose content
//! lives in a remote WordPress install, pulling posts over the REST API
//! and rendering them with an embedded Tera theme. A preview server can
//! also render pages live, straight from the API.

pub mod commands;
pub mod config;
pub mod generator;
pub mod helpers;
pub mod remote;
pub mod server;
pub mod templates;
pub mod view;

use anyhow::Result;
use std::path::Path;

/// The main application
#[derive(Clone)]
pub struct Pressroom {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: std::path::PathBuf,
    /// Public (output) directory
    pub public_dir: std::path::PathBuf,
}

impl Pressroom {
    /// Create a new instance from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        let public_dir = base_dir.join(&config.public_dir);

        Ok(Self {
            config,
            base_dir,
            public_dir,
        })
    }

    /// API client for the configured WordPress site
    pub fn client(&self) -> Result<remote::WpClient> {
        Ok(remote::WpClient::new(&self.config.api.base_url)?)
    }

    /// Initialize a new site in the base directory
    pub fn init(&self) -> Result<()> {
        commands::init::run(self)
    }

    /// Generate the static site
    pub async fn generate(&self) -> Result<()> {
        commands::generate::run(self).await
    }

    /// Clean the public directory
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }
}
