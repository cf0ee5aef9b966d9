//! Initialize a new site

use anyhow::Result;
use std::fs;
use std::path::Path;

use crate::Pressroom;

/// Configuration scaffold written for a fresh site
const DEFAULT_CONFIG: &str = r#"# Pressroom Configuration

# Site
title: Pressroom
description: ''
author: John Doe
language: en

# URL
url: http://example.com
root: /

# Directory
public_dir: public
blog_dir: blog
shop_path: /shop

# Content source
api:
  base_url: https://example.com/wp-json/wp/v2
  page_size: 100
  sample_size: 3
"#;

/// Initialize a new site in the given directory
pub fn init_site(target_dir: &Path) -> Result<()> {
    let config_path = target_dir.join("_config.yml");
    if config_path.exists() {
        anyhow::bail!("{:?} already contains a _config.yml", target_dir);
    }

    fs::create_dir_all(target_dir)?;
    fs::write(&config_path, DEFAULT_CONFIG)?;

    Ok(())
}

/// Run the init command with an existing instance
pub fn run(app: &Pressroom) -> Result<()> {
    init_site(&app.base_dir)
}
