//! Generator module - pre-renders remote posts into static HTML files

use anyhow::Result;
use std::fs;
use std::path::PathBuf;

use crate::remote::{RemotePost, WpClient};
use crate::templates::{SiteContext, TemplateRenderer, STYLESHEET, STYLESHEET_PATH};
use crate::view::{ArticleView, PostView, ViewState};
use crate::Pressroom;

/// Static site generator backed by the WordPress REST API
pub struct Generator {
    app: Pressroom,
    renderer: TemplateRenderer,
    site: SiteContext,
}

impl Generator {
    /// Create a new generator
    pub fn new(app: &Pressroom) -> Result<Self> {
        let renderer = TemplateRenderer::new()?;
        let site = SiteContext::from_config(&app.config);

        Ok(Self {
            app: app.clone(),
            renderer,
            site,
        })
    }

    /// Generate the entire site
    ///
    /// Returns the number of article pages written.
    pub async fn generate(&self, client: &WpClient) -> Result<usize> {
        // Ensure public directory exists
        fs::create_dir_all(&self.app.public_dir)?;

        self.write_assets()?;
        self.write_not_found()?;

        let slugs = self.enumerate_slugs(client).await;
        tracing::info!("Found {} post(s) to render", slugs.len());

        let mut written = 0;
        for slug in slugs {
            let mut view = PostView::new(slug);
            view.refresh(client, self.app.config.api.sample_size).await;

            match view.state() {
                ViewState::Loaded(article) => {
                    self.write_article(view.slug(), article)?;
                    written += 1;
                }
                ViewState::Error(message) => {
                    tracing::warn!("Skipping '{}': {}", view.slug(), message);
                }
                ViewState::Loading => {
                    tracing::warn!("Skipping '{}': fetch did not settle", view.slug());
                }
            }
        }

        Ok(written)
    }

    /// All slugs the blog section should pre-render
    ///
    /// One bounded listing request. On failure the error is logged and
    /// the list comes back empty, so generation of the rest of the site
    /// still goes through.
    pub async fn enumerate_slugs(&self, client: &WpClient) -> Vec<String> {
        match client.recent_posts(self.app.config.api.page_size).await {
            Ok(posts) => slugs_from_posts(&posts),
            Err(err) => {
                tracing::error!("Slug enumeration failed: {}", err);
                Vec::new()
            }
        }
    }

    fn write_article(&self, slug: &str, article: &ArticleView) -> Result<()> {
        let dir = self.article_dir(slug)?;
        fs::create_dir_all(&dir)
            .map_err(|e| anyhow::anyhow!("Failed to create dir {:?}: {}", dir, e))?;

        let html = self.renderer.render_article(&self.site, article)?;
        let output_path = dir.join("index.html");
        fs::write(&output_path, &html)
            .map_err(|e| anyhow::anyhow!("Failed to write {:?}: {}", output_path, e))?;
        tracing::debug!("Generated post: {:?}", output_path);

        Ok(())
    }

    /// Directory a slug's page lands in, under the blog section
    ///
    /// Slugs come from a remote API, so anything that could escape the
    /// public directory is refused outright.
    fn article_dir(&self, slug: &str) -> Result<PathBuf> {
        if slug.is_empty() || slug == "." || slug == ".." || slug.contains(['/', '\\']) {
            anyhow::bail!("Refusing to generate unsafe slug {:?}", slug);
        }

        Ok(self
            .app
            .public_dir
            .join(self.app.config.blog_dir.trim_matches('/'))
            .join(slug))
    }

    fn write_not_found(&self) -> Result<()> {
        let html = self.renderer.render_not_found(&self.site, "")?;
        let output_path = self.app.public_dir.join("404.html");
        fs::write(&output_path, html)?;
        tracing::debug!("Generated: {:?}", output_path);

        Ok(())
    }

    fn write_assets(&self) -> Result<()> {
        let output_path = self.app.public_dir.join(STYLESHEET_PATH);
        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&output_path, STYLESHEET)?;
        tracing::debug!("Generated: {:?}", output_path);

        Ok(())
    }
}

/// Slugs of the given posts, in listing order
///
/// Posts the API returns without a slug cannot be routed and are
/// skipped.
pub fn slugs_from_posts(posts: &[RemotePost]) -> Vec<String> {
    posts
        .iter()
        .filter(|post| !post.slug.is_empty())
        .map(|post| post.slug.clone())
        .collect()
}
