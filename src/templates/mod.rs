//! Built-in gazette theme templates using Tera template engine
//!
//! All templates are embedded directly in the binary, so a generated
//! site needs no theme directory on disk.

use anyhow::Result;
use chrono::Datelike;
use serde::Serialize;
use std::collections::HashMap;
use tera::{Context, Tera};

use crate::config::SiteConfig;
use crate::helpers::html::{strip_html, truncate};
use crate::helpers::url::{full_url_for, url_for};
use crate::view::ArticleView;

/// Stylesheet shipped with the theme
pub const STYLESHEET: &str = include_str!("gazette/gazette.css");

/// Where the stylesheet lands inside the public directory
pub const STYLESHEET_PATH: &str = "assets/gazette.css";

/// Template renderer with embedded gazette theme
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all gazette templates loaded
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        // Disable autoescaping: the API hands us pre-rendered HTML, and
        // it must reach the page untouched
        tera.autoescape_on(vec![]);

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("gazette/layout.html")),
            ("article.html", include_str!("gazette/article.html")),
            ("not_found.html", include_str!("gazette/not_found.html")),
            // Partials
            (
                "partials/head.html",
                include_str!("gazette/partials/head.html"),
            ),
            (
                "partials/nav.html",
                include_str!("gazette/partials/nav.html"),
            ),
            (
                "partials/footer.html",
                include_str!("gazette/partials/footer.html"),
            ),
        ])?;

        tera.register_filter("strip_html", strip_html_filter);
        tera.register_filter("truncate_chars", truncate_chars_filter);

        Ok(Self { tera })
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }

    /// Render a full article page
    pub fn render_article(&self, site: &SiteContext, article: &ArticleView) -> Result<String> {
        let mut context = Context::new();
        context.insert("site", site);
        context.insert("article", article);
        self.render("article.html", &context)
    }

    /// Render the not-found page, optionally with an error detail
    pub fn render_not_found(&self, site: &SiteContext, message: &str) -> Result<String> {
        let mut context = Context::new();
        context.insert("site", site);
        context.insert("message", message);
        self.render("not_found.html", &context)
    }
}

/// Tera filter: strip HTML tags
fn strip_html_filter(
    value: &tera::Value,
    _args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("strip_html", "value", String, value);
    Ok(tera::Value::String(strip_html(&s)))
}

/// Tera filter: truncate by character count
fn truncate_chars_filter(
    value: &tera::Value,
    args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("truncate_chars", "value", String, value);
    let length = match args.get("length") {
        Some(val) => tera::try_get_value!("truncate_chars", "length", usize, val),
        None => 150,
    };
    let omission = match args.get("omission") {
        Some(val) => Some(tera::try_get_value!(
            "truncate_chars",
            "omission",
            String,
            val
        )),
        None => None,
    };

    Ok(tera::Value::String(truncate(
        &s,
        length,
        omission.as_deref(),
    )))
}

/// Site-wide values every template receives
#[derive(Debug, Clone, Serialize)]
pub struct SiteContext {
    pub title: String,
    pub description: String,
    pub author: String,
    pub language: String,
    /// Root-relative URL of the site root, e.g. "/"
    pub root_url: String,
    /// Root-relative URL of the blog section, e.g. "/blog/"
    pub blog_url: String,
    /// Absolute URL of the blog section, for Open Graph tags
    pub blog_full_url: String,
    pub shop_url: String,
    pub css_url: String,
    pub year: i32,
    pub generator: String,
}

impl SiteContext {
    /// Derive the template context from the site configuration
    pub fn from_config(config: &SiteConfig) -> Self {
        let blog_path = format!("{}/", config.blog_dir.trim_matches('/'));

        Self {
            title: config.title.clone(),
            description: config.description.clone(),
            author: config.author.clone(),
            language: config.language.clone(),
            root_url: url_for(config, ""),
            blog_url: url_for(config, &blog_path),
            blog_full_url: full_url_for(config, &blog_path),
            shop_url: url_for(config, &config.shop_path),
            css_url: url_for(config, STYLESHEET_PATH),
            year: chrono::Local::now().year(),
            generator: format!("pressroom {}", env!("CARGO_PKG_VERSION")),
        }
    }
}
