//! Preview server
//!
//! Serves the generated site, and in live mode renders article pages
//! straight from the WordPress API on every request, so content edits
//! show up without regenerating.

use anyhow::Result;
use axum::{
    extract::{Path as RoutePath, Request, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Router, ServiceExt,
};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tower::Layer;
use tower_http::normalize_path::NormalizePathLayer;
use tower_http::services::ServeDir;

use crate::remote::WpClient;
use crate::templates::{SiteContext, TemplateRenderer};
use crate::view::{PostView, ViewState, POST_NOT_FOUND};
use crate::Pressroom;

/// Server state
struct ServerState {
    public_dir: PathBuf,
    client: WpClient,
    renderer: TemplateRenderer,
    site: SiteContext,
    sample_size: usize,
}

/// Start the preview server
pub async fn start(app: &Pressroom, ip: &str, port: u16, live: bool, open: bool) -> Result<()> {
    let state = Arc::new(ServerState {
        public_dir: app.public_dir.clone(),
        client: app.client()?,
        renderer: TemplateRenderer::new()?,
        site: SiteContext::from_config(&app.config),
        sample_size: app.config.api.sample_size,
    });

    let mut router = Router::new();
    if live {
        let blog_route = format!("/{}/:slug", app.config.blog_dir.trim_matches('/'));
        router = router.route(&blog_route, get(article_handler));
    }
    let router = router.fallback(fallback_handler).with_state(state);

    // Generated URLs all carry a trailing slash; trim it so
    // `/blog/my-post/` hits the same route as `/blog/my-post`.
    let service = NormalizePathLayer::trim_trailing_slash().layer(router);

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    let url = format!("http://{}:{}", ip, port);
    println!("Server running at {}", url);
    if live {
        println!("Live mode: article pages are rendered from the API per request.");
    }
    println!("Press Ctrl+C to stop.");

    // Open browser if requested
    if open {
        if let Err(e) = open_browser(&url) {
            tracing::warn!("Failed to open browser: {}", e);
        }
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, ServiceExt::<Request>::into_make_service(service)).await?;

    Ok(())
}

/// Render an article page from the API
///
/// Every request is its own view mount; a response that arrives after
/// the request is done has nothing left to update.
async fn article_handler(
    State(state): State<Arc<ServerState>>,
    RoutePath(slug): RoutePath<String>,
) -> Response {
    let mut view = PostView::new(slug.as_str());
    view.refresh(&state.client, state.sample_size).await;

    match view.state() {
        ViewState::Loaded(article) => {
            match state.renderer.render_article(&state.site, article) {
                Ok(html) => Html(html).into_response(),
                Err(err) => {
                    tracing::error!("Render failed for '{}': {}", slug, err);
                    (StatusCode::INTERNAL_SERVER_ERROR, "Render error").into_response()
                }
            }
        }
        ViewState::Error(message) => {
            // The generic copy already covers the plain not-found case
            let detail = if message == POST_NOT_FOUND {
                ""
            } else {
                message.as_str()
            };
            match state.renderer.render_not_found(&state.site, detail) {
                Ok(html) => (StatusCode::NOT_FOUND, Html(html)).into_response(),
                Err(_) => (StatusCode::NOT_FOUND, POST_NOT_FOUND).into_response(),
            }
        }
        ViewState::Loading => {
            (StatusCode::INTERNAL_SERVER_ERROR, "Fetch did not settle").into_response()
        }
    }
}

/// Fallback handler that serves generated files
async fn fallback_handler(State(state): State<Arc<ServerState>>, request: Request) -> Response {
    let path = request.uri().path();

    // Determine the file path
    let file_path = if path == "/" {
        state.public_dir.join("index.html")
    } else {
        let clean_path = path.trim_start_matches('/');
        let candidate = state.public_dir.join(clean_path);

        // If it's a directory, look for index.html
        if candidate.is_dir() {
            candidate.join("index.html")
        } else if candidate.exists() {
            candidate
        } else {
            // Try adding .html extension
            let with_html = state.public_dir.join(format!("{}.html", clean_path));
            if with_html.exists() {
                with_html
            } else {
                candidate
            }
        }
    };

    if file_path.exists() {
        // Serve static file using tower-http
        let mut service = ServeDir::new(&state.public_dir).append_index_html_on_directories(true);
        match service.try_call(request).await {
            Ok(response) => response.into_response(),
            Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Server error").into_response(),
        }
    } else {
        not_found_response(&state).await
    }
}

/// Serve the generated 404 page, if the site has one
async fn not_found_response(state: &ServerState) -> Response {
    match tokio::fs::read_to_string(state.public_dir.join("404.html")).await {
        Ok(content) => (StatusCode::NOT_FOUND, Html(content)).into_response(),
        Err(_) => (StatusCode::NOT_FOUND, "Not found").into_response(),
    }
}

/// Open a URL in the default browser
fn open_browser(url: &str) -> Result<()> {
    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open").arg(url).spawn()?;
    }

    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open").arg(url).spawn()?;
    }

    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/c", "start", url])
            .spawn()?;
    }

    Ok(())
}
