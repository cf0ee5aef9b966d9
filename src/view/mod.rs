//! Per-article view state
//!
//! A [`PostView`] tracks one article page through its lifecycle: it
//! starts loading, both API requests settle, and the view ends up either
//! loaded or in an error state. The same type backs static generation
//! and the live preview server.
//!
//! Outcomes carry the [`Mount`] token that was current when their fetch
//! began. [`PostView::apply`] ignores outcomes from a superseded mount,
//! so a slow response for a previous slug can never overwrite the state
//! of the one being viewed now.

use serde::Serialize;

use crate::helpers::date::{iso_date, long_date};
use crate::helpers::html::count_words;
use crate::remote::{FetchError, RemotePost, WpClient};

/// Reading speed used to estimate article length
const WORDS_PER_MINUTE: usize = 200;

/// How many related articles a page shows at most
pub const MAX_RELATED: usize = 2;

/// Error message for a slug with no matching post
pub const POST_NOT_FOUND: &str = "Post not found";

/// Lifecycle state of an article page
#[derive(Debug, Clone)]
pub enum ViewState {
    /// Requests are in flight; nothing to render yet
    Loading,
    /// Both requests settled and the slug matched a post
    Loaded(ArticleView),
    /// The slug matched nothing, or a request failed
    Error(String),
}

/// Token identifying one mount of a view
///
/// Each slug change or unmount invalidates previously issued tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mount(u64);

/// Settled result of the page's request pair
#[derive(Debug, Clone)]
pub enum FetchOutcome {
    /// Both requests succeeded
    Fetched {
        /// Posts matching the requested slug
        matches: Vec<RemotePost>,
        /// Recent posts to pick related articles from
        sample: Vec<RemotePost>,
    },
    /// Either request failed
    Failed(String),
}

/// State holder for a single article page
#[derive(Debug, Clone)]
pub struct PostView {
    slug: String,
    state: ViewState,
    mount: u64,
}

impl PostView {
    /// Create a view for a slug, in the loading state
    pub fn new(slug: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            state: ViewState::Loading,
            mount: 0,
        }
    }

    /// The slug this view is showing
    pub fn slug(&self) -> &str {
        &self.slug
    }

    /// Current lifecycle state
    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// Token for the current mount, to be passed back to [`apply`]
    ///
    /// [`apply`]: PostView::apply
    pub fn mount(&self) -> Mount {
        Mount(self.mount)
    }

    /// Switch the view to another slug
    ///
    /// Resets the state to loading and invalidates outstanding tokens.
    pub fn set_slug(&mut self, slug: impl Into<String>) {
        self.slug = slug.into();
        self.state = ViewState::Loading;
        self.mount += 1;
    }

    /// Invalidate outstanding tokens without starting a new load
    pub fn unmount(&mut self) {
        self.mount += 1;
    }

    /// Settle the view with a fetch outcome
    ///
    /// Returns `false` when the outcome belongs to a superseded mount,
    /// in which case the state is left untouched.
    pub fn apply(&mut self, mount: Mount, outcome: FetchOutcome) -> bool {
        if mount != self.mount() {
            tracing::debug!("Discarding stale fetch outcome for '{}'", self.slug);
            return false;
        }

        self.state = match outcome {
            FetchOutcome::Fetched { matches, sample } => match matches.into_iter().next() {
                Some(post) => ViewState::Loaded(ArticleView::build(&post, &sample)),
                None => ViewState::Error(POST_NOT_FOUND.to_string()),
            },
            FetchOutcome::Failed(message) => ViewState::Error(message),
        };

        true
    }

    /// Fetch this view's data and settle it
    pub async fn refresh(&mut self, client: &WpClient, sample_size: usize) -> bool {
        let mount = self.mount();
        let outcome = fetch_view_data(client, &self.slug, sample_size).await;
        self.apply(mount, outcome)
    }
}

/// Issue the page's request pair and collapse the result
///
/// The slug lookup and the related-article sample run concurrently.
/// Either failure fails the pair; the page never renders from partial
/// data.
pub async fn fetch_view_data(client: &WpClient, slug: &str, sample_size: usize) -> FetchOutcome {
    let result: Result<_, FetchError> = tokio::try_join!(
        client.posts_by_slug(slug),
        client.recent_posts(sample_size),
    );

    match result {
        Ok((matches, sample)) => FetchOutcome::Fetched { matches, sample },
        Err(err) => FetchOutcome::Failed(err.to_string()),
    }
}

/// Everything the article template needs, derived from one post
#[derive(Debug, Clone, Serialize)]
pub struct ArticleView {
    pub id: u64,
    pub slug: String,
    /// Title markup, rendered verbatim
    pub title_html: String,
    /// Body markup, rendered verbatim
    pub body_html: String,
    pub excerpt_html: String,
    /// Publication date in full month style, e.g. "March 4, 2024"
    pub date_long: String,
    /// Publication date as a calendar day, for `<time datetime>`
    pub date_iso: String,
    /// Estimated reading time, never below one minute
    pub reading_minutes: usize,
    pub featured_image: Option<String>,
    /// Canonical URL on the source site
    pub link: String,
    pub related: Vec<RelatedArticle>,
}

impl ArticleView {
    /// Build the view for a post, picking related articles from a sample
    pub fn build(post: &RemotePost, sample: &[RemotePost]) -> Self {
        let slug = if post.slug.is_empty() {
            post.route_slug().unwrap_or_default().to_string()
        } else {
            post.slug.clone()
        };

        Self {
            id: post.id,
            slug,
            title_html: post.title.rendered.clone(),
            body_html: post.content.rendered.clone(),
            excerpt_html: post.excerpt.rendered.clone(),
            date_long: long_date(&post.date),
            date_iso: iso_date(&post.date),
            reading_minutes: reading_minutes(&post.content.rendered),
            featured_image: post.featured_url().map(String::from),
            link: post.link.clone(),
            related: select_related(post.id, sample),
        }
    }
}

/// A card in the related-articles grid
#[derive(Debug, Clone, Serialize)]
pub struct RelatedArticle {
    pub id: u64,
    pub slug: String,
    pub title_html: String,
    pub excerpt_html: String,
    pub featured_image: Option<String>,
}

/// Pick related articles from a recency sample
///
/// The current post never relates to itself, and at most
/// [`MAX_RELATED`] cards are shown.
pub fn select_related(current_id: u64, sample: &[RemotePost]) -> Vec<RelatedArticle> {
    sample
        .iter()
        .filter(|post| post.id != current_id)
        .take(MAX_RELATED)
        .map(|post| RelatedArticle {
            id: post.id,
            slug: post.route_slug().unwrap_or(&post.slug).to_string(),
            title_html: post.title.rendered.clone(),
            excerpt_html: post.excerpt.rendered.clone(),
            featured_image: post.featured_url().map(String::from),
        })
        .collect()
}

/// Estimate reading time from rendered markup
pub fn reading_minutes(html: &str) -> usize {
    count_words(html).div_ceil(WORDS_PER_MINUTE).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn post(id: u64, slug: &str) -> RemotePost {
        serde_json::from_value(json!({
            "id": id,
            "slug": slug,
            "title": { "rendered": format!("Title {}", id) },
            "content": { "rendered": "<p>Body</p>" },
            "excerpt": { "rendered": "<p>Excerpt</p>" },
            "date": "2024-03-04T10:30:00",
            "link": format!("https://site.example/2024/{}/", slug)
        }))
        .unwrap()
    }

    fn fetched(matches: Vec<RemotePost>, sample: Vec<RemotePost>) -> FetchOutcome {
        FetchOutcome::Fetched { matches, sample }
    }

    #[test]
    fn test_initial_state_is_loading() {
        let view = PostView::new("my-post");
        assert_eq!(view.slug(), "my-post");
        assert!(matches!(view.state(), ViewState::Loading));
    }

    #[test]
    fn test_matching_slug_loads_article() {
        let mut view = PostView::new("my-post");
        let mut first = post(42, "my-post");
        first.title.rendered = "Hello <em>World</em>".to_string();

        let applied = view.apply(view.mount(), fetched(vec![first], vec![]));
        assert!(applied);

        match view.state() {
            ViewState::Loaded(article) => {
                assert_eq!(article.id, 42);
                // Markup passes through untouched
                assert_eq!(article.title_html, "Hello <em>World</em>");
                assert_eq!(article.date_long, "March 4, 2024");
            }
            other => panic!("expected loaded state, got {:?}", other),
        }
    }

    #[test]
    fn test_no_match_is_post_not_found() {
        let mut view = PostView::new("missing");
        view.apply(view.mount(), fetched(vec![], vec![post(1, "other")]));

        match view.state() {
            ViewState::Error(message) => assert_eq!(message, POST_NOT_FOUND),
            other => panic!("expected error state, got {:?}", other),
        }
    }

    #[test]
    fn test_failed_fetch_is_error() {
        let mut view = PostView::new("my-post");
        view.apply(view.mount(), FetchOutcome::Failed("connection reset".into()));

        match view.state() {
            ViewState::Error(message) => assert_eq!(message, "connection reset"),
            other => panic!("expected error state, got {:?}", other),
        }
    }

    #[test]
    fn test_first_match_wins() {
        let mut view = PostView::new("dup");
        view.apply(view.mount(), fetched(vec![post(1, "dup"), post(2, "dup")], vec![]));

        match view.state() {
            ViewState::Loaded(article) => assert_eq!(article.id, 1),
            other => panic!("expected loaded state, got {:?}", other),
        }
    }

    #[test]
    fn test_stale_outcome_after_slug_change_is_discarded() {
        let mut view = PostView::new("first");
        let stale = view.mount();

        view.set_slug("second");
        assert_eq!(view.slug(), "second");
        let applied = view.apply(stale, fetched(vec![post(1, "first")], vec![]));

        assert!(!applied);
        // The new mount is still waiting for its own outcome
        assert!(matches!(view.state(), ViewState::Loading));

        let applied = view.apply(view.mount(), fetched(vec![post(2, "second")], vec![]));
        assert!(applied);
        match view.state() {
            ViewState::Loaded(article) => assert_eq!(article.id, 2),
            other => panic!("expected loaded state, got {:?}", other),
        }
    }

    #[test]
    fn test_stale_outcome_after_unmount_is_discarded() {
        let mut view = PostView::new("gone");
        let stale = view.mount();

        view.unmount();
        assert!(!view.apply(stale, fetched(vec![post(1, "gone")], vec![])));
        assert!(matches!(view.state(), ViewState::Loading));
    }

    #[test]
    fn test_related_excludes_current_post() {
        let sample = vec![post(1, "a"), post(2, "b"), post(3, "c")];
        let related = select_related(2, &sample);

        assert_eq!(related.len(), 2);
        assert!(related.iter().all(|r| r.id != 2));
    }

    #[test]
    fn test_related_capped_at_two() {
        let sample = vec![post(1, "a"), post(2, "b"), post(3, "c"), post(4, "d")];
        let related = select_related(99, &sample);

        assert_eq!(related.len(), MAX_RELATED);
        assert_eq!(related[0].id, 1);
        assert_eq!(related[1].id, 2);
    }

    #[test]
    fn test_related_slug_comes_from_link() {
        let mut other = post(5, "db-slug");
        other.link = "https://site.example/2024/06/link-slug/".to_string();

        let related = select_related(1, &[other]);
        assert_eq!(related[0].slug, "link-slug");
    }

    #[test]
    fn test_reading_minutes() {
        let words_400 = vec!["word"; 400].join(" ");
        assert_eq!(reading_minutes(&words_400), 2);
        assert_eq!(reading_minutes("word"), 1);
        assert_eq!(reading_minutes(""), 1);

        let words_201 = vec!["word"; 201].join(" ");
        assert_eq!(reading_minutes(&words_201), 2);
    }

    #[test]
    fn test_reading_minutes_ignores_markup() {
        // 3 words of text; the tags contribute nothing
        assert_eq!(reading_minutes("<p><b>one</b> two three</p>"), 1);
    }

    #[tokio::test]
    async fn test_refresh_failure_sets_error() {
        // Nothing listens on port 1, so both requests fail fast.
        let client = WpClient::new("http://127.0.0.1:1/wp-json/wp/v2").unwrap();
        let mut view = PostView::new("my-post");

        let applied = view.refresh(&client, 3).await;
        assert!(applied);
        assert!(matches!(view.state(), ViewState::Error(_)));
    }

    /// Answers the recency sample with one post and everything else
    /// with a server error, so exactly one request of the pair fails.
    async fn bind_half_failing_api() -> std::net::SocketAddr {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            loop {
                let (mut stream, _) = match listener.accept().await {
                    Ok(conn) => conn,
                    Err(_) => return,
                };
                tokio::spawn(async move {
                    let mut buf = [0u8; 2048];
                    let n = stream.read(&mut buf).await.unwrap_or(0);
                    let request = String::from_utf8_lossy(&buf[..n]);

                    let response = if request.contains("per_page=") {
                        let body = json!([{
                            "id": 7,
                            "slug": "other",
                            "title": { "rendered": "Other" },
                            "content": { "rendered": "<p>Body</p>" },
                            "excerpt": { "rendered": "" },
                            "date": "2024-03-04T10:30:00",
                            "link": ""
                        }])
                        .to_string();
                        format!(
                            "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                            body.len(),
                            body
                        )
                    } else {
                        "HTTP/1.1 500 Internal Server Error\r\ncontent-length: 0\r\nconnection: close\r\n\r\n"
                            .to_string()
                    };

                    let _ = stream.write_all(response.as_bytes()).await;
                    let _ = stream.shutdown().await;
                });
            }
        });

        addr
    }

    #[tokio::test]
    async fn test_slug_failure_discards_fetched_sample() {
        let addr = bind_half_failing_api().await;
        let client = WpClient::new(&format!("http://{}/wp-json/wp/v2", addr)).unwrap();

        let outcome = fetch_view_data(&client, "my-post", 3).await;
        match &outcome {
            FetchOutcome::Failed(message) => {
                assert!(message.contains("unexpected status 500"), "got {}", message)
            }
            other => panic!("expected failed outcome, got {:?}", other),
        }

        // The fulfilled sample goes down with the pair
        let mut view = PostView::new("my-post");
        assert!(view.apply(view.mount(), outcome));
        match view.state() {
            ViewState::Error(message) => assert!(message.contains("unexpected status 500")),
            other => panic!("expected error state, got {:?}", other),
        }
    }
}
