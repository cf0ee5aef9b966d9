//! WordPress REST API access
//!
//! The site's content lives in a remote WordPress install and is pulled
//! over its REST API. [`WpClient`] issues the requests; [`RemotePost`]
//! models the slice of the payload the templates consume.

mod client;
mod post;

pub use client::{FetchError, WpClient};
pub use post::{FeaturedImage, RemotePost, Rendered};
