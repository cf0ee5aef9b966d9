//! List remote posts and generated routes

use anyhow::Result;
use walkdir::WalkDir;

use crate::helpers::html::strip_html;
use crate::Pressroom;

/// List content by type
pub async fn run(app: &Pressroom, content_type: &str) -> Result<()> {
    match content_type {
        "post" | "posts" => {
            let client = app.client()?;
            let posts = client.recent_posts(app.config.api.page_size).await?;

            println!("Posts ({}):", posts.len());
            for post in posts {
                println!(
                    "  {} - {} [{}]",
                    post.date.format("%Y-%m-%d"),
                    strip_html(&post.title.rendered).trim(),
                    post.slug
                );
            }
        }
        "route" | "routes" => {
            let routes = generated_routes(app);
            println!("Routes ({}):", routes.len());
            for route in routes {
                println!("  {}", route);
            }
        }
        _ => {
            anyhow::bail!("Unknown type: {}. Available: posts, routes", content_type);
        }
    }

    Ok(())
}

/// Routes present in the public directory, one per generated index.html
fn generated_routes(app: &Pressroom) -> Vec<String> {
    let mut routes: Vec<String> = WalkDir::new(&app.public_dir)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_name() == "index.html")
        .filter_map(|entry| {
            let dir = entry.path().parent()?;
            let rel = dir.strip_prefix(&app.public_dir).ok()?;
            let rel = rel.to_string_lossy();
            Some(if rel.is_empty() {
                "/".to_string()
            } else {
                format!("/{}/", rel.replace('\\', "/"))
            })
        })
        .collect();

    routes.sort();
    routes
}
