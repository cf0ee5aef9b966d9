//! Generate static files

use anyhow::Result;

use crate::generator::Generator;
use crate::Pressroom;

/// Generate the static site from the remote API
pub async fn run(app: &Pressroom) -> Result<()> {
    let start = std::time::Instant::now();

    let client = app.client()?;
    let generator = Generator::new(app)?;
    let written = generator.generate(&client).await?;

    let duration = start.elapsed();
    tracing::info!(
        "Generated {} page(s) in {:.2}s",
        written,
        duration.as_secs_f64()
    );

    Ok(())
}
