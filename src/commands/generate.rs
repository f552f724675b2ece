//! Generate static files

use anyhow::Result;

use crate::generator::Generator;
use crate::SpaceTraveling;

/// Fetch everything from the content API and write the site
///
/// Any fetch or configuration failure aborts the build.
pub async fn run(app: &SpaceTraveling) -> Result<()> {
    let start = std::time::Instant::now();

    let client = app.connect().await?;
    let generator = Generator::new(app)?;
    let report = generator.generate(&client).await?;

    tracing::info!(
        "Generated list page ({} posts{}) and {} post pages from ref {}",
        report.summaries,
        if report.has_more { ", more available" } else { "" },
        report.posts,
        client.master_ref()
    );

    let duration = start.elapsed();
    tracing::info!("Generated in {:.2}s", duration.as_secs_f64());

    Ok(())
}
