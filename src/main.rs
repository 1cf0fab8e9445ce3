use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod forecast;
mod output;
mod pipeline;
mod scrape;
mod source;
mod vocabulary;

use config::Config;
use forecast::retention::RunMoment;
use pipeline::Pipeline;
use source::http::HttpRenderer;

// Runs once per invocation. Concurrent invocations race on the output files.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "slask_forecast=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    let timezone = config.app_timezone;

    let renderer = HttpRenderer::new(config.render_timeout)?;
    let snapshot = source::snapshot_source(&config.snapshot_source, config.snapshot_timeout)?;
    let pipeline = Pipeline::new(config, Box::new(renderer), snapshot)?;

    tracing::info!("Starting forecast scraper");
    let now = chrono::Utc::now().with_timezone(&timezone);
    let summary = pipeline.run(&RunMoment::at(&now)).await?;

    tracing::info!(
        "Done! {} forecast entries published, {} short forecast labels",
        summary.entries,
        summary.short_labels.unwrap_or(0)
    );
    Ok(())
}
