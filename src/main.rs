use council_notices::{
    crawler::fetcher::{CachedFetcher, HttpFetcher},
    Config, ScrapingService, Storage,
};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cfg = Config::from_env();

    let storage = match Storage::open(&cfg.database_url).await {
        Ok(storage) => storage,
        Err(e) => {
            error!(error = %e, "Error connecting to database");
            std::process::exit(1);
        }
    };
    storage.ensure_schema().await?;

    let fetcher = CachedFetcher::new(HttpFetcher::new(&cfg)?);
    let service = ScrapingService::new(cfg, storage, fetcher);

    let total_saved = service.run().await?;

    info!(total_saved, "DONE: public notices scraped");
    Ok(())
}
