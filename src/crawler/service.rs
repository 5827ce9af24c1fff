use chrono::{Local, NaiveDate};
use tracing::info;

use crate::{
    config::Config,
    crawler::{self, fetcher::Fetch},
    error::Result,
    storage::Storage,
};

/// Listing pass, then one detail fetch and one committed upsert per notice,
/// strictly in listing order. The first failure ends the run.
pub struct ScrapingService<F> {
    cfg: Config,
    storage: Storage,
    fetcher: F,
}

impl<F: Fetch> ScrapingService<F> {
    pub fn new(cfg: Config, storage: Storage, fetcher: F) -> Self {
        Self {
            cfg,
            storage,
            fetcher,
        }
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    pub async fn run(&self) -> Result<usize> {
        self.run_on(Local::now().date_naive()).await
    }

    /// Run with an explicit scrape date. Returns the number of notices stored.
    pub async fn run_on(&self, date_scraped: NaiveDate) -> Result<usize> {
        let partials = crawler::crawl_listing(&self.fetcher, &self.cfg, date_scraped).await?;
        let mut total_saved = 0usize;

        for partial in partials {
            let notice = crawler::crawl_details(&self.fetcher, partial).await?;
            self.storage.upsert(&notice).await?;
            total_saved += 1;

            info!(
                council_reference = %notice.council_reference,
                total_saved,
                "Notice saved"
            );
        }

        info!(total_saved, "All public notices processed");
        Ok(total_saved)
    }
}
