use chrono::NaiveDate;
use tracing::info;

use crate::config::Config;
use crate::crawler::fetcher::Fetch;
use crate::crawler::models::{Notice, PartialNotice};
use crate::error::{ExtractError, Result};

pub mod fetcher;
pub mod models;
pub mod parser;
pub mod service;

/// Fetch the listing page and run the listing pass over it.
pub async fn crawl_listing<F: Fetch + ?Sized>(
    fetcher: &F,
    cfg: &Config,
    date_scraped: NaiveDate,
) -> Result<Vec<PartialNotice>> {
    info!(url = %cfg.listing_url, "Fetching public notices listing");
    let html = fetcher.fetch(&cfg.listing_url).await?;
    let notices = parser::parse_listing(&html, &cfg.detail_url_prefix, date_scraped)?;
    Ok(notices)
}

/// Fetch one notice's detail page and complete the record.
pub async fn crawl_details<F: Fetch + ?Sized>(
    fetcher: &F,
    partial: PartialNotice,
) -> Result<Notice> {
    let Some(info_url) = partial.info_url.clone() else {
        return Err(ExtractError::Incomplete {
            council_reference: partial.council_reference,
            field: "council_reference",
        }
        .into());
    };

    info!(
        council_reference = partial.council_reference.as_deref().unwrap_or_default(),
        "Scraping public notice details"
    );

    let html = fetcher.fetch(&info_url).await?;
    let notice = parser::complete_notice(&html, partial)?;
    Ok(notice)
}
