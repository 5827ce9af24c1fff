use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, info};

use crate::crawler::models::{Notice, NoticeDetails, PartialNotice, NOT_AVAILABLE};
use crate::error::{ExtractError, ExtractResult};

static GRID_TABLE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("table.grid").expect("valid grid selector"));
static ROW: LazyLock<Selector> = LazyLock::new(|| Selector::parse("tr").expect("valid row selector"));
static HEADER_CELL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("td.headerColumn").expect("valid header selector"));
static LINK: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a").expect("valid link selector"));

// Launceston postcodes all start with 7. A single trailing newline is kept.
static STATE_POSTCODE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\sTAS\s+(7\d{3})(\n?)$").expect("valid postcode regex")
});

/// One label/value row of a grid table.
struct CellPair<'a> {
    header: String,
    value: Option<ElementRef<'a>>,
}

impl<'a> CellPair<'a> {
    fn value(&self) -> ExtractResult<ElementRef<'a>> {
        self.value.ok_or_else(|| ExtractError::MissingValueCell {
            header: self.header.clone(),
        })
    }
}

fn text_of(el: ElementRef<'_>) -> String {
    el.text().collect()
}

/// Rows of `table` that carry a non-blank header cell, in document order.
fn cell_pairs<'a>(table: ElementRef<'a>) -> impl Iterator<Item = CellPair<'a>> + 'a {
    table.select(&ROW).filter_map(|tr| {
        let Some(header_el) = tr.select(&HEADER_CELL).next() else {
            debug!("Skipping grid row without header cell");
            return None;
        };
        let header = text_of(header_el).trim().to_string();
        if header.is_empty() {
            return None;
        }

        let value = header_el
            .next_siblings()
            .filter_map(ElementRef::wrap)
            .find(|el| el.value().name() == "td");

        Some(CellPair { header, value })
    })
}

/// Rewrite a trailing `TAS 7xxx` into `, TAS, 7xxx`. Other addresses pass through.
pub fn normalize_address(address: &str) -> String {
    STATE_POSTCODE
        .replace(address, ", TAS, ${1}${2}")
        .into_owned()
}

/// Cells holding nothing but `&nbsp;` become `N/A`.
pub fn normalize_cell(value: String) -> String {
    if !value.is_empty() && value.chars().all(|c| c == '\u{a0}') {
        NOT_AVAILABLE.to_string()
    } else {
        value
    }
}

/// Listing pass: one partial notice per grid table, in document order.
pub fn parse_listing(
    html: &str,
    detail_url_prefix: &str,
    date_scraped: NaiveDate,
) -> ExtractResult<Vec<PartialNotice>> {
    let doc = Html::parse_document(html);
    let mut notices = Vec::new();

    for table in doc.select(&GRID_TABLE) {
        let mut notice = PartialNotice::new(date_scraped);

        for pair in cell_pairs(table) {
            match pair.header.as_str() {
                "Application ID" => {
                    let link = pair
                        .value()?
                        .select(&LINK)
                        .next()
                        .ok_or(ExtractError::MissingLink)?;
                    let reference = text_of(link);
                    notice.info_url = Some(format!("{detail_url_prefix}{reference}"));
                    notice.council_reference = Some(reference);
                }
                "Application Description" => {
                    notice.description = Some(text_of(pair.value()?));
                }
                "Property Address" => {
                    notice.address = Some(normalize_address(&text_of(pair.value()?)));
                }
                "Closing Date" => {
                    notice.on_notice_to = Some(text_of(pair.value()?));
                }
                other => debug!(header = other, "Ignoring listing header"),
            }
        }

        notices.push(notice);
    }

    info!(count = notices.len(), "Found public notices");
    Ok(notices)
}

/// Detail pass fields for a single application page.
pub fn parse_details(html: &str) -> ExtractResult<NoticeDetails> {
    let doc = Html::parse_document(html);
    let mut details = NoticeDetails::default();

    for table in doc.select(&GRID_TABLE) {
        for pair in cell_pairs(table) {
            let value = normalize_cell(text_of(pair.value()?));

            match pair.header.as_str() {
                "Property Legal Description" => details.legal_description = Some(value),
                "Application Received" => details.date_received = Some(value),
                "Advertised On" => details.on_notice_from = Some(value),
                _ => {}
            }
        }
    }

    Ok(details)
}

/// Detail pass: finish `partial` with the fields found on its detail page.
pub fn complete_notice(html: &str, partial: PartialNotice) -> ExtractResult<Notice> {
    let details = parse_details(html)?;
    partial.complete(details)
}
