use chrono::NaiveDate;

use crate::error::{ExtractError, ExtractResult};

/// Literal stored for cells that only hold `&nbsp;`.
pub const NOT_AVAILABLE: &str = "N/A";

/// Listing-pass output. Fields stay `None` until their header is seen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartialNotice {
    pub council_reference: Option<String>,
    pub info_url: Option<String>,
    pub description: Option<String>,
    pub address: Option<String>,
    pub on_notice_to: Option<String>,
    pub date_scraped: NaiveDate,
}

impl PartialNotice {
    pub fn new(date_scraped: NaiveDate) -> Self {
        Self {
            council_reference: None,
            info_url: None,
            description: None,
            address: None,
            on_notice_to: None,
            date_scraped,
        }
    }

    /// Consume the listing-pass record together with its detail-page fields.
    pub fn complete(self, details: NoticeDetails) -> ExtractResult<Notice> {
        let reference = self.council_reference.clone();
        let missing = |field: &'static str| ExtractError::Incomplete {
            council_reference: reference.clone(),
            field,
        };

        let council_reference = self
            .council_reference
            .ok_or_else(|| missing("council_reference"))?;
        let info_url = self.info_url.ok_or_else(|| missing("info_url"))?;
        let address = self.address.ok_or_else(|| missing("address"))?;
        let description = self.description.ok_or_else(|| missing("description"))?;
        let on_notice_to = self.on_notice_to.ok_or_else(|| missing("on_notice_to"))?;
        let on_notice_from = details
            .on_notice_from
            .ok_or_else(|| missing("on_notice_from"))?;
        let legal_description = details
            .legal_description
            .ok_or_else(|| missing("legal_description"))?;

        Ok(Notice {
            council_reference,
            address,
            description,
            info_url,
            date_scraped: self.date_scraped,
            on_notice_from,
            on_notice_to,
            legal_description,
            date_received: details.date_received,
        })
    }
}

/// Detail-pass output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoticeDetails {
    pub legal_description: Option<String>,
    pub date_received: Option<String>,
    pub on_notice_from: Option<String>,
}

/// A complete public notice, ready to persist.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Notice {
    pub council_reference: String,
    pub address: String,
    pub description: String,
    pub info_url: String,
    pub date_scraped: NaiveDate,
    pub on_notice_from: String,
    pub on_notice_to: String,
    pub legal_description: String,
    // parsed from the detail page, never written to `data`
    #[sqlx(skip)]
    pub date_received: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()
    }

    fn listed() -> PartialNotice {
        PartialNotice {
            council_reference: Some("DA-100".into()),
            info_url: Some("https://example.test/d?id=DA-100".into()),
            description: Some("Deck addition".into()),
            address: Some("5 High St, TAS, 7250".into()),
            on_notice_to: Some("2024-01-01".into()),
            date_scraped: today(),
        }
    }

    fn detailed() -> NoticeDetails {
        NoticeDetails {
            legal_description: Some("Lot 5".into()),
            date_received: Some("2023-12-01".into()),
            on_notice_from: Some("2023-12-10".into()),
        }
    }

    #[test]
    fn complete_merges_both_passes() {
        let notice = listed().complete(detailed()).unwrap();

        assert_eq!(notice.council_reference, "DA-100");
        assert_eq!(notice.on_notice_from, "2023-12-10");
        assert_eq!(notice.on_notice_to, "2024-01-01");
        assert_eq!(notice.legal_description, "Lot 5");
        assert_eq!(notice.date_received.as_deref(), Some("2023-12-01"));
        assert_eq!(notice.date_scraped, today());
    }

    #[test]
    fn missing_detail_field_is_an_error() {
        let details = NoticeDetails {
            legal_description: None,
            ..detailed()
        };

        let err = listed().complete(details).unwrap_err();
        match err {
            ExtractError::Incomplete {
                council_reference,
                field,
            } => {
                assert_eq!(council_reference.as_deref(), Some("DA-100"));
                assert_eq!(field, "legal_description");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn empty_listing_record_reports_reference_first() {
        let err = PartialNotice::new(today()).complete(detailed()).unwrap_err();
        assert!(matches!(
            err,
            ExtractError::Incomplete {
                council_reference: None,
                field: "council_reference"
            }
        ));
    }

    #[test]
    fn date_received_is_optional() {
        let details = NoticeDetails {
            date_received: None,
            ..detailed()
        };
        let notice = listed().complete(details).unwrap();
        assert!(notice.date_received.is_none());
    }
}
