use std::env;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://data.sqlite?mode=rwc";

const BASE_URL: &str =
    "https://onlineservice.launceston.tas.gov.au/eProperty/P1/PublicNotices/PublicNoticeDetails.aspx";
const LISTING_QUERY: &str = "?r=P1.LCC.WEBGUEST&f=%24P1.ESB.PUBNOTAL.ENQ";
const DETAIL_QUERY: &str = "?r=P1.LCC.WEBGUEST&f=%24P1.ESB.PUBNOT.VIW&ApplicationId=";

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub listing_url: String,
    /// Prefix the council reference is appended to, verbatim.
    pub detail_url_prefix: String,
    pub user_agent: String,
    pub delay_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            listing_url: format!("{BASE_URL}{LISTING_QUERY}"),
            detail_url_prefix: format!("{BASE_URL}{DETAIL_QUERY}"),
            user_agent: "CouncilNotices-Crawler/0.1".to_string(),
            delay_ms: 300,
        }
    }
}

impl Config {
    /// Only the database location comes from the environment.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());

        Self {
            database_url,
            ..Self::default()
        }
    }

    pub fn with_database_url(mut self, url: impl Into<String>) -> Self {
        self.database_url = url.into();
        self
    }

    pub fn with_listing_url(mut self, url: impl Into<String>) -> Self {
        self.listing_url = url.into();
        self
    }

    pub fn with_detail_url_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.detail_url_prefix = prefix.into();
        self
    }

    pub fn with_delay_ms(mut self, ms: u64) -> Self {
        self.delay_ms = ms;
        self
    }

    pub fn detail_url(&self, council_reference: &str) -> String {
        format!("{}{}", self.detail_url_prefix, council_reference)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_url_appends_reference_verbatim() {
        let cfg = Config::default();
        assert_eq!(
            cfg.detail_url("DA-100"),
            format!("{BASE_URL}{DETAIL_QUERY}DA-100")
        );
    }

    #[test]
    fn listing_url_selects_public_notices_enquiry() {
        let cfg = Config::default();
        assert!(cfg.listing_url.ends_with("f=%24P1.ESB.PUBNOTAL.ENQ"));
    }

    #[test]
    fn builders_override_defaults() {
        let cfg = Config::default()
            .with_database_url("sqlite::memory:")
            .with_detail_url_prefix("http://localhost/d?id=")
            .with_delay_ms(0);

        assert_eq!(cfg.database_url, "sqlite::memory:");
        assert_eq!(cfg.detail_url("X1"), "http://localhost/d?id=X1");
        assert_eq!(cfg.delay_ms, 0);
    }
}
