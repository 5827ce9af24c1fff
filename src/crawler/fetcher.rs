use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tokio::sync::Mutex;
use tokio::time::sleep;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{FetchError, FetchResult};

/// Blocking-in-sequence page retrieval. Returns raw markup or fails.
#[async_trait]
pub trait Fetch: Send + Sync {
    async fn fetch(&self, url: &str) -> FetchResult<String>;
}

pub struct HttpFetcher {
    client: Client,
    delay: Duration,
}

impl HttpFetcher {
    pub fn new(cfg: &Config) -> FetchResult<Self> {
        let client = Client::builder()
            .user_agent(cfg.user_agent.as_str())
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            delay: Duration::from_millis(cfg.delay_ms),
        })
    }
}

#[async_trait]
impl Fetch for HttpFetcher {
    async fn fetch(&self, url: &str) -> FetchResult<String> {
        debug!(url, "HTTP fetch starting");
        let res = self.client.get(url).send().await.map_err(|e| {
            warn!(url, error = %e, "HTTP request failed");
            FetchError::Http(e)
        })?;

        let status = res.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = res.text().await?;

        // polite delay
        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        Ok(body)
    }
}

/// Serves repeat requests for the same URL from memory for the lifetime of the run.
pub struct CachedFetcher<F> {
    inner: F,
    pages: Mutex<HashMap<String, String>>,
}

impl<F: Fetch> CachedFetcher<F> {
    pub fn new(inner: F) -> Self {
        Self {
            inner,
            pages: Mutex::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl<F: Fetch> Fetch for CachedFetcher<F> {
    async fn fetch(&self, url: &str) -> FetchResult<String> {
        if let Some(html) = self.pages.lock().await.get(url) {
            debug!(url, "Serving cached page");
            return Ok(html.clone());
        }

        let html = self.inner.fetch(url).await?;
        self.pages
            .lock()
            .await
            .insert(url.to_string(), html.clone());
        Ok(html)
    }
}
