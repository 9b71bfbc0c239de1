use super::{parse_list_text, BlockList};
use async_trait::async_trait;
use sift_dns_application::ports::BlockListSource;
use sift_dns_domain::DomainError;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Downloads hosts-style lists and feeds them into a `BlockList`, each entry
/// labelled with the URL it came from.
pub struct BlockListLoader {
    store: Arc<BlockList>,
    client: reqwest::Client,
}

impl BlockListLoader {
    pub fn new(store: Arc<BlockList>) -> Self {
        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .timeout(FETCH_TIMEOUT)
            .build()
            .unwrap_or_else(|e| {
                warn!(error = %e, "Block list client setup failed, fetching without a timeout");
                reqwest::Client::new()
            });
        Self { store, client }
    }

    async fn fetch(&self, url: &str) -> Result<String, DomainError> {
        let fetch_error = |reason: String| DomainError::BlockListFetch {
            url: url.to_string(),
            reason,
        };

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| fetch_error(e.to_string()))?;

        if !response.status().is_success() {
            return Err(fetch_error(format!("HTTP {}", response.status().as_u16())));
        }

        response.text().await.map_err(|e| fetch_error(e.to_string()))
    }
}

#[async_trait]
impl BlockListSource for BlockListLoader {
    async fn load(&self, url: &str) -> Result<u64, DomainError> {
        let start = Instant::now();

        let text = self.fetch(url).await?;
        let names = parse_list_text(&text);
        debug!(url = %url, lines = text.lines().count(), entries = names.len(), "Block list parsed");

        let added = self.store.extend(url, names);
        info!("✔ Parsed {} list in {:?}", url, start.elapsed());
        Ok(added)
    }

    fn list_counts(&self) -> Vec<(String, u64)> {
        self.store.list_counts()
    }
}
