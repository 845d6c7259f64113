//! Remote plan retrieval
//!
//! Fetches a contact plan from a SODA-style open-data endpoint that
//! serves CSV (`https://<host>/resource/<dataset>.csv`), selecting the
//! nine contact columns and bounding the row count. The response body
//! goes through the same tolerant parser as local files, so a header row
//! or stray records do not break ingestion.
//!
//! Callers decide the fallback policy; a typical live setup retries with
//! a local CSV when the fetch yields nothing.

use kepler_core::Contact;
use tracing::{debug, info};

use crate::csv::parse_contacts;
use crate::error::{PlanSourceError, SourceResult};

const CONTACT_COLUMNS: &str = "id,from,to,t_start,t_end,owlt,rate_bps,setup_s,residual_bytes";

/// Remote plan endpoint configuration.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Endpoint base, e.g. `https://data.nasa.gov/resource`
    pub base_url: String,
    /// Dataset identifier under the endpoint
    pub dataset_id: String,
    /// Optional application token sent as `X-App-Token`
    pub app_token: Option<String>,
    /// Maximum rows requested from the endpoint
    pub row_limit: u32,
}

impl FetchConfig {
    /// Configuration for a dataset on the default open-data host.
    pub fn for_dataset(dataset_id: impl Into<String>) -> Self {
        Self {
            base_url: "https://data.nasa.gov/resource".to_string(),
            dataset_id: dataset_id.into(),
            app_token: None,
            row_limit: 50_000,
        }
    }

    pub fn with_app_token(mut self, token: impl Into<String>) -> Self {
        self.app_token = Some(token.into());
        self
    }

    fn url(&self) -> String {
        format!(
            "{}/{}.csv?$select={}&$limit={}",
            self.base_url.trim_end_matches('/'),
            self.dataset_id,
            CONTACT_COLUMNS,
            self.row_limit
        )
    }
}

/// Fetch and parse a remote contact plan.
pub async fn fetch_contacts(config: &FetchConfig) -> SourceResult<Vec<Contact>> {
    let url = config.url();
    debug!(%url, "fetching remote contact plan");

    let client = reqwest::Client::new();
    let mut request = client.get(&url);
    if let Some(token) = &config.app_token {
        request = request.header("X-App-Token", token);
    }

    let response = request.send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(PlanSourceError::Status {
            status: status.as_u16(),
        });
    }

    let body = response.text().await?;
    let contacts = parse_contacts(&body);
    if contacts.is_empty() {
        return Err(PlanSourceError::EmptyPlan {
            source_name: config.dataset_id.clone(),
        });
    }

    info!(
        dataset = %config.dataset_id,
        count = contacts.len(),
        "remote plan loaded"
    );
    Ok(contacts)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_shape() {
        let config = FetchConfig::for_dataset("abcd-1234");
        let url = config.url();
        assert!(url.starts_with("https://data.nasa.gov/resource/abcd-1234.csv?"));
        assert!(url.contains("$select=id,from,to,"));
        assert!(url.contains("$limit=50000"));
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let mut config = FetchConfig::for_dataset("x");
        config.base_url = "http://localhost:9/".to_string();
        assert!(config.url().starts_with("http://localhost:9/x.csv?"));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_http_error() {
        // Nothing listens on this port
        let mut config = FetchConfig::for_dataset("x");
        config.base_url = "http://127.0.0.1:1/resource".to_string();
        let err = fetch_contacts(&config).await.unwrap_err();
        assert!(matches!(err, PlanSourceError::Http(_)));
    }
}
