use reqwest::{Client, StatusCode, header};
use tracing::{error, info, warn};

use crate::dataset::{
    models::{CountryRecord, Dataset, DatasetSource, SparqlResponse},
    query::country_query,
};

#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("Http request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Api error: {0} - {1}")]
    ApiError(StatusCode, String),

    #[error("Failed to parse response: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Endpoint returned no usable countries")]
    Empty,
}

#[derive(Debug, Clone)]
pub struct DatasetClient {
    source: DatasetSource,
    user_agent: String,
    disfavored_method: String,
}

impl DatasetClient {
    pub fn new(
        source: DatasetSource,
        user_agent: impl Into<String>,
        disfavored_method: impl Into<String>,
    ) -> Self {
        Self {
            source,
            user_agent: user_agent.into(),
            disfavored_method: disfavored_method.into(),
        }
    }

    /// Runs the country query once. Any failure is returned as-is, the
    /// caller is expected to abort startup.
    pub async fn fetch(&self, client: &Client) -> Result<Dataset, DatasetError> {
        let endpoint = self.source.endpoint();
        info!("DatasetClient querying {:?} at {}", self.source, endpoint);

        let response = client
            .get(endpoint)
            .query(&[("query", country_query(self.source)), ("format", "json")])
            .header(header::USER_AGENT, &self.user_agent)
            .header(header::ACCEPT, "application/sparql-results+json")
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            error!("Dataset query failed: {} - {}", status, body);
            return Err(DatasetError::ApiError(status, body));
        }

        let parsed: SparqlResponse = serde_json::from_str(&body)?;
        self.normalize(parsed)
    }

    pub fn normalize(&self, response: SparqlResponse) -> Result<Dataset, DatasetError> {
        let total = response.results.bindings.len();
        let records: Vec<CountryRecord> = response
            .results
            .bindings
            .into_iter()
            .filter_map(|binding| CountryRecord::from_binding(binding, &self.disfavored_method))
            .collect();

        if records.is_empty() {
            return Err(DatasetError::Empty);
        }

        let dropped = total - records.len();
        if dropped > 0 {
            warn!("Dropped {} of {} country bindings", dropped, total);
        }

        info!("Loaded {} countries", records.len());
        Ok(Dataset::new(records))
    }
}
