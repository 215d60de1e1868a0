use tracing::debug;

use super::QueryExecutor;
use crate::error::{RebaseError, Result};
use crate::models::{QueryResponse, Sample};

const INSTANT_QUERY_PATH: &str = "/api/v1/query";

/// Queries a Prometheus-compatible server's instant-query endpoint.
pub struct PrometheusClient {
    server: String,
    client: reqwest::Client,
}

impl PrometheusClient {
    pub fn new(server: impl Into<String>) -> Self {
        Self {
            server: server.into(),
            client: reqwest::Client::new(),
        }
    }

    fn query_url(&self) -> String {
        format!("{}{}", self.server.trim_end_matches('/'), INSTANT_QUERY_PATH)
    }
}

#[async_trait::async_trait]
impl QueryExecutor for PrometheusClient {
    fn server(&self) -> &str {
        &self.server
    }

    async fn query_instant(&self, expr: &str, time: i64) -> Result<Vec<Sample>> {
        let url = self.query_url();
        let time = time.to_string();
        debug!(
            event_name = "rebase.query.sent",
            event_domain = "query",
            url = url.as_str(),
            query = expr,
            time = time.as_str(),
            "sending instant query"
        );

        let transport = |source: reqwest::Error| RebaseError::Transport {
            query: expr.to_string(),
            source,
        };

        let response = self
            .client
            .get(&url)
            .query(&[("query", expr), ("time", time.as_str())])
            .send()
            .await
            .map_err(transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(RebaseError::HttpStatus {
                status,
                query: expr.to_string(),
            });
        }

        let body = response.text().await.map_err(transport)?;
        let parsed: QueryResponse =
            serde_json::from_str(&body).map_err(|e| RebaseError::MalformedResponse {
                query: expr.to_string(),
                reason: e.to_string(),
            })?;

        debug!(
            event_name = "rebase.query.received",
            event_domain = "query",
            query = expr,
            series = parsed.data.result.len(),
            "instant query returned"
        );
        Ok(parsed.data.result)
    }
}
