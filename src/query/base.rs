use crate::error::Result;
use crate::models::Sample;

/// A source of instant-query results. The pipeline only sees this trait,
/// so tests can drive it without a server.
#[async_trait::async_trait]
pub trait QueryExecutor: Send + Sync {
    /// Address reported in the monitoring group labels.
    fn server(&self) -> &str;

    /// Evaluate `expr` at `time` (unix seconds) and return `data.result`.
    async fn query_instant(&self, expr: &str, time: i64) -> Result<Vec<Sample>>;
}
