mod base;
mod prometheus;

pub use base::QueryExecutor;
pub use prometheus::PrometheusClient;
