use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// One series from an instant-query result: its labels and the single
/// `[timestamp, "value"]` pair the server evaluated.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Sample {
    #[serde(rename = "metric")]
    pub labels: HashMap<String, String>,
    pub value: (f64, String),
}

impl Sample {
    /// The sample value exactly as the server rendered it.
    pub fn value_literal(&self) -> &str {
        &self.value.1
    }
}

/// The `/api/v1/query` envelope. Only `data.result` is read.
#[derive(Deserialize, Debug)]
pub struct QueryResponse {
    pub data: QueryData,
}

#[derive(Deserialize, Debug)]
pub struct QueryData {
    pub result: Vec<Sample>,
}
