#![allow(dead_code)]

use std::path::Path;

use counter_rebase::config::MetricSpec;
use counter_rebase::models::RuleFile;
use counter_rebase::startup::RunSettings;
use mockito::{Matcher, Mock, ServerGuard};
use serde_json::{json, Value};

pub const INSTANT_QUERY_PATH: &str = "/api/v1/query";
pub const REBASE_TIME: i64 = 1_700_000_000;

pub fn settings(server: &str, output_file: &Path, metrics: Vec<MetricSpec>) -> RunSettings {
    RunSettings {
        server: server.to_string(),
        rebase_time: REBASE_TIME,
        output_file: output_file.to_path_buf(),
        interval: Some("15s".to_string()),
        metrics,
    }
}

/// A series carrying every label the rebase keeps, plus some it drops.
pub fn series(chain: &str, organisation: &str, value: &str) -> Value {
    json!({
        "metric": {
            "__name__": "gtp_tickets_sold:cumulative",
            "CinemaChainId": chain,
            "OrganisationName": organisation,
            "job": "gtp",
            "region": "eu",
            "service": "sales",
            "instance": "gtp-0:8080"
        },
        "value": [REBASE_TIME, value]
    })
}

pub fn vector_body(result: Vec<Value>) -> String {
    json!({
        "status": "success",
        "data": { "resultType": "vector", "result": result }
    })
    .to_string()
}

/// Mock one instant query evaluated at `REBASE_TIME`.
pub async fn mock_query(server: &mut ServerGuard, expr: &str, status: usize, body: String) -> Mock {
    server
        .mock("GET", INSTANT_QUERY_PATH)
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("query".into(), expr.into()),
            Matcher::UrlEncoded("time".into(), REBASE_TIME.to_string()),
        ]))
        .with_status(status)
        .with_header("content-type", "application/json")
        .with_body(body)
        .create_async()
        .await
}

pub fn read_rule_file(path: &Path) -> RuleFile {
    let contents = std::fs::read_to_string(path).expect("rule file should exist");
    serde_yaml::from_str(&contents).expect("rule file should be valid YAML")
}
