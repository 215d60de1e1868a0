mod common;

use std::fs;

use common::{mock_query, read_rule_file, series, settings, vector_body, REBASE_TIME};
use counter_rebase::config::MetricSpec;
use counter_rebase::error::RebaseError;
use counter_rebase::query::PrometheusClient;
use counter_rebase::startup::run;
use mockito::Server;

fn tickets_sold() -> MetricSpec {
    MetricSpec::new(
        "gtp_tickets_sold:cumulative",
        "gtp_tickets_sold:rebase",
        "gtp_tickets_sold:cumulative",
    )
}

fn tickets_refunded() -> MetricSpec {
    MetricSpec::new(
        "gtp_tickets_refunded:cumulative",
        "gtp_tickets_refunded:rebase",
        "gtp_tickets_refunded:cumulative",
    )
}

#[tokio::test]
async fn rebases_tickets_sold_end_to_end() {
    let mut server = Server::new_async().await;
    let m = mock_query(
        &mut server,
        "gtp_tickets_sold:cumulative",
        200,
        vector_body(vec![series("1", "Acme", "42")]),
    )
    .await;

    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("data.yml");
    let run_settings = settings(&server.url(), &output, vec![tickets_sold()]);
    let client = PrometheusClient::new(server.url());

    run(&client, &run_settings).await.unwrap();
    m.assert_async().await;

    let file = read_rule_file(&output);
    assert_eq!(file.groups.len(), 2);
    assert_eq!(file.groups[0].name, "cumulative metric rebase");

    let group = &file.groups[1];
    assert_eq!(
        group.name,
        format!("rebased gtp_tickets_sold:cumulative at {}", REBASE_TIME)
    );
    assert_eq!(group.interval.as_deref(), Some("15s"));
    assert_eq!(group.rules.len(), 1);

    let rule = group.rules[0].as_recording().unwrap();
    assert_eq!(rule.record, "gtp_tickets_sold:rebase");
    assert_eq!(rule.expr, "42");
    let labels: Vec<(&str, &str)> = rule
        .labels
        .iter()
        .map(|(k, v)| (k.as_str(), v.as_str()))
        .collect();
    assert_eq!(
        labels,
        vec![
            ("CinemaChainId", "1"),
            ("OrganisationName", "Acme"),
            ("job", "gtp"),
            ("region", "eu"),
            ("service", "sales"),
        ]
    );
}

#[tokio::test]
async fn output_is_a_prometheus_rule_file() {
    let mut server = Server::new_async().await;
    let _m = mock_query(
        &mut server,
        "gtp_tickets_sold:cumulative",
        200,
        vector_body(vec![series("1", "Acme", "42"), series("2", "Globex", "7.5")]),
    )
    .await;

    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("data.yml");
    let client = PrometheusClient::new(server.url());
    run(&client, &settings(&server.url(), &output, vec![tickets_sold()]))
        .await
        .unwrap();

    let raw: serde_yaml::Value =
        serde_yaml::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    let groups = raw["groups"].as_sequence().unwrap();
    assert_eq!(groups.len(), 2);

    let monitoring = &groups[0];
    assert!(monitoring.get("interval").is_none());
    let monitoring_rules = monitoring["rules"].as_sequence().unwrap();
    assert_eq!(
        monitoring_rules[0]["record"].as_str(),
        Some("cumulative_metric_rebase_time_seconds")
    );
    assert_eq!(
        monitoring_rules[0]["labels"]["prometheus_server"].as_str(),
        Some(server.url().as_str())
    );
    assert_eq!(
        monitoring_rules[1]["alert"].as_str(),
        Some("CumulativeMetricRebaseStale")
    );
    assert!(monitoring_rules[1]["annotations"]["summary"].is_string());

    let rebase_rules = groups[1]["rules"].as_sequence().unwrap();
    assert_eq!(rebase_rules.len(), 2);
    // values stay strings, never reinterpreted as numbers
    assert_eq!(rebase_rules[0]["expr"].as_str(), Some("42"));
    assert_eq!(rebase_rules[1]["expr"].as_str(), Some("7.5"));
    assert!(rebase_rules[1].get("alert").is_none());
}

#[tokio::test]
async fn empty_result_keeps_an_empty_rules_list() {
    let mut server = Server::new_async().await;
    let _m = mock_query(
        &mut server,
        "gtp_tickets_sold:cumulative",
        200,
        vector_body(vec![]),
    )
    .await;

    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("data.yml");
    let client = PrometheusClient::new(server.url());
    run(&client, &settings(&server.url(), &output, vec![tickets_sold()]))
        .await
        .unwrap();

    let contents = fs::read_to_string(&output).unwrap();
    assert!(contents.contains("rules: []"));
    let file = read_rule_file(&output);
    assert!(file.groups[1].rules.is_empty());
}

#[tokio::test]
async fn http_error_on_any_query_writes_nothing() {
    let mut server = Server::new_async().await;
    let ok = mock_query(
        &mut server,
        "gtp_tickets_refunded:cumulative",
        200,
        vector_body(vec![series("1", "Acme", "3")]),
    )
    .await;
    let failing = mock_query(
        &mut server,
        "gtp_tickets_sold:cumulative",
        500,
        r#"{"status":"error","error":"boom"}"#.to_string(),
    )
    .await;

    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("data.yml");
    let client = PrometheusClient::new(server.url());
    let result = run(
        &client,
        &settings(
            &server.url(),
            &output,
            vec![tickets_refunded(), tickets_sold()],
        ),
    )
    .await;

    ok.assert_async().await;
    failing.assert_async().await;
    assert!(matches!(result, Err(RebaseError::HttpStatus { .. })));
    assert!(!output.exists());
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn failed_run_leaves_previous_file_untouched() {
    let mut server = Server::new_async().await;
    let mut incomplete = series("1", "Acme", "42");
    incomplete["metric"]
        .as_object_mut()
        .unwrap()
        .remove("service");
    let _m = mock_query(
        &mut server,
        "gtp_tickets_sold:cumulative",
        200,
        vector_body(vec![incomplete]),
    )
    .await;

    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("data.yml");
    fs::write(&output, "groups: []\n").unwrap();

    let client = PrometheusClient::new(server.url());
    let result = run(&client, &settings(&server.url(), &output, vec![tickets_sold()])).await;

    match result {
        Err(RebaseError::MissingLabel { label, record }) => {
            assert_eq!(label, "service");
            assert_eq!(record, "gtp_tickets_sold:rebase");
        }
        other => panic!("expected MissingLabel, got {:?}", other.map(|_| ())),
    }
    assert_eq!(fs::read_to_string(&output).unwrap(), "groups: []\n");
}

#[tokio::test]
async fn no_metrics_still_writes_monitoring_group() {
    let server = Server::new_async().await;
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("data.yml");
    let client = PrometheusClient::new(server.url());

    run(&client, &settings(&server.url(), &output, vec![]))
        .await
        .unwrap();

    let file = read_rule_file(&output);
    assert_eq!(file.groups.len(), 1);
    assert_eq!(file.groups[0].rules.len(), 2);
}
