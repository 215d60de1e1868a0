//! The static group that lets Prometheus alert on an old rebase.

use crate::models::{AlertingRule, LabelSet, RecordingRule, Rule, RuleGroup};

pub const MONITORING_GROUP_NAME: &str = "cumulative metric rebase";
pub const REBASE_TIME_RECORD: &str = "cumulative_metric_rebase_time_seconds";
pub const STALE_ALERT_NAME: &str = "CumulativeMetricRebaseStale";
pub const STALE_AFTER_DAYS: u32 = 150;

/// Build the monitoring group: a record holding when the rebase ran and an
/// alert that fires once that is more than `STALE_AFTER_DAYS` ago.
pub fn build_monitoring_group(generated_at: i64, server: &str) -> RuleGroup {
    let record = Rule::Recording(RecordingRule {
        record: REBASE_TIME_RECORD.to_string(),
        expr: generated_at.to_string(),
        labels: LabelSet::from([("prometheus_server".to_string(), server.to_string())]),
    });

    let alert = Rule::Alerting(AlertingRule {
        alert: STALE_ALERT_NAME.to_string(),
        expr: format!(
            "(time() - {}) > {} * 24 * 60 * 60",
            REBASE_TIME_RECORD, STALE_AFTER_DAYS
        ),
        labels: LabelSet::from([("severity".to_string(), "warning".to_string())]),
        annotations: LabelSet::from([
            (
                "summary".to_string(),
                "Cumulative metric rebase is getting old".to_string(),
            ),
            (
                "description".to_string(),
                format!(
                    "The cumulative metrics were last rebased more than {} days ago on \
                     {{{{ $labels.prometheus_server }}}}. Re-run counter-rebase before the \
                     underlying counters lose their history.",
                    STALE_AFTER_DAYS
                ),
            ),
        ]),
    });

    RuleGroup {
        name: MONITORING_GROUP_NAME.to_string(),
        interval: None,
        rules: vec![record, alert],
    }
}
