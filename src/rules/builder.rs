use tracing::debug;

use crate::config::MetricSpec;
use crate::error::{RebaseError, Result};
use crate::models::{LabelSet, RecordingRule, Rule, RuleGroup, Sample};

/// Labels copied from each sample onto its rebased series.
pub const REBASE_LABELS: [&str; 5] = [
    "CinemaChainId",
    "OrganisationName",
    "job",
    "region",
    "service",
];

/// Convert query samples into recording rules that pin each series to the
/// value it had at rebase time. One rule per sample, in result order.
pub fn convert_samples_to_rules(samples: &[Sample], output_name: &str) -> Result<Vec<Rule>> {
    samples
        .iter()
        .map(|sample| -> Result<Rule> {
            let mut labels = LabelSet::new();
            for key in REBASE_LABELS {
                let value = sample
                    .labels
                    .get(key)
                    .ok_or_else(|| RebaseError::MissingLabel {
                        label: key.to_string(),
                        record: output_name.to_string(),
                    })?;
                labels.insert(key.to_string(), value.clone());
            }
            Ok(Rule::Recording(RecordingRule {
                record: output_name.to_string(),
                expr: sample.value_literal().to_string(),
                labels,
            }))
        })
        .collect()
}

/// Build the rule group for one metric from its query result.
pub fn build_rebase_group(
    spec: &MetricSpec,
    samples: &[Sample],
    rebase_time: i64,
    interval: Option<String>,
) -> Result<RuleGroup> {
    let rules = convert_samples_to_rules(samples, &spec.output_name)?;
    debug!(
        event_name = "rebase.rules.built",
        event_domain = "rules",
        record = spec.output_name.as_str(),
        rules = rules.len(),
        "converted samples to rules"
    );
    Ok(RuleGroup {
        name: spec.group_name(rebase_time),
        interval,
        rules,
    })
}
