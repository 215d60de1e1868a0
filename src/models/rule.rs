use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Labels and annotations serialize in key order so output is stable.
pub type LabelSet = BTreeMap<String, String>;

/// A rule inside a Prometheus rule group.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum Rule {
    Recording(RecordingRule),
    Alerting(AlertingRule),
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RecordingRule {
    pub record: String,
    pub expr: String,
    pub labels: LabelSet,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AlertingRule {
    pub alert: String,
    pub expr: String,
    pub labels: LabelSet,
    pub annotations: LabelSet,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RuleGroup {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval: Option<String>,
    pub rules: Vec<Rule>,
}

/// The whole rule file, as loaded by Prometheus via `rule_files`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct RuleFile {
    pub groups: Vec<RuleGroup>,
}

impl Rule {
    pub fn as_recording(&self) -> Option<&RecordingRule> {
        match self {
            Rule::Recording(r) => Some(r),
            Rule::Alerting(_) => None,
        }
    }

    pub fn as_alerting(&self) -> Option<&AlertingRule> {
        match self {
            Rule::Alerting(a) => Some(a),
            Rule::Recording(_) => None,
        }
    }
}
