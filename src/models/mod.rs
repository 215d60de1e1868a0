pub mod rule;
pub mod sample;

pub use rule::{AlertingRule, LabelSet, RecordingRule, Rule, RuleFile, RuleGroup};
pub use sample::{QueryData, QueryResponse, Sample};
