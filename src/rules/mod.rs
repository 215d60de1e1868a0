pub mod builder;
pub mod monitoring;

pub use builder::{build_rebase_group, convert_samples_to_rules, REBASE_LABELS};
pub use monitoring::build_monitoring_group;
