use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One counter to rebase: the expression to evaluate, the record name the
/// frozen value is stored under, and the label used in the group name.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq, JsonSchema)]
pub struct MetricSpec {
    pub query: String,
    pub output_name: String,
    pub group_label: String,
}

impl MetricSpec {
    pub fn new(
        query: impl Into<String>,
        output_name: impl Into<String>,
        group_label: impl Into<String>,
    ) -> Self {
        Self {
            query: query.into(),
            output_name: output_name.into(),
            group_label: group_label.into(),
        }
    }

    /// Name of the rule group holding this metric's rebased series.
    pub fn group_name(&self, rebase_time: i64) -> String {
        format!("rebased {} at {}", self.group_label, rebase_time)
    }
}

/// The counters rebased when the configuration does not list its own.
pub fn default_metrics() -> Vec<MetricSpec> {
    vec![
        MetricSpec::new(
            "gtp_tickets_refunded:cumulative",
            "gtp_tickets_refunded:rebase",
            "gtp_tickets_refunded:cumulative",
        ),
        MetricSpec::new(
            "gtp_tickets_sold:cumulative",
            "gtp_tickets_sold:rebase",
            "gtp_tickets_sold:cumulative",
        ),
        MetricSpec::new(
            "gtp_completed_orders_total_value:cumulative",
            "gtp_completed_orders_total_value:rebase",
            "gtp_completed_orders_total_value:cumulative",
        ),
        MetricSpec::new(
            "gtp_completed_transactions:cumulative",
            "gtp_completed_transactions:rebase",
            "gtp_completed_transactions:cumulative",
        ),
        MetricSpec::new(
            r#"increase(gtp_completed_loyalty_transactions{OrganisationName!="Availability Test Vendor"}[1y])"#,
            "gtp_completed_loyalty_transactions:rebase",
            "gtp_completed_loyalty_transactions",
        ),
    ]
}
