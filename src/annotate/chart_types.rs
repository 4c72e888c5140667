use lazy_static::lazy_static;
use std::collections::HashMap;

/// Build the visualization kind → provisioning resource type table.
///
/// The table only covers the kinds seen in migrated exports so far; new
/// kinds must be added here rather than mapped to a default.
fn build_chart_type_map() -> HashMap<&'static str, &'static str> {
    let mut m = HashMap::new();

    m.insert("SingleValue", "signalfx_single_value_chart");
    m.insert("TimeSeriesChart", "signalfx_time_chart");
    m.insert("Heatmap", "signalfx_heatmap_chart");
    m.insert("List", "signalfx_list_chart");
    m.insert("Text", "signalfx_text_chart");
    m.insert("Event", "signalfx_event_feed_chart");
    m.insert("TableChart", "signalfx_table_chart");

    m
}

lazy_static! {
    static ref CHART_TYPE_MAP: HashMap<&'static str, &'static str> = build_chart_type_map();
}

/// Resource type for a chart visualization kind
pub fn chart_resource_type(visualization: &str) -> Option<&'static str> {
    CHART_TYPE_MAP.get(visualization).copied()
}

/// Resource type of dashboards
pub const DASHBOARD_RESOURCE_TYPE: &str = "signalfx_dashboard";

/// Resource type of dashboard groups
pub const DASHBOARD_GROUP_RESOURCE_TYPE: &str = "signalfx_dashboard_group";
