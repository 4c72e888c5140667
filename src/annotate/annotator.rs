use super::chart_types::{
    DASHBOARD_GROUP_RESOURCE_TYPE, DASHBOARD_RESOURCE_TYPE, chart_resource_type,
};
use super::types::{AnnotatedChart, AnnotatedDashboard, AnnotatedGroup, Annotation};
use crate::error::{MigrationError, MigrationResult};
use crate::export::{ChartItem, DashboardItem, GroupItem};
use crate::naming::{ResourceIdAllocator, normalize_identifier};

/// Annotate the dashboard group. Its live id is not part of the export and
/// must be supplied by the operator.
pub fn annotate_group(
    group: &GroupItem,
    group_name: &str,
    group_id: &str,
) -> MigrationResult<AnnotatedGroup> {
    let resource_id = normalize_identifier(group_name)?;
    let file_name = format!("{}_dashboard_group", resource_id);

    Ok(AnnotatedGroup {
        source: group.clone(),
        annotation: Annotation::new(DASHBOARD_GROUP_RESOURCE_TYPE, resource_id, group_id),
        file_name,
    })
}

/// Annotate a dashboard given the charts placed on it.
///
/// The dashboard id is only exported on its charts, so at least one chart
/// is required. `names` keeps dashboard names unique within the run.
pub fn annotate_dashboard(
    dashboard: &DashboardItem,
    charts: &[&ChartItem],
    scope: Option<&str>,
    names: &mut ResourceIdAllocator,
) -> MigrationResult<AnnotatedDashboard> {
    if charts.is_empty() {
        return Err(MigrationError::MissingChild {
            dashboard: dashboard.name.clone(),
        });
    }

    let external_id = charts
        .iter()
        .find_map(|chart| chart.dashboard_id.as_deref())
        .ok_or_else(|| MigrationError::MissingField {
            item: dashboard.name.clone(),
            field: "sf_dashboardId".to_string(),
        })?;

    let name = names.allocate(&normalize_identifier(&dashboard.name)?);

    let (resource_id, file_name) = match scope {
        Some(group) => (
            format!("{}--{}", group, name),
            format!("{}_dashboard_group_{}_dashboard", group, name),
        ),
        None => (name.clone(), format!("{}_dashboard", name)),
    };

    Ok(AnnotatedDashboard {
        source: dashboard.clone(),
        annotation: Annotation::new(DASHBOARD_RESOURCE_TYPE, resource_id, external_id),
        file_name,
        charts: Vec::new(),
    })
}

/// Annotate a chart of an already annotated dashboard
pub fn annotate_chart(
    chart: &ChartItem,
    dashboard: &AnnotatedDashboard,
    ids: &mut ResourceIdAllocator,
) -> MigrationResult<AnnotatedChart> {
    let visualization =
        chart
            .visualization
            .kind
            .as_deref()
            .ok_or_else(|| MigrationError::MissingField {
                item: chart.name.clone(),
                field: "sf_visualizationOptions.type".to_string(),
            })?;

    let resource_type = chart_resource_type(visualization).ok_or_else(|| {
        MigrationError::UnsupportedVisualization {
            chart: chart.name.clone(),
            visualization: visualization.to_string(),
        }
    })?;

    let chart_index = chart.chart_index.ok_or_else(|| MigrationError::MissingField {
        item: chart.name.clone(),
        field: "sf_chartIndex".to_string(),
    })?;

    // Charts do not export their own id; only the dashboard layout has it
    let external_id = dashboard
        .source
        .widget_chart_id(chart_index)
        .ok_or_else(|| MigrationError::MissingWidget {
            chart: chart.name.clone(),
            dashboard: dashboard.source.name.clone(),
            chart_index,
        })?;

    let base = format!(
        "{}--{}",
        dashboard.annotation.resource_id,
        normalize_identifier(&chart.name)?
    );
    let resource_id = ids.allocate(&base);

    Ok(AnnotatedChart {
        annotation: Annotation::new(resource_type, resource_id, external_id),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn dashboard(name: &str, widgets: serde_json::Value) -> DashboardItem {
        serde_json::from_value(json!({
            "sf_dashboard": name,
            "marshallId": "d1",
            "sf_uiModel": { "widgets": widgets },
        }))
        .unwrap()
    }

    fn chart(name: &str, index: i64, kind: &str) -> ChartItem {
        serde_json::from_value(json!({
            "sf_chart": name,
            "sf_chartIndex": index,
            "sf_dashboardId": "D123",
            "sf_visualizationOptions": { "type": kind },
            "marshallId": format!("c{}", index),
            "marshallMemberOf": ["d1"],
        }))
        .unwrap()
    }

    #[test]
    fn test_annotate_group() {
        let group: GroupItem = serde_json::from_value(json!({ "marshallId": "g1" })).unwrap();

        let annotated = annotate_group(&group, "internal_tools", "C_X_h_xAcAA").unwrap();

        assert_eq!(
            annotated.annotation,
            Annotation::new("signalfx_dashboard_group", "internal_tools", "C_X_h_xAcAA")
        );
        assert_eq!(annotated.file_name, "internal_tools_dashboard_group");
    }

    #[test]
    fn test_annotate_dashboard_scoped_and_unscoped() {
        let source = dashboard("CPU (Usage)", json!([]));
        let charts = [chart("CPU (Usage)", 0, "TimeSeriesChart")];
        let refs: Vec<&ChartItem> = charts.iter().collect();

        let unscoped =
            annotate_dashboard(&source, &refs, None, &mut ResourceIdAllocator::new()).unwrap();
        assert_eq!(unscoped.annotation.resource_id, "cpu_usage");
        assert_eq!(unscoped.annotation.external_id, "D123");
        assert_eq!(unscoped.file_name, "cpu_usage_dashboard");

        let scoped =
            annotate_dashboard(&source, &refs, Some("ops"), &mut ResourceIdAllocator::new())
                .unwrap();
        assert_eq!(scoped.annotation.resource_id, "ops--cpu_usage");
        assert_eq!(scoped.file_name, "ops_dashboard_group_cpu_usage_dashboard");
    }

    #[test]
    fn test_annotate_dashboard_without_charts() {
        let source = dashboard("Empty", json!([]));

        let err = annotate_dashboard(&source, &[], None, &mut ResourceIdAllocator::new())
            .unwrap_err();

        assert_eq!(
            err,
            MigrationError::MissingChild {
                dashboard: "Empty".to_string()
            }
        );
    }

    #[test]
    fn test_annotate_dashboard_charts_without_dashboard_id() {
        let source = dashboard("Ops", json!([]));
        let orphan: ChartItem = serde_json::from_value(json!({
            "sf_chart": "Load",
            "marshallId": "c1",
        }))
        .unwrap();

        let err = annotate_dashboard(&source, &[&orphan], None, &mut ResourceIdAllocator::new())
            .unwrap_err();

        assert!(matches!(err, MigrationError::MissingField { ref field, .. } if field == "sf_dashboardId"));
    }

    #[test]
    fn test_annotate_chart_recovers_id_from_widgets() {
        let source = dashboard(
            "CPU (Usage)",
            json!([
                { "options": { "chartIndex": 1, "chartId": "C999" } },
                { "options": { "chartIndex": 0, "chartId": "C456" } }
            ]),
        );
        let charts = [chart("CPU (Usage)", 0, "TimeSeriesChart")];
        let refs: Vec<&ChartItem> = charts.iter().collect();
        let annotated_dashboard =
            annotate_dashboard(&source, &refs, None, &mut ResourceIdAllocator::new()).unwrap();

        let annotated =
            annotate_chart(&charts[0], &annotated_dashboard, &mut ResourceIdAllocator::new())
                .unwrap();

        assert_eq!(annotated.annotation.resource_type, "signalfx_time_chart");
        assert_eq!(annotated.annotation.resource_id, "cpu_usage--cpu_usage");
        assert_eq!(annotated.annotation.external_id, "C456");
    }

    #[test]
    fn test_annotate_chart_unsupported_visualization() {
        let source = dashboard("Ops", json!([{ "options": { "chartIndex": 0, "chartId": "C1" } }]));
        let charts = [chart("Flow", 0, "Sankey")];
        let refs: Vec<&ChartItem> = charts.iter().collect();
        let annotated_dashboard =
            annotate_dashboard(&source, &refs, None, &mut ResourceIdAllocator::new()).unwrap();

        let err = annotate_chart(&charts[0], &annotated_dashboard, &mut ResourceIdAllocator::new())
            .unwrap_err();

        assert_eq!(
            err,
            MigrationError::UnsupportedVisualization {
                chart: "Flow".to_string(),
                visualization: "Sankey".to_string(),
            }
        );
    }

    #[test]
    fn test_annotate_chart_missing_widget() {
        let source = dashboard("Ops", json!([{ "options": { "chartIndex": 4, "chartId": "C1" } }]));
        let charts = [chart("Load", 0, "SingleValue")];
        let refs: Vec<&ChartItem> = charts.iter().collect();
        let annotated_dashboard =
            annotate_dashboard(&source, &refs, None, &mut ResourceIdAllocator::new()).unwrap();

        let err = annotate_chart(&charts[0], &annotated_dashboard, &mut ResourceIdAllocator::new())
            .unwrap_err();

        assert_eq!(
            err,
            MigrationError::MissingWidget {
                chart: "Load".to_string(),
                dashboard: "Ops".to_string(),
                chart_index: 0,
            }
        );
    }
}
