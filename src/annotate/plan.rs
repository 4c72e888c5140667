use super::annotator::{annotate_chart, annotate_dashboard, annotate_group};
use super::types::MigrationPlan;
use crate::error::{MigrationError, MigrationResult};
use crate::export::{DashboardItem, Export, Member};
use crate::hierarchy::HierarchyIndex;
use crate::naming::ResourceIdAllocator;

/// Shape of the export being migrated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrationMode {
    /// A single dashboard with its charts
    Dashboard,
    /// A dashboard group, its dashboards and their charts
    Group,
    /// Every dashboard of the export, without the group resource
    Dashboards,
}

impl MigrationMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            MigrationMode::Dashboard => "dashboard",
            MigrationMode::Group => "group",
            MigrationMode::Dashboards => "dashboards",
        }
    }
}

/// Annotate the items of `export` selected by `mode`.
///
/// Dashboards are annotated before any chart, since chart ids are derived
/// from their dashboard's resource id.
pub fn build_plan(
    export: &Export,
    mode: MigrationMode,
    scope: Option<&str>,
    group_id: Option<&str>,
) -> MigrationResult<MigrationPlan> {
    let group = match mode {
        MigrationMode::Group => {
            let source = export.groups.first().ok_or_else(|| MigrationError::MissingItem {
                sf_type: "Page".to_string(),
            })?;
            let name = scope.ok_or_else(|| {
                MigrationError::Config("a group name is required to migrate a group".to_string())
            })?;
            let id = group_id.ok_or_else(|| {
                MigrationError::Config("a group id is required to migrate a group".to_string())
            })?;
            Some(annotate_group(source, name, id)?)
        }
        MigrationMode::Dashboard | MigrationMode::Dashboards => None,
    };

    let selected: &[DashboardItem] = match mode {
        MigrationMode::Dashboard => &export.dashboards[..export.dashboards.len().min(1)],
        MigrationMode::Group | MigrationMode::Dashboards => &export.dashboards,
    };

    if selected.is_empty() {
        return Err(MigrationError::MissingItem {
            sf_type: "Dashboard".to_string(),
        });
    }

    let index = HierarchyIndex::build(&export.charts);

    let mut names = ResourceIdAllocator::new();
    let mut dashboards = selected
        .iter()
        .map(|dashboard| {
            annotate_dashboard(
                dashboard,
                index.children_of(dashboard.marshall_id()),
                scope,
                &mut names,
            )
        })
        .collect::<MigrationResult<Vec<_>>>()?;

    let mut ids = ResourceIdAllocator::new();
    for dashboard in &mut dashboards {
        let charts = index
            .children_of(dashboard.source.marshall_id())
            .iter()
            .map(|chart| annotate_chart(chart, dashboard, &mut ids))
            .collect::<MigrationResult<Vec<_>>>()?;
        dashboard.charts = charts;
    }

    Ok(MigrationPlan { group, dashboards })
}
