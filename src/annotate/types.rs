use crate::export::{DashboardItem, GroupItem};

/// Provisioning identity derived for one export item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    /// Provisioning resource type (e.g. "signalfx_time_chart")
    pub resource_type: String,
    /// Resource name, unique within its type for the run
    pub resource_id: String,
    /// `type.id` address
    pub resource_type_id: String,
    /// Id of the live resource to import from
    pub external_id: String,
}

impl Annotation {
    pub fn new(
        resource_type: impl Into<String>,
        resource_id: impl Into<String>,
        external_id: impl Into<String>,
    ) -> Self {
        let resource_type = resource_type.into();
        let resource_id = resource_id.into();
        let resource_type_id = format!("{}.{}", resource_type, resource_id);

        Self {
            resource_type,
            resource_id,
            resource_type_id,
            external_id: external_id.into(),
        }
    }

    /// Expression referring to the live id of this resource
    pub fn id_reference(&self) -> String {
        format!("{}.id", self.resource_type_id)
    }
}

#[derive(Debug, Clone)]
pub struct AnnotatedGroup {
    pub source: GroupItem,
    pub annotation: Annotation,
    /// Output file basename, without extension
    pub file_name: String,
}

#[derive(Debug, Clone)]
pub struct AnnotatedDashboard {
    pub source: DashboardItem,
    pub annotation: Annotation,
    /// Output file basename, without extension
    pub file_name: String,
    /// Charts placed on this dashboard, in export order
    pub charts: Vec<AnnotatedChart>,
}

#[derive(Debug, Clone)]
pub struct AnnotatedChart {
    pub annotation: Annotation,
}

/// Borrowed view over any annotated item
#[derive(Debug, Clone, Copy)]
pub enum MigrationItem<'a> {
    Group(&'a AnnotatedGroup),
    Dashboard(&'a AnnotatedDashboard),
    Chart(&'a AnnotatedChart),
}

impl<'a> MigrationItem<'a> {
    pub fn annotation(&self) -> &'a Annotation {
        match self {
            MigrationItem::Group(group) => &group.annotation,
            MigrationItem::Dashboard(dashboard) => &dashboard.annotation,
            MigrationItem::Chart(chart) => &chart.annotation,
        }
    }
}

/// Everything one run imports and renders
#[derive(Debug, Clone, Default)]
pub struct MigrationPlan {
    pub group: Option<AnnotatedGroup>,
    pub dashboards: Vec<AnnotatedDashboard>,
}

impl MigrationPlan {
    /// Group first, then every dashboard, then every chart
    pub fn items(&self) -> Vec<MigrationItem<'_>> {
        let mut items = Vec::new();

        if let Some(group) = &self.group {
            items.push(MigrationItem::Group(group));
        }

        items.extend(self.dashboards.iter().map(MigrationItem::Dashboard));
        items.extend(
            self.dashboards
                .iter()
                .flat_map(|d| d.charts.iter().map(MigrationItem::Chart)),
        );

        items
    }
}
