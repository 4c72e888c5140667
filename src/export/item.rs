use serde::Deserialize;

/// Discriminator values of the export items this tool understands
pub const KNOWN_TYPES: [&str; 3] = ["Page", "Dashboard", "Chart"];

/// One object of the dashboarding tool's export, discriminated by `sf_type`
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "sf_type")]
pub enum ExportItem {
    /// Dashboard group
    Page(GroupItem),
    Dashboard(DashboardItem),
    Chart(ChartItem),
}

/// Dashboard group ("Page") as exported
#[derive(Debug, Clone, Deserialize)]
pub struct GroupItem {
    #[serde(rename = "marshallId")]
    pub marshall_id: String,

    #[serde(rename = "marshallMemberOf", default)]
    pub member_of: Vec<String>,

    #[serde(rename = "sf_page", default)]
    pub name: Option<String>,
}

/// Dashboard as exported
#[derive(Debug, Clone, Deserialize)]
pub struct DashboardItem {
    #[serde(rename = "marshallId")]
    pub marshall_id: String,

    #[serde(rename = "marshallMemberOf", default)]
    pub member_of: Vec<String>,

    /// Display name
    #[serde(rename = "sf_dashboard")]
    pub name: String,

    #[serde(rename = "sf_uiModel", default)]
    pub ui_model: UiModel,
}

/// Layout of a dashboard; the only place chart ids are exported
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UiModel {
    #[serde(default)]
    pub widgets: Vec<Widget>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Widget {
    #[serde(default)]
    pub options: WidgetOptions,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WidgetOptions {
    #[serde(rename = "chartIndex", default)]
    pub chart_index: Option<i64>,

    #[serde(rename = "chartId", default)]
    pub chart_id: Option<String>,
}

/// Chart as exported
#[derive(Debug, Clone, Deserialize)]
pub struct ChartItem {
    #[serde(rename = "marshallId")]
    pub marshall_id: String,

    #[serde(rename = "marshallMemberOf", default)]
    pub member_of: Vec<String>,

    /// Display name
    #[serde(rename = "sf_chart")]
    pub name: String,

    #[serde(rename = "sf_chartIndex", default)]
    pub chart_index: Option<i64>,

    /// External id of the owning dashboard
    #[serde(rename = "sf_dashboardId", default)]
    pub dashboard_id: Option<String>,

    #[serde(rename = "sf_visualizationOptions", default)]
    pub visualization: VisualizationOptions,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct VisualizationOptions {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

/// Items that declare their parent through `marshallMemberOf`
pub trait Member {
    fn marshall_id(&self) -> &str;

    /// First entry of `marshallMemberOf`, if any
    fn parent_id(&self) -> Option<&str>;
}

macro_rules! impl_member {
    ($($ty:ty),*) => {
        $(
            impl Member for $ty {
                fn marshall_id(&self) -> &str {
                    &self.marshall_id
                }

                fn parent_id(&self) -> Option<&str> {
                    self.member_of.first().map(String::as_str)
                }
            }
        )*
    };
}

impl_member!(GroupItem, DashboardItem, ChartItem);

impl DashboardItem {
    /// Look up the chart id of the widget placed at `chart_index`
    pub fn widget_chart_id(&self, chart_index: i64) -> Option<&str> {
        self.ui_model
            .widgets
            .iter()
            .find(|w| w.options.chart_index == Some(chart_index))
            .and_then(|w| w.options.chart_id.as_deref())
    }
}
