use super::transform::{StateTransformer, rewrite_references};
use crate::annotate::{AnnotatedDashboard, AnnotatedGroup, Annotation, MigrationPlan};
use crate::provisioner::Provisioner;
use crate::traits::{FileSystem, Output};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// One rendered `.tf` file, not yet on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedFile {
    pub path: PathBuf,
    pub content: String,
}

/// Turns imported state into one configuration file per group and per dashboard
pub struct StateRenderer<'a> {
    provisioner: &'a dyn Provisioner,
    fs: &'a dyn FileSystem,
    output: &'a dyn Output,
    transformer: StateTransformer,
}

impl<'a> StateRenderer<'a> {
    pub fn new(
        provisioner: &'a dyn Provisioner,
        fs: &'a dyn FileSystem,
        output: &'a dyn Output,
    ) -> Self {
        Self {
            provisioner,
            fs,
            output,
            transformer: StateTransformer::new(),
        }
    }

    /// Cleaned state block for a single item, with literal ids of
    /// `references` rewritten to resource references
    pub fn render_item(&self, item: &Annotation, references: &[&Annotation]) -> Result<String> {
        let state = self
            .provisioner
            .show_state(&item.resource_type_id)
            .with_context(|| format!("Failed to read state of {}", item.resource_type_id))?;

        let text = self.transformer.transform(&state);
        let mut text = rewrite_references(&text, references);
        text.push('\n');

        Ok(text)
    }

    fn render_group(&self, group: &AnnotatedGroup, output_dir: &Path) -> Result<RenderedFile> {
        Ok(RenderedFile {
            path: output_dir.join(format!("{}.tf", group.file_name)),
            content: self.render_item(&group.annotation, &[])?,
        })
    }

    /// Dashboard block first, then its charts. Only the dashboard block
    /// refers to other resources: its charts, and the group when there is one.
    fn render_dashboard(
        &self,
        dashboard: &AnnotatedDashboard,
        group: Option<&AnnotatedGroup>,
        output_dir: &Path,
    ) -> Result<RenderedFile> {
        let mut references: Vec<&Annotation> =
            dashboard.charts.iter().map(|chart| &chart.annotation).collect();
        if let Some(group) = group {
            references.push(&group.annotation);
        }

        let mut content = self.render_item(&dashboard.annotation, &references)?;
        for chart in &dashboard.charts {
            content.push_str(&self.render_item(&chart.annotation, &[])?);
        }

        Ok(RenderedFile {
            path: output_dir.join(format!("{}.tf", dashboard.file_name)),
            content,
        })
    }

    /// Render every file of the plan: the group file (if any), then one per
    /// dashboard in plan order
    pub fn render_plan(&self, plan: &MigrationPlan, output_dir: &Path) -> Result<Vec<RenderedFile>> {
        let mut files = Vec::new();

        if let Some(group) = &plan.group {
            files.push(self.render_group(group, output_dir)?);
        }

        for dashboard in &plan.dashboards {
            files.push(self.render_dashboard(dashboard, plan.group.as_ref(), output_dir)?);
        }

        Ok(files)
    }

    /// Render the plan and write each file under `output_dir`, replacing any
    /// existing file of the same name
    pub fn write_plan(&self, plan: &MigrationPlan, output_dir: &Path) -> Result<Vec<PathBuf>> {
        if self.fs.exists(output_dir) && !self.fs.is_dir(output_dir) {
            anyhow::bail!("Output path {} is not a directory", output_dir.display());
        }

        self.fs.create_dir_all(output_dir).with_context(|| {
            format!("Failed to create output directory {}", output_dir.display())
        })?;

        let mut written = Vec::new();
        for file in self.render_plan(plan, output_dir)? {
            self.fs
                .write(&file.path, &file.content)
                .with_context(|| format!("Failed to write {}", file.path.display()))?;
            self.output.dimmed(&format!("Wrote {}", file.path.display()));
            written.push(file.path);
        }

        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotate::{MigrationMode, build_plan};
    use crate::export::Export;
    use crate::provisioner::provisioner::ImportAttempt;
    use crate::traits::{MockFileSystem, MockOutput};
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    /// Serves canned `state show` text per address
    struct StateFixture {
        states: HashMap<String, String>,
    }

    impl StateFixture {
        fn new(states: &[(&str, &str)]) -> Self {
            Self {
                states: states
                    .iter()
                    .map(|(address, text)| (address.to_string(), text.to_string()))
                    .collect(),
            }
        }
    }

    impl Provisioner for StateFixture {
        fn get_name(&self) -> &str {
            "fixture"
        }

        fn init(&self) -> Result<()> {
            Ok(())
        }

        fn import(&self, _address: &str, _external_id: &str) -> Result<ImportAttempt> {
            Ok(ImportAttempt::default())
        }

        fn show_state(&self, address: &str) -> Result<String> {
            self.states
                .get(address)
                .cloned()
                .ok_or_else(|| anyhow::anyhow!("No instance found for the given address!"))
        }

        fn reset_state(&self) -> Result<()> {
            Ok(())
        }
    }

    const EXPORT: &str = r#"[
        { "sf_type": "Page", "marshallId": "g1" },
        {
            "sf_type": "Dashboard", "sf_dashboard": "CPU (Usage)", "marshallId": "d1", "marshallMemberOf": ["g1"],
            "sf_uiModel": { "widgets": [ { "options": { "chartIndex": 0, "chartId": "C456" } } ] }
        },
        {
            "sf_type": "Chart", "sf_chart": "Load", "sf_chartIndex": 0, "sf_dashboardId": "D123",
            "sf_visualizationOptions": { "type": "TimeSeriesChart" }, "marshallId": "c1", "marshallMemberOf": ["d1"]
        }
    ]"#;

    const GROUP_STATE: &str = r#"# signalfx_dashboard_group.ops:
resource "signalfx_dashboard_group" "ops" {
    description = "Operations"
    id          = "G9"
    name        = "Ops"
}
"#;

    const DASHBOARD_STATE: &str = r#"# signalfx_dashboard.ops--cpu_usage:
resource "signalfx_dashboard" "ops--cpu_usage" {
    charts_resolution = "default"
    dashboard_group   = "G9"
    id                = "D123"
    name              = "CPU (Usage)"
    url               = "https://app.signalfx.com/#/dashboard/D123"

    chart {
        chart_id = "C456"
        column   = 0
        height   = 1
        row      = 0
        width    = 12
    }
}
"#;

    const CHART_STATE: &str = r#"# signalfx_time_chart.ops--cpu_usage--load:
resource "signalfx_time_chart" "ops--cpu_usage--load" {
    id           = "C456"
    name         = "Load"
    plot_type    = "LineChart"
    program_text = "A = data('cpu.utilization').mean().publish(label='A')"
    url          = "https://app.signalfx.com/#/chart/C456"
}
"#;

    fn fixture() -> StateFixture {
        StateFixture::new(&[
            ("signalfx_dashboard_group.ops", GROUP_STATE),
            ("signalfx_dashboard.ops--cpu_usage", DASHBOARD_STATE),
            ("signalfx_time_chart.ops--cpu_usage--load", CHART_STATE),
        ])
    }

    fn group_plan() -> MigrationPlan {
        let export = Export::from_json(EXPORT).unwrap();
        build_plan(&export, MigrationMode::Group, Some("ops"), Some("G9")).unwrap()
    }

    #[test]
    fn test_render_plan_group_files() {
        let provisioner = fixture();
        let fs = MockFileSystem::new();
        let output = MockOutput::new();
        let renderer = StateRenderer::new(&provisioner, &fs, &output);

        let files = renderer.render_plan(&group_plan(), Path::new("ops")).unwrap();

        assert_eq!(files.len(), 2);
        assert_eq!(files[0].path, PathBuf::from("ops/ops_dashboard_group.tf"));
        assert_eq!(
            files[0].content,
            "resource \"signalfx_dashboard_group\" \"ops\" {\n    description = \"Operations\"\n    name        = \"Ops\"\n}\n\n"
        );

        assert_eq!(
            files[1].path,
            PathBuf::from("ops/ops_dashboard_group_cpu_usage_dashboard.tf")
        );
        assert_eq!(
            files[1].content,
            r#"resource "signalfx_dashboard" "ops--cpu_usage" {
    charts_resolution = "default"
    dashboard_group   = signalfx_dashboard_group.ops.id
    name              = "CPU (Usage)"

    chart {
        chart_id = signalfx_time_chart.ops--cpu_usage--load.id
        column   = 0
        height   = 1
        row      = 0
        width    = 12
    }
}

resource "signalfx_time_chart" "ops--cpu_usage--load" {
    name         = "Load"
    plot_type    = "LineChart"
    program_text = "A = data('cpu.utilization').mean().publish(label='A')"
}

"#
        );
    }

    #[test]
    fn test_rendered_files_parse_as_hcl() {
        let provisioner = fixture();
        let fs = MockFileSystem::new();
        let output = MockOutput::new();
        let renderer = StateRenderer::new(&provisioner, &fs, &output);

        for file in renderer.render_plan(&group_plan(), Path::new("ops")).unwrap() {
            hcl::from_str::<hcl::Body>(&file.content)
                .unwrap_or_else(|e| panic!("{} is not valid HCL: {}", file.path.display(), e));
            assert!(!file.content.contains("\"C456\""));
            assert!(!file.content.contains("\"G9\""));
            assert!(!file.content.contains("url"));
        }
    }

    #[test]
    fn test_write_plan_replaces_existing_files() {
        let provisioner = fixture();
        let fs = MockFileSystem::new();
        let output = MockOutput::new();
        fs.write(Path::new("ops/ops_dashboard_group.tf"), "stale").unwrap();
        let renderer = StateRenderer::new(&provisioner, &fs, &output);

        let written = renderer.write_plan(&group_plan(), Path::new("ops")).unwrap();

        assert_eq!(
            written,
            vec![
                PathBuf::from("ops/ops_dashboard_group.tf"),
                PathBuf::from("ops/ops_dashboard_group_cpu_usage_dashboard.tf"),
            ]
        );
        let group = fs
            .get_file_contents(Path::new("ops/ops_dashboard_group.tf"))
            .unwrap();
        assert!(group.starts_with("resource \"signalfx_dashboard_group\""));
    }

    #[test]
    fn test_unscoped_dashboard_has_no_group_reference() {
        let export = Export::from_json(EXPORT).unwrap();
        let plan = build_plan(&export, MigrationMode::Dashboards, None, None).unwrap();
        let provisioner = StateFixture::new(&[
            (
                "signalfx_dashboard.cpu_usage",
                "resource \"signalfx_dashboard\" \"cpu_usage\" {\n    dashboard_group = \"G9\"\n    chart {\n        chart_id = \"C456\"\n    }\n}\n",
            ),
            (
                "signalfx_time_chart.cpu_usage--load",
                "resource \"signalfx_time_chart\" \"cpu_usage--load\" {\n    name = \"Load\"\n}\n",
            ),
        ]);
        let fs = MockFileSystem::new();
        let output = MockOutput::new();
        let renderer = StateRenderer::new(&provisioner, &fs, &output);

        let files = renderer.render_plan(&plan, Path::new("output")).unwrap();

        assert_eq!(files.len(), 1);
        assert_eq!(files[0].path, PathBuf::from("output/cpu_usage_dashboard.tf"));
        assert!(files[0].content.contains("dashboard_group = \"G9\""));
        assert!(
            files[0]
                .content
                .contains("chart_id = signalfx_time_chart.cpu_usage--load.id")
        );
    }

    #[test]
    fn test_output_path_must_be_directory() {
        let provisioner = fixture();
        let fs = MockFileSystem::new();
        let output = MockOutput::new();
        fs.write(Path::new("ops"), "not a directory").unwrap();
        let renderer = StateRenderer::new(&provisioner, &fs, &output);

        let err = renderer
            .write_plan(&group_plan(), Path::new("ops"))
            .unwrap_err();

        assert!(err.to_string().contains("is not a directory"));
    }

    #[test]
    fn test_missing_state_fails() {
        let provisioner = StateFixture::new(&[]);
        let fs = MockFileSystem::new();
        let output = MockOutput::new();
        let renderer = StateRenderer::new(&provisioner, &fs, &output);

        let err = renderer
            .write_plan(&group_plan(), Path::new("ops"))
            .unwrap_err();

        assert!(format!("{:#}", err).contains("signalfx_dashboard_group.ops"));
        assert!(fs.list_files().is_empty());
    }
}
