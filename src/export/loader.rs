use super::item::{ChartItem, DashboardItem, ExportItem, GroupItem, KNOWN_TYPES};
use crate::traits::FileSystem;
use anyhow::{Context, Result};
use serde_json::Value;
use std::path::Path;

/// Typed contents of an export file, each list in file order
#[derive(Debug, Clone, Default)]
pub struct Export {
    pub groups: Vec<GroupItem>,
    pub dashboards: Vec<DashboardItem>,
    pub charts: Vec<ChartItem>,
}

impl Export {
    /// Load an export file (a flat JSON array of items)
    pub fn from_file(fs: &dyn FileSystem, path: &Path) -> Result<Self> {
        let content = fs
            .read_to_string(path)
            .with_context(|| format!("Failed to read export file {}", path.display()))?;
        Self::from_json(&content)
            .with_context(|| format!("Failed to load export: {}", path.display()))
    }

    /// Parse export JSON, skipping items without a known `sf_type`
    pub fn from_json(content: &str) -> Result<Self> {
        let raw: Vec<Value> =
            serde_json::from_str(content).context("Export must be a JSON array of objects")?;

        let mut export = Export::default();

        for (index, value) in raw.into_iter().enumerate() {
            let known = value
                .get("sf_type")
                .and_then(|t| t.as_str())
                .is_some_and(|t| KNOWN_TYPES.contains(&t));

            if !known {
                continue;
            }

            let item: ExportItem = serde_json::from_value(value)
                .with_context(|| format!("Failed to parse export item at index {}", index))?;

            match item {
                ExportItem::Page(group) => export.groups.push(group),
                ExportItem::Dashboard(dashboard) => export.dashboards.push(dashboard),
                ExportItem::Chart(chart) => export.charts.push(chart),
            }
        }

        Ok(export)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::MockFileSystem;

    const EXPORT: &str = r#"[
        { "sf_type": "Page", "marshallId": "g1" },
        { "sf_type": "Dashboard", "sf_dashboard": "CPU", "marshallId": "d1", "marshallMemberOf": ["g1"] },
        { "sf_type": "Detector", "marshallId": "x1" },
        { "marshallId": "untyped" },
        { "sf_type": "Chart", "sf_chart": "Load", "sf_chartIndex": 0, "marshallId": "c1", "marshallMemberOf": ["d1"] },
        { "sf_type": "Chart", "sf_chart": "Idle", "sf_chartIndex": 1, "marshallId": "c2", "marshallMemberOf": ["d1"] }
    ]"#;

    #[test]
    fn test_from_json_splits_known_types_in_order() {
        let export = Export::from_json(EXPORT).unwrap();

        assert_eq!(export.groups.len(), 1);
        assert_eq!(export.dashboards.len(), 1);
        assert_eq!(
            export.charts.iter().map(|c| c.name.as_str()).collect::<Vec<_>>(),
            vec!["Load", "Idle"]
        );
    }

    #[test]
    fn test_from_json_rejects_non_array() {
        assert!(Export::from_json(r#"{ "sf_type": "Chart" }"#).is_err());
    }

    #[test]
    fn test_from_json_reports_malformed_item() {
        let err = Export::from_json(r#"[{ "sf_type": "Dashboard", "marshallId": "d1" }]"#)
            .unwrap_err();
        assert!(format!("{:#}", err).contains("index 0"));
    }

    #[test]
    fn test_from_file_reads_through_filesystem() {
        let fs = MockFileSystem::new();
        let path = Path::new("/work/export.json");
        fs.write(path, EXPORT).unwrap();

        let export = Export::from_file(&fs, path).unwrap();
        assert_eq!(export.charts.len(), 2);
    }

    #[test]
    fn test_from_file_missing() {
        let fs = MockFileSystem::new();
        assert!(Export::from_file(&fs, Path::new("/missing.json")).is_err());
    }
}
