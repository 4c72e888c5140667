use crate::traits::FileSystem;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the configuration file picked up from the current directory
pub const DEFAULT_CONFIG_FILE: &str = ".sfx-migrate.yaml";

// ============================================================================
// Migration Resource (Kubernetes-style)
// ============================================================================

/// Kubernetes-style Migration resource
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MigrationResource {
    /// API version (e.g., "sfx-migrate/v1")
    #[serde(rename = "apiVersion")]
    pub api_version: String,

    /// Kind of resource (always "Migration")
    pub kind: String,

    #[serde(default)]
    pub metadata: MigrationMetadata,

    #[serde(default)]
    pub spec: MigrationSpec,
}

/// Migration metadata
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MigrationMetadata {
    /// Dashboard group name, used as resource id scope and output prefix
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub description: Option<String>,
}

/// Migration specification; every field can be overridden on the command line
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MigrationSpec {
    /// Path of the JSON export
    #[serde(default)]
    pub export: Option<PathBuf>,

    /// Live id of the dashboard group (not part of the export)
    #[serde(default)]
    pub group_id: Option<String>,

    /// Directory the rendered configuration is written to
    #[serde(default)]
    pub output_dir: Option<PathBuf>,

    /// Directory the provisioner runs in
    #[serde(default)]
    pub working_dir: Option<PathBuf>,

    /// File name of the scratch declaration file, inside the working directory
    #[serde(default)]
    pub boilerplate: Option<PathBuf>,

    /// Import attempts per item
    #[serde(default)]
    pub max_tries: Option<u32>,

    /// Provisioner binary ("terraform" or "tofu")
    #[serde(default)]
    pub provisioner: Option<String>,

    #[serde(default)]
    pub provider: ProviderSpec,
}

/// Provider block written into the boilerplate file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderSpec {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub auth_token_variable: Option<String>,

    #[serde(default)]
    pub api_url_variable: Option<String>,
}

impl MigrationResource {
    /// Load migration resource from a .sfx-migrate.yaml file
    pub fn from_file(fs: &dyn FileSystem, path: &Path) -> anyhow::Result<Self> {
        let content = fs.read_to_string(path)?;
        let resource: MigrationResource = serde_yaml::from_str(&content)?;

        // Validate kind
        if resource.kind != "Migration" {
            anyhow::bail!("Expected kind 'Migration', got '{}'", resource.kind);
        }

        Ok(resource)
    }

    /// Load `explicit` if given, else `.sfx-migrate.yaml` from `dir` when it
    /// exists. No file at all is not an error.
    pub fn discover(
        fs: &dyn FileSystem,
        explicit: Option<&Path>,
        dir: &Path,
    ) -> anyhow::Result<Option<Self>> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let default = dir.join(DEFAULT_CONFIG_FILE);
                if !fs.exists(&default) {
                    return Ok(None);
                }
                default
            }
        };

        Self::from_file(fs, &path)
            .map(Some)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))
    }
}
