use super::resource::MigrationResource;
use crate::annotate::MigrationMode;
use crate::error::{MigrationError, MigrationResult};
use crate::naming::normalize_identifier;
use std::path::PathBuf;

pub const DEFAULT_MAX_TRIES: u32 = 3;
pub const DEFAULT_PROVISIONER: &str = "terraform";
pub const DEFAULT_BOILERPLATE: &str = "boilerplate.tf";
pub const DEFAULT_OUTPUT_DIR: &str = "output";

/// Provider block parameters for the boilerplate file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderSettings {
    pub name: String,
    pub auth_token_variable: String,
    pub api_url_variable: String,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            name: "signalfx".to_string(),
            auth_token_variable: "signalfx_auth_token".to_string(),
            api_url_variable: "signalfx_api_url".to_string(),
        }
    }
}

/// Values given on the command line; they win over the configuration file
#[derive(Debug, Clone, Default)]
pub struct SettingsOverrides {
    pub export: Option<PathBuf>,
    pub group_name: Option<String>,
    pub group_id: Option<String>,
    pub output_dir: Option<PathBuf>,
    pub working_dir: Option<PathBuf>,
    pub boilerplate: Option<PathBuf>,
    pub max_tries: Option<u32>,
    pub provisioner: Option<String>,
}

/// Fully resolved settings of one migration run
#[derive(Debug, Clone)]
pub struct MigrationSettings {
    pub mode: MigrationMode,
    /// Free-form note from the configuration file
    pub description: Option<String>,
    pub export_path: PathBuf,
    /// Group scope of resource ids and file names
    pub group_name: Option<String>,
    /// Live id of the dashboard group
    pub group_id: Option<String>,
    pub output_dir: PathBuf,
    pub working_dir: PathBuf,
    /// Scratch declaration file, inside `working_dir`
    pub boilerplate_path: PathBuf,
    pub max_tries: u32,
    pub provisioner: String,
    pub provider: ProviderSettings,
}

impl MigrationSettings {
    /// Merge defaults, the optional configuration resource and CLI overrides
    pub fn resolve(
        mode: MigrationMode,
        resource: Option<&MigrationResource>,
        overrides: SettingsOverrides,
    ) -> MigrationResult<Self> {
        let spec = resource.map(|r| r.spec.clone()).unwrap_or_default();
        let file_group_name = resource.and_then(|r| r.metadata.name.clone());

        let export_path = overrides.export.or(spec.export).ok_or_else(|| {
            MigrationError::Config("no export file given (use --export or spec.export)".to_string())
        })?;

        let group_name = overrides.group_name.or(file_group_name);
        if let Some(name) = &group_name {
            let normalized = normalize_identifier(name)?;
            if &normalized != name {
                return Err(MigrationError::Config(format!(
                    "group name '{}' is not a valid identifier; use '{}'",
                    name, normalized
                )));
            }
        }

        let group_id = overrides.group_id.or(spec.group_id);

        if mode == MigrationMode::Group {
            if group_name.is_none() {
                return Err(MigrationError::Config(
                    "migrating a group requires a group name (use --group-name or metadata.name)"
                        .to_string(),
                ));
            }
            if group_id.is_none() {
                return Err(MigrationError::Config(
                    "migrating a group requires its id (use --group-id or spec.groupId)".to_string(),
                ));
            }
        }

        let max_tries = overrides
            .max_tries
            .or(spec.max_tries)
            .unwrap_or(DEFAULT_MAX_TRIES);
        if max_tries == 0 {
            return Err(MigrationError::Config(
                "max tries must be at least 1".to_string(),
            ));
        }

        let output_dir = overrides
            .output_dir
            .or(spec.output_dir)
            .unwrap_or_else(|| {
                PathBuf::from(group_name.as_deref().unwrap_or(DEFAULT_OUTPUT_DIR))
            });

        let working_dir = overrides
            .working_dir
            .or(spec.working_dir)
            .unwrap_or_else(|| PathBuf::from("."));

        let boilerplate_path = working_dir.join(
            overrides
                .boilerplate
                .or(spec.boilerplate)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_BOILERPLATE)),
        );

        let provisioner = overrides
            .provisioner
            .or(spec.provisioner)
            .unwrap_or_else(|| DEFAULT_PROVISIONER.to_string());

        let defaults = ProviderSettings::default();
        let provider = ProviderSettings {
            name: spec.provider.name.unwrap_or(defaults.name),
            auth_token_variable: spec
                .provider
                .auth_token_variable
                .unwrap_or(defaults.auth_token_variable),
            api_url_variable: spec
                .provider
                .api_url_variable
                .unwrap_or(defaults.api_url_variable),
        };

        Ok(Self {
            mode,
            description: resource.and_then(|r| r.metadata.description.clone()),
            export_path,
            group_name,
            group_id,
            output_dir,
            working_dir,
            boilerplate_path,
            max_tries,
            provisioner,
            provider,
        })
    }
}
