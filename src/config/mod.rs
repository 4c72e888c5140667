//! Migration configuration: YAML resource file plus command-line overrides

pub mod resource;
pub mod settings;

pub use resource::MigrationResource;
pub use settings::{MigrationSettings, ProviderSettings, SettingsOverrides};
