use thiserror::Error;

/// Unrecoverable failures raised while annotating, importing or rendering.
///
/// None of these are caught inside the migration: they propagate to `main`
/// and abort the run.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MigrationError {
    /// Dashboard has no charts, so its external id cannot be recovered
    #[error("Dashboard '{dashboard}' has no charts; cannot determine its dashboard id")]
    MissingChild { dashboard: String },

    /// Chart visualization kind is absent from the resource type table
    #[error(
        "Unsupported visualization '{visualization}' on chart '{chart}'; add it to the chart resource type table"
    )]
    UnsupportedVisualization { chart: String, visualization: String },

    /// No widget of the owning dashboard matches the chart index
    #[error("No widget with chart index {chart_index} on dashboard '{dashboard}' for chart '{chart}'")]
    MissingWidget {
        chart: String,
        dashboard: String,
        chart_index: i64,
    },

    /// The provisioner kept reporting errors for an import
    #[error("Error importing state of item {address} from ID {external_id} after {attempts} attempts")]
    ImportExhausted {
        address: String,
        external_id: String,
        attempts: u32,
    },

    /// Display name normalizes to nothing
    #[error("Name '{name}' does not contain any alphanumeric characters")]
    EmptyIdentifier { name: String },

    /// Export does not contain an item of the required kind
    #[error("Export does not contain any item of type '{sf_type}'")]
    MissingItem { sf_type: String },

    /// A field required for annotation is absent from an export item
    #[error("Export item '{item}' is missing required field '{field}'")]
    MissingField { item: String, field: String },

    /// Settings are incomplete or invalid
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Result type for migration operations
pub type MigrationResult<T> = Result<T, MigrationError>;
