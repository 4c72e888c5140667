//! Derivation of provisioning identities for export items

pub mod annotator;
pub mod chart_types;
pub mod plan;
pub mod types;

pub use plan::{MigrationMode, build_plan};
pub use types::{AnnotatedDashboard, AnnotatedGroup, Annotation, MigrationItem, MigrationPlan};
