pub mod importer;

pub use importer::StateImporter;
