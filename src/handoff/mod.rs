//! Export and import orchestration

pub mod config;
pub mod exporter;
pub mod importer;
pub mod staging;

pub use config::{ExportConfig, ImportConfig};
pub use exporter::{export, ExportOutcome};
pub use importer::{import, ImportOutcome};
pub use staging::{validate_job_name, validate_relative_path, StagingArea};
