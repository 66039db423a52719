//! Receiver side: move an entry out of the staging area

use super::config::ImportConfig;
use super::staging::{validate_job_name, validate_relative_path, StagingArea};
use crate::env::Environment;
use crate::error::{HandoffError, Result};
use crate::fsops;
use crate::guard::check_ci_environment;
use std::path::{Path, PathBuf};

/// What an import did, or would have done in dry-run mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportOutcome {
    /// Staging entry that was consumed
    pub source: PathBuf,

    /// Final location of the imported entry
    pub destination: PathBuf,

    /// False for a dry run
    pub performed: bool,
}

/// Move `<staging root>/<from job>/<path>` to `<working_dir>/<path>`
///
/// The staging entry is gone afterwards, so a second import of the same
/// entry fails with [`HandoffError::NotFound`].
pub fn import(
    config: &ImportConfig,
    env: &dyn Environment,
    staging: &StagingArea,
    working_dir: &Path,
) -> Result<ImportOutcome> {
    check_ci_environment(env, config.force)?;
    validate_job_name(&config.from_job_name)?;
    validate_relative_path(&config.path)?;

    // locate the entry being imported
    let source = staging.entry_path(&config.from_job_name, &config.path);
    if !source.exists() {
        log::debug!(
            "staged for {}: {:?}",
            config.from_job_name,
            staging.list_entries(&config.from_job_name)?
        );
        return Err(HandoffError::NotFound { path: source });
    }

    let destination = working_dir.join(&config.path);

    if config.dry_run {
        log::info!(
            "if --dry-run were not set, would move {:?} to {:?}",
            source,
            destination
        );
        return Ok(ImportOutcome {
            source,
            destination,
            performed: false,
        });
    }

    log::info!("moving {:?} to {:?}", source, destination);
    let destination = fsops::move_path(&source, &destination)?;

    Ok(ImportOutcome {
        source,
        destination,
        performed: true,
    })
}
