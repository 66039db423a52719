//! Sender side: copy an entry into the staging area under a job name

use super::config::ExportConfig;
use super::staging::{validate_job_name, StagingArea};
use crate::env::{Environment, JOB_NAME_VAR};
use crate::error::{HandoffError, Result};
use crate::fsops;
use crate::guard::check_ci_environment;
use anyhow::Context;
use std::fs;
use std::path::{Path, PathBuf};

/// What an export did, or would have done in dry-run mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOutcome {
    /// Job namespace the entry was exported under
    pub job_name: String,

    /// Where the entry landed (or would land) in the staging area
    pub destination: PathBuf,

    /// False for a dry run
    pub performed: bool,
}

/// Job name from the config, falling back to the environment
fn resolve_job_name(config: &ExportConfig, env: &dyn Environment) -> Result<String> {
    if let Some(ref job) = config.job_name {
        return Ok(job.clone());
    }

    match env.var(JOB_NAME_VAR) {
        Some(job) => {
            log::info!("setting job name to {}", job);
            Ok(job)
        }
        None => Err(HandoffError::configuration(format!(
            "no --job-name given and ${} is unset",
            JOB_NAME_VAR
        ))),
    }
}

/// Refuse exports whose copy would land inside, or on top of, the source itself
///
/// A directory holding the staging area would otherwise be copied into its own
/// copy until the walk fails, and a staged file would be truncated onto itself.
fn check_not_self_copy(source: &Path, job_dir: &Path) -> Result<()> {
    let source = fsops::resolve_path(source)?;
    let job_dir = fsops::resolve_path(job_dir)?;

    let overlaps = source.parent() == Some(job_dir.as_path())
        || (source.is_dir() && job_dir.starts_with(&source));

    if overlaps {
        return Err(HandoffError::configuration(format!(
            "cannot export {:?} into {:?}: the staging area overlaps the source",
            source, job_dir
        )));
    }
    Ok(())
}

/// Export `config.path` into `<staging root>/<job name>/`
///
/// All checks run before anything is created, so a failed export leaves the
/// filesystem as it was.
pub fn export(
    config: &ExportConfig,
    env: &dyn Environment,
    staging: &StagingArea,
) -> Result<ExportOutcome> {
    check_ci_environment(env, config.force)?;

    let job_name = resolve_job_name(config, env)?;
    validate_job_name(&job_name)?;

    if !config.path.exists() {
        return Err(HandoffError::NotFound {
            path: config.path.clone(),
        });
    }

    // namespace the export by job name
    let job_dir = staging.job_dir(&job_name);
    check_not_self_copy(&config.path, &job_dir)?;

    if config.dry_run {
        log::info!(
            "if --dry-run were not set, would copy {:?} to {:?}",
            config.path,
            job_dir
        );
        let destination = job_dir.join(fsops::entry_name(&config.path)?);
        return Ok(ExportOutcome {
            job_name,
            destination,
            performed: false,
        });
    }

    fs::create_dir_all(&job_dir)
        .with_context(|| format!("Failed to create staging directory {:?}", job_dir))?;

    log::info!("copying {:?} to {:?}", config.path, job_dir);
    let destination = fsops::copy_into(&config.path, &job_dir)?;

    log::debug!(
        "staged for {}: {:?}",
        job_name,
        staging.list_entries(&job_name)?
    );

    Ok(ExportOutcome {
        job_name,
        destination,
        performed: true,
    })
}
