//! Staging area layout
//!
//! Entries live at `<root>/<job-name>/<path>`. Nothing here locks: an entry is
//! written by one job and read by a later one, and CI job ordering is what
//! keeps the two apart.

use crate::error::{HandoffError, Result};
use anyhow::Context;
use std::fs;
use std::path::{Component, Path, PathBuf};

/// Name of the staging directory, a sibling of the directory holding the binaries
pub const ARTIFACTS_DIR_NAME: &str = "artifacts";

/// Shared directory used to hand entries between CI jobs
#[derive(Debug, Clone)]
pub struct StagingArea {
    root: PathBuf,
}

impl StagingArea {
    /// Use an explicit root directory
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Locate the default root: `<dir of running binary>/../artifacts`
    pub fn beside_executable() -> Result<Self> {
        let exe = std::env::current_exe().map_err(|e| {
            HandoffError::configuration(format!("cannot locate running executable: {}", e))
        })?;
        let exe_dir = exe.parent().ok_or_else(|| {
            HandoffError::configuration(format!("{:?} has no parent directory", exe))
        })?;

        let root = match exe_dir.parent() {
            Some(parent) => parent.join(ARTIFACTS_DIR_NAME),
            None => exe_dir.join(ARTIFACTS_DIR_NAME),
        };
        Ok(Self::new(root))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding everything exported by `job`
    pub fn job_dir(&self, job: &str) -> PathBuf {
        self.root.join(job)
    }

    /// Location of `relative` as exported by `job`
    pub fn entry_path(&self, job: &str, relative: &Path) -> PathBuf {
        self.job_dir(job).join(relative)
    }

    /// Names currently staged for `job`, sorted; empty if the job exported nothing
    pub fn list_entries(&self, job: &str) -> Result<Vec<String>> {
        let dir = self.job_dir(job);
        if !dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut names = Vec::new();
        for entry in fs::read_dir(&dir).with_context(|| format!("Failed to read {:?}", dir))? {
            let entry = entry.with_context(|| format!("Failed to read {:?}", dir))?;
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
        names.sort();
        Ok(names)
    }
}

/// Reject job names that would not stay a single directory below the root
pub fn validate_job_name(job: &str) -> Result<()> {
    if job.is_empty() {
        return Err(HandoffError::configuration("job name is empty"));
    }

    if job.contains('/') || job.contains('\\') {
        return Err(HandoffError::configuration(format!(
            "job name {:?} contains a path separator",
            job
        )));
    }

    let mut components = Path::new(job).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Ok(()),
        _ => Err(HandoffError::configuration(format!(
            "job name {:?} is not a plain directory name",
            job
        ))),
    }
}

/// Reject entry paths that would leave the job's namespace or the working directory
///
/// The path must be relative, free of `..`, and name at least one entry.
pub fn validate_relative_path(path: &Path) -> Result<()> {
    let mut named = false;
    for component in path.components() {
        match component {
            Component::Normal(_) => named = true,
            Component::CurDir => {}
            Component::ParentDir => {
                return Err(HandoffError::configuration(format!(
                    "path {:?} must not contain '..'",
                    path
                )));
            }
            Component::RootDir | Component::Prefix(_) => {
                return Err(HandoffError::configuration(format!(
                    "path {:?} must be relative",
                    path
                )));
            }
        }
    }

    if !named {
        return Err(HandoffError::configuration(format!(
            "path {:?} does not name an entry",
            path
        )));
    }
    Ok(())
}
