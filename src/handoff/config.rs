//! Export and import configuration

use std::path::PathBuf;

/// Configuration for exporting an entry into the staging area
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// File or directory to export
    pub path: PathBuf,

    /// Job name to export under (None = take it from the environment)
    pub job_name: Option<String>,

    /// Log what would happen without touching the filesystem
    pub dry_run: bool,

    /// Skip the CI environment check
    pub force: bool,
}

impl ExportConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            job_name: None,
            dry_run: false,
            force: false,
        }
    }

    pub fn with_job_name(mut self, job_name: impl Into<String>) -> Self {
        self.job_name = Some(job_name.into());
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }
}

/// Configuration for importing an entry exported by an earlier job
#[derive(Debug, Clone)]
pub struct ImportConfig {
    /// Path below the origin job's staging directory, and below the working directory
    pub path: PathBuf,

    /// Job that exported the entry
    pub from_job_name: String,

    pub dry_run: bool,

    pub force: bool,
}

impl ImportConfig {
    pub fn new(path: impl Into<PathBuf>, from_job_name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            from_job_name: from_job_name.into(),
            dry_run: false,
            force: false,
        }
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }
}
