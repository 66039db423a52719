//! Error types shared by the exporter and importer

use std::path::PathBuf;
use thiserror::Error;

/// Exit status reported for refused or unresolvable operations (`-1` to a shell)
pub const EXIT_REFUSED: u8 = 255;

/// Exit status reported when a filesystem operation itself fails
pub const EXIT_FILESYSTEM: u8 = 1;

#[derive(Debug, Error)]
pub enum HandoffError {
    #[error("CI environment variable unset; refusing to run")]
    EnvironmentGuard,

    #[error("{message}")]
    Configuration { message: String },

    #[error("source {} not found", path.display())]
    NotFound { path: PathBuf },

    #[error(transparent)]
    Filesystem(#[from] anyhow::Error),
}

impl HandoffError {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Process exit status for this error
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::EnvironmentGuard | Self::Configuration { .. } | Self::NotFound { .. } => {
                EXIT_REFUSED
            }
            Self::Filesystem(_) => EXIT_FILESYSTEM,
        }
    }
}

pub type Result<T> = std::result::Result<T, HandoffError>;
