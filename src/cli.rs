//! Command-line plumbing shared by the `export` and `import` binaries

use crate::error::Result;
use crate::handoff::StagingArea;
use clap::Args;
use std::path::PathBuf;
use std::process::ExitCode;

/// Flags accepted by both binaries
#[derive(Args, Debug, Clone)]
pub struct CommonArgs {
    /// Log actions that would be done but do not touch the filesystem
    #[arg(long)]
    pub dry_run: bool,

    /// Skip the check that this is running in a CI environment.
    /// Useful when you want to test things locally.
    #[arg(long)]
    pub force: bool,

    /// Log more detailed information about actions
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Staging directory shared between jobs (default: ../artifacts next to this binary)
    #[arg(long, value_name = "DIR")]
    pub artifacts_dir: Option<String>,
}

impl CommonArgs {
    /// Staging area selected by `--artifacts-dir`, or the default beside the binary
    pub fn staging_area(&self) -> Result<StagingArea> {
        match self.artifacts_dir {
            Some(ref dir) => {
                let expanded = shellexpand::tilde(dir);
                Ok(StagingArea::new(PathBuf::from(expanded.as_ref())))
            }
            None => StagingArea::beside_executable(),
        }
    }
}

/// Log to stderr: warnings and errors by default, everything with `--verbose`
///
/// `RUST_LOG` still takes precedence when set.
pub fn init_logging(verbose: bool) {
    let log_level = if verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}

/// Turn an operation result into the process exit status, logging any failure
pub fn finish<T>(result: Result<T>) -> ExitCode {
    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{:#}", e);
            ExitCode::from(e.exit_code())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser, Debug)]
    struct TestCli {
        #[command(flatten)]
        common: CommonArgs,
    }

    #[test]
    fn test_defaults() {
        let cli = TestCli::try_parse_from(["test"]).unwrap();
        assert!(!cli.common.dry_run);
        assert!(!cli.common.force);
        assert!(!cli.common.verbose);
        assert!(cli.common.artifacts_dir.is_none());
    }

    #[test]
    fn test_flags() {
        let cli = TestCli::try_parse_from([
            "test",
            "--dry-run",
            "--force",
            "-v",
            "--artifacts-dir",
            "/tmp/stage",
        ])
        .unwrap();
        assert!(cli.common.dry_run);
        assert!(cli.common.force);
        assert!(cli.common.verbose);
        assert_eq!(
            cli.common.staging_area().unwrap().root(),
            std::path::Path::new("/tmp/stage")
        );
    }
}
