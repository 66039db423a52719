use anyhow::Context;
use ci_handoff::cli::{finish, init_logging, CommonArgs};
use ci_handoff::handoff::{import, ImportConfig};
use ci_handoff::{HandoffError, ProcessEnvironment};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

/// Import a file or directory that has been exported from a prior CI job.
///
/// Cooperates with `export` on the sending side. The entry is moved out of
/// the staging area into the current directory.
#[derive(Parser, Debug)]
#[command(name = "import")]
struct Args {
    /// Name of the CI job that exported the entry being imported
    #[arg(long)]
    from_job_name: String,

    #[command(flatten)]
    common: CommonArgs,

    /// File or directory name to import
    path: PathBuf,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.common.verbose);

    let config = ImportConfig {
        path: args.path,
        from_job_name: args.from_job_name,
        dry_run: args.common.dry_run,
        force: args.common.force,
    };

    let result = args.common.staging_area().and_then(|staging| {
        let working_dir = std::env::current_dir()
            .context("Failed to read current directory")
            .map_err(HandoffError::from)?;
        import(&config, &ProcessEnvironment, &staging, &working_dir)
    });
    finish(result)
}
