use ci_handoff::cli::{finish, init_logging, CommonArgs};
use ci_handoff::handoff::{export, ExportConfig};
use ci_handoff::ProcessEnvironment;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

/// Export a file or directory from a CI job to be imported by a later CI job.
///
/// Cooperates with `import` on the receiving side. The sending job keeps the
/// staging directory as its artifacts (e.g. `artifacts/*`) so later jobs see it.
#[derive(Parser, Debug)]
#[command(name = "export")]
struct Args {
    /// CI job name used as the origin of this entry
    /// (default: $CI_JOB_NAME)
    #[arg(long)]
    job_name: Option<String>,

    #[command(flatten)]
    common: CommonArgs,

    /// File or directory to export
    path: PathBuf,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.common.verbose);

    let config = ExportConfig {
        path: args.path,
        job_name: args.job_name,
        dry_run: args.common.dry_run,
        force: args.common.force,
    };

    let result = args
        .common
        .staging_area()
        .and_then(|staging| export(&config, &ProcessEnvironment, &staging));
    finish(result)
}
