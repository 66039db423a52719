//! CI handoff - pass files between jobs of a CI pipeline
//!
//! A job exports a file or directory into a shared staging area, namespaced
//! by its job name. A later job imports it back out by naming the job that
//! exported it, which moves the entry out of staging.
//!
//! There is no locking. Both sides rely on the CI system running the
//! importing job only after the exporting job has finished.

pub mod cli;
pub mod env;
pub mod error;
pub mod fsops;
pub mod guard;
pub mod handoff;

pub use env::{Environment, MapEnvironment, ProcessEnvironment};
pub use error::{HandoffError, Result};
pub use handoff::{ExportConfig, ImportConfig, StagingArea};
