//! Environment variable access
//!
//! Lookups go through the [`Environment`] trait so the real process
//! environment can be swapped for an in-memory map in tests.

use std::collections::HashMap;

/// Variable whose presence marks a CI run (any value counts, even empty)
pub const CI_MARKER: &str = "CI";

/// Variable holding the name of the currently running CI job
pub const JOB_NAME_VAR: &str = "CI_JOB_NAME";

/// Source of environment variables
pub trait Environment {
    /// Look up a variable, `None` if it is not set
    fn var(&self, name: &str) -> Option<String>;

    /// Whether a variable is set at all
    fn is_set(&self, name: &str) -> bool {
        self.var(name).is_some()
    }
}

/// Reads the environment of the running process
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnvironment;

impl Environment for ProcessEnvironment {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var_os(name).map(|value| value.to_string_lossy().into_owned())
    }
}

/// Fixed set of variables held in memory
#[derive(Debug, Clone, Default)]
pub struct MapEnvironment {
    vars: HashMap<String, String>,
}

impl MapEnvironment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a variable
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }
}

impl Environment for MapEnvironment {
    fn var(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }
}

impl<K, V> FromIterator<(K, V)> for MapEnvironment
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
