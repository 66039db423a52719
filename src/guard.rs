//! Refuse to run outside CI unless forced

use crate::env::{Environment, CI_MARKER};
use crate::error::{HandoffError, Result};

/// Check that we are running inside a CI environment
///
/// Passes when `force` is set or the CI marker variable is present.
pub fn check_ci_environment(env: &dyn Environment, force: bool) -> Result<()> {
    if env.is_set(CI_MARKER) {
        return Ok(());
    }

    if force {
        log::info!("{} environment variable unset; continuing because of --force", CI_MARKER);
        return Ok(());
    }

    Err(HandoffError::EnvironmentGuard)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::MapEnvironment;

    #[test]
    fn test_refuses_without_marker() {
        let env = MapEnvironment::new();
        assert!(matches!(
            check_ci_environment(&env, false),
            Err(HandoffError::EnvironmentGuard)
        ));
    }

    #[test]
    fn test_force_bypasses() {
        let env = MapEnvironment::new();
        assert!(check_ci_environment(&env, true).is_ok());
    }

    #[test]
    fn test_marker_present() {
        let env = MapEnvironment::new().with(CI_MARKER, "true");
        assert!(check_ci_environment(&env, false).is_ok());
    }
}
