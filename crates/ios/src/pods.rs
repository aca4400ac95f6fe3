//! CocoaPods dependency install

use bareflow_core::error::Result;
use bareflow_core::process::{CommandResult, command_exists, run_checked_in_dir};
use std::path::Path;

/// Check if the CocoaPods CLI is available
pub fn has_pod() -> bool {
    command_exists("pod")
}

/// Run `pod install` in the iOS directory, capturing output
pub fn install(ios_dir: &Path) -> Result<CommandResult> {
    run_checked_in_dir("pod", &["install"], ios_dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_pod_does_not_panic() {
        let _ = has_pod();
    }
}
