//! Expo prebuild invocation
//!
//! Regenerates the native platform project from the manifest. Runs right
//! after a version bump; a failure here leaves the manifest already
//! updated, which is the documented behavior.

use bareflow_core::error::Result;
use bareflow_core::platform::Platform;
use bareflow_core::process::{CommandResult, command_exists, run_checked_in_dir};
use std::path::Path;

/// Check if the npx launcher is available
pub fn has_npx() -> bool {
    command_exists("npx")
}

/// Arguments for the prebuild invocation
pub fn prebuild_args(platform: Platform) -> [&'static str; 4] {
    ["expo", "prebuild", "--platform", platform.as_str()]
}

/// Run `npx expo prebuild --platform <p>` in the project root
pub fn prebuild(project_dir: &Path, platform: Platform) -> Result<CommandResult> {
    run_checked_in_dir("npx", &prebuild_args(platform), project_dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prebuild_args_carry_platform_token() {
        assert_eq!(
            prebuild_args(Platform::Android),
            ["expo", "prebuild", "--platform", "android"]
        );
        assert_eq!(
            prebuild_args(Platform::Ios),
            ["expo", "prebuild", "--platform", "ios"]
        );
    }
}
