//! Run the app on a device or emulator via the React Native CLI
//!
//! Output streams straight to the terminal; these builds take minutes and
//! the native toolchains do their own progress reporting.

use bareflow_core::error::Result;
use bareflow_core::platform::{Mode, Platform};
use bareflow_core::process::run_checked_streaming_in_dir;
use std::path::Path;

/// Arguments for `npx react-native run-<platform>`
///
/// Debug carries no mode flag. The release flag casing differs between
/// platforms: lowercase for Android, capitalized for iOS.
pub fn run_args(platform: Platform, mode: Mode) -> Vec<String> {
    let mut args = vec![
        "react-native".to_string(),
        format!("run-{}", platform.as_str()),
    ];
    if mode == Mode::Release {
        let flag = match platform {
            Platform::Android => "--mode=release",
            Platform::Ios => "--mode=Release",
        };
        args.push(flag.to_string());
    }
    args
}

/// Build and launch the app, streaming toolchain output
pub fn run_app(project_dir: &Path, platform: Platform, mode: Mode) -> Result<()> {
    let args = run_args(platform, mode);
    let arg_refs: Vec<&str> = args.iter().map(String::as_str).collect();
    run_checked_streaming_in_dir("npx", &arg_refs, project_dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_has_no_mode_flag() {
        assert_eq!(
            run_args(Platform::Android, Mode::Debug),
            vec!["react-native", "run-android"]
        );
        assert_eq!(
            run_args(Platform::Ios, Mode::Debug),
            vec!["react-native", "run-ios"]
        );
    }

    #[test]
    fn test_release_flag_casing_differs_by_platform() {
        assert_eq!(
            run_args(Platform::Android, Mode::Release),
            vec!["react-native", "run-android", "--mode=release"]
        );
        assert_eq!(
            run_args(Platform::Ios, Mode::Release),
            vec!["react-native", "run-ios", "--mode=Release"]
        );
    }
}
