//! Gradle build system integration
//!
//! All tasks run through the project's Gradle wrapper inside the Android
//! directory. Cleaning captures output; packaging streams it, since a
//! release build takes minutes and Gradle reports its own progress.

use crate::artifacts::PackageKind;
use bareflow_core::error::Result;
use bareflow_core::process::{CommandResult, run_checked_in_dir, run_checked_streaming_in_dir};
use std::path::Path;

/// The Gradle wrapper executable for the current host
pub fn wrapper() -> &'static str {
    if cfg!(windows) { "gradlew.bat" } else { "./gradlew" }
}

/// True if the wrapper exists in the Android directory
pub fn has_wrapper(android_dir: &Path) -> bool {
    let name = if cfg!(windows) { "gradlew.bat" } else { "gradlew" };
    android_dir.join(name).exists()
}

/// Clean build artifacts, capturing output
pub fn clean(android_dir: &Path) -> Result<CommandResult> {
    run_checked_in_dir(wrapper(), &["clean"], android_dir)
}

/// The release task for a package kind
pub fn package_task(kind: PackageKind) -> &'static str {
    match kind {
        PackageKind::Apk => "assembleRelease",
        PackageKind::Aab => "bundleRelease",
    }
}

/// Build a distributable artifact, streaming Gradle output
pub fn package(android_dir: &Path, kind: PackageKind) -> Result<()> {
    run_checked_streaming_in_dir(wrapper(), &[package_task(kind)], android_dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_package_task_mapping() {
        assert_eq!(package_task(PackageKind::Apk), "assembleRelease");
        assert_eq!(package_task(PackageKind::Aab), "bundleRelease");
    }

    #[test]
    fn test_has_wrapper_detects_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(!has_wrapper(dir.path()));
        let name = if cfg!(windows) { "gradlew.bat" } else { "gradlew" };
        std::fs::write(dir.path().join(name), "").unwrap();
        assert!(has_wrapper(dir.path()));
    }
}
