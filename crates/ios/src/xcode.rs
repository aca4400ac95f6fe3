//! xcodebuild integration: clean, archive, export
//!
//! Packaging an IPA is a fixed two-step pipeline: archive the workspace
//! with the Release configuration, then export the archive against the
//! project's export options plist. Both steps stream their output.

use bareflow_core::error::{Error, ErrorCode, Result};
use bareflow_core::process::{
    CommandResult, command_exists, run_checked_in_dir, run_checked_streaming_in_dir,
};
use std::path::{Path, PathBuf};

/// Archive location, relative to the iOS directory
pub const ARCHIVE_PATH: &str = "build/App.xcarchive";

/// Export destination, relative to the iOS directory
pub const EXPORT_PATH: &str = "build";

/// Check if xcodebuild is available
pub fn is_xcode_available() -> bool {
    command_exists("xcodebuild")
}

/// Clean build artifacts, capturing output
pub fn clean(ios_dir: &Path) -> Result<CommandResult> {
    run_checked_in_dir("xcodebuild", &["clean"], ios_dir)
}

/// Find the CocoaPods-generated workspace in the iOS directory
///
/// With more than one candidate the lexicographically first wins, which
/// keeps the choice deterministic.
pub fn find_workspace(ios_dir: &Path) -> Result<PathBuf> {
    let entries = std::fs::read_dir(ios_dir)
        .map_err(|e| Error::io(format!("Failed to read {}: {}", ios_dir.display(), e)))?;

    let mut workspaces: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().and_then(|e| e.to_str()) == Some("xcworkspace"))
        .collect();
    workspaces.sort();

    workspaces.into_iter().next().ok_or_else(|| {
        Error::new(
            ErrorCode::XcodeError,
            format!("No .xcworkspace found in {}", ios_dir.display()),
        )
        .with_suggestion("Run pod install to generate the workspace")
    })
}

/// Scheme name: the configured one when set, else the workspace file stem
pub fn scheme_for(workspace: &Path, configured: &str) -> String {
    if configured.is_empty() {
        workspace
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    } else {
        configured.to_string()
    }
}

/// Arguments for the archive step
pub fn archive_args<'a>(workspace_name: &'a str, scheme: &'a str) -> Vec<&'a str> {
    vec![
        "-workspace",
        workspace_name,
        "-scheme",
        scheme,
        "-configuration",
        "Release",
        "archive",
        "-archivePath",
        ARCHIVE_PATH,
    ]
}

/// Arguments for the export step
pub fn export_args(export_options: &str) -> Vec<&str> {
    vec![
        "-exportArchive",
        "-archivePath",
        ARCHIVE_PATH,
        "-exportPath",
        EXPORT_PATH,
        "-exportOptionsPlist",
        export_options,
    ]
}

/// Archive the workspace with the Release configuration, streaming output
pub fn archive(ios_dir: &Path, workspace_name: &str, scheme: &str) -> Result<()> {
    run_checked_streaming_in_dir("xcodebuild", &archive_args(workspace_name, scheme), ios_dir)
}

/// Export the archive into `build/`, streaming output
pub fn export_archive(ios_dir: &Path, export_options: &str) -> Result<()> {
    run_checked_streaming_in_dir("xcodebuild", &export_args(export_options), ios_dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_workspace_requires_one() {
        let dir = tempfile::tempdir().unwrap();
        let err = find_workspace(dir.path()).unwrap_err();
        assert_eq!(err.code, ErrorCode::XcodeError);

        std::fs::create_dir(dir.path().join("Demo.xcworkspace")).unwrap();
        let found = find_workspace(dir.path()).unwrap();
        assert_eq!(found.file_name().unwrap(), "Demo.xcworkspace");
    }

    #[test]
    fn test_find_workspace_is_deterministic() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("Zeta.xcworkspace")).unwrap();
        std::fs::create_dir(dir.path().join("Alpha.xcworkspace")).unwrap();
        let found = find_workspace(dir.path()).unwrap();
        assert_eq!(found.file_name().unwrap(), "Alpha.xcworkspace");
    }

    #[test]
    fn test_scheme_prefers_configured_name() {
        let ws = Path::new("Demo.xcworkspace");
        assert_eq!(scheme_for(ws, "Custom"), "Custom");
        assert_eq!(scheme_for(ws, ""), "Demo");
    }

    #[test]
    fn test_archive_args_pin_release_configuration() {
        let args = archive_args("Demo.xcworkspace", "Demo");
        assert!(args.contains(&"-configuration"));
        assert!(args.contains(&"Release"));
        assert!(args.contains(&"archive"));
        assert_eq!(*args.last().unwrap(), ARCHIVE_PATH);
    }

    #[test]
    fn test_export_args_reference_plist() {
        let args = export_args("exportOptions.plist");
        assert!(args.contains(&"-exportArchive"));
        assert!(args.contains(&"exportOptions.plist"));
    }
}
