//! Release artifact kinds and their output locations

use std::fmt;
use std::path::{Path, PathBuf};

/// Distributable Android artifact kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageKind {
    /// Installable package, `assembleRelease`
    Apk,
    /// Play Store bundle, `bundleRelease`
    Aab,
}

impl PackageKind {
    /// Both kinds, in menu order
    pub const ALL: [PackageKind; 2] = [PackageKind::Apk, PackageKind::Aab];

    /// Lowercase file extension
    pub fn as_str(&self) -> &'static str {
        match self {
            PackageKind::Apk => "apk",
            PackageKind::Aab => "aab",
        }
    }
}

impl fmt::Display for PackageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PackageKind::Apk => write!(f, "APK"),
            PackageKind::Aab => write!(f, "AAB"),
        }
    }
}

/// Where Gradle leaves the release artifact, relative to the Android directory
pub fn artifact_path(android_dir: &Path, kind: PackageKind) -> PathBuf {
    match kind {
        PackageKind::Apk => android_dir.join("app/build/outputs/apk/release/app-release.apk"),
        PackageKind::Aab => android_dir.join("app/build/outputs/bundle/release/app-release.aab"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_artifact_paths_match_gradle_layout() {
        let android = Path::new("android");
        assert_eq!(
            artifact_path(android, PackageKind::Apk),
            Path::new("android/app/build/outputs/apk/release/app-release.apk")
        );
        assert_eq!(
            artifact_path(android, PackageKind::Aab),
            Path::new("android/app/build/outputs/bundle/release/app-release.aab")
        );
    }

    #[test]
    fn test_display_labels() {
        assert_eq!(PackageKind::Apk.to_string(), "APK");
        assert_eq!(PackageKind::Aab.to_string(), "AAB");
    }
}
