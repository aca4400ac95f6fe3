//! Target platform and build mode tokens
//!
//! The lowercase `as_str` forms are the CLI/toolchain tokens; `Display`
//! renders the menu labels.

use std::fmt;
use std::str::FromStr;

/// Build target platform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    /// Android via Gradle
    Android,
    /// iOS via xcodebuild
    Ios,
}

impl Platform {
    /// All supported platforms, in menu order
    pub const ALL: [Platform; 2] = [Platform::Android, Platform::Ios];

    /// Lowercase token used on the command line and in toolchain arguments
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Android => "android",
            Platform::Ios => "ios",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Platform::Android => write!(f, "Android"),
            Platform::Ios => write!(f, "iOS"),
        }
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "android" => Ok(Platform::Android),
            "ios" => Ok(Platform::Ios),
            _ => Err(format!(
                "unknown platform '{}' (valid platforms: android, ios)",
                s
            )),
        }
    }
}

/// Build mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Development build
    Debug,
    /// Distribution build
    Release,
}

impl Mode {
    /// All supported modes, in menu order
    pub const ALL: [Mode; 2] = [Mode::Debug, Mode::Release];

    /// Lowercase token used on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Debug => "debug",
            Mode::Release => "release",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Debug => write!(f, "Debug"),
            Mode::Release => write!(f, "Release"),
        }
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "debug" => Ok(Mode::Debug),
            "release" => Ok(Mode::Release),
            _ => Err(format!("unknown mode '{}' (valid modes: debug, release)", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_tokens_round_trip() {
        for platform in Platform::ALL {
            assert_eq!(platform.as_str().parse::<Platform>().unwrap(), platform);
        }
    }

    #[test]
    fn test_platform_parse_is_case_insensitive() {
        assert_eq!("Android".parse::<Platform>().unwrap(), Platform::Android);
        assert_eq!("iOS".parse::<Platform>().unwrap(), Platform::Ios);
    }

    #[test]
    fn test_unknown_platform_lists_valid_tokens() {
        let err = "windows".parse::<Platform>().unwrap_err();
        assert!(err.contains("android"));
        assert!(err.contains("ios"));
    }

    #[test]
    fn test_mode_tokens_round_trip() {
        for mode in Mode::ALL {
            assert_eq!(mode.as_str().parse::<Mode>().unwrap(), mode);
        }
    }

    #[test]
    fn test_display_labels() {
        assert_eq!(Platform::Ios.to_string(), "iOS");
        assert_eq!(Mode::Release.to_string(), "Release");
    }
}
