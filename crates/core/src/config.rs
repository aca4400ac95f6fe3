//! Project configuration
//!
//! Optional TOML file describing where the project keeps its manifest and
//! native directories. Missing file means defaults; a malformed file is
//! fatal.

use crate::error::{Error, ErrorCode, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Configuration schema with defaults
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct ConfigSchema {
    #[serde(default)]
    pub project: ProjectConfig,
    #[serde(default)]
    pub ios: IosConfig,
}

/// Paths within the app project
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
    /// App manifest path, relative to the project root
    #[serde(default = "default_manifest")]
    pub manifest: String,
    /// Android project directory
    #[serde(default = "default_android_dir")]
    pub android_dir: String,
    /// iOS project directory
    #[serde(default = "default_ios_dir")]
    pub ios_dir: String,
}

/// iOS packaging settings
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IosConfig {
    /// Xcode scheme; empty means derive from the workspace name
    #[serde(default)]
    pub scheme: String,
    /// Export options plist, relative to the iOS directory
    #[serde(default = "default_export_options")]
    pub export_options: String,
}

fn default_manifest() -> String {
    "app.json".to_string()
}

fn default_android_dir() -> String {
    "android".to_string()
}

fn default_ios_dir() -> String {
    "ios".to_string()
}

fn default_export_options() -> String {
    "exportOptions.plist".to_string()
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            manifest: default_manifest(),
            android_dir: default_android_dir(),
            ios_dir: default_ios_dir(),
        }
    }
}

impl Default for IosConfig {
    fn default() -> Self {
        Self {
            scheme: String::new(),
            export_options: default_export_options(),
        }
    }
}

/// Loaded configuration and where it came from
#[derive(Debug, Clone)]
pub struct Config {
    pub schema: ConfigSchema,
    pub path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from an explicit path, a discovered file, or defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(p) => {
                if !p.exists() {
                    return Err(Error::new(
                        ErrorCode::ConfigError,
                        format!("Configuration file not found: {}", p.display()),
                    ));
                }
                Some(p.to_path_buf())
            }
            None => find_config_file(),
        };

        let schema = match &config_path {
            Some(p) => load_config_file(p)?,
            None => ConfigSchema::default(),
        };

        Ok(Self {
            schema,
            path: config_path,
        })
    }

    /// Defaults only, no file
    pub fn defaults() -> Self {
        Self {
            schema: ConfigSchema::default(),
            path: None,
        }
    }
}

/// Find a configuration file in standard locations
fn find_config_file() -> Option<PathBuf> {
    let candidates = [".bareflow.toml", "bareflow.toml"];

    for candidate in candidates {
        let p = Path::new(candidate);
        if p.exists() {
            return Some(p.to_path_buf());
        }
    }

    None
}

/// Load and parse a TOML configuration file
fn load_config_file(path: &Path) -> Result<ConfigSchema> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::config(format!("Failed to read config file {}: {}", path.display(), e))
    })?;

    Ok(toml::from_str(&content)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::defaults();
        assert!(config.path.is_none());
        assert_eq!(config.schema.project.manifest, "app.json");
        assert_eq!(config.schema.project.android_dir, "android");
        assert_eq!(config.schema.ios.export_options, "exportOptions.plist");
        assert!(config.schema.ios.scheme.is_empty());
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[ios]\nscheme = \"MyApp\"").unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.schema.ios.scheme, "MyApp");
        // untouched sections keep their defaults
        assert_eq!(config.schema.project.manifest, "app.json");
    }

    #[test]
    fn test_load_malformed_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "not toml [[").unwrap();

        let err = Config::load(Some(file.path())).unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigParseError);
    }

    #[test]
    fn test_load_missing_explicit_path() {
        let err = Config::load(Some(Path::new("/definitely/not/here.toml"))).unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigError);
    }
}
