//! App manifest (`app.json`) read, bump, and write
//!
//! The manifest is kept as an order-preserving JSON document so that keys
//! the build helper does not own (name, slug, plugins, ...) survive a
//! rewrite untouched and in place. Both the Expo shape
//! `{ "expo": { ... } }` and the flat shape with the same fields at the
//! top level are accepted.

use bareflow_core::error::{Error, Result};
use serde_json::{Map, Value, json};
use std::path::Path;

/// What a version bump wrote back
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BumpOutcome {
    /// The version name applied to both platforms
    pub applied_version_name: String,
    /// The incremented Android version code
    pub new_version_code: i64,
}

/// An app manifest held in memory as a full JSON document
#[derive(Debug, Clone)]
pub struct AppManifest {
    root: Value,
}

impl AppManifest {
    /// Load and validate a manifest file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::manifest_not_found(path)
            } else {
                Error::io(format!("Failed to read {}: {}", path.display(), e))
            }
        })?;

        let root: Value = serde_json::from_str(&content)?;
        if !root.is_object() {
            return Err(Error::manifest("App manifest root must be a JSON object"));
        }
        if let Some(expo) = root.get("expo") {
            if !expo.is_object() {
                return Err(Error::manifest_missing_field("expo"));
            }
        }

        Ok(Self { root })
    }

    /// The object carrying version fields: `expo` when present, else the root
    fn app(&self) -> &Map<String, Value> {
        match self.root.get("expo") {
            Some(Value::Object(expo)) => expo,
            _ => self.root.as_object().expect("validated on load"),
        }
    }

    fn app_mut(&mut self) -> &mut Map<String, Value> {
        if self.root.get("expo").is_some() {
            self.root
                .get_mut("expo")
                .and_then(Value::as_object_mut)
                .expect("validated on load")
        } else {
            self.root.as_object_mut().expect("validated on load")
        }
    }

    /// Stored version name: `android.versionName`, falling back to `version`
    pub fn version_name(&self) -> Option<&str> {
        let app = self.app();
        app.get("android")
            .and_then(|a| a.get("versionName"))
            .and_then(Value::as_str)
            .or_else(|| app.get("version").and_then(Value::as_str))
    }

    /// Stored Android version code, if any
    pub fn version_code(&self) -> Result<Option<i64>> {
        match self.app().get("android").and_then(|a| a.get("versionCode")) {
            None => Ok(None),
            Some(value) => value.as_i64().map(Some).ok_or_else(|| {
                Error::manifest("android.versionCode must be an integer")
            }),
        }
    }

    /// Apply a version bump in memory
    ///
    /// The version name lands in `android.versionName`, `ios.buildNumber`,
    /// and the top-level `version`; the version code is incremented by
    /// exactly one (absent counts as 1). Platform sections are created
    /// when absent.
    pub fn bump(&mut self, requested_version_name: &str) -> Result<BumpOutcome> {
        let applied = match requested_version_name.trim() {
            "" => self
                .version_name()
                .map(str::to_string)
                .ok_or_else(|| Error::empty_input("versionName"))?,
            name => name.to_string(),
        };
        if applied.is_empty() {
            return Err(Error::empty_input("versionName"));
        }

        let new_code = self.version_code()?.unwrap_or(1) + 1;

        let app = self.app_mut();
        let android = section_mut(app, "android")?;
        android.insert("versionName".to_string(), json!(applied));
        android.insert("versionCode".to_string(), json!(new_code));

        let ios = section_mut(app, "ios")?;
        ios.insert("buildNumber".to_string(), json!(applied));

        app.insert("version".to_string(), json!(applied));

        Ok(BumpOutcome {
            applied_version_name: applied,
            new_version_code: new_code,
        })
    }

    /// Serialize pretty-printed and overwrite the file in a single write
    pub fn save(&self, path: &Path) -> Result<()> {
        let mut rendered = serde_json::to_string_pretty(&self.root)
            .map_err(|e| Error::manifest(format!("Failed to serialize manifest: {}", e)))?;
        rendered.push('\n');
        std::fs::write(path, rendered)
            .map_err(|e| Error::io(format!("Failed to write {}: {}", path.display(), e)))?;
        Ok(())
    }
}

fn section_mut<'a>(app: &'a mut Map<String, Value>, key: &str) -> Result<&'a mut Map<String, Value>> {
    if !app.contains_key(key) {
        app.insert(key.to_string(), json!({}));
    }
    app.get_mut(key)
        .and_then(Value::as_object_mut)
        .ok_or_else(|| Error::manifest(format!("{} must be a JSON object", key)))
}

/// Bump the manifest at `path` and write it back
///
/// This is the whole manifest-updater contract: read, mutate in memory,
/// one atomic write. The prebuild regeneration that follows is the
/// caller's step and is deliberately not transactional with this write.
pub fn bump_version(path: &Path, requested_version_name: &str) -> Result<BumpOutcome> {
    let mut manifest = AppManifest::load(path)?;
    let outcome = manifest.bump(requested_version_name)?;
    manifest.save(path)?;
    Ok(outcome)
}
