//! JS-side tooling for the Bareflow build helper
//!
//! This crate owns everything that talks to the React Native / Expo side
//! of the project:
//! - The app manifest (`app.json`): read, version bump, write
//! - `expo prebuild` regeneration of the native projects
//! - `react-native run-<platform>` on a device or emulator

#![warn(missing_docs)]

pub mod manifest;
pub mod prebuild;
pub mod run;

pub use manifest::{AppManifest, BumpOutcome, bump_version};
