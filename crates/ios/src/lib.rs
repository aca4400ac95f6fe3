//! iOS-specific tooling for the Bareflow build helper
//!
//! CocoaPods install and the xcodebuild clean/archive/export pipeline,
//! including workspace and scheme discovery.

#![warn(missing_docs)]

pub mod pods;
pub mod xcode;
