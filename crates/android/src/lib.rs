//! Android-specific tooling for the Bareflow build helper
//!
//! Gradle wrapper invocation (clean, assemble, bundle) and the mapping
//! from package kind to release task and output artifact path.

#![warn(missing_docs)]

pub mod artifacts;
pub mod gradle;

pub use artifacts::{PackageKind, artifact_path};
