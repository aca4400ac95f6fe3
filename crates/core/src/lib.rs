//! Core utilities for the Bareflow build helper
//!
//! This crate provides the functionality shared by every other crate in the
//! workspace:
//!
//! - **Error handling**: structured errors with codes, context, and recovery
//!   suggestions, plus the CLI exit-code contract
//! - **Process execution**: synchronous command invocation with captured or
//!   streamed output; non-zero exit is fatal and never retried
//! - **Configuration**: optional TOML project configuration with defaults
//!
//! # Example
//!
//! ```rust,no_run
//! use bareflow_core::process::run_checked_in_dir;
//! use std::path::Path;
//!
//! // Run `pod install` inside the iOS directory; a non-zero exit becomes
//! // a CommandFailed error carrying the captured output.
//! run_checked_in_dir("pod", &["install"], Path::new("ios")).unwrap();
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod platform;
pub mod process;

pub use error::{Error, ErrorCode, Result, ResultExt};
