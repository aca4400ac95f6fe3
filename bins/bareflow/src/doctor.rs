//! Environment diagnosis
//!
//! Probes the tools the flow shells out to and reports one line per
//! probe. Missing optional tools are warnings; the command itself
//! succeeds either way.

use bareflow_android::gradle;
use bareflow_cli::output::Status;
use bareflow_core::config::Config;
use bareflow_core::error::Result;
use bareflow_core::process::command_exists;
use bareflow_ios::{pods, xcode};
use std::path::Path;

pub fn run(config: &Config) -> Result<()> {
    println!("Environment Check");
    println!();

    if command_exists("node") {
        Status::success("node: installed");
    } else {
        Status::error("node: not found");
    }

    if bareflow_rn::prebuild::has_npx() {
        Status::success("npx: installed");
    } else {
        Status::error("npx: not found");
    }

    let android_dir = Path::new(&config.schema.project.android_dir);
    if gradle::has_wrapper(android_dir) {
        Status::success("gradlew: present");
    } else {
        Status::warning("gradlew: not found (run expo prebuild first?)");
    }

    if xcode::is_xcode_available() {
        Status::success("xcodebuild: installed");
    } else {
        Status::warning("xcodebuild: not found");
    }

    if pods::has_pod() {
        Status::success("pod: installed");
    } else {
        Status::warning("pod: not found");
    }

    Ok(())
}
