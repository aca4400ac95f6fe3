//! External process execution
//!
//! All toolchain work (Gradle, xcodebuild, CocoaPods, the Expo and React
//! Native CLIs) goes through here. Execution is synchronous and blocking;
//! the flow never runs two commands at once. A non-zero exit is mapped to a
//! `CommandFailed` error carrying the rendered command line and whatever
//! the child wrote, and is never retried.

use crate::error::{Error, Result};
use std::path::Path;
use std::process::{Command, Output, Stdio};

/// Result of a command execution
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// Whether the command succeeded (exit code 0)
    pub success: bool,
    /// Exit code of the command
    pub exit_code: i32,
    /// Standard output
    pub stdout: String,
    /// Standard error
    pub stderr: String,
}

impl CommandResult {
    /// Create from std::process::Output
    pub fn from_output(output: Output) -> Self {
        Self {
            success: output.status.success(),
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        }
    }

    /// Get combined output (stdout + stderr)
    pub fn combined_output(&self) -> String {
        if self.stderr.is_empty() {
            self.stdout.clone()
        } else if self.stdout.is_empty() {
            self.stderr.clone()
        } else {
            format!("{}\n{}", self.stdout, self.stderr)
        }
    }
}

/// Render a program + args as a single display string
pub fn display_command(program: &str, args: &[&str]) -> String {
    if args.is_empty() {
        program.to_string()
    } else {
        format!("{} {}", program, args.join(" "))
    }
}

fn spawn_error(program: &str, args: &[&str], err: &std::io::Error) -> Error {
    if err.kind() == std::io::ErrorKind::NotFound {
        Error::command_not_found(program)
    } else {
        Error::process(format!(
            "Failed to execute {}: {}",
            display_command(program, args),
            err
        ))
    }
}

/// Run a command in a directory and capture its output
pub fn run_command_in_dir(program: &str, args: &[&str], dir: &Path) -> Result<CommandResult> {
    let output = Command::new(program)
        .args(args)
        .current_dir(dir)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .map_err(|e| spawn_error(program, args, &e))?;

    Ok(CommandResult::from_output(output))
}

/// Run a command in the current directory and capture its output
pub fn run_command(program: &str, args: &[&str]) -> Result<CommandResult> {
    run_command_in_dir(program, args, Path::new("."))
}

/// Run a command in a directory, streaming its output to the terminal
pub fn run_command_streaming_in_dir(program: &str, args: &[&str], dir: &Path) -> Result<i32> {
    let status = Command::new(program)
        .args(args)
        .current_dir(dir)
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .map_err(|e| spawn_error(program, args, &e))?;

    Ok(status.code().unwrap_or(-1))
}

/// Run a captured command, treating a non-zero exit as fatal
///
/// The returned error carries the rendered command line and the child's
/// combined output so the caller can print it before terminating.
pub fn run_checked_in_dir(program: &str, args: &[&str], dir: &Path) -> Result<CommandResult> {
    let result = run_command_in_dir(program, args, dir)?;
    if result.success {
        Ok(result)
    } else {
        Err(Error::command_failed(
            display_command(program, args),
            result.combined_output(),
        ))
    }
}

/// Run a streaming command, treating a non-zero exit as fatal
///
/// Output has already reached the terminal, so the error carries only the
/// command line and exit code.
pub fn run_checked_streaming_in_dir(program: &str, args: &[&str], dir: &Path) -> Result<()> {
    let code = run_command_streaming_in_dir(program, args, dir)?;
    if code == 0 {
        Ok(())
    } else {
        Err(Error::command_failed(
            display_command(program, args),
            format!("exited with code {}", code),
        ))
    }
}

/// Check if a command exists in PATH
pub fn command_exists(program: &str) -> bool {
    which::which(program).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_exists_sh() {
        assert!(command_exists("sh"));
    }

    #[test]
    fn test_command_exists_nonexistent() {
        assert!(!command_exists("nonexistent_command_12345"));
    }

    #[test]
    fn test_run_command_echo() {
        let result = run_command("echo", &["hello"]).unwrap();
        assert!(result.success);
        assert!(result.stdout.contains("hello"));
    }

    #[test]
    fn test_run_command_in_dir() {
        let dir = tempfile::tempdir().unwrap();
        let result = run_command_in_dir("pwd", &[], dir.path()).unwrap();
        assert!(result.success);
    }

    #[test]
    fn test_missing_program_is_command_not_found() {
        let err = run_command("nonexistent_command_12345", &[]).unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::CommandNotFound);
    }

    #[test]
    fn test_run_checked_failure_carries_command_line() {
        let err = run_checked_in_dir("sh", &["-c", "echo boom >&2; exit 3"], Path::new("."))
            .unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::CommandFailed);
        assert!(err.message.contains("sh -c"));
        assert!(err.context.as_deref().unwrap().contains("boom"));
    }

    #[test]
    fn test_display_command() {
        assert_eq!(display_command("pod", &["install"]), "pod install");
        assert_eq!(display_command("pod", &[]), "pod");
    }

    #[test]
    fn test_command_result_combined_output() {
        let result = CommandResult {
            success: true,
            exit_code: 0,
            stdout: "out".to_string(),
            stderr: "err".to_string(),
        };
        assert!(result.combined_output().contains("out"));
        assert!(result.combined_output().contains("err"));
    }
}
