//! The external tool seam
//!
//! Everything mbed-runner knows about the outside world goes through
//! [`ExternalTool::run`]. The real implementation spawns the mbed CLI; tests
//! replace it with scripted responses.

mod mbed_cli;

pub use mbed_cli::{DEFAULT_PROGRAM, MbedCli};

use crate::{command::MbedCommand, error::Result};

/// Captured result of one external invocation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolOutput {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl ToolOutput {
    pub fn success(stdout: impl Into<String>) -> Self {
        Self {
            exit_code: 0,
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    pub fn failure(exit_code: i32, stderr: impl Into<String>) -> Self {
        Self {
            exit_code,
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    pub fn succeeded(&self) -> bool {
        self.exit_code == 0
    }

    /// stdout followed by stderr, the way a terminal would interleave them
    /// for a tool that flushes before exiting
    pub fn combined(&self) -> String {
        let mut text = self.stdout.clone();
        if !self.stderr.is_empty() {
            if !text.is_empty() && !text.ends_with('\n') {
                text.push('\n');
            }
            text.push_str(&self.stderr);
        }
        text
    }
}

/// Synchronous command execution
pub trait ExternalTool {
    /// Run the command to completion and capture its output.
    ///
    /// Returns [`Error::ToolNotFound`](crate::Error::ToolNotFound) when the
    /// executable cannot be launched at all. A non-zero exit status is not an
    /// error at this level.
    fn run(&self, command: &MbedCommand) -> Result<ToolOutput>;

    /// Name of the program, used when rendering commands
    fn program(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_combined_output_joins_streams() {
        let output = ToolOutput {
            exit_code: 1,
            stdout: "Building project".to_string(),
            stderr: "error: missing header\n".to_string(),
        };
        assert_eq!(output.combined(), "Building project\nerror: missing header\n");
        assert!(!output.succeeded());
    }

    #[test]
    fn test_combined_output_without_stderr() {
        let output = ToolOutput::success("[mbed] K64F\n");
        assert_eq!(output.combined(), "[mbed] K64F\n");
    }
}
