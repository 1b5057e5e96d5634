use std::io;
use std::path::PathBuf;
use std::process::Command;

use tracing::debug;

use super::{ExternalTool, ToolOutput};
use crate::{
    command::MbedCommand,
    error::{Error, Result},
};

/// Default executable name of the mbed CLI
pub const DEFAULT_PROGRAM: &str = "mbed";

/// Runs commands through the real mbed executable
#[derive(Debug, Clone)]
pub struct MbedCli {
    program: String,
    working_dir: Option<PathBuf>,
}

impl Default for MbedCli {
    fn default() -> Self {
        Self::new(DEFAULT_PROGRAM)
    }
}

impl MbedCli {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            working_dir: None,
        }
    }

    /// Directory used for commands that do not carry their own
    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }
}

impl ExternalTool for MbedCli {
    fn run(&self, command: &MbedCommand) -> Result<ToolOutput> {
        debug!("Running: {}", command.to_shell_command(&self.program));

        let mut process = Command::new(&self.program);
        process.args(&command.args);
        if let Some(dir) = command.working_dir.as_ref().or(self.working_dir.as_ref()) {
            process.current_dir(dir);
        }

        let output = process.output().map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => Error::ToolNotFound(self.program.clone()),
            _ => Error::IoError(e),
        })?;

        // Killed by a signal: report it like a generic failure
        let exit_code = output.status.code().unwrap_or(-1);
        debug!("`{}` exited with {}", command.subcommand(), exit_code);

        Ok(ToolOutput {
            exit_code,
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }

    fn program(&self) -> &str {
        &self.program
    }
}
