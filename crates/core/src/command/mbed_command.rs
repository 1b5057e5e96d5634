use std::path::{Path, PathBuf};

/// A single invocation of the mbed CLI: subcommand followed by its arguments.
///
/// The program itself is not part of the command; the [`ExternalTool`]
/// executing it decides which binary to launch.
///
/// [`ExternalTool`]: crate::tool::ExternalTool
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MbedCommand {
    pub args: Vec<String>,
    pub working_dir: Option<PathBuf>,
}

impl MbedCommand {
    pub fn new(subcommand: impl Into<String>) -> Self {
        Self {
            args: vec![subcommand.into()],
            working_dir: None,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Adds `-m TARGET -t TOOLCHAIN`, skipping flags whose value is empty
    pub fn with_target_flags(mut self, target: &str, toolchain: &str) -> Self {
        if !target.is_empty() {
            self.args.push("-m".to_string());
            self.args.push(target.to_string());
        }
        if !toolchain.is_empty() {
            self.args.push("-t".to_string());
            self.args.push(toolchain.to_string());
        }
        self
    }

    pub fn with_working_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.working_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    pub fn subcommand(&self) -> &str {
        self.args.first().map(String::as_str).unwrap_or_default()
    }

    /// Render the command as it would be typed in a shell
    pub fn to_shell_command(&self, program: &str) -> String {
        let mut cmd = String::from(program);
        for arg in &self.args {
            cmd.push(' ');
            if arg.is_empty() || arg.contains(char::is_whitespace) {
                cmd.push_str(&format!("'{arg}'"));
            } else {
                cmd.push_str(arg);
            }
        }
        cmd
    }
}
