//! One editing session: per-window configuration, the output buffer and the
//! dispatcher that turns actions into mbed invocations.

use tracing::{info, warn};

use crate::{
    command::{Action, MbedCommand},
    config::{SessionConfig, WindowConfigs},
    editor::{BufferId, Editor},
    error::{Error, Result},
    output::OutputBuffer,
    resolver::ConfigResolver,
    tool::ExternalTool,
};

/// Compile output containing this means the build produced an image
pub const SUCCESS_MARKER: &str = "Image";

/// What an action left behind for the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Finished; the message was echoed inline
    Success(String),
    /// Output was written to the scratch buffer
    OutputShown(BufferId),
    /// The command printed nothing, so there is nothing to show
    NoOutput,
    /// Target and toolchain now in effect
    Resolved(SessionConfig),
    /// The action only changed session state
    Done,
}

pub struct Session<T: ExternalTool, E: Editor> {
    tool: T,
    editor: E,
    resolver: ConfigResolver,
    windows: WindowConfigs,
    output: OutputBuffer,
    last_exit_code: Option<i32>,
}

impl<T: ExternalTool, E: Editor> Session<T, E> {
    pub fn new(tool: T, editor: E, resolver: ConfigResolver) -> Self {
        Self {
            tool,
            editor,
            resolver,
            windows: WindowConfigs::new(),
            output: OutputBuffer::new(),
            last_exit_code: None,
        }
    }

    pub fn tool(&self) -> &T {
        &self.tool
    }

    pub fn editor(&self) -> &E {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut E {
        &mut self.editor
    }

    pub fn output_handle(&self) -> Option<BufferId> {
        self.output.handle()
    }

    /// Exit status of the mbed call made by the last action.
    /// `None` when that action did not run mbed.
    pub fn last_exit_code(&self) -> Option<i32> {
        self.last_exit_code
    }

    /// Configuration of the current window, if it was ever touched
    pub fn config(&self) -> Option<&SessionConfig> {
        self.windows.get(self.editor.current_window())
    }

    fn config_mut(&mut self) -> &mut SessionConfig {
        let window = self.editor.current_window();
        self.windows.get_or_create(window)
    }

    pub fn set_target(&mut self, target: impl Into<String>) {
        self.config_mut().target = target.into();
    }

    pub fn set_toolchain(&mut self, toolchain: impl Into<String>) {
        self.config_mut().toolchain = toolchain.into();
    }

    pub fn resolve(&mut self, force: bool) -> Result<SessionConfig> {
        let window = self.editor.current_window();
        let config = self.windows.get_or_create(window);
        self.resolver.resolve(config, &self.tool, &mut self.editor, force)
    }

    /// Run an action and report any failure to the editor
    pub fn perform(&mut self, action: Action) -> Result<Outcome> {
        self.last_exit_code = None;
        let result = self.execute(action);
        if let Err(e) = &result {
            warn!("Action failed: {}", e);
            self.editor.echo_error(&e.to_string());
        }
        result
    }

    /// Build the mbed command for `action` without running it.
    ///
    /// Resolution and library-name prompts still happen. Actions that do not
    /// invoke mbed return `None`.
    pub fn plan(&mut self, action: &Action) -> Result<Option<MbedCommand>> {
        let command = match action {
            Action::Compile { mode, extra_flags } => {
                let config = self.resolve(false)?;
                MbedCommand::new("compile")
                    .with_target_flags(&config.target, &config.toolchain)
                    .args(mode.flag())
                    .args(extra_flags.iter().cloned())
            }
            Action::NewProject => MbedCommand::new("new").arg("."),
            Action::Sync => MbedCommand::new("sync"),
            Action::RunTests => MbedCommand::new("test"),
            Action::Deploy => MbedCommand::new("deploy"),
            Action::AddLibrary(name) => {
                let name = self.library_name(name.as_deref(), "Library to add: ")?;
                MbedCommand::new("add").arg(name)
            }
            Action::RemoveLibrary(name) => {
                let name = self.library_name(name.as_deref(), "Library to remove: ")?;
                MbedCommand::new("remove").arg(name)
            }
            Action::ListDependencies => MbedCommand::new("ls"),
            Action::CloseOutput
            | Action::ForceResolve
            | Action::SetTarget(_)
            | Action::SetToolchain(_) => return Ok(None),
        };
        Ok(Some(command))
    }

    fn execute(&mut self, action: Action) -> Result<Outcome> {
        match action {
            Action::CloseOutput => {
                self.output.close(&mut self.editor);
                Ok(Outcome::Done)
            }
            Action::ForceResolve => {
                let config = self.resolve(true)?;
                self.editor.echo(&format!(
                    "Target: {}, toolchain: {}",
                    config.target, config.toolchain
                ));
                Ok(Outcome::Resolved(config))
            }
            Action::SetTarget(target) => {
                self.editor.echo(&format!("Target set to {target}"));
                self.set_target(target);
                Ok(Outcome::Done)
            }
            Action::SetToolchain(toolchain) => {
                self.editor.echo(&format!("Toolchain set to {toolchain}"));
                self.set_toolchain(toolchain);
                Ok(Outcome::Done)
            }
            action => self.run_command(action),
        }
    }

    fn run_command(&mut self, action: Action) -> Result<Outcome> {
        let Some(command) = self.plan(&action)? else {
            return Ok(Outcome::Done);
        };

        info!("Running: {}", command.to_shell_command(self.tool.program()));
        let output = self.tool.run(&command)?;
        self.last_exit_code = Some(output.exit_code);
        let text = output.combined();

        let outcome = match action {
            Action::Compile { .. } => {
                if text.contains(SUCCESS_MARKER) {
                    let message = "Compilation succeeded".to_string();
                    self.editor.echo(&message);
                    Outcome::Success(message)
                } else {
                    self.show_unless_empty(&text)
                }
            }
            Action::ListDependencies | Action::RunTests => self.show_unless_empty(&text),
            _ if !output.succeeded() && !text.trim().is_empty() => {
                Outcome::OutputShown(self.output.present(&mut self.editor, &text))
            }
            _ => {
                let message = match text.trim() {
                    "" => format!("{action} finished"),
                    trimmed => trimmed.to_string(),
                };
                self.editor.echo(&message);
                Outcome::Success(message)
            }
        };

        if !output.succeeded() {
            warn!(
                "`{}` exited with status {}",
                command.subcommand(),
                output.exit_code
            );
        }
        Ok(outcome)
    }

    fn show_unless_empty(&mut self, text: &str) -> Outcome {
        if text.trim().is_empty() {
            Outcome::NoOutput
        } else {
            Outcome::OutputShown(self.output.present(&mut self.editor, text))
        }
    }

    fn library_name(&mut self, given: Option<&str>, question: &str) -> Result<String> {
        let name = match given.map(str::trim).filter(|n| !n.is_empty()) {
            Some(name) => name.to_string(),
            None => self
                .editor
                .prompt(question)
                .map(|a| a.trim().to_string())
                .unwrap_or_default(),
        };
        if name.is_empty() {
            return Err(Error::Cancelled("no library name given".to_string()));
        }
        Ok(name)
    }
}
