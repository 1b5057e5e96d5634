use anyhow::{Context, Result};
use std::env;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing::debug;

use mbed_runner_core::{
    ConfigResolver, MbedCli, Session, Settings, config::find_project_root, tool::DEFAULT_PROGRAM,
};

use crate::cli::GlobalOptions;
use crate::display::TerminalEditor;

pub type TerminalSession = Session<MbedCli, TerminalEditor<Box<dyn BufRead>, Box<dyn Write>>>;

/// Everything needed to talk to mbed for one project directory
#[derive(Debug, Clone)]
pub struct ProjectContext {
    pub cwd: PathBuf,
    pub settings: Settings,
    pub program: String,
}

impl ProjectContext {
    /// `--tool` beats the settings file, which beats the `mbed` default
    pub fn load(options: &GlobalOptions) -> Result<Self> {
        let cwd = match &options.cwd {
            Some(dir) => dir.clone(),
            None => env::current_dir().context("Failed to get current directory")?,
        };
        let settings = Settings::discover(&cwd)
            .with_context(|| format!("Failed to load settings for {}", cwd.display()))?;
        let program = options
            .tool
            .clone()
            .or_else(|| settings.tool.clone())
            .unwrap_or_else(|| DEFAULT_PROGRAM.to_string());

        debug!("Project directory: {}, tool: {}", cwd.display(), program);
        Ok(Self {
            cwd,
            settings,
            program,
        })
    }

    /// Directory mbed commands run in: the project root when one is found
    pub fn project_root(&self) -> PathBuf {
        find_project_root(&self.cwd).unwrap_or_else(|| self.cwd.clone())
    }

    pub fn resolver(&self) -> ConfigResolver {
        ConfigResolver::new(self.settings.config_files(&self.cwd))
    }

    /// A session on the terminal with `--target`/`--toolchain` applied
    pub fn terminal_session(&self, options: &GlobalOptions) -> TerminalSession {
        let tool = MbedCli::new(&self.program).with_working_dir(self.project_root());
        let editor = TerminalEditor::new(
            Box::new(io::stdin().lock()) as Box<dyn BufRead>,
            Box::new(io::stdout()) as Box<dyn Write>,
            Box::new(io::stderr()) as Box<dyn Write>,
        );

        let mut session = Session::new(tool, editor, self.resolver());
        if let Some(target) = &options.target {
            session.set_target(target.clone());
        }
        if let Some(toolchain) = &options.toolchain {
            session.set_toolchain(toolchain.clone());
        }
        session
    }
}
