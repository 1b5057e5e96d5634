use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use mbed_runner_core::{Action, CompileMode};

use crate::commands::{resolve_command, run_command, session_command};

#[derive(Parser, Debug)]
#[command(name = "mbed-runner")]
#[command(version, about, long_about = None)]
#[command(after_help = "ENVIRONMENT:\n    RUST_LOG=debug    Enable debug logging")]
pub struct Runner {
    #[command(flatten)]
    pub options: GlobalOptions,

    #[command(subcommand)]
    pub command: Commands,
}

/// Flags shared by every subcommand
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalOptions {
    /// mbed executable to run (defaults to the settings file, then `mbed`)
    #[arg(long, global = true, env = "MBED_RUNNER_TOOL")]
    pub tool: Option<String>,

    /// Use this target instead of resolving one
    #[arg(short = 'm', long, global = true)]
    pub target: Option<String>,

    /// Use this toolchain instead of resolving one
    #[arg(short = 't', long, global = true)]
    pub toolchain: Option<String>,

    /// Project directory (defaults to the current directory)
    #[arg(long, global = true)]
    pub cwd: Option<PathBuf>,

    /// Print the mbed command without executing it
    #[arg(short = 'd', long, global = true)]
    pub dry_run: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compile the project for the resolved target and toolchain
    #[command(visible_alias = "c")]
    Compile {
        /// Clean the build directory first
        #[arg(short, long, group = "mode")]
        clean: bool,

        /// Flash the image after compiling
        #[arg(short, long, group = "mode")]
        flash: bool,

        /// Verbose compiler output
        #[arg(short, long, group = "mode")]
        verbose: bool,

        /// Very verbose compiler output
        #[arg(long, group = "mode")]
        very_verbose: bool,

        /// Extra flags passed to `mbed compile` (after `--`)
        #[arg(last = true)]
        flags: Vec<String>,
    },
    /// Create a new project in the project directory
    New,
    /// Synchronize library references
    Sync,
    /// Run the project's tests
    Test,
    /// Import missing dependencies
    Deploy,
    /// Add a library (prompts when no name is given)
    Add { name: Option<String> },
    /// Remove a library (prompts when no name is given)
    Remove { name: Option<String> },
    /// Show the dependency tree
    Ls,
    /// Resolve and print the target and toolchain
    Resolve {
        /// Ignore cached and overridden values and ask mbed again
        #[arg(short, long)]
        force: bool,
    },
    /// Read key gestures from stdin, keeping state between them
    #[command(visible_alias = "s")]
    Session,
}

impl Commands {
    /// The single action a one-shot subcommand performs
    pub fn action(&self) -> Option<Action> {
        let action = match self {
            Commands::Compile {
                clean,
                flash,
                verbose,
                very_verbose,
                flags,
            } => {
                let mode = if *clean {
                    CompileMode::Clean
                } else if *flash {
                    CompileMode::Flash
                } else if *verbose {
                    CompileMode::Verbose
                } else if *very_verbose {
                    CompileMode::VeryVerbose
                } else {
                    CompileMode::Normal
                };
                Action::Compile {
                    mode,
                    extra_flags: flags.clone(),
                }
            }
            Commands::New => Action::NewProject,
            Commands::Sync => Action::Sync,
            Commands::Test => Action::RunTests,
            Commands::Deploy => Action::Deploy,
            Commands::Add { name } => Action::AddLibrary(name.clone()),
            Commands::Remove { name } => Action::RemoveLibrary(name.clone()),
            Commands::Ls => Action::ListDependencies,
            Commands::Resolve { .. } | Commands::Session => return None,
        };
        Some(action)
    }
}

impl Runner {
    /// Execute the command
    pub fn execute(self) -> Result<()> {
        match &self.command {
            Commands::Session => session_command(&self.options),
            Commands::Resolve { force } => resolve_command(&self.options, *force),
            command => match command.action() {
                Some(action) => run_command(&self.options, action),
                None => Ok(()),
            },
        }
    }
}
