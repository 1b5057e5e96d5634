use anyhow::Result;
use tracing::debug;

use mbed_runner_core::{Action, Editor, Outcome};

use crate::cli::GlobalOptions;
use crate::config::ProjectContext;
use crate::display::print_command_breakdown;

pub fn run_command(options: &GlobalOptions, action: Action) -> Result<()> {
    let context = ProjectContext::load(options)?;
    let mut session = context.terminal_session(options);

    debug!("Running action: {}", action);

    if options.dry_run {
        match session.plan(&action) {
            Ok(Some(command)) => {
                println!("{}", command.to_shell_command(&context.program));
                print_command_breakdown(&context.program, &command);
                println!("Working directory: {}", context.project_root().display());
            }
            Ok(None) => println!("{action} does not run mbed"),
            Err(e) => {
                session.editor_mut().echo_error(&e.to_string());
                std::process::exit(1);
            }
        }
        return Ok(());
    }

    // Failures were already reported by the session
    match session.perform(action) {
        Ok(Outcome::NoOutput) => debug!("Nothing to show"),
        Ok(outcome) => debug!("Outcome: {:?}", outcome),
        Err(_) => std::process::exit(1),
    }

    // Pass a failed mbed call through so scripts can tell
    match session.last_exit_code() {
        Some(0) | None => Ok(()),
        Some(code) => std::process::exit(if code > 0 { code } else { 1 }),
    }
}
