use anyhow::Result;
use tracing::{debug, info};

use mbed_runner_core::Editor;

use crate::cli::GlobalOptions;
use crate::config::ProjectContext;
use crate::utils::{Gesture, KEYMAP, parse_gesture};

pub fn session_command(options: &GlobalOptions) -> Result<()> {
    let context = ProjectContext::load(options)?;
    let mut session = context.terminal_session(options);

    info!("Starting session in {}", context.cwd.display());
    session
        .editor_mut()
        .println("mbed-runner session, type ? for the keymap, q to quit");

    loop {
        session.editor_mut().print_prompt("mbed> ");
        let Some(line) = session.editor_mut().read_line() else {
            break;
        };

        let gesture = match parse_gesture(&line) {
            Ok(Some(gesture)) => gesture,
            Ok(None) => continue,
            Err(e) => {
                session.editor_mut().echo_error(&e.to_string());
                continue;
            }
        };

        match gesture {
            Gesture::Quit => break,
            Gesture::Help => {
                for (keys, description) in KEYMAP {
                    session
                        .editor_mut()
                        .println(&format!("  {keys:<22} {description}"));
                }
            }
            Gesture::Action(action) => {
                debug!("Gesture `{}` -> {}", line.trim(), action);
                if let Err(e) = session.perform(action) {
                    if e.is_fatal() {
                        std::process::exit(1);
                    }
                }
            }
        }
    }

    Ok(())
}
