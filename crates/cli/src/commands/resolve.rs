use anyhow::Result;

use mbed_runner_core::Editor;

use crate::cli::GlobalOptions;
use crate::config::ProjectContext;

pub fn resolve_command(options: &GlobalOptions, force: bool) -> Result<()> {
    let context = ProjectContext::load(options)?;
    let mut session = context.terminal_session(options);

    println!("🔧 Resolving target and toolchain...");
    let files = config_file_lines(&context);
    for (label, path) in files {
        println!("   📂 {label} config: {path}");
    }

    match session.resolve(force) {
        Ok(config) => {
            println!("   🎯 Target: {}", config.target);
            println!("   🛠️  Toolchain: {}", config.toolchain);
            Ok(())
        }
        Err(e) => {
            session.editor_mut().echo_error(&e.to_string());
            std::process::exit(1);
        }
    }
}

fn config_file_lines(context: &ProjectContext) -> Vec<(&'static str, String)> {
    let files = context.resolver().files().clone();
    [("Global", files.global), ("Local", files.local)]
        .into_iter()
        .map(|(label, path)| {
            let shown = match path {
                Some(path) if path.is_file() => path.display().to_string(),
                Some(path) => format!("{} (missing)", path.display()),
                None => "none".to_string(),
            };
            (label, shown)
        })
        .collect()
}
