use anyhow::{Result, bail};
use mbed_runner_core::{Action, CompileMode};

/// One line typed into an interactive session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Gesture {
    Action(Action),
    Help,
    Quit,
}

/// Key gestures and the commands they stand for, shown by `?`
pub const KEYMAP: &[(&str, &str)] = &[
    ("c [flags]", "compile"),
    ("C", "clean and compile"),
    ("cf", "compile and flash"),
    ("cv", "compile verbose"),
    ("cV", "compile very verbose"),
    ("n", "new project in the current directory"),
    ("s", "sync"),
    ("t", "run tests"),
    ("d", "deploy / import dependencies"),
    ("a [name]", "add library"),
    ("r [name]", "remove library"),
    ("l", "list dependency tree"),
    ("x", "close output"),
    ("R", "re-resolve target and toolchain"),
    ("SetTarget <name>", "override target"),
    ("SetToolchain <name>", "override toolchain"),
    ("q", "quit"),
];

/// Parse a gesture line. Empty lines yield `None`.
pub fn parse_gesture(line: &str) -> Result<Option<Gesture>> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Ok(None);
    };
    let rest: Vec<String> = words.map(str::to_string).collect();
    let name = (!rest.is_empty()).then(|| rest.join(" "));

    let compile = |mode| Action::Compile {
        mode,
        extra_flags: rest.clone(),
    };

    let action = match head {
        "q" | "quit" | "exit" => return Ok(Some(Gesture::Quit)),
        "?" | "help" => return Ok(Some(Gesture::Help)),
        "c" => compile(CompileMode::Normal),
        "C" => compile(CompileMode::Clean),
        "cf" => compile(CompileMode::Flash),
        "cv" => compile(CompileMode::Verbose),
        "cV" => compile(CompileMode::VeryVerbose),
        "n" => Action::NewProject,
        "s" => Action::Sync,
        "t" => Action::RunTests,
        "d" => Action::Deploy,
        "a" | "Add" => Action::AddLibrary(name),
        "r" | "Remove" => Action::RemoveLibrary(name),
        "l" => Action::ListDependencies,
        "x" => Action::CloseOutput,
        "R" => Action::ForceResolve,
        "SetTarget" => match name {
            Some(target) => Action::SetTarget(target),
            None => bail!("SetTarget needs a target name"),
        },
        "SetToolchain" => match name {
            Some(toolchain) => Action::SetToolchain(toolchain),
            None => bail!("SetToolchain needs a toolchain name"),
        },
        other => bail!("Unknown gesture `{other}`, type ? for the keymap"),
    };

    Ok(Some(Gesture::Action(action)))
}
