//! User-facing actions and the mbed subcommands they map to

use std::fmt;

/// Variants of `mbed compile` reachable from a single gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompileMode {
    #[default]
    Normal,
    Clean,
    Flash,
    Verbose,
    VeryVerbose,
}

impl CompileMode {
    pub fn flag(&self) -> Option<&'static str> {
        match self {
            CompileMode::Normal => None,
            CompileMode::Clean => Some("-c"),
            CompileMode::Flash => Some("-f"),
            CompileMode::Verbose => Some("-v"),
            CompileMode::VeryVerbose => Some("-vv"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Compile {
        mode: CompileMode,
        extra_flags: Vec<String>,
    },
    NewProject,
    Sync,
    RunTests,
    Deploy,
    /// `None` prompts for the library name
    AddLibrary(Option<String>),
    /// `None` prompts for the library name
    RemoveLibrary(Option<String>),
    ListDependencies,
    CloseOutput,
    ForceResolve,
    SetTarget(String),
    SetToolchain(String),
}

impl Action {
    pub fn compile(mode: CompileMode) -> Self {
        Action::Compile {
            mode,
            extra_flags: Vec::new(),
        }
    }

    /// Whether the action needs a resolved target/toolchain before running
    pub fn needs_resolution(&self) -> bool {
        matches!(self, Action::Compile { .. })
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Compile { mode, .. } => match mode {
                CompileMode::Normal => write!(f, "compile"),
                CompileMode::Clean => write!(f, "clean compile"),
                CompileMode::Flash => write!(f, "compile and flash"),
                CompileMode::Verbose => write!(f, "verbose compile"),
                CompileMode::VeryVerbose => write!(f, "very verbose compile"),
            },
            Action::NewProject => write!(f, "new project"),
            Action::Sync => write!(f, "sync"),
            Action::RunTests => write!(f, "test"),
            Action::Deploy => write!(f, "deploy"),
            Action::AddLibrary(_) => write!(f, "add library"),
            Action::RemoveLibrary(_) => write!(f, "remove library"),
            Action::ListDependencies => write!(f, "list dependencies"),
            Action::CloseOutput => write!(f, "close output"),
            Action::ForceResolve => write!(f, "resolve target and toolchain"),
            Action::SetTarget(_) => write!(f, "set target"),
            Action::SetToolchain(_) => write!(f, "set toolchain"),
        }
    }
}
