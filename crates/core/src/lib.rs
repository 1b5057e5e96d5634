//! mbed-runner - drive the mbed CLI from an editor
//!
//! This crate provides:
//! - Resolution of the active target and toolchain per editor window
//! - Command generation for compile, flash, test and library management
//! - A single reusable scratch buffer for showing command output
pub mod command;
pub mod config;
pub mod editor;
pub mod error;
pub mod output;
pub mod resolver;
pub mod session;
pub mod tool;

// Re-export commonly used types and traits
pub use command::{Action, CompileMode, MbedCommand};
pub use config::{ConfigFiles, SessionConfig, Settings};
pub use editor::{BufferId, Editor, MemoryEditor};
pub use error::{Error, Result};
pub use output::OutputBuffer;
pub use resolver::ConfigResolver;
pub use session::{Outcome, Session};
pub use tool::{ExternalTool, MbedCli, ToolOutput};
