//! mbed command generation

pub mod action;
pub mod mbed_command;

pub use action::{Action, CompileMode};
pub use mbed_command::MbedCommand;
