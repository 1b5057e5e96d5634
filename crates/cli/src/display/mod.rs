pub mod command_breakdown;
pub mod terminal;

pub use command_breakdown::print_command_breakdown;
pub use terminal::TerminalEditor;
