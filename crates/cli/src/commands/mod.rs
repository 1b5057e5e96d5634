pub mod resolve;
pub mod run;
pub mod session;

pub use resolve::resolve_command;
pub use run::run_command;
pub use session::session_command;
