pub mod parser;

pub use parser::{Gesture, KEYMAP, parse_gesture};
