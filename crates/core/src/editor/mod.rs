//! Editor interface
//!
//! mbed-runner never draws anything itself. Buffers, windows, messages and
//! prompts belong to the host editor, which implements [`Editor`].

mod memory;

pub use memory::{MemoryEditor, Message, ScratchBuffer};

use crate::config::WindowId;

/// Opaque identifier of an editor buffer
pub type BufferId = u64;

/// Primitives the host editor provides
pub trait Editor {
    /// Window the user is currently working in
    fn current_window(&self) -> WindowId;

    /// Create a non-persistent scratch buffer and show it in a new window
    fn create_scratch_buffer(&mut self) -> BufferId;

    fn buffer_exists(&self, buffer: BufferId) -> bool;

    /// Whether any window currently displays the buffer
    fn is_visible(&self, buffer: BufferId) -> bool;

    fn open_in_side_split(&mut self, buffer: BufferId);

    fn clear_buffer(&mut self, buffer: BufferId);

    fn write_buffer(&mut self, buffer: BufferId, content: &str);

    fn cursor_to_top(&mut self, buffer: BufferId);

    fn delete_buffer(&mut self, buffer: BufferId);

    /// Secondary read-only surface for listings
    fn show_info(&mut self, title: &str, content: &str);

    /// Inline status message
    fn echo(&mut self, message: &str);

    /// Inline error message
    fn echo_error(&mut self, message: &str);

    /// Ask the user for a line of input; `None` when the prompt was dismissed
    fn prompt(&mut self, question: &str) -> Option<String>;
}
