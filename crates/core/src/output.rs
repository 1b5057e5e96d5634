//! The single reusable scratch buffer that shows command output

use tracing::debug;

use crate::editor::{BufferId, Editor};

/// Tracks the output buffer across actions. At most one exists at a time.
#[derive(Debug, Default)]
pub struct OutputBuffer {
    handle: Option<BufferId>,
}

impl OutputBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle(&self) -> Option<BufferId> {
        self.handle
    }

    /// Replace the buffer's content with `content`, creating or re-showing
    /// the buffer as needed, and leave the cursor on the first line.
    pub fn present<E: Editor + ?Sized>(&mut self, editor: &mut E, content: &str) -> BufferId {
        let buffer = match self.handle {
            Some(id) if editor.buffer_exists(id) => {
                if !editor.is_visible(id) {
                    debug!("Output buffer {} is hidden, opening a split", id);
                    editor.open_in_side_split(id);
                }
                id
            }
            _ => {
                let id = editor.create_scratch_buffer();
                debug!("Created output buffer {}", id);
                self.handle = Some(id);
                id
            }
        };

        editor.clear_buffer(buffer);
        editor.write_buffer(buffer, content);
        editor.cursor_to_top(buffer);
        buffer
    }

    /// Delete the tracked buffer; nothing happens when none is tracked
    pub fn close<E: Editor + ?Sized>(&mut self, editor: &mut E) {
        if let Some(id) = self.handle.take() {
            debug!("Closing output buffer {}", id);
            if editor.buffer_exists(id) {
                editor.delete_buffer(id);
            }
        }
    }
}
