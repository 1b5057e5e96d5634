use std::collections::{BTreeMap, VecDeque};

use super::{BufferId, Editor};
use crate::config::WindowId;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScratchBuffer {
    pub content: String,
    pub visible: bool,
    pub cursor_line: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    Info(String),
    Error(String),
}

/// Editor state kept entirely in memory.
///
/// Answers to prompts are queued up front; a prompt with no queued answer
/// behaves like the user dismissing it.
#[derive(Debug, Default)]
pub struct MemoryEditor {
    window: WindowId,
    next_buffer: BufferId,
    buffers: BTreeMap<BufferId, ScratchBuffer>,
    answers: VecDeque<String>,
    pub prompts: Vec<String>,
    pub messages: Vec<Message>,
    pub info: Vec<(String, String)>,
    pub splits: usize,
}

impl MemoryEditor {
    pub fn new() -> Self {
        Self {
            window: 1,
            next_buffer: 1,
            ..Default::default()
        }
    }

    pub fn with_answers<I, S>(mut self, answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.answers.extend(answers.into_iter().map(Into::into));
        self
    }

    pub fn push_answer(&mut self, answer: impl Into<String>) {
        self.answers.push_back(answer.into());
    }

    pub fn set_current_window(&mut self, window: WindowId) {
        self.window = window;
    }

    pub fn buffer(&self, buffer: BufferId) -> Option<&ScratchBuffer> {
        self.buffers.get(&buffer)
    }

    pub fn buffer_count(&self) -> usize {
        self.buffers.len()
    }

    /// Close every window showing the buffer without deleting it
    pub fn hide(&mut self, buffer: BufferId) {
        if let Some(buf) = self.buffers.get_mut(&buffer) {
            buf.visible = false;
        }
    }

    pub fn errors(&self) -> Vec<&str> {
        self.messages
            .iter()
            .filter_map(|m| match m {
                Message::Error(text) => Some(text.as_str()),
                Message::Info(_) => None,
            })
            .collect()
    }

    pub fn infos(&self) -> Vec<&str> {
        self.messages
            .iter()
            .filter_map(|m| match m {
                Message::Info(text) => Some(text.as_str()),
                Message::Error(_) => None,
            })
            .collect()
    }
}

impl Editor for MemoryEditor {
    fn current_window(&self) -> WindowId {
        self.window
    }

    fn create_scratch_buffer(&mut self) -> BufferId {
        let id = self.next_buffer;
        self.next_buffer += 1;
        self.buffers.insert(
            id,
            ScratchBuffer {
                visible: true,
                ..Default::default()
            },
        );
        id
    }

    fn buffer_exists(&self, buffer: BufferId) -> bool {
        self.buffers.contains_key(&buffer)
    }

    fn is_visible(&self, buffer: BufferId) -> bool {
        self.buffers.get(&buffer).is_some_and(|b| b.visible)
    }

    fn open_in_side_split(&mut self, buffer: BufferId) {
        if let Some(buf) = self.buffers.get_mut(&buffer) {
            buf.visible = true;
            self.splits += 1;
        }
    }

    fn clear_buffer(&mut self, buffer: BufferId) {
        if let Some(buf) = self.buffers.get_mut(&buffer) {
            buf.content.clear();
            buf.cursor_line = 0;
        }
    }

    fn write_buffer(&mut self, buffer: BufferId, content: &str) {
        if let Some(buf) = self.buffers.get_mut(&buffer) {
            buf.content.push_str(content);
            buf.cursor_line = buf.content.lines().count();
        }
    }

    fn cursor_to_top(&mut self, buffer: BufferId) {
        if let Some(buf) = self.buffers.get_mut(&buffer) {
            buf.cursor_line = 1;
        }
    }

    fn delete_buffer(&mut self, buffer: BufferId) {
        self.buffers.remove(&buffer);
    }

    fn show_info(&mut self, title: &str, content: &str) {
        self.info.push((title.to_string(), content.to_string()));
    }

    fn echo(&mut self, message: &str) {
        self.messages.push(Message::Info(message.to_string()));
    }

    fn echo_error(&mut self, message: &str) {
        self.messages.push(Message::Error(message.to_string()));
    }

    fn prompt(&mut self, question: &str) -> Option<String> {
        self.prompts.push(question.to_string());
        self.answers.pop_front()
    }
}
