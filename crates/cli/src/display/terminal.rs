use std::fmt;
use std::io::{self, BufRead, Write};

use mbed_runner_core::{BufferId, Editor, MemoryEditor, config::WindowId};
use tracing::{debug, warn};

/// An [`Editor`] backed by a plain terminal.
///
/// Buffer bookkeeping is delegated to a [`MemoryEditor`]; every time the
/// output buffer is rewritten its full content is printed.
pub struct TerminalEditor<R: BufRead, W: Write> {
    state: MemoryEditor,
    input: R,
    out: W,
    err: W,
}

/// Write to a terminal stream. A closed pipe must not end the session, so
/// failures are logged and dropped.
fn emit<W: Write>(stream: &mut W, args: fmt::Arguments<'_>) {
    if let Err(e) = stream.write_fmt(args).and_then(|()| stream.flush()) {
        warn!("Failed to write to terminal: {}", e);
    }
}

impl<R: BufRead, W: Write> TerminalEditor<R, W> {
    pub fn new(input: R, out: W, err: W) -> Self {
        Self {
            state: MemoryEditor::new(),
            input,
            out,
            err,
        }
    }

    /// Read one line of user input without the trailing newline.
    /// `None` on end of input or a read failure. A line that is not valid
    /// UTF-8 is skipped and reads as empty.
    pub fn read_line(&mut self) -> Option<String> {
        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => Some(line.trim_end_matches(['\r', '\n']).to_string()),
            Err(e) if e.kind() == io::ErrorKind::InvalidData => {
                warn!("Skipping input line that is not valid UTF-8");
                Some(String::new())
            }
            Err(e) => {
                warn!("Failed to read input: {}", e);
                None
            }
        }
    }

    /// Print without a newline, for prompts
    pub fn print_prompt(&mut self, text: &str) {
        emit(&mut self.out, format_args!("{text}"));
    }

    pub fn println(&mut self, text: &str) {
        emit(&mut self.out, format_args!("{text}\n"));
    }

    pub fn into_writers(self) -> (W, W) {
        (self.out, self.err)
    }
}

impl<R: BufRead, W: Write> Editor for TerminalEditor<R, W> {
    fn current_window(&self) -> WindowId {
        self.state.current_window()
    }

    fn create_scratch_buffer(&mut self) -> BufferId {
        self.state.create_scratch_buffer()
    }

    fn buffer_exists(&self, buffer: BufferId) -> bool {
        self.state.buffer_exists(buffer)
    }

    fn is_visible(&self, buffer: BufferId) -> bool {
        self.state.is_visible(buffer)
    }

    fn open_in_side_split(&mut self, buffer: BufferId) {
        debug!("Reopening output buffer {}", buffer);
        self.state.open_in_side_split(buffer);
    }

    fn clear_buffer(&mut self, buffer: BufferId) {
        self.state.clear_buffer(buffer);
    }

    fn write_buffer(&mut self, buffer: BufferId, content: &str) {
        self.state.write_buffer(buffer, content);
        let rule = "─".repeat(60);
        let newline = if content.ends_with('\n') { "" } else { "\n" };
        emit(
            &mut self.out,
            format_args!("📋 mbed output\n{rule}\n{content}{newline}{rule}\n"),
        );
    }

    fn cursor_to_top(&mut self, buffer: BufferId) {
        self.state.cursor_to_top(buffer);
    }

    fn delete_buffer(&mut self, buffer: BufferId) {
        self.state.delete_buffer(buffer);
        emit(&mut self.out, format_args!("🧹 Output closed\n"));
    }

    fn show_info(&mut self, title: &str, content: &str) {
        let mut text = format!("📖 {title}:\n");
        for line in content.lines().filter(|l| !l.trim().is_empty()) {
            text.push_str(&format!("   {line}\n"));
        }
        emit(&mut self.out, format_args!("{text}"));
    }

    fn echo(&mut self, message: &str) {
        emit(&mut self.out, format_args!("✅ {message}\n"));
    }

    fn echo_error(&mut self, message: &str) {
        emit(&mut self.err, format_args!("❌ {message}\n"));
    }

    fn prompt(&mut self, question: &str) -> Option<String> {
        self.print_prompt(question);
        self.read_line()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn editor(input: &str) -> TerminalEditor<Cursor<Vec<u8>>, Vec<u8>> {
        TerminalEditor::new(Cursor::new(input.as_bytes().to_vec()), Vec::new(), Vec::new())
    }

    /// Writer standing in for a closed pipe
    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }
    }

    #[test]
    fn test_prompt_reads_a_line() {
        let mut editor = editor("K64F\r\nrest\n");
        assert_eq!(editor.prompt("Target: ").as_deref(), Some("K64F"));

        let (out, _) = editor.into_writers();
        assert_eq!(String::from_utf8(out).unwrap(), "Target: ");
    }

    #[test]
    fn test_prompt_at_end_of_input_is_dismissed() {
        let mut editor = editor("");
        assert_eq!(editor.prompt("Library to add: "), None);
    }

    #[test]
    fn test_invalid_utf8_line_is_skipped_not_treated_as_end() {
        let mut input = vec![0xff, 0xfe, b'\n'];
        input.extend_from_slice(b"q\n");
        let mut editor = TerminalEditor::new(Cursor::new(input), Vec::new(), Vec::new());

        assert_eq!(editor.read_line().as_deref(), Some(""));
        assert_eq!(editor.read_line().as_deref(), Some("q"));
        assert_eq!(editor.read_line(), None);
    }

    #[test]
    fn test_buffer_content_is_printed() {
        let mut editor = editor("");
        let id = editor.create_scratch_buffer();
        editor.write_buffer(id, "[Error] main.cpp@3,1");

        let (out, err) = editor.into_writers();
        let out = String::from_utf8(out).unwrap();
        assert!(out.starts_with("📋 mbed output\n"));
        assert!(out.contains("[Error] main.cpp@3,1\n"));
        assert!(err.is_empty());
    }

    #[test]
    fn test_info_lists_non_blank_lines() {
        let mut editor = editor("");
        editor.show_info("Supported targets", "K64F\n\nNUCLEO_F401RE\n");

        let (out, _) = editor.into_writers();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "📖 Supported targets:\n   K64F\n   NUCLEO_F401RE\n"
        );
    }

    #[test]
    fn test_errors_go_to_error_stream() {
        let mut editor = editor("");
        editor.echo_error("`Z` is not a supported target");

        let (out, err) = editor.into_writers();
        assert!(out.is_empty());
        assert_eq!(
            String::from_utf8(err).unwrap(),
            "❌ `Z` is not a supported target\n"
        );
    }

    #[test]
    fn test_closed_output_does_not_stop_the_editor() {
        let mut editor = TerminalEditor::new(Cursor::new(b"K64F\n".to_vec()), BrokenPipe, BrokenPipe);
        let id = editor.create_scratch_buffer();

        editor.write_buffer(id, "Image: ./BUILD/app.bin");
        editor.echo("done");
        editor.echo_error("failed");

        assert_eq!(editor.state.buffer(id).unwrap().content, "Image: ./BUILD/app.bin");
        assert_eq!(editor.prompt("Target: ").as_deref(), Some("K64F"));
    }
}
