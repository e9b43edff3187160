//! Buffered Terminal Output
//!
//! Owns the byte sink and the cursor/erase primitives built on the
//! capability cache. Nothing here flushes implicitly; the render loop
//! flushes at its defined points.

use std::fmt;
use std::io::{BufWriter, Write};

use crate::terminfo::{CapabilityCache, TermInfo, TermInfoError};

/// Buffered terminal console.
///
/// All writes land in an internal buffer until [`Console::flush`] is
/// called. Write errors never abort the dashboard; they degrade to a
/// missing escape sequence and a debug log line.
pub struct Console<T: TermInfo, W: Write> {
    caps: CapabilityCache<T>,
    writer: BufWriter<W>,
}

impl<T: TermInfo, W: Write> Console<T, W> {
    /// Create a console over a capability source and a byte sink.
    pub fn new(term_info: T, writer: W) -> Self {
        Self {
            caps: CapabilityCache::new(term_info),
            writer: BufWriter::new(writer),
        }
    }

    /// Buffered write, no trailing newline.
    pub fn print(&mut self, text: impl fmt::Display) {
        if let Err(err) = write!(self.writer, "{text}") {
            tracing::debug!(%err, "terminal write failed");
        }
    }

    /// Buffered write with a trailing newline.
    pub fn println(&mut self, text: impl fmt::Display) {
        if let Err(err) = writeln!(self.writer, "{text}") {
            tracing::debug!(%err, "terminal write failed");
        }
    }

    /// Resolve a capability and write its bytes, no trailing newline.
    pub fn tput(&mut self, capname: &str) {
        let sequence = self.caps.resolve(capname);
        if let Err(err) = self.writer.write_all(sequence.as_bytes()) {
            tracing::debug!(capname, %err, "terminal write failed");
        }
    }

    pub fn hide_cursor(&mut self) {
        self.tput("civis");
    }

    pub fn show_cursor(&mut self) {
        self.tput("cvvis");
    }

    pub fn enter_alternate_screen(&mut self) {
        self.tput("smcup");
    }

    pub fn exit_alternate_screen(&mut self) {
        self.tput("rmcup");
    }

    /// Move the cursor to row 0, column 0.
    pub fn cursor_home(&mut self) {
        self.tput("cup 0 0");
    }

    /// Move the cursor up `lines` lines, one `cuu1` at a time. Acceptable
    /// because `lines` is bounded by the dashboard height.
    pub fn move_cursor_up(&mut self, lines: usize) {
        for _ in 0..lines {
            self.tput("cuu1");
        }
    }

    /// Erase the line the cursor sits on and return to column 0.
    pub fn erase_current_line(&mut self) {
        self.print("\r");
        self.tput("el");
    }

    /// Erase the current line plus the `count` lines above it.
    ///
    /// `el` only clears the line under the cursor, so erasing and moving up
    /// have to interleave to blank a block without scrolling. The cursor
    /// ends on the top line of the block.
    pub fn erase_last_lines(&mut self, count: usize) {
        self.print("\r");
        for _ in 0..count {
            self.erase_current_line();
            self.move_cursor_up(1);
        }
        self.erase_current_line();
    }

    /// The resolved erase-line sequence, for composing multi-line writes.
    pub fn erase_line_seq(&mut self) -> String {
        self.caps.resolve("el").to_string()
    }

    /// Terminal geometry as `(lines, cols)`. Unused by the render loop
    /// until resize handling lands; callers should fall back to a default
    /// width on error.
    pub fn term_size(&self) -> Result<(i32, i32), TermInfoError> {
        self.caps.term_size()
    }

    /// Flush the buffer to the sink.
    pub fn flush(&mut self) {
        if let Err(err) = self.writer.flush() {
            tracing::debug!(%err, "terminal flush failed");
        }
    }

    /// Write a capability straight to the sink, bypassing the buffer.
    ///
    /// Teardown restores the terminal with this after its final flush, so
    /// the restore sequences always land even when buffered writes failed.
    pub fn write_through(&mut self, capname: &str) {
        let sequence = self.caps.resolve(capname).to_string();
        if let Err(err) = self.writer.get_mut().write_all(sequence.as_bytes()) {
            tracing::debug!(capname, %err, "terminal restore write failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::sync::{Arc, Mutex};

    use pretty_assertions::assert_eq;

    use super::*;

    struct MarkerTermInfo;

    impl TermInfo for MarkerTermInfo {
        fn query(&self, capname: &str) -> Result<String, TermInfoError> {
            Ok(format!("<{capname}>"))
        }

        fn query_int(&self, capname: &str) -> Result<i32, TermInfoError> {
            match capname {
                "lines" => Ok(40),
                "cols" => Ok(120),
                _ => Err(TermInfoError::Unsupported(capname.to_string())),
            }
        }
    }

    #[derive(Clone, Default)]
    struct SharedSink {
        bytes: Arc<Mutex<Vec<u8>>>,
    }

    impl SharedSink {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.bytes.lock().unwrap()).into_owned()
        }
    }

    impl io::Write for SharedSink {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.bytes.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn console_over(sink: &SharedSink) -> Console<MarkerTermInfo, SharedSink> {
        Console::new(MarkerTermInfo, sink.clone())
    }

    #[test]
    fn erase_last_lines_interleaves_erase_and_up() {
        let sink = SharedSink::default();
        let mut console = console_over(&sink);

        console.erase_last_lines(2);
        console.flush();

        assert_eq!(
            sink.contents(),
            "\r\r<el><cuu1>\r<el><cuu1>\r<el>"
        );
    }

    #[test]
    fn erase_last_lines_zero_blanks_only_current_line() {
        let sink = SharedSink::default();
        let mut console = console_over(&sink);

        console.erase_last_lines(0);
        console.flush();

        let output = sink.contents();
        assert_eq!(output, "\r\r<el>");
        assert!(!output.contains("<cuu1>"));
    }

    #[test]
    fn nothing_reaches_the_sink_before_flush() {
        let sink = SharedSink::default();
        let mut console = console_over(&sink);

        console.print("Discovering kinds...");
        assert_eq!(sink.contents(), "");

        console.flush();
        assert_eq!(sink.contents(), "Discovering kinds...");
    }

    #[test]
    fn write_through_bypasses_the_buffer() {
        let sink = SharedSink::default();
        let mut console = console_over(&sink);

        console.print("buffered");
        console.write_through("cvvis");

        // the restore sequence lands immediately, the buffered text does not
        assert_eq!(sink.contents(), "<cvvis>");
    }

    #[test]
    fn term_size_reads_geometry() {
        let sink = SharedSink::default();
        let console = console_over(&sink);

        assert_eq!(console.term_size().unwrap(), (40, 120));
    }
}
