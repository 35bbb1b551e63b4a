//! Response accumulation and structured extraction.
//!
//! A command cycle produces one [`ResponseBuffer`], grown chunk by chunk
//! until the tagged completion line appears. FETCH replies are then split
//! into per-message blocks and reduced to [`MessageRecord`]s.

mod accumulate;
mod extract;
mod segment;

pub(crate) use accumulate::DEFAULT_MAX_READS;
pub use accumulate::ResponseAccumulator;
pub use extract::{MessageDate, MessageRecord, extract};
pub use segment::{MessageBlock, segment};

/// Line terminator on the wire.
const CRLF: &str = "\r\n";

/// Ordered, append-only buffer of response lines for one in-flight command.
///
/// Lines are stored with the terminator stripped. Text arriving mid-line is
/// held back until its CRLF shows up, so chunk boundaries never split a line
/// in two.
#[derive(Debug)]
pub struct ResponseBuffer {
    /// `"<tag> OK"`, matched case-sensitively against line prefixes.
    completion_prefix: String,
    lines: Vec<String>,
    /// Trailing text not yet CRLF-terminated.
    partial: String,
}

impl ResponseBuffer {
    /// Creates an empty buffer for the given command tag.
    #[must_use]
    pub fn new(tag: &str) -> Self {
        Self {
            completion_prefix: format!("{tag} OK"),
            lines: Vec::new(),
            partial: String::new(),
        }
    }

    /// Appends decoded text, splitting it into lines on CRLF.
    pub fn push_text(&mut self, text: &str) {
        self.partial.push_str(text);
        while let Some(pos) = self.partial.find(CRLF) {
            let rest = self.partial.split_off(pos + CRLF.len());
            self.partial.truncate(pos);
            self.lines.push(std::mem::replace(&mut self.partial, rest));
        }
    }

    /// True once any line carries the `<tag> OK` completion prefix.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.lines
            .iter()
            .any(|line| line.starts_with(&self.completion_prefix))
    }

    /// Lines accumulated so far.
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Consumes the buffer, yielding all lines including any unterminated
    /// trailing text.
    #[must_use]
    pub fn into_lines(mut self) -> Vec<String> {
        if !self.partial.is_empty() {
            self.lines.push(self.partial);
        }
        self.lines
    }
}
