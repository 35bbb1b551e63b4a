//! Field extraction from a single message block.
//!
//! This is deliberately line-prefix matching, not a header tokenizer: the
//! narrow FETCH queries this engine issues produce one header per line, and
//! anything it cannot make sense of degrades to an explicit absent/invalid
//! sentinel instead of failing the batch.

use chrono::{DateTime, FixedOffset};

use super::segment::MessageBlock;
use crate::mime::decode_encoded_words;

/// Marker line introducing the body text in a FETCH reply.
const BODY_MARKER: &str = "BODY[TEXT]";

/// Header names extracted from a block, in lookup order.
const HEADER_FROM: &str = "from";
const HEADER_TO: &str = "to";
const HEADER_SUBJECT: &str = "subject";
const HEADER_MESSAGE_ID: &str = "message-id";
const HEADER_CONTENT_TYPE: &str = "content-type";
const HEADER_DATE: &str = "date";

/// Parsed state of a message's `Date:` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageDate {
    /// Header present and parsed as an RFC 2822 timestamp.
    Parsed(DateTime<FixedOffset>),
    /// Header present but unparsable; carries the source text.
    Invalid(String),
    /// No `Date:` line in the block.
    Absent,
}

impl MessageDate {
    /// Returns the parsed timestamp, if there is one.
    #[must_use]
    pub const fn as_parsed(&self) -> Option<&DateTime<FixedOffset>> {
        match self {
            Self::Parsed(dt) => Some(dt),
            Self::Invalid(_) | Self::Absent => None,
        }
    }
}

/// Structured result of extracting one message block.
///
/// Missing headers are `None`, an unparsable date is
/// [`MessageDate::Invalid`], and a missing body marker yields an empty body;
/// none of these abort extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageRecord {
    /// Decoded `From:` header.
    pub from: Option<String>,
    /// Decoded `To:` header.
    pub to: Option<String>,
    /// Decoded `Subject:` header.
    pub subject: Option<String>,
    /// `Message-ID:` header.
    pub message_id: Option<String>,
    /// `Content-Type:` header.
    pub content_type: Option<String>,
    /// Parsed `Date:` header.
    pub date: MessageDate,
    /// Body text: everything after the `BODY[TEXT]` marker line, framing
    /// noise trimmed, joined with `\n`. Empty when the marker is absent.
    pub body: String,
    /// The untrimmed source block joined with `\n`, for diagnostics only.
    pub raw: String,
}

/// Extracts a structured record from one message block.
///
/// `tag` is the tag of the FETCH command that produced the block; trailing
/// lines starting with it are framing noise, not message content.
#[must_use]
pub fn extract(block: &MessageBlock, tag: &str) -> MessageRecord {
    let lines = block.lines();

    let date = header_value(lines, HEADER_DATE).map_or(MessageDate::Absent, |value| {
        DateTime::parse_from_rfc2822(value)
            .map_or_else(|_| MessageDate::Invalid(value.to_string()), MessageDate::Parsed)
    });

    MessageRecord {
        from: decoded_header(lines, HEADER_FROM),
        to: decoded_header(lines, HEADER_TO),
        subject: decoded_header(lines, HEADER_SUBJECT),
        message_id: decoded_header(lines, HEADER_MESSAGE_ID),
        content_type: decoded_header(lines, HEADER_CONTENT_TYPE),
        date,
        body: extract_body(lines, tag),
        raw: block.joined(),
    }
}

/// First line matching `<name>:` case-insensitively, value trimmed.
fn header_value<'a>(lines: &'a [String], name: &str) -> Option<&'a str> {
    lines.iter().find_map(|line| {
        let bytes = line.as_bytes();
        let split = name.len();
        if bytes.len() > split
            && bytes[split] == b':'
            && bytes[..split].eq_ignore_ascii_case(name.as_bytes())
        {
            Some(line[split + 1..].trim())
        } else {
            None
        }
    })
}

fn decoded_header(lines: &[String], name: &str) -> Option<String> {
    header_value(lines, name).map(decode_encoded_words)
}

/// Lines strictly after the `BODY[TEXT]` marker, with trailing framing noise
/// (blank lines, the command tag's completion line, lone `)`) dropped first.
fn extract_body(lines: &[String], tag: &str) -> String {
    let mut end = lines.len();
    while end > 0 {
        let line = &lines[end - 1];
        if line.is_empty() || line.starts_with(tag) || line == ")" {
            end -= 1;
        } else {
            break;
        }
    }
    let trimmed = &lines[..end];

    trimmed
        .iter()
        .position(|line| line.trim_start().starts_with(BODY_MARKER))
        .map_or_else(String::new, |start| trimmed[start + 1..].join("\n"))
}
