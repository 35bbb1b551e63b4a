//! Command-line construction.
//!
//! Only the two commands with non-trivial replies live here: FETCH (via
//! [`FetchQuery`]) and SEARCH (via [`SearchCriteria`]). One-shot commands
//! like LOGIN or SELECT are the caller's business.

mod search;
mod tag;

pub use search::{CompiledSearchCommand, CriterionValue, SearchCriteria};
pub use tag::TagGenerator;

/// Header fields requested from the server for every fetched message.
const HEADER_FIELDS: &str = "SUBJECT FROM TO MESSAGE-ID CONTENT-TYPE DATE";

/// Parameters of a FETCH command.
///
/// Fetches the body text plus a fixed set of header fields for an inclusive
/// range of message sequence numbers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchQuery {
    start: u32,
    end: u32,
    peek: bool,
    byte_limit: Option<u32>,
}

impl FetchQuery {
    /// Fetches messages `start` through `end` (inclusive).
    #[must_use]
    pub const fn range(start: u32, end: u32) -> Self {
        Self {
            start,
            end,
            peek: true,
            byte_limit: None,
        }
    }

    /// Whether to use `BODY.PEEK` so fetching does not set `\Seen`.
    /// Defaults to true.
    #[must_use]
    pub const fn peek(mut self, peek: bool) -> Self {
        self.peek = peek;
        self
    }

    /// Caps the number of header bytes returned per message.
    #[must_use]
    pub const fn byte_limit(mut self, limit: u32) -> Self {
        self.byte_limit = Some(limit);
        self
    }

    /// Renders the tagged command line, without the trailing CRLF.
    #[must_use]
    pub fn command_line(&self, tag: &str) -> String {
        let peek = if self.peek { ".PEEK" } else { "" };
        let limit = self
            .byte_limit
            .map(|n| format!("<{n}>"))
            .unwrap_or_default();
        format!(
            "{tag} FETCH {}:{} (BODY{peek}[TEXT] BODY{peek}[HEADER.FIELDS ({HEADER_FIELDS})]{limit})",
            self.start, self.end
        )
    }
}
