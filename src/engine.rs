//! The response engine: one tagged command per cycle.
//!
//! FETCH composes accumulate → segment → extract; SEARCH composes compile →
//! accumulate. The engine keeps no state across cycles beyond the tag
//! counter, so concurrency is a matter of opening independent engines over
//! independent transports.

use tracing::debug;

use crate::command::{FetchQuery, SearchCriteria, TagGenerator};
use crate::response::{MessageRecord, ResponseAccumulator, extract, segment};
use crate::transport::Transport;
use crate::Result;

/// Prefix of an untagged search-result line.
const SEARCH_RESULT_PREFIX: &str = "* SEARCH";

/// Client-side engine driving FETCH and SEARCH cycles over a [`Transport`].
#[derive(Debug)]
pub struct Engine<T> {
    transport: T,
    tags: TagGenerator,
    max_reads: usize,
}

impl<T: Transport> Engine<T> {
    /// Creates an engine over an already-open transport.
    #[must_use]
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            tags: TagGenerator::default(),
            max_reads: crate::response::DEFAULT_MAX_READS,
        }
    }

    /// Replaces the tag generator (for a caller-chosen tag prefix).
    #[must_use]
    pub fn with_tag_generator(mut self, tags: TagGenerator) -> Self {
        self.tags = tags;
        self
    }

    /// Overrides the per-command receive guard.
    #[must_use]
    pub const fn with_max_reads(mut self, max_reads: usize) -> Self {
        self.max_reads = max_reads;
        self
    }

    /// Fetches messages and extracts one record per returned block.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Transport`] on send/receive failure and
    /// [`crate::Error::IncompleteResponse`] when the reply never completes.
    /// Per-message extraction problems never fail the batch; they surface as
    /// sentinel field values on the affected record.
    pub async fn fetch(&mut self, query: &FetchQuery) -> Result<Vec<MessageRecord>> {
        let tag = self.tags.next();
        let line = format!("{}\r\n", query.command_line(&tag));

        debug!(%tag, "sending FETCH");
        self.transport.send(line.as_bytes()).await?;

        let buffer = ResponseAccumulator::new(tag.as_str())
            .with_max_reads(self.max_reads)
            .read_until_complete(&mut self.transport)
            .await?;

        let lines = buffer.into_lines();
        let records: Vec<MessageRecord> = segment(&lines)
            .iter()
            .map(|block| extract(block, &tag))
            .collect();

        debug!(%tag, messages = records.len(), "FETCH cycle finished");
        Ok(records)
    }

    /// Compiles the criteria, runs SEARCH, and collects the matching
    /// identifiers from untagged `* SEARCH` lines.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::EmptyCriteria`] before any I/O when the
    /// criteria set is empty, plus the transport/completion errors of a
    /// normal cycle.
    pub async fn search(&mut self, criteria: &SearchCriteria) -> Result<Vec<u32>> {
        let compiled = criteria.compile()?;
        let tag = self.tags.next();
        let line = format!("{tag} {}\r\n", compiled.command_line());

        debug!(%tag, command = %compiled, "sending SEARCH");
        self.transport.send(line.as_bytes()).await?;

        let buffer = ResponseAccumulator::new(tag.as_str())
            .with_max_reads(self.max_reads)
            .read_until_complete(&mut self.transport)
            .await?;

        let ids: Vec<u32> = buffer
            .lines()
            .iter()
            .filter_map(|l| l.strip_prefix(SEARCH_RESULT_PREFIX))
            .flat_map(|rest| rest.split_whitespace().filter_map(|t| t.parse().ok()))
            .collect();

        debug!(%tag, matches = ids.len(), "SEARCH cycle finished");
        Ok(ids)
    }

    /// Consumes the engine and returns the transport.
    pub fn into_transport(self) -> T {
        self.transport
    }
}
