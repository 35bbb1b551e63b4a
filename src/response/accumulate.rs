//! Completion-detection read loop.

use tracing::{debug, trace};

use super::ResponseBuffer;
use crate::transport::Transport;
use crate::{Error, Result};

/// Upper bound on receive calls for a single command cycle.
pub(crate) const DEFAULT_MAX_READS: usize = 4096;

/// Reads chunks from a transport until the tagged completion line appears.
///
/// A reply may span any number of chunks and the completion line may arrive
/// in the same chunk as preceding data or alone in a later one; the predicate
/// is re-checked after every fragment. A stream that ends (or keeps talking
/// past the read guard) without ever completing surfaces
/// [`Error::IncompleteResponse`] instead of looping forever.
#[derive(Debug)]
pub struct ResponseAccumulator {
    tag: String,
    max_reads: usize,
}

impl ResponseAccumulator {
    /// Creates an accumulator for the given command tag.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            max_reads: DEFAULT_MAX_READS,
        }
    }

    /// Overrides the receive-call guard.
    #[must_use]
    pub const fn with_max_reads(mut self, max_reads: usize) -> Self {
        self.max_reads = max_reads;
        self
    }

    /// Accumulates the full reply for this command.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Transport`] on a failed read (never retried) and
    /// [`Error::IncompleteResponse`] on end-of-stream or guard exhaustion
    /// before the completion line.
    pub async fn read_until_complete<T: Transport>(
        &self,
        transport: &mut T,
    ) -> Result<ResponseBuffer> {
        let mut buffer = ResponseBuffer::new(&self.tag);

        for read in 0..self.max_reads {
            let Some(chunk) = transport.receive().await? else {
                return Err(self.incomplete(&buffer));
            };

            buffer.push_text(&String::from_utf8_lossy(&chunk));
            trace!(
                tag = %self.tag,
                read,
                bytes = chunk.len(),
                lines = buffer.lines().len(),
                "received fragment"
            );

            if buffer.is_complete() {
                debug!(
                    tag = %self.tag,
                    reads = read + 1,
                    lines = buffer.lines().len(),
                    "command completed"
                );
                return Ok(buffer);
            }
        }

        Err(self.incomplete(&buffer))
    }

    fn incomplete(&self, buffer: &ResponseBuffer) -> Error {
        Error::IncompleteResponse {
            tag: self.tag.clone(),
            lines_seen: buffer.lines().len(),
        }
    }
}
