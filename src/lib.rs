//! # petrel-imap
//!
//! A minimal client-side engine for line-oriented, tag-correlated IMAP
//! request/response exchanges. It sends one command at a time, accumulates
//! raw server output until the `<tag> OK` completion line appears, and
//! extracts structured results from the accumulated text:
//!
//! - **FETCH**: per-message blocks split at untagged `*` markers, reduced to
//!   [`MessageRecord`]s with decoded headers and body text
//! - **SEARCH**: criteria compiled to protocol tokens, matching identifiers
//!   collected from `* SEARCH` lines
//!
//! Connection establishment is not this crate's job: the engine consumes any
//! [`Transport`], and [`StreamTransport`] adapts an already-open TCP or TLS
//! byte stream.
//!
//! This is a pragmatic line-oriented extractor for a narrow command subset,
//! not a grammar-complete IMAP parser — literal strings, nested
//! parenthesized lists, and folded header lines are out of scope.
//!
//! ## Quick start
//!
//! ```ignore
//! use petrel_imap::{CriterionValue, Engine, FetchQuery, SearchCriteria, StreamTransport};
//!
//! # async fn run(stream: tokio::net::TcpStream) -> petrel_imap::Result<()> {
//! // `stream` is already connected and logged in, with a mailbox selected.
//! let mut engine = Engine::new(StreamTransport::new(stream));
//!
//! let unseen = engine
//!     .search(&SearchCriteria::new().with("seen", CriterionValue::Flag(false)))
//!     .await?;
//!
//! let messages = engine.fetch(&FetchQuery::range(1, 10)).await?;
//! for message in &messages {
//!     println!("{:?}: {}", message.subject, message.body.len());
//! }
//! # Ok(())
//! # }
//! ```

pub mod command;
mod engine;
mod error;
pub mod mime;
pub mod response;
pub mod transport;

pub use command::{
    CompiledSearchCommand, CriterionValue, FetchQuery, SearchCriteria, TagGenerator,
};
pub use engine::Engine;
pub use error::{Error, Result};
pub use mime::decode_encoded_words;
pub use response::{
    MessageBlock, MessageDate, MessageRecord, ResponseAccumulator, ResponseBuffer, extract,
    segment,
};
pub use transport::{StreamTransport, Transport};
