//! Byte-stream transport collaborator.
//!
//! The engine never opens connections itself: it is handed something that
//! implements [`Transport`] and treats it as an opaque bidirectional byte
//! stream. TLS negotiation, reconnection, and timeouts all live on the other
//! side of this seam.

#![allow(clippy::missing_errors_doc)]

use bytes::{Bytes, BytesMut};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::Result;

/// Capacity of a single receive buffer.
const RECV_BUFFER_SIZE: usize = 8192;

/// Bidirectional byte stream consumed by the engine.
///
/// `receive` returns `Ok(None)` once the peer closes the stream; chunk
/// boundaries carry no meaning and a single reply may span many chunks.
#[allow(async_fn_in_trait)]
pub trait Transport {
    /// Sends raw bytes to the peer.
    async fn send(&mut self, data: &[u8]) -> Result<()>;

    /// Receives the next chunk of bytes, or `None` at end-of-stream.
    async fn receive(&mut self) -> Result<Option<Bytes>>;
}

/// [`Transport`] adapter over any async byte stream.
///
/// Works over a plain TCP stream or an externally negotiated TLS stream; the
/// adapter itself performs no handshake.
pub struct StreamTransport<S> {
    stream: S,
}

impl<S> StreamTransport<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    /// Wraps an already-open stream.
    pub const fn new(stream: S) -> Self {
        Self { stream }
    }

    /// Consumes the adapter and returns the inner stream.
    pub fn into_inner(self) -> S {
        self.stream
    }
}

impl<S> Transport for StreamTransport<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    async fn send(&mut self, data: &[u8]) -> Result<()> {
        self.stream.write_all(data).await?;
        self.stream.flush().await?;
        Ok(())
    }

    async fn receive(&mut self) -> Result<Option<Bytes>> {
        let mut buf = BytesMut::with_capacity(RECV_BUFFER_SIZE);
        let n = self.stream.read_buf(&mut buf).await?;
        if n == 0 {
            return Ok(None);
        }
        Ok(Some(buf.freeze()))
    }
}
