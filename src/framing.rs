//! Request sending and exact-length response reading.
//!
//! The daemon protocol is strictly one request, one response:
//!
//! ```text
//! send_message ──► [size | command | payload] ──► pcscd
//! receive_exact ◄── N bytes, possibly in fragments ◄── pcscd
//! ```
//!
//! Neither function retries or times out. Any transport failure is returned
//! to the caller and leaves the connection at an unknown protocol position.

use bytes::Bytes;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tracing::trace;

use crate::error::{PcscError, Result};
use crate::protocol::{build_request, Command, ResponseBuffer};

/// Size of the scratch buffer used for each socket read.
const READ_CHUNK_SIZE: usize = 4096;

/// Write the header for `command` followed by `payload` as one logical send.
///
/// # Errors
///
/// Returns `Io` if the write fails or the peer stops accepting bytes.
pub async fn send_message<W>(writer: &mut W, command: Command, payload: &[u8]) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    let frame = build_request(command, payload);
    writer.write_all(&frame).await?;
    writer.flush().await?;

    trace!(?command, payload_len = payload.len(), "request sent");
    Ok(())
}

/// Read exactly `len` bytes, absorbing partial reads.
///
/// # Errors
///
/// - `Io` if a read fails
/// - `ShortRead` if the peer closes before `len` bytes arrived
pub async fn receive_exact<R>(reader: &mut R, len: usize) -> Result<Bytes>
where
    R: AsyncRead + Unpin,
{
    let mut response = ResponseBuffer::new(len);
    let mut chunk = [0u8; READ_CHUNK_SIZE];

    while !response.is_complete() {
        let want = response.remaining().min(READ_CHUNK_SIZE);
        let n = reader.read(&mut chunk[..want]).await?;
        if n == 0 {
            return Err(PcscError::ShortRead {
                expected: len,
                received: response.len(),
            });
        }
        response.push(&chunk[..n]);
        trace!(received = response.len(), expected = len, "response progress");
    }

    Ok(response.freeze())
}
