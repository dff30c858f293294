//! Response buffer for accumulating partial reads.
//!
//! Uses `bytes::BytesMut` for buffer management. Responses from the daemon
//! have a length fixed by the command, so the buffer is created with the
//! expected size and filled until complete:
//! - `Filling`: fewer than `expected` bytes collected
//! - `Complete`: exactly `expected` bytes collected
//!
//! # Example
//!
//! ```
//! use pcscd_client::protocol::ResponseBuffer;
//!
//! let mut buffer = ResponseBuffer::new(8);
//! assert_eq!(buffer.push(&[1, 2, 3]), 3);
//! assert!(!buffer.is_complete());
//!
//! // Only the missing 5 bytes are taken.
//! assert_eq!(buffer.push(&[4, 5, 6, 7, 8, 9]), 5);
//! assert!(buffer.is_complete());
//! ```

use bytes::{Bytes, BytesMut};

/// Buffer collecting exactly `expected` bytes across any number of pushes.
#[derive(Debug)]
pub struct ResponseBuffer {
    /// Accumulated bytes from socket reads.
    buffer: BytesMut,
    /// Target length.
    expected: usize,
}

impl ResponseBuffer {
    /// Create a buffer expecting `expected` bytes.
    pub fn new(expected: usize) -> Self {
        Self {
            buffer: BytesMut::with_capacity(expected),
            expected,
        }
    }

    /// Append data, never beyond the expected length.
    ///
    /// Returns how many bytes of `data` were consumed.
    pub fn push(&mut self, data: &[u8]) -> usize {
        let take = data.len().min(self.remaining());
        self.buffer.extend_from_slice(&data[..take]);
        take
    }

    /// Bytes still missing.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.expected - self.buffer.len()
    }

    /// Target length.
    #[inline]
    pub fn expected(&self) -> usize {
        self.expected
    }

    /// Get the number of buffered bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Check if the buffer is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// True once exactly `expected` bytes are held.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.buffer.len() == self.expected
    }

    /// Freeze the collected bytes.
    pub fn freeze(self) -> Bytes {
        self.buffer.freeze()
    }
}
