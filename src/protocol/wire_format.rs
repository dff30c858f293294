//! Wire format constants and request header encoding.
//!
//! Every request is an 8-byte header followed by the payload:
//! ```text
//! ┌──────────┬──────────┬───────────────┐
//! │ Size     │ Command  │ Payload       │
//! │ 4 bytes  │ 4 bytes  │ Size bytes    │
//! │ uint32 LE│ uint32 LE│               │
//! └──────────┴──────────┴───────────────┘
//! ```
//!
//! Responses carry no header; their length is fixed by the command.
//! All multi-byte integers are Little Endian.

use super::command::Command;

/// Request header size in bytes (fixed, exactly 8).
pub const HEADER_SIZE: usize = 8;

/// Reader name field width.
pub const READER_NAME_LEN: usize = 128;

/// ATR field width.
pub const MAX_ATR_SIZE: usize = 33;

/// Trailing padding at the end of each descriptor.
pub const DESCRIPTOR_PADDING: usize = 3;

/// Size of one reader-state descriptor on the wire.
pub const READER_STATE_DESCRIPTOR_LEN: usize = READER_NAME_LEN + MAX_ATR_SIZE + 5 * 4 + DESCRIPTOR_PADDING;

/// Number of descriptors in every reader-state response.
pub const MAX_READER_STATE_DESCRIPTORS: usize = 16;

/// Total size of a reader-state response.
pub const READER_STATE_RESPONSE_LEN: usize =
    READER_STATE_DESCRIPTOR_LEN * MAX_READER_STATE_DESCRIPTORS;

/// Byte offsets of each descriptor field.
pub mod offsets {
    use super::{MAX_ATR_SIZE, READER_NAME_LEN};

    pub const NAME: usize = 0;
    pub const EVENT_COUNTER: usize = NAME + READER_NAME_LEN;
    pub const READER_STATE: usize = EVENT_COUNTER + 4;
    pub const READER_SHARING: usize = READER_STATE + 4;
    pub const CARD_ATR: usize = READER_SHARING + 4;
    pub const CARD_ATR_LENGTH: usize = CARD_ATR + MAX_ATR_SIZE;
    pub const CARD_PROTOCOL: usize = CARD_ATR_LENGTH + 4;
    /// Trailing padding, zero on encode and ignored on decode.
    pub const PADDING: usize = CARD_PROTOCOL + 4;
}

/// Reader state bits (`SCARD_*` in the daemon's reader table).
pub mod reader_flags {
    pub const UNKNOWN: u32 = 0x0001;
    pub const ABSENT: u32 = 0x0002;
    pub const PRESENT: u32 = 0x0004;
    pub const SWALLOWED: u32 = 0x0008;
    pub const POWERED: u32 = 0x0010;
    pub const NEGOTIABLE: u32 = 0x0020;
    pub const SPECIFIC: u32 = 0x0040;

    /// Check if a specific flag is set.
    #[inline]
    pub fn has_flag(state: u32, flag: u32) -> bool {
        state & flag != 0
    }
}

/// Request header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    /// Payload length in bytes.
    pub payload_length: u32,
    /// Raw command opcode.
    pub command: u32,
}

impl Header {
    /// Create a header for the given command.
    pub fn new(command: Command, payload_length: u32) -> Self {
        Self {
            payload_length,
            command: command.opcode(),
        }
    }

    /// Encode header to bytes (Little Endian).
    ///
    /// # Example
    ///
    /// ```
    /// use pcscd_client::protocol::{Command, Header};
    ///
    /// let bytes = Header::new(Command::Version, 12).encode();
    /// assert_eq!(bytes, [12, 0, 0, 0, 17, 0, 0, 0]);
    /// ```
    pub fn encode(&self) -> [u8; HEADER_SIZE] {
        let mut buf = [0u8; HEADER_SIZE];
        self.encode_into(&mut buf);
        buf
    }

    /// Encode header into an existing buffer.
    ///
    /// # Panics
    ///
    /// Panics if buffer is smaller than `HEADER_SIZE` (8 bytes).
    pub fn encode_into(&self, buf: &mut [u8]) {
        buf[0..4].copy_from_slice(&self.payload_length.to_le_bytes());
        buf[4..8].copy_from_slice(&self.command.to_le_bytes());
    }
}
