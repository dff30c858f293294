//! Request frame assembly.
//!
//! A request is the 8-byte header followed by its payload, built into one
//! contiguous buffer so it goes out in a single write.
//!
//! # Example
//!
//! ```
//! use pcscd_client::protocol::{build_request, Command, HEADER_SIZE};
//!
//! let bytes = build_request(Command::ReleaseContext, &[0u8; 8]);
//! assert_eq!(bytes.len(), HEADER_SIZE + 8);
//! ```

use super::command::Command;
use super::wire_format::{Header, HEADER_SIZE};

/// Build a complete frame as a single byte vector.
///
/// Encodes header and appends payload into a contiguous buffer.
pub fn build_frame(header: &Header, payload: &[u8]) -> Vec<u8> {
    let mut buf = Vec::with_capacity(HEADER_SIZE + payload.len());
    buf.extend_from_slice(&header.encode());
    buf.extend_from_slice(payload);
    buf
}

/// Build the frame for `command`, sizing the header from the payload.
pub fn build_request(command: Command, payload: &[u8]) -> Vec<u8> {
    build_frame(&Header::new(command, payload.len() as u32), payload)
}
