//! Protocol module - command table, wire format and framing primitives.
//!
//! This module implements the constant side of the daemon protocol:
//! - Command opcodes, status codes, protocol version and scopes
//! - 8-byte request header and reader-state layout constants
//! - Request frame assembly and the response accumulation buffer

mod command;
mod frame;
mod frame_buffer;
mod wire_format;

pub use command::{Command, ProtocolVersion, Scope, StatusCode, SCARD_S_SUCCESS};
pub use frame::{build_frame, build_request};
pub use frame_buffer::ResponseBuffer;
pub use wire_format::{
    offsets, reader_flags, Header, DESCRIPTOR_PADDING, HEADER_SIZE, MAX_ATR_SIZE,
    MAX_READER_STATE_DESCRIPTORS, READER_NAME_LEN, READER_STATE_DESCRIPTOR_LEN,
    READER_STATE_RESPONSE_LEN,
};
