//! Codec module - binary encoding of wire integers and records.
//!
//! - [`encode_u32`] / [`decode_u32`] - little-endian 32-bit integers
//! - [`ReaderState`] - the fixed 184-byte reader-state descriptor
//! - [`FixedMessage`] implementations for the fixed-size exchanges
//!
//! # Design
//!
//! Field positions come from the offset table in
//! [`crate::protocol::offsets`] rather than any in-memory struct layout.
//!
//! # Example
//!
//! ```
//! use pcscd_client::codec::ReaderState;
//!
//! let state = ReaderState::with_name("ACS ACR122U 00 00");
//! let decoded = ReaderState::decode(&state.encode()).unwrap();
//! assert_eq!(decoded.name(), "ACS ACR122U 00 00");
//! ```

mod le;
mod messages;
mod reader_state;

pub use le::{decode_u32, encode_u32, U32_SIZE};
pub use messages::{EstablishMessage, FixedMessage, ReleaseMessage, VersionMessage};
pub use reader_state::{decode_reader_states, CardProtocol, ReaderState, Sharing};
