//! Reader-state descriptor codec.
//!
//! Each descriptor is a fixed 184-byte record read at constant offsets
//! (see [`crate::protocol::offsets`]):
//! ```text
//! ┌──────────┬─────────┬─────────┬─────────┬──────────┬─────────┬──────────┬─────┐
//! │ Name     │ Events  │ State   │ Sharing │ ATR      │ ATR len │ Protocol │ pad │
//! │ 128 bytes│ u32 LE  │ u32 LE  │ u32 LE  │ 33 bytes │ u32 LE  │ u32 LE   │ 3   │
//! └──────────┴─────────┴─────────┴─────────┴──────────┴─────────┴──────────┴─────┘
//! ```
//!
//! Decoding never interprets field contents: a nonsense ATR length or an
//! unterminated name is passed through as-is.

use std::borrow::Cow;

use serde::ser::{Serialize, SerializeStruct, Serializer};

use super::le::{read_u32_at, write_u32_at};
use crate::error::{PcscError, Result};
use crate::protocol::{
    offsets, reader_flags, MAX_ATR_SIZE, MAX_READER_STATE_DESCRIPTORS, READER_NAME_LEN,
    READER_STATE_DESCRIPTOR_LEN,
};

/// Sharing mode of a reader (`PCSCLITE_SHARING_*`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sharing {
    /// No context holds the reader.
    NoContext,
    /// Held in shared mode by this many contexts.
    Shared(u32),
    /// Held exclusively by one context.
    Exclusive,
}

impl From<u32> for Sharing {
    fn from(raw: u32) -> Self {
        match raw as i32 {
            -1 => Sharing::Exclusive,
            0 => Sharing::NoContext,
            _ => Sharing::Shared(raw),
        }
    }
}

/// Active transmission protocol of the card (`SCARD_PROTOCOL_*`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardProtocol {
    Undefined,
    T0,
    T1,
    Raw,
    T15,
    Other(u32),
}

impl From<u32> for CardProtocol {
    fn from(raw: u32) -> Self {
        match raw {
            0 => CardProtocol::Undefined,
            1 => CardProtocol::T0,
            2 => CardProtocol::T1,
            4 => CardProtocol::Raw,
            8 => CardProtocol::T15,
            other => CardProtocol::Other(other),
        }
    }
}

/// One reader slot as published by the daemon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReaderState {
    /// Reader name, NUL padded.
    pub name: [u8; READER_NAME_LEN],
    /// Incremented by the daemon on every card event.
    pub event_counter: u32,
    /// `SCARD_*` state bits (see [`reader_flags`]).
    pub reader_state: u32,
    /// Raw sharing status.
    pub reader_sharing: u32,
    /// Answer-To-Reset buffer; only `card_atr_length` bytes are significant.
    pub card_atr: [u8; MAX_ATR_SIZE],
    pub card_atr_length: u32,
    /// Raw `SCARD_PROTOCOL_*` value.
    pub card_protocol: u32,
}

impl ReaderState {
    /// An all-zero slot, as the daemon sends for unused entries.
    pub const fn empty() -> Self {
        Self {
            name: [0u8; READER_NAME_LEN],
            event_counter: 0,
            reader_state: 0,
            reader_sharing: 0,
            card_atr: [0u8; MAX_ATR_SIZE],
            card_atr_length: 0,
            card_protocol: 0,
        }
    }

    /// An otherwise empty slot carrying `name`.
    ///
    /// The name is truncated so at least one terminating NUL remains.
    pub fn with_name(name: &str) -> Self {
        let mut state = Self::empty();
        let len = name.len().min(READER_NAME_LEN - 1);
        state.name[..len].copy_from_slice(&name.as_bytes()[..len]);
        state
    }

    /// Decode a descriptor from the first 184 bytes of `buf`.
    ///
    /// # Errors
    ///
    /// Returns `Decode` if `buf` is shorter than one descriptor.
    pub fn decode(buf: &[u8]) -> Result<Self> {
        if buf.len() < READER_STATE_DESCRIPTOR_LEN {
            return Err(PcscError::Decode {
                expected: READER_STATE_DESCRIPTOR_LEN,
                actual: buf.len(),
            });
        }

        let mut name = [0u8; READER_NAME_LEN];
        name.copy_from_slice(&buf[offsets::NAME..offsets::NAME + READER_NAME_LEN]);

        let mut card_atr = [0u8; MAX_ATR_SIZE];
        card_atr.copy_from_slice(&buf[offsets::CARD_ATR..offsets::CARD_ATR + MAX_ATR_SIZE]);

        Ok(Self {
            name,
            event_counter: read_u32_at(buf, offsets::EVENT_COUNTER),
            reader_state: read_u32_at(buf, offsets::READER_STATE),
            reader_sharing: read_u32_at(buf, offsets::READER_SHARING),
            card_atr,
            card_atr_length: read_u32_at(buf, offsets::CARD_ATR_LENGTH),
            card_protocol: read_u32_at(buf, offsets::CARD_PROTOCOL),
        })
    }

    /// Encode into the fixed wire layout. Padding bytes are zero.
    pub fn encode(&self) -> [u8; READER_STATE_DESCRIPTOR_LEN] {
        let mut buf = [0u8; READER_STATE_DESCRIPTOR_LEN];
        buf[offsets::NAME..offsets::NAME + READER_NAME_LEN].copy_from_slice(&self.name);
        write_u32_at(&mut buf, offsets::EVENT_COUNTER, self.event_counter);
        write_u32_at(&mut buf, offsets::READER_STATE, self.reader_state);
        write_u32_at(&mut buf, offsets::READER_SHARING, self.reader_sharing);
        buf[offsets::CARD_ATR..offsets::CARD_ATR + MAX_ATR_SIZE].copy_from_slice(&self.card_atr);
        write_u32_at(&mut buf, offsets::CARD_ATR_LENGTH, self.card_atr_length);
        write_u32_at(&mut buf, offsets::CARD_PROTOCOL, self.card_protocol);
        buf
    }

    /// Reader name up to the first NUL (lossy UTF-8).
    pub fn name(&self) -> Cow<'_, str> {
        let end = self
            .name
            .iter()
            .position(|&b| b == 0)
            .unwrap_or(READER_NAME_LEN);
        String::from_utf8_lossy(&self.name[..end])
    }

    /// True for unused slots (empty name).
    #[inline]
    pub fn is_empty_slot(&self) -> bool {
        self.name[0] == 0
    }

    /// Significant ATR bytes, clamped to the buffer size.
    pub fn atr(&self) -> &[u8] {
        let len = (self.card_atr_length as usize).min(MAX_ATR_SIZE);
        &self.card_atr[..len]
    }

    #[inline]
    pub fn is_present(&self) -> bool {
        reader_flags::has_flag(self.reader_state, reader_flags::PRESENT)
    }

    #[inline]
    pub fn is_absent(&self) -> bool {
        reader_flags::has_flag(self.reader_state, reader_flags::ABSENT)
    }

    #[inline]
    pub fn sharing(&self) -> Sharing {
        Sharing::from(self.reader_sharing)
    }

    #[inline]
    pub fn protocol(&self) -> CardProtocol {
        CardProtocol::from(self.card_protocol)
    }
}

impl Default for ReaderState {
    fn default() -> Self {
        Self::empty()
    }
}

impl Serialize for ReaderState {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("ReaderState", 6)?;
        s.serialize_field("name", &self.name())?;
        s.serialize_field("event_counter", &self.event_counter)?;
        s.serialize_field("reader_state", &self.reader_state)?;
        s.serialize_field("reader_sharing", &self.reader_sharing)?;
        s.serialize_field("atr", self.atr())?;
        s.serialize_field("card_protocol", &self.card_protocol)?;
        s.end()
    }
}

/// Split a reader-state response into its 16 descriptors.
///
/// # Errors
///
/// Returns `Decode` if `buf` cannot hold every descriptor.
pub fn decode_reader_states(buf: &[u8]) -> Result<Vec<ReaderState>> {
    (0..MAX_READER_STATE_DESCRIPTORS)
        .map(|i| ReaderState::decode(buf.get(i * READER_STATE_DESCRIPTOR_LEN..).unwrap_or(&[])))
        .collect()
}
