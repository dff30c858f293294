//! Fixed-size exchange payloads.
//!
//! Requests and responses of one exchange share the same layout, so each
//! message type serves both directions:
//!
//! | Message | Layout |
//! |---|---|
//! | [`VersionMessage`] | major + minor + status |
//! | [`EstablishMessage`] | scope + context + status |
//! | [`ReleaseMessage`] | context + status |

use super::le::{read_u32_at, write_u32_at, U32_SIZE};
use crate::error::{PcscError, Result};
use crate::protocol::{Command, ProtocolVersion, Scope, StatusCode};

/// A message with a fixed wire size.
pub trait FixedMessage: Sized {
    /// Command this message is sent with.
    const COMMAND: Command;
    /// Exact size on the wire.
    const SIZE: usize;

    /// Encode to exactly `SIZE` bytes.
    fn encode(&self) -> Vec<u8>;

    /// Decode from the first `SIZE` bytes of `buf`.
    fn decode(buf: &[u8]) -> Result<Self>;

    /// Status word carried by the message.
    fn status(&self) -> StatusCode;
}

fn check_len<M: FixedMessage>(buf: &[u8]) -> Result<()> {
    if buf.len() < M::SIZE {
        return Err(PcscError::Decode {
            expected: M::SIZE,
            actual: buf.len(),
        });
    }
    Ok(())
}

/// Version handshake.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VersionMessage {
    pub version: ProtocolVersion,
    pub status: StatusCode,
}

impl VersionMessage {
    /// The request this client sends: its own version with a success placeholder.
    pub fn request() -> Self {
        Self {
            version: ProtocolVersion::CURRENT,
            status: StatusCode::SUCCESS,
        }
    }
}

impl FixedMessage for VersionMessage {
    const COMMAND: Command = Command::Version;
    const SIZE: usize = 3 * U32_SIZE;

    fn encode(&self) -> Vec<u8> {
        let mut buf = vec![0u8; Self::SIZE];
        write_u32_at(&mut buf, 0, self.version.major);
        write_u32_at(&mut buf, 4, self.version.minor);
        write_u32_at(&mut buf, 8, self.status.0);
        buf
    }

    fn decode(buf: &[u8]) -> Result<Self> {
        check_len::<Self>(buf)?;
        Ok(Self {
            version: ProtocolVersion::new(read_u32_at(buf, 0), read_u32_at(buf, 4)),
            status: StatusCode(read_u32_at(buf, 8)),
        })
    }

    fn status(&self) -> StatusCode {
        self.status
    }
}

/// Context establishment.
///
/// In a request `scope` is the requested scope and `context` is zero; the
/// daemon answers with the assigned context handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EstablishMessage {
    pub scope: u32,
    pub context: u32,
    pub status: StatusCode,
}

impl EstablishMessage {
    pub fn request(scope: Scope) -> Self {
        Self {
            scope: scope.into(),
            context: 0,
            status: StatusCode::SUCCESS,
        }
    }
}

impl FixedMessage for EstablishMessage {
    const COMMAND: Command = Command::EstablishContext;
    const SIZE: usize = 3 * U32_SIZE;

    fn encode(&self) -> Vec<u8> {
        let mut buf = vec![0u8; Self::SIZE];
        write_u32_at(&mut buf, 0, self.scope);
        write_u32_at(&mut buf, 4, self.context);
        write_u32_at(&mut buf, 8, self.status.0);
        buf
    }

    fn decode(buf: &[u8]) -> Result<Self> {
        check_len::<Self>(buf)?;
        Ok(Self {
            scope: read_u32_at(buf, 0),
            context: read_u32_at(buf, 4),
            status: StatusCode(read_u32_at(buf, 8)),
        })
    }

    fn status(&self) -> StatusCode {
        self.status
    }
}

/// Context release.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReleaseMessage {
    pub context: u32,
    pub status: StatusCode,
}

impl ReleaseMessage {
    pub fn request(context: u32) -> Self {
        Self {
            context,
            status: StatusCode::SUCCESS,
        }
    }
}

impl FixedMessage for ReleaseMessage {
    const COMMAND: Command = Command::ReleaseContext;
    const SIZE: usize = 2 * U32_SIZE;

    fn encode(&self) -> Vec<u8> {
        let mut buf = vec![0u8; Self::SIZE];
        write_u32_at(&mut buf, 0, self.context);
        write_u32_at(&mut buf, 4, self.status.0);
        buf
    }

    fn decode(buf: &[u8]) -> Result<Self> {
        check_len::<Self>(buf)?;
        Ok(Self {
            context: read_u32_at(buf, 0),
            status: StatusCode(read_u32_at(buf, 4)),
        })
    }

    fn status(&self) -> StatusCode {
        self.status
    }
}
