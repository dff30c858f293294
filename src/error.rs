//! Error types for pcscd-client.

use thiserror::Error;

use crate::protocol::{Command, ProtocolVersion, StatusCode};

/// Main error type for all daemon operations.
#[derive(Debug, Error)]
pub enum PcscError {
    /// I/O error while connecting, writing or reading the socket.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The daemon closed the connection before a full response arrived.
    #[error("Short read: expected {expected} bytes, received {received}")]
    ShortRead { expected: usize, received: usize },

    /// Version handshake failed (non-success status or different version).
    #[error("Protocol mismatch: expected {expected}, daemon answered {found} with status {status}")]
    ProtocolMismatch {
        expected: ProtocolVersion,
        found: ProtocolVersion,
        status: StatusCode,
    },

    /// The daemon answered a command with a failure status.
    #[error("Daemon returned {status} for {command:?}")]
    Daemon { command: Command, status: StatusCode },

    /// Not enough bytes to decode a fixed-size record.
    #[error("Decode error: need {expected} bytes, got {actual}")]
    Decode { expected: usize, actual: usize },

    /// Operation called from a session state that does not allow it.
    #[error("Cannot {operation} while session is {state}")]
    InvalidState {
        operation: &'static str,
        state: &'static str,
    },
}

impl PcscError {
    /// True for failures of the underlying connection (including short reads).
    pub fn is_transport(&self) -> bool {
        matches!(self, PcscError::Io(_) | PcscError::ShortRead { .. })
    }

    /// Raw daemon status carried by this error, if any.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            PcscError::Daemon { status, .. } | PcscError::ProtocolMismatch { status, .. } => {
                Some(*status)
            }
            _ => None,
        }
    }
}

/// Result type alias using PcscError.
pub type Result<T> = std::result::Result<T, PcscError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_classification() {
        let io = PcscError::Io(std::io::Error::from(std::io::ErrorKind::BrokenPipe));
        assert!(io.is_transport());

        let short = PcscError::ShortRead {
            expected: 12,
            received: 4,
        };
        assert!(short.is_transport());

        let decode = PcscError::Decode {
            expected: 184,
            actual: 10,
        };
        assert!(!decode.is_transport());
    }

    #[test]
    fn test_daemon_status_is_preserved() {
        let err = PcscError::Daemon {
            command: Command::EstablishContext,
            status: StatusCode(0x8010_0002),
        };
        assert_eq!(err.status(), Some(StatusCode(0x8010_0002)));
        assert!(err.to_string().contains("0x80100002"));
        assert!(err.to_string().contains("EstablishContext"));
    }

    #[test]
    fn test_mismatch_message_names_both_versions() {
        let err = PcscError::ProtocolMismatch {
            expected: ProtocolVersion::CURRENT,
            found: ProtocolVersion::new(5, 0),
            status: StatusCode::SUCCESS,
        };
        let msg = err.to_string();
        assert!(msg.contains("4.3"));
        assert!(msg.contains("5.0"));
    }
}
