//! Client builder and daemon session.
//!
//! The [`ClientBuilder`] configures where the daemon is reached. The
//! [`PcscClient`] owns one connection and walks a fixed lifecycle:
//! 1. `Unestablished` - no connection yet
//! 2. `Established` - version negotiated, context assigned
//! 3. `Released` - context returned to the daemon
//!
//! There is no way back to `Unestablished`; a new session needs a new client.
//!
//! # Example
//!
//! ```ignore
//! use pcscd_client::{PcscClient, Scope};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut client = PcscClient::builder()
//!         .socket_path("/run/pcscd/pcscd.comm")
//!         .build();
//!
//!     client.establish_context(Scope::User).await?;
//!     for name in client.list_readers().await?.iter().filter(|r| !r.is_empty_slot()) {
//!         println!("{}", name.name());
//!     }
//!     client.release_context().await?;
//!     client.close().await?;
//!     Ok(())
//! }
//! ```

use std::fmt;
use std::path::Path;

use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::codec::{
    decode_reader_states, EstablishMessage, FixedMessage, ReaderState, ReleaseMessage,
    VersionMessage,
};
use crate::error::{PcscError, Result};
use crate::framing::{receive_exact, send_message};
use crate::protocol::{Command, ProtocolVersion, Scope, READER_STATE_RESPONSE_LEN};
use crate::transport::{Connect, UnixSocketConnector};

/// Lifecycle position of a [`PcscClient`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Unestablished,
    Established,
    Released,
}

impl SessionState {
    pub fn as_str(self) -> &'static str {
        match self {
            SessionState::Unestablished => "unestablished",
            SessionState::Established => "established",
            SessionState::Released => "released",
        }
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Builder for configuring and creating a [`PcscClient`].
///
/// Defaults to the socket named by `PCSCLITE_CSOCK_NAME`, falling back to
/// `/run/pcscd/pcscd.comm`.
pub struct ClientBuilder<C = UnixSocketConnector> {
    connector: C,
}

impl ClientBuilder<UnixSocketConnector> {
    /// Create a new client builder.
    pub fn new() -> Self {
        Self {
            connector: UnixSocketConnector::from_env(),
        }
    }

    /// Connect to the daemon socket at `path`.
    pub fn socket_path(mut self, path: impl AsRef<Path>) -> Self {
        self.connector = UnixSocketConnector::new(path);
        self
    }
}

impl Default for ClientBuilder<UnixSocketConnector> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Connect> ClientBuilder<C> {
    /// Open the session through a custom transport.
    pub fn connector<D: Connect>(self, connector: D) -> ClientBuilder<D> {
        ClientBuilder { connector }
    }

    /// Build an unestablished client. No I/O happens until
    /// [`PcscClient::establish_context`].
    pub fn build(self) -> PcscClient<C> {
        PcscClient {
            connector: self.connector,
            conn: None,
            state: SessionState::Unestablished,
            version: None,
            context: None,
            reader_states: Vec::new(),
        }
    }
}

/// One session with the daemon.
///
/// Every operation takes `&mut self`, so at most one request is in flight.
/// Failures are returned as-is; after a failed multi-step operation the
/// client keeps whatever state it reached before the failure.
pub struct PcscClient<C: Connect = UnixSocketConnector> {
    connector: C,
    /// Exclusively owned connection, dropped with the client.
    conn: Option<C::Stream>,
    state: SessionState,
    version: Option<ProtocolVersion>,
    context: Option<u32>,
    reader_states: Vec<ReaderState>,
}

impl PcscClient<UnixSocketConnector> {
    /// Create a new client builder.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Client for the default (or environment-provided) socket path.
    pub fn new() -> Self {
        ClientBuilder::new().build()
    }
}

impl Default for PcscClient<UnixSocketConnector> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Connect> PcscClient<C> {
    /// Connect, negotiate the protocol version and establish a context.
    ///
    /// # Errors
    ///
    /// - `InvalidState` if the client already holds a connection or context
    /// - `Io` / `ShortRead` on transport failure
    /// - `ProtocolMismatch` if the daemon rejects or differs from version 4.3
    /// - `Daemon` if the daemon refuses the context
    pub async fn establish_context(&mut self, scope: Scope) -> Result<()> {
        if self.state != SessionState::Unestablished || self.conn.is_some() {
            return Err(self.invalid_state("establish context"));
        }

        self.conn = Some(self.connector.connect().await?);

        let reply = self.exchange("negotiate version", &VersionMessage::request()).await?;
        if !reply.status.is_success() || reply.version != ProtocolVersion::CURRENT {
            return Err(PcscError::ProtocolMismatch {
                expected: ProtocolVersion::CURRENT,
                found: reply.version,
                status: reply.status,
            });
        }
        debug!(version = %reply.version, "protocol version negotiated");

        let established = self
            .exchange("establish context", &EstablishMessage::request(scope))
            .await?;
        if !established.status.is_success() {
            return Err(PcscError::Daemon {
                command: Command::EstablishContext,
                status: established.status,
            });
        }

        self.version = Some(reply.version);
        self.context = Some(established.context);
        self.state = SessionState::Established;
        debug!(context = established.context, ?scope, "context established");
        Ok(())
    }

    /// Return the context to the daemon.
    ///
    /// The connection stays open; dispose of it with [`PcscClient::close`]
    /// or by dropping the client.
    ///
    /// # Errors
    ///
    /// - `InvalidState` unless the session is established
    /// - `Io` / `ShortRead` on transport failure
    /// - `Daemon` if the daemon reports a failure status
    pub async fn release_context(&mut self) -> Result<()> {
        let context = match (self.state, self.context) {
            (SessionState::Established, Some(context)) => context,
            _ => return Err(self.invalid_state("release context")),
        };

        let reply = self
            .exchange("release context", &ReleaseMessage::request(context))
            .await?;
        if !reply.status.is_success() {
            return Err(PcscError::Daemon {
                command: Command::ReleaseContext,
                status: reply.status,
            });
        }

        self.context = None;
        self.state = SessionState::Released;
        debug!(context, "context released");
        Ok(())
    }

    /// Fetch every reader slot from the daemon.
    ///
    /// Always yields exactly 16 entries, unused slots included, and
    /// replaces the previous cache.
    ///
    /// # Errors
    ///
    /// - `InvalidState` unless the session is established
    /// - `Io` / `ShortRead` on transport failure
    /// - `Decode` if the response cannot be split into descriptors
    pub async fn list_readers(&mut self) -> Result<&[ReaderState]> {
        if self.state != SessionState::Established {
            return Err(self.invalid_state("list readers"));
        }
        let conn = self.connection("list readers")?;

        send_message(conn, Command::GetReaderState, &[]).await?;
        let response = receive_exact(conn, READER_STATE_RESPONSE_LEN).await?;
        let states = decode_reader_states(&response)?;

        self.reader_states = states;
        debug!(
            readers = self.reader_states.iter().filter(|r| !r.is_empty_slot()).count(),
            "reader states refreshed"
        );
        Ok(&self.reader_states)
    }

    /// Shut down the connection and dispose of the client.
    ///
    /// Dropping the client also closes the connection; `close` additionally
    /// reports shutdown errors.
    pub async fn close(mut self) -> Result<()> {
        if let Some(mut conn) = self.conn.take() {
            conn.shutdown().await?;
            debug!(state = %self.state, "connection closed");
        }
        Ok(())
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Version agreed with the daemon, once established.
    pub fn version(&self) -> Option<ProtocolVersion> {
        self.version
    }

    /// Context handle assigned by the daemon, while established.
    pub fn context(&self) -> Option<u32> {
        self.context
    }

    /// Reader slots from the last successful [`PcscClient::list_readers`].
    pub fn reader_states(&self) -> &[ReaderState] {
        &self.reader_states
    }

    /// Names of the occupied reader slots, in slot order.
    pub fn reader_names(&self) -> Vec<String> {
        self.reader_states
            .iter()
            .filter(|r| !r.is_empty_slot())
            .map(|r| r.name().into_owned())
            .collect()
    }

    /// True while the client holds a connection.
    pub fn is_connected(&self) -> bool {
        self.conn.is_some()
    }

    /// Send a fixed-size message and read its same-shaped reply.
    async fn exchange<M: FixedMessage>(&mut self, operation: &'static str, request: &M) -> Result<M> {
        let conn = self.connection(operation)?;
        send_message(conn, M::COMMAND, &request.encode()).await?;
        let response = receive_exact(conn, M::SIZE).await?;
        M::decode(&response)
    }

    fn connection(&mut self, operation: &'static str) -> Result<&mut C::Stream> {
        let state = self.state;
        self.conn.as_mut().ok_or(PcscError::InvalidState {
            operation,
            state: state.as_str(),
        })
    }

    fn invalid_state(&self, operation: &'static str) -> PcscError {
        PcscError::InvalidState {
            operation,
            state: if self.conn.is_some() && self.state == SessionState::Unestablished {
                "connected"
            } else {
                self.state.as_str()
            },
        }
    }
}
