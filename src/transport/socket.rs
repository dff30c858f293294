//! Unix domain socket session setup.
//!
//! The daemon listens on a well-known path, `/run/pcscd/pcscd.comm` unless
//! the `PCSCLITE_CSOCK_NAME` environment variable names another one.
//!
//! # Example
//!
//! ```ignore
//! use pcscd_client::transport::{Connect, UnixSocketConnector};
//!
//! let connector = UnixSocketConnector::from_env();
//! let stream = connector.connect().await?;
//! ```

use std::future::Future;
use std::path::{Path, PathBuf};

use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::UnixStream;
use tracing::debug;

use crate::error::Result;

/// Default daemon socket path.
pub const DEFAULT_SOCKET_PATH: &str = "/run/pcscd/pcscd.comm";

/// Environment variable overriding the socket path.
pub const SOCKET_PATH_ENV: &str = "PCSCLITE_CSOCK_NAME";

/// Resolve the socket path: the environment override if set and non-empty,
/// otherwise [`DEFAULT_SOCKET_PATH`].
pub fn socket_path_from_env() -> PathBuf {
    resolve_socket_path(std::env::var_os(SOCKET_PATH_ENV))
}

fn resolve_socket_path(value: Option<std::ffi::OsString>) -> PathBuf {
    match value {
        Some(path) if !path.is_empty() => PathBuf::from(path),
        _ => PathBuf::from(DEFAULT_SOCKET_PATH),
    }
}

/// Opens a fresh byte stream to the daemon.
///
/// One call per session; the client owns the returned stream exclusively.
pub trait Connect {
    type Stream: AsyncRead + AsyncWrite + Unpin + Send;

    fn connect(&self) -> impl Future<Output = Result<Self::Stream>> + Send;
}

/// Connects to the daemon over a Unix domain socket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnixSocketConnector {
    path: PathBuf,
}

impl UnixSocketConnector {
    /// Connector for an explicit socket path.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Connector for the path named by the environment, or the default.
    pub fn from_env() -> Self {
        Self {
            path: socket_path_from_env(),
        }
    }

    /// Get the socket path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for UnixSocketConnector {
    fn default() -> Self {
        Self::new(DEFAULT_SOCKET_PATH)
    }
}

impl Connect for UnixSocketConnector {
    type Stream = UnixStream;

    async fn connect(&self) -> Result<UnixStream> {
        let stream = UnixStream::connect(&self.path).await?;
        debug!(path = %self.path.display(), "connected to pcscd");
        Ok(stream)
    }
}
