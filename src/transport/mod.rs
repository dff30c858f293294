//! Transport module - session setup towards the daemon.
//!
//! Provides the [`Connect`] seam the client opens its connection through,
//! and the Unix domain socket implementation used against a real pcscd.

mod socket;

pub use socket::{
    socket_path_from_env, Connect, UnixSocketConnector, DEFAULT_SOCKET_PATH, SOCKET_PATH_ENV,
};
