//! # pcscd-client
//!
//! Rust client for the IPC protocol of `pcscd`, the PC/SC smart-card
//! resource-manager daemon.
//!
//! The daemon is reached over a local Unix socket and speaks a fixed binary
//! protocol: every request is an 8-byte header (payload size + command)
//! followed by a fixed payload, and every response has a length known from
//! the command alone. All integers are 32-bit little-endian.
//!
//! ## Architecture
//!
//! - **Protocol** (`protocol`): command table, status codes, layout constants
//! - **Codec** (`codec`): integers, reader-state descriptors, fixed messages
//! - **Framing** (`framing`): send one request, read exactly one response
//! - **Transport** (`transport`): Unix socket session setup
//! - **Client**: [`PcscClient`], one session per instance
//!
//! ## Example
//!
//! ```ignore
//! use pcscd_client::{PcscClient, Scope};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut client = PcscClient::new();
//!     client.establish_context(Scope::User).await?;
//!
//!     client.list_readers().await?;
//!     for name in client.reader_names() {
//!         println!("{name}");
//!     }
//!
//!     client.release_context().await?;
//!     client.close().await?;
//!     Ok(())
//! }
//! ```

pub mod codec;
pub mod error;
pub mod framing;
pub mod protocol;
pub mod transport;

mod client;

pub use client::{ClientBuilder, PcscClient, SessionState};
pub use codec::ReaderState;
pub use error::{PcscError, Result};
pub use protocol::{Command, ProtocolVersion, Scope, StatusCode};
