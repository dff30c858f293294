//! Command table, status codes and protocol version.
//!
//! Opcode values define wire compatibility with the daemon and must never
//! be renumbered. Value 0 is reserved.

use std::fmt;

/// Status returned by the daemon when an operation succeeded.
pub const SCARD_S_SUCCESS: u32 = 0x0000_0000;

/// Daemon command identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum Command {
    EstablishContext = 1,
    ReleaseContext = 2,
    ListReaders = 3,
    Connect = 4,
    Reconnect = 5,
    Disconnect = 6,
    BeginTransaction = 7,
    EndTransaction = 8,
    Transmit = 9,
    Control = 10,
    Status = 11,
    /// Defined by the daemon, never sent by clients.
    GetStatusChange = 12,
    Cancel = 13,
    /// Defined by the daemon, never sent by clients.
    CancelTransaction = 14,
    GetAttrib = 15,
    SetAttrib = 16,
    /// Client/server protocol version exchange.
    Version = 17,
    /// Snapshot of every reader slot.
    GetReaderState = 18,
    WaitReaderStateChange = 19,
    StopWaitingReaderStateChange = 20,
}

impl Command {
    /// Every command in opcode order.
    pub const ALL: [Command; 20] = [
        Command::EstablishContext,
        Command::ReleaseContext,
        Command::ListReaders,
        Command::Connect,
        Command::Reconnect,
        Command::Disconnect,
        Command::BeginTransaction,
        Command::EndTransaction,
        Command::Transmit,
        Command::Control,
        Command::Status,
        Command::GetStatusChange,
        Command::Cancel,
        Command::CancelTransaction,
        Command::GetAttrib,
        Command::SetAttrib,
        Command::Version,
        Command::GetReaderState,
        Command::WaitReaderStateChange,
        Command::StopWaitingReaderStateChange,
    ];

    /// Wire opcode.
    #[inline]
    pub fn opcode(self) -> u32 {
        self as u32
    }

    /// Look up a command by opcode. Returns `None` for 0 and unknown values.
    pub fn from_u32(opcode: u32) -> Option<Self> {
        opcode
            .checked_sub(1)
            .and_then(|idx| Self::ALL.get(idx as usize))
            .copied()
    }
}

/// Raw status word from a daemon response.
///
/// Anything other than [`SCARD_S_SUCCESS`] is a failure whose meaning is
/// left to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StatusCode(pub u32);

impl StatusCode {
    pub const SUCCESS: StatusCode = StatusCode(SCARD_S_SUCCESS);

    #[inline]
    pub fn is_success(self) -> bool {
        self.0 == SCARD_S_SUCCESS
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08X}", self.0)
    }
}

/// Client/server IPC protocol version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProtocolVersion {
    pub major: u32,
    pub minor: u32,
}

impl ProtocolVersion {
    /// The only version this client speaks.
    pub const CURRENT: ProtocolVersion = ProtocolVersion { major: 4, minor: 3 };

    pub const fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }
}

impl fmt::Display for ProtocolVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// Context scope requested when establishing a context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u32)]
pub enum Scope {
    #[default]
    User = 0,
    Terminal = 1,
    System = 2,
}

impl From<Scope> for u32 {
    fn from(scope: Scope) -> u32 {
        scope as u32
    }
}
