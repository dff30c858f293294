//! Scripted pcscd stand-in shared by the integration tests.

#![allow(dead_code)]

use std::sync::Mutex;

use pcscd_client::codec::{
    decode_u32, EstablishMessage, FixedMessage, ReaderState, ReleaseMessage, VersionMessage,
};
use pcscd_client::protocol::{
    Command, ProtocolVersion, StatusCode, HEADER_SIZE, MAX_READER_STATE_DESCRIPTORS,
    READER_STATE_RESPONSE_LEN,
};
use pcscd_client::transport::Connect;
use pcscd_client::{PcscError, Result};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, DuplexStream};

/// Largest request payload the mock accepts.
const MAX_REQUEST_PAYLOAD: u32 = 64;

/// Split a request header into its command and payload size.
///
/// Panics on opcode 0, unknown opcodes and oversized payloads.
pub fn parse_request_header(bytes: &[u8; HEADER_SIZE]) -> (Command, u32) {
    let payload_length = decode_u32(&bytes[..4]).unwrap();
    let opcode = decode_u32(&bytes[4..]).unwrap();

    assert_ne!(opcode, 0, "command 0 is reserved");
    let command = Command::from_u32(opcode)
        .unwrap_or_else(|| panic!("unknown command {opcode}"));
    assert!(
        payload_length <= MAX_REQUEST_PAYLOAD,
        "payload size {payload_length} exceeds maximum {MAX_REQUEST_PAYLOAD}"
    );
    (command, payload_length)
}

/// Request received by the mock, as seen on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recorded {
    pub command: Command,
    pub payload: Vec<u8>,
}

/// Behaviour of the mock daemon.
#[derive(Debug, Clone)]
pub struct MockDaemon {
    pub version: ProtocolVersion,
    pub version_status: StatusCode,
    pub establish_status: StatusCode,
    pub context: u32,
    pub release_status: StatusCode,
    /// Occupied slots; the rest of the 16 are sent empty.
    pub readers: Vec<ReaderState>,
    /// Sent verbatim instead of encoding `readers`.
    pub raw_reader_list: Option<Vec<u8>>,
    /// Write responses in pieces of this many bytes.
    pub fragment: Option<usize>,
    /// Close the connection after sending this many bytes of the reader list.
    pub truncate_reader_list: Option<usize>,
}

impl Default for MockDaemon {
    fn default() -> Self {
        Self {
            version: ProtocolVersion::CURRENT,
            version_status: StatusCode::SUCCESS,
            establish_status: StatusCode::SUCCESS,
            context: 0x0BAD_CAFE,
            release_status: StatusCode::SUCCESS,
            readers: Vec::new(),
            raw_reader_list: None,
            fragment: None,
            truncate_reader_list: None,
        }
    }
}

impl MockDaemon {
    /// Serve one connection until the client hangs up.
    ///
    /// Returns every request in arrival order.
    pub async fn serve<S>(mut self, mut stream: S) -> Vec<Recorded>
    where
        S: AsyncRead + AsyncWrite + Unpin,
    {
        let mut recorded = Vec::new();

        loop {
            let mut header_bytes = [0u8; HEADER_SIZE];
            if stream.read_exact(&mut header_bytes).await.is_err() {
                return recorded;
            }
            let (command, payload_length) = parse_request_header(&header_bytes);

            let mut payload = vec![0u8; payload_length as usize];
            stream.read_exact(&mut payload).await.unwrap();
            recorded.push(Recorded {
                command,
                payload: payload.clone(),
            });

            let response = match command {
                Command::Version => VersionMessage {
                    version: self.version,
                    status: self.version_status,
                }
                .encode(),
                Command::EstablishContext => {
                    let request = EstablishMessage::decode(&payload).unwrap();
                    EstablishMessage {
                        scope: request.scope,
                        context: self.context,
                        status: self.establish_status,
                    }
                    .encode()
                }
                Command::ReleaseContext => {
                    let request = ReleaseMessage::decode(&payload).unwrap();
                    ReleaseMessage {
                        context: request.context,
                        status: self.release_status,
                    }
                    .encode()
                }
                Command::GetReaderState => {
                    let list = match &self.raw_reader_list {
                        Some(raw) => raw.clone(),
                        None => self.reader_list(),
                    };
                    for reader in &mut self.readers {
                        reader.event_counter += 1;
                    }
                    if let Some(cut) = self.truncate_reader_list {
                        let _ = stream.write_all(&list[..cut]).await;
                        return recorded;
                    }
                    list
                }
                other => panic!("mock daemon does not handle {other:?}"),
            };

            if self.write(&mut stream, &response).await.is_err() {
                return recorded;
            }
        }
    }

    /// The full 16-slot reader-state response.
    pub fn reader_list(&self) -> Vec<u8> {
        assert!(self.readers.len() <= MAX_READER_STATE_DESCRIPTORS);
        let mut list = Vec::with_capacity(READER_STATE_RESPONSE_LEN);
        for reader in &self.readers {
            list.extend_from_slice(&reader.encode());
        }
        for _ in self.readers.len()..MAX_READER_STATE_DESCRIPTORS {
            list.extend_from_slice(&ReaderState::empty().encode());
        }
        list
    }

    async fn write<S>(&self, stream: &mut S, bytes: &[u8]) -> std::io::Result<()>
    where
        S: AsyncWrite + Unpin,
    {
        match self.fragment {
            Some(size) => {
                for piece in bytes.chunks(size) {
                    stream.write_all(piece).await?;
                    stream.flush().await?;
                    tokio::task::yield_now().await;
                }
            }
            None => {
                stream.write_all(bytes).await?;
                stream.flush().await?;
            }
        }
        Ok(())
    }
}

/// Hands out one pre-made in-memory stream.
pub struct DuplexConnector(Mutex<Option<DuplexStream>>);

impl DuplexConnector {
    pub fn new(stream: DuplexStream) -> Self {
        Self(Mutex::new(Some(stream)))
    }
}

impl Connect for DuplexConnector {
    type Stream = DuplexStream;

    async fn connect(&self) -> Result<DuplexStream> {
        let stream = self.0.lock().unwrap().take();
        stream.ok_or_else(|| PcscError::Io(std::io::ErrorKind::NotConnected.into()))
    }
}
