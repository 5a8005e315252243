//! Connection to a waypoint server.

use crate::error::ClientError;
use bytes::Bytes;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use waypoint_protocol::{Message, PacketDecoder, PacketHeader};

/// Default read buffer size (4 KiB).
pub const DEFAULT_READ_BUFFER_SIZE: usize = 4 * 1024;

/// Connection configuration.
#[derive(Debug, Clone)]
pub struct ConnectionConfig {
    /// Server address.
    pub addr: SocketAddr,
    /// Connection timeout.
    pub connect_timeout: Duration,
    /// Request timeout.
    pub request_timeout: Duration,
    /// Read buffer size for socket reads.
    pub read_buffer_size: usize,
    /// Largest packet accepted from the server.
    pub max_packet_size: usize,
}

impl ConnectionConfig {
    pub fn new(addr: SocketAddr) -> Self {
        Self {
            addr,
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            read_buffer_size: DEFAULT_READ_BUFFER_SIZE,
            max_packet_size: waypoint_protocol::MAX_PACKET_SIZE,
        }
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

/// A connection exchanging packets with the server.
pub struct Connection {
    config: ConnectionConfig,
    stream: TcpStream,
    decoder: PacketDecoder,
}

impl Connection {
    /// Connects to the server.
    pub async fn connect(config: ConnectionConfig) -> Result<Self, ClientError> {
        let stream = tokio::time::timeout(config.connect_timeout, TcpStream::connect(config.addr))
            .await
            .map_err(|_| ClientError::Timeout)??;
        stream.set_nodelay(true)?;
        tracing::debug!("Connected to {}", config.addr);

        let decoder = PacketDecoder::with_max_packet_size(config.max_packet_size);
        Ok(Self {
            config,
            stream,
            decoder,
        })
    }

    pub fn config(&self) -> &ConnectionConfig {
        &self.config
    }

    /// Sends a message without waiting for an answer.
    pub async fn send<M: Message>(&mut self, message: &M) -> Result<(), ClientError> {
        let bytes = message.encode();
        tracing::trace!("Sending {} ({} bytes)", M::PACKET_TYPE, bytes.len());
        self.stream.write_all(&bytes).await?;
        Ok(())
    }

    /// Sends a message and waits for the answer of the same kind.
    pub async fn request<M: Message>(&mut self, message: &M) -> Result<M, ClientError> {
        self.send(message).await?;

        let packet = tokio::time::timeout(self.config.request_timeout, self.recv_packet())
            .await
            .map_err(|_| ClientError::Timeout)??;

        let header = PacketHeader::peek(&packet)?;
        if header.packet_type != M::PACKET_TYPE {
            return Err(ClientError::UnexpectedPacket {
                expected: M::PACKET_TYPE,
                actual: header.packet_type,
            });
        }
        Ok(M::decode(&packet)?)
    }

    /// Reads the next complete packet.
    pub async fn recv_packet(&mut self) -> Result<Bytes, ClientError> {
        let mut buf = vec![0u8; self.config.read_buffer_size];
        loop {
            if let Some(packet) = self.decoder.decode_packet()? {
                return Ok(packet);
            }

            let n = self.stream.read(&mut buf).await?;
            if n == 0 {
                return Err(ClientError::ConnectionClosed);
            }
            self.decoder.extend(&buf[..n]);
        }
    }

    /// Closes the connection.
    pub async fn close(mut self) -> Result<(), ClientError> {
        self.stream.shutdown().await?;
        Ok(())
    }
}
