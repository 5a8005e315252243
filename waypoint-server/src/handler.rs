//! Packet handlers.

use crate::error::ServerError;
use crate::session::Session;
use bytes::Bytes;
use std::sync::Arc;
use waypoint_protocol::{
    hex_dump, ActionMessage, DiagnosticSink, Message, PacketHeader, PacketType, Process,
    UnhandledAction,
};

/// Writes unhandled actions to the `tracing` log.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn unhandled_action(&self, event: &UnhandledAction) {
        tracing::warn!(
            packet_type = %event.packet_type,
            action = event.action,
            length = event.length,
            "Unhandled action {}, length {}\n{}",
            event.action,
            event.length,
            hex_dump(&event.bytes)
        );
    }
}

/// Routes framed packets to their message kind.
pub struct PacketHandler {
    sink: Arc<dyn DiagnosticSink>,
}

impl PacketHandler {
    /// Creates a handler that logs diagnostics through `tracing`.
    pub fn new() -> Self {
        Self::with_sink(Arc::new(TracingSink))
    }

    /// Creates a handler with a custom diagnostic sink.
    pub fn with_sink(sink: Arc<dyn DiagnosticSink>) -> Self {
        Self { sink }
    }

    /// Handles one complete packet.
    ///
    /// Returns the reply to send back, or `None` for packet types without a
    /// message kind. Decode failures are returned as errors; the caller
    /// decides whether to drop the connection.
    pub fn handle(
        &self,
        session: &mut Session,
        packet: &[u8],
    ) -> Result<Option<Bytes>, ServerError> {
        let header = PacketHeader::peek(packet)?;
        session.record_packet();

        match header.packet_type {
            PacketType::Action => {
                let request = ActionMessage::decode(packet)?;
                tracing::debug!(
                    "[{}] Action {} (character={}, command={}, args={:?})",
                    session.remote_addr,
                    request.action,
                    request.character_id,
                    request.command,
                    request.arguments
                );
                Ok(Some(self.process(request, session)))
            }
            PacketType::Unknown(tag) => {
                tracing::warn!(
                    packet_type = tag,
                    length = header.length,
                    "Missing packet {}, length {}\n{}",
                    tag,
                    header.length,
                    hex_dump(packet)
                );
                Ok(None)
            }
        }
    }

    fn process<M: Process>(&self, request: M, session: &Session) -> Bytes {
        request.process(session, self.sink.as_ref()).encode()
    }
}

impl Default for PacketHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SpawnConfig;
    use crate::session::Character;
    use std::net::SocketAddr;
    use std::sync::Mutex;
    use waypoint_protocol::{ActionKind, MemorySink, ProtocolError};

    fn test_session() -> Session {
        let addr: SocketAddr = "127.0.0.1:40000".parse().unwrap();
        let mut character = Character::spawn(&SpawnConfig::default());
        character.character_id = 7;
        character.map_id = 100;
        character.x = 12;
        character.y = 34;
        Session::new(addr, character)
    }

    fn test_handler() -> (Arc<MemorySink>, PacketHandler) {
        let sink = Arc::new(MemorySink::new());
        let handler = PacketHandler::with_sink(sink.clone());
        (sink, handler)
    }

    fn request(action: ActionKind) -> ActionMessage {
        ActionMessage {
            timestamp: 5000,
            character_id: 1,
            command: 2,
            arguments: [3, 4],
            direction: 6,
            action,
        }
    }

    #[test]
    fn test_set_location_reply() {
        let (sink, handler) = test_handler();
        let mut session = test_session();

        let reply = handler
            .handle(&mut session, &request(ActionKind::SetLocation).encode())
            .unwrap()
            .unwrap();
        let reply = ActionMessage::decode(&reply).unwrap();

        assert_eq!(reply.character_id, 7);
        assert_eq!(reply.command, 100);
        assert_eq!(reply.arguments, [12, 34]);
        assert_eq!(reply.timestamp, 5000);
        assert_eq!(reply.direction, 6);
        assert!(sink.is_empty());
        assert_eq!(session.packet_count(), 1);
    }

    #[test]
    fn test_unhandled_action_echoed_and_reported() {
        let (sink, handler) = test_handler();
        let mut session = test_session();
        let packet = request(ActionKind::Unknown(9999)).encode();

        let reply = handler.handle(&mut session, &packet).unwrap().unwrap();

        assert_eq!(reply, packet);
        let events = sink.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].action, 9999);
        assert_eq!(events[0].bytes, packet);
    }

    #[test]
    fn test_unknown_packet_type_has_no_reply() {
        let (sink, handler) = test_handler();
        let mut session = test_session();

        let reply = handler.handle(&mut session, &[6, 0, 0xE9, 0x03, 1, 2]).unwrap();

        assert!(reply.is_none());
        assert!(sink.is_empty());
        assert_eq!(session.packet_count(), 1);
    }

    #[test]
    fn test_truncated_action_is_error() {
        let (_sink, handler) = test_handler();
        let mut session = test_session();
        let packet = request(ActionKind::SetLocation).encode();

        let err = handler.handle(&mut session, &packet[..20]).unwrap_err();
        assert!(matches!(
            err,
            ServerError::Protocol(ProtocolError::Underflow { .. })
        ));
    }

    #[derive(Clone, Default)]
    struct CapturedLog(Arc<Mutex<Vec<u8>>>);

    impl std::io::Write for CapturedLog {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl CapturedLog {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    #[test]
    fn test_tracing_sink_logs_unhandled_action() {
        let log = CapturedLog::default();
        let writer = log.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();

        let handler = PacketHandler::default();
        let mut session = test_session();
        let packet = request(ActionKind::SetMagicSpells).encode();

        let reply = tracing::subscriber::with_default(subscriber, || {
            handler.handle(&mut session, &packet).unwrap()
        });
        assert_eq!(reply, Some(packet));

        let output = log.contents();
        assert!(output.contains("WARN"));
        assert!(output.contains("packet_type=MsgAction(1010)"));
        assert!(output.contains("action=78"));
        assert!(output.contains("length=24"));
        assert!(output.contains("0000: 18 00 F2 03"));
    }

    #[test]
    fn test_unknown_packet_type_is_logged() {
        let log = CapturedLog::default();
        let writer = log.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();

        let handler = PacketHandler::default();
        let mut session = test_session();

        let reply = tracing::subscriber::with_default(subscriber, || {
            handler.handle(&mut session, &[6, 0, 0xE9, 0x03, 1, 2]).unwrap()
        });
        assert!(reply.is_none());

        let output = log.contents();
        assert!(output.contains("Missing packet 1001, length 6"));
        assert!(output.contains("0000: 06 00 E9 03 01 02"));
    }
}
