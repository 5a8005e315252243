//! Property-based tests for the action message codec.

use proptest::prelude::*;
use waypoint_protocol::{
    ActionKind, ActionMessage, ByteCursor, ByteWriter, CharacterView, MemorySink, Message,
    PacketDecoder, Process, ACTION_MESSAGE_SIZE,
};

struct Character {
    id: u32,
    map: u32,
    x: u16,
    y: u16,
}

impl CharacterView for Character {
    fn character_id(&self) -> u32 {
        self.id
    }
    fn map_id(&self) -> u32 {
        self.map
    }
    fn x(&self) -> u16 {
        self.x
    }
    fn y(&self) -> u16 {
        self.y
    }
}

fn action_message() -> impl Strategy<Value = ActionMessage> {
    (
        any::<u32>(),
        any::<u32>(),
        any::<u32>(),
        any::<[u16; 2]>(),
        any::<u16>(),
        any::<u16>(),
    )
        .prop_map(
            |(timestamp, character_id, command, arguments, direction, action)| ActionMessage {
                timestamp,
                character_id,
                command,
                arguments,
                direction,
                action: ActionKind::from(action),
            },
        )
}

proptest! {
    #[test]
    fn prop_action_roundtrip(message in action_message()) {
        let encoded = message.encode();
        prop_assert_eq!(encoded.len(), ACTION_MESSAGE_SIZE);
        prop_assert_eq!(u16::from_le_bytes([encoded[0], encoded[1]]) as usize, encoded.len());

        let decoded = ActionMessage::decode(&encoded).expect("decode should not fail");
        prop_assert_eq!(decoded, message);
    }
}

proptest! {
    #[test]
    fn prop_truncated_action_underflows(message in action_message(), cut in 0..ACTION_MESSAGE_SIZE) {
        let encoded = message.encode();
        let err = ActionMessage::decode(&encoded[..cut]).unwrap_err();
        prop_assert!(err.is_underflow());
    }
}

proptest! {
    #[test]
    fn prop_set_location_overrides_position(
        message in action_message(),
        id in any::<u32>(),
        map in any::<u32>(),
        x in any::<u16>(),
        y in any::<u16>(),
    ) {
        let mut request = message;
        request.action = ActionKind::SetLocation;
        let session = Character { id, map, x, y };
        let sink = MemorySink::new();

        let reply = request.process(&session, &sink).into_message();

        prop_assert_eq!(reply.character_id, id);
        prop_assert_eq!(reply.command, map);
        prop_assert_eq!(reply.arguments, [x, y]);
        prop_assert_eq!(reply.timestamp, request.timestamp);
        prop_assert!(sink.is_empty());
    }
}

proptest! {
    #[test]
    fn prop_other_actions_echo(message in action_message()) {
        prop_assume!(message.action != ActionKind::SetLocation);
        let session = Character { id: 1, map: 2, x: 3, y: 4 };
        let sink = MemorySink::new();

        let reply = message.process(&session, &sink).into_message();

        prop_assert_eq!(reply, message);
        prop_assert_eq!(sink.len(), 1);
    }
}

proptest! {
    #[test]
    fn prop_prefixed_string_trims_padding(text in "[a-zA-Z0-9 ]{0,32}", padding in 0usize..16) {
        let mut writer = ByteWriter::new();
        writer.write_u8((text.len() + padding) as u8);
        writer.write_bytes(text.as_bytes());
        writer.write_bytes(&vec![0u8; padding]);
        let bytes = writer.to_bytes();

        let mut cursor = ByteCursor::new(&bytes);
        prop_assert_eq!(cursor.read_prefixed_string().unwrap(), text.trim_end_matches('\0'));
        prop_assert!(cursor.is_empty());
    }
}

proptest! {
    #[test]
    fn prop_framing_arbitrary_chunks(
        messages in prop::collection::vec(action_message(), 1..8),
        chunk in 1usize..40,
    ) {
        let stream: Vec<u8> = messages.iter().flat_map(|m| m.encode().to_vec()).collect();
        let mut decoder = PacketDecoder::new();
        let mut decoded = Vec::new();

        for piece in stream.chunks(chunk) {
            decoder.extend(piece);
            while let Some(packet) = decoder.decode_packet().unwrap() {
                decoded.push(ActionMessage::decode(&packet).unwrap());
            }
        }

        prop_assert_eq!(decoded, messages);
        prop_assert_eq!(decoder.buffered(), 0);
    }
}
