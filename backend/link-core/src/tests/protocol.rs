// Unit tests for the line framing and typed payloads
// Socket-level behavior is covered in integration_tests/

use crate::protocol::{Event, LineDecoder, Message, encode_line};

use serde_json::json;

/// **VALUE**: Verifies a message split across arbitrary read chunks still
/// assembles into exactly one message.
///
/// **WHY THIS MATTERS**: TCP gives no segment guarantees; the peer's writes
/// arrive in whatever chunks the kernel hands back.
///
/// **BUG THIS CATCHES**: A decoder that treats each `feed` as a whole line
/// would split this payload into garbage.
#[test]
fn given_line_split_across_chunks_when_fed_then_one_message_decodes() {
    // GIVEN: one command line fed one byte at a time
    let line = b"{\"command\":\"select_path\",\"id\":7}\n";
    let mut decoder = LineDecoder::new();

    for byte in &line[..line.len() - 1] {
        decoder.feed(std::slice::from_ref(byte));
        assert!(decoder.next_message().is_none(), "No newline seen yet");
    }

    // WHEN: the terminating newline arrives
    decoder.feed(b"\n");

    // THEN: exactly one complete message comes out
    let message = decoder.next_message().unwrap().unwrap();
    assert_eq!(message.command(), Some("select_path"));
    assert!(decoder.next_message().is_none());
}

/// **VALUE**: Verifies several lines in one chunk decode in wire order.
///
/// **BUG THIS CATCHES**: A decoder that only finds the first newline per
/// feed would silently delay or drop trailing messages.
#[test]
fn given_multiple_lines_in_one_chunk_when_fed_then_all_decode_in_order() {
    let mut decoder = LineDecoder::new();
    decoder.feed(b"{\"command\":\"a\"}\n{\"command\":\"b\"}\n{\"command\":\"c\"}\n");

    let commands: Vec<String> = std::iter::from_fn(|| decoder.next_message())
        .map(|parsed| parsed.unwrap().command().unwrap().to_string())
        .collect();

    assert_eq!(commands, ["a", "b", "c"]);
}

/// **VALUE**: Verifies a malformed line is reported and dropped without
/// poisoning the lines around it.
///
/// **WHY THIS MATTERS**: The receiver's read loop keeps the connection open
/// across bad lines; that only works if the decoder resynchronizes at the
/// next newline.
#[test]
fn given_malformed_line_between_valid_lines_when_decoded_then_neighbors_survive() {
    let mut decoder = LineDecoder::new();
    decoder.feed(b"{\"command\":\"first\"}\nnot json at all\n{\"command\":\"last\"}\n");

    assert_eq!(
        decoder.next_message().unwrap().unwrap().command(),
        Some("first")
    );
    assert!(decoder.next_message().unwrap().is_err(), "Middle line is garbage");
    assert_eq!(
        decoder.next_message().unwrap().unwrap().command(),
        Some("last")
    );
}

#[test]
fn given_blank_lines_when_decoded_then_skipped() {
    let mut decoder = LineDecoder::new();
    decoder.feed(b"\n\n{\"command\":\"x\"}\n\n");

    assert_eq!(decoder.next_message().unwrap().unwrap().command(), Some("x"));
    assert!(decoder.next_message().is_none());
}

/// **VALUE**: Verifies encode produces exactly one newline-terminated line
/// that the decoder parses back to the same value.
///
/// **BUG THIS CATCHES**: Pretty-printed (multi-line) encoding would break
/// the framing invariant of one message per line.
#[test]
fn given_event_when_encoded_then_single_line_round_trips() {
    let event = Event::Created { id: "42".to_string() };

    let line = encode_line(&event).unwrap();

    assert_eq!(line.last(), Some(&b'\n'));
    let body = &line[..line.len() - 1];
    assert!(!body.contains(&b'\n'), "Payload must be newline-free");

    let decoded: Event = serde_json::from_slice(body).unwrap();
    assert_eq!(decoded, event);
}

/// **VALUE**: Verifies absent cursor hit fields are omitted from the wire,
/// not serialized as null.
#[test]
fn given_cursor_event_without_hit_when_encoded_then_hit_fields_absent() {
    let event = Event::CursorTracked {
        object: None,
        hit_position: None,
        normal: None,
        face_index: None,
        cursor_position: [1.0, 2.0, 3.0],
    };

    let line = encode_line(&event).unwrap();
    let value: serde_json::Value = serde_json::from_slice(&line[..line.len() - 1]).unwrap();

    assert_eq!(value["event"], "cursor_tracked");
    assert!(value.get("hit_position").is_none());
    assert!(value.get("normal").is_none());
    assert!(value.get("face_index").is_none());
    assert_eq!(value["cursor_position"], json!([1.0, 2.0, 3.0]));
}

#[test]
fn given_non_object_line_when_parsed_then_decode_error() {
    assert!(Message::parse("[1,2,3]").is_err());
    assert!(Message::parse("\"just a string\"").is_err());
}

#[test]
fn given_message_without_command_field_when_queried_then_none() {
    let message = Message::parse("{\"id\":1}").unwrap();
    assert_eq!(message.command(), None);
}

/// **VALUE**: Verifies typed payload extraction fails loudly on shape
/// mismatch instead of yielding defaults.
#[test]
fn given_mismatched_payload_shape_when_deserialized_then_payload_error() {
    #[derive(serde::Deserialize)]
    struct Expects {
        #[allow(dead_code)]
        id: u32,
    }

    let message = Message::parse("{\"command\":\"x\",\"id\":\"not a number\"}").unwrap();
    assert!(message.payload::<Expects>().is_err());
}
