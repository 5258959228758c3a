use chat_outbound::error::ChatError;
use chat_outbound::pagination::{build_load_more, LoadMoreRequest};
use chat_outbound::types::{ChatThread, Message, MessageContent, MessageDirection};
use chrono::{TimeZone, Utc};
use uuid::Uuid;

fn message_at(thread_id: Uuid, millis: i64) -> Message {
    Message {
        id: Uuid::new_v4(),
        thread_id,
        content: MessageContent {
            text: "older".to_string(),
            postback: None,
        },
        created_at: Utc.timestamp_millis_opt(millis).unwrap(),
        attachments: vec![],
        direction: MessageDirection::Inbound,
        user_statistics: None,
        author_agent: None,
        author_customer: None,
    }
}

#[test]
fn test_no_more_messages() {
    let id = Uuid::new_v4();
    let mut thread = ChatThread::new(id);
    thread.messages.push(message_at(id, 1_000));
    let err = build_load_more(&thread).unwrap_err();
    assert!(matches!(err, ChatError::NoMoreMessages));
}

#[test]
fn test_no_more_messages_with_empty_history() {
    let thread = ChatThread::new(Uuid::new_v4());
    assert!(matches!(
        build_load_more(&thread).unwrap_err(),
        ChatError::NoMoreMessages
    ));
}

#[test]
fn test_invalid_oldest_date_on_empty_history() {
    let mut thread = ChatThread::new(Uuid::new_v4());
    thread.has_more_messages_to_load = true;
    assert!(matches!(
        build_load_more(&thread).unwrap_err(),
        ChatError::InvalidOldestDate
    ));
}

#[test]
fn test_request_uses_oldest_message() {
    let id = Uuid::new_v4();
    let mut thread = ChatThread::new(id);
    thread.name = Some("Orders".to_string());
    thread.scroll_token = "scroll-123".to_string();
    thread.has_more_messages_to_load = true;
    thread.messages = vec![message_at(id, 5_000), message_at(id, 1_500), message_at(id, 9_000)];

    let request = build_load_more(&thread).unwrap();
    assert_eq!(request.scroll_token, "scroll-123");
    assert_eq!(request.thread.id_on_external_platform, id);
    assert_eq!(request.thread.thread_name, "Orders");
    assert_eq!(
        request.oldest_message_datetime,
        Utc.timestamp_millis_opt(1_500).unwrap()
    );
}

#[test]
fn test_request_wire_format() {
    let id = Uuid::new_v4();
    let mut thread = ChatThread::new(id);
    thread.scroll_token = "tok".to_string();
    thread.has_more_messages_to_load = true;
    thread.messages.push(message_at(id, 1_700_000_000_123));

    let value = serde_json::to_value(build_load_more(&thread).unwrap()).unwrap();
    assert_eq!(value["scrollToken"], "tok");
    assert_eq!(value["thread"]["idOnExternalPlatform"], id.to_string());
    assert_eq!(value["thread"]["threadName"], "");
    assert_eq!(value["oldestMessageDatetime"], "2023-11-14T22:13:20.123Z");
}

#[test]
fn test_request_deserializes() {
    let id = Uuid::new_v4();
    let raw = format!(
        r#"{{"scrollToken":"s","thread":{{"idOnExternalPlatform":"{id}","threadName":"t"}},"oldestMessageDatetime":"2024-01-02T03:04:05.678Z"}}"#
    );
    let parsed: LoadMoreRequest = serde_json::from_str(&raw).unwrap();
    assert_eq!(parsed.thread.id_on_external_platform, id);
    assert_eq!(
        parsed.oldest_message_datetime,
        Utc.timestamp_millis_opt(1_704_164_645_678).unwrap()
    );
}
