use crate::connection::ConnectionContext;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const CHAT_WINDOW_EVENT: &str = "chatWindowEvent";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EventType {
    SendMessage,
    LoadMoreMessages,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrandRef {
    pub id: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelRef {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsumerIdentity {
    pub id_on_external_platform: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventPayload<T> {
    pub event_type: EventType,
    pub brand: BrandRef,
    pub channel: ChannelRef,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consumer_identity: Option<ConsumerIdentity>,
    pub data: T,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProtocolEvent<T> {
    pub action: String,
    pub event_id: Uuid,
    pub payload: EventPayload<T>,
}

impl<T: Serialize> ProtocolEvent<T> {
    pub fn new(event_type: EventType, data: T, context: &ConnectionContext) -> Self {
        Self {
            action: CHAT_WINDOW_EVENT.to_string(),
            event_id: Uuid::new_v4(),
            payload: EventPayload {
                event_type,
                brand: BrandRef {
                    id: context.brand_id,
                },
                channel: ChannelRef {
                    id: context.channel_id.clone(),
                },
                consumer_identity: context.customer.as_ref().map(|c| ConsumerIdentity {
                    id_on_external_platform: c.id.clone(),
                }),
                data,
            },
        }
    }

    pub fn encode(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
