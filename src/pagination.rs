use crate::error::{ChatError, Result};
use crate::types::{ChatThread, ThreadRef};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadMoreRequest {
    pub scroll_token: String,
    pub thread: ThreadRef,
    #[serde(with = "millis_datetime")]
    pub oldest_message_datetime: DateTime<Utc>,
}

pub fn build_load_more(thread: &ChatThread) -> Result<LoadMoreRequest> {
    if !thread.has_more_messages_to_load {
        return Err(ChatError::NoMoreMessages);
    }
    let oldest = thread
        .oldest_message_date()
        .ok_or(ChatError::InvalidOldestDate)?;
    Ok(LoadMoreRequest {
        scroll_token: thread.scroll_token.clone(),
        thread: ThreadRef::from(thread),
        oldest_message_datetime: oldest,
    })
}

// ISO 8601 with millisecond precision and a `Z` suffix.
mod millis_datetime {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, ser: S) -> Result<S::Ok, S::Error> {
        ser.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(de: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(de)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
