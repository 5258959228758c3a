use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq)]
pub enum AttachmentSource {
    Memory(Bytes),
    Location(PathBuf),
}

impl AttachmentSource {
    pub fn from_uri(uri: &str) -> Self {
        if let Ok(url) = reqwest::Url::parse(uri) {
            if url.scheme() == "file" {
                if let Ok(path) = url.to_file_path() {
                    return AttachmentSource::Location(path);
                }
            }
        }
        AttachmentSource::Location(PathBuf::from(uri))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AttachmentDescriptor {
    pub source: AttachmentSource,
    pub friendly_name: String,
    pub mime_type: String,
}

impl AttachmentDescriptor {
    pub fn memory(data: impl Into<Bytes>, friendly_name: &str, mime_type: &str) -> Self {
        Self {
            source: AttachmentSource::Memory(data.into()),
            friendly_name: friendly_name.to_string(),
            mime_type: mime_type.to_string(),
        }
    }

    pub fn location(path: impl AsRef<Path>, friendly_name: &str, mime_type: &str) -> Self {
        Self {
            source: AttachmentSource::Location(path.as_ref().to_path_buf()),
            friendly_name: friendly_name.to_string(),
            mime_type: mime_type.to_string(),
        }
    }

    pub fn file_name(&self) -> String {
        match &self.source {
            AttachmentSource::Location(path) => path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| self.friendly_name.clone()),
            AttachmentSource::Memory(_) => self.friendly_name.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedAttachment {
    pub url: String,
    pub friendly_name: String,
    pub mime_type: String,
    pub file_name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OutboundMessage {
    pub text: String,
    pub attachments: Vec<AttachmentDescriptor>,
    pub postback: Option<String>,
}

impl OutboundMessage {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            attachments: Vec::new(),
            postback: None,
        }
    }

    pub fn with_attachment(mut self, attachment: AttachmentDescriptor) -> Self {
        self.attachments.push(attachment);
        self
    }

    pub fn with_postback(mut self, postback: impl Into<String>) -> Self {
        self.postback = Some(postback.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageContent {
    pub text: String,
    pub postback: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    pub url: String,
    pub friendly_name: String,
    pub mime_type: String,
    pub file_name: String,
}

impl From<&UploadedAttachment> for Attachment {
    fn from(uploaded: &UploadedAttachment) -> Self {
        Self {
            url: uploaded.url.clone(),
            friendly_name: uploaded.friendly_name.clone(),
            mime_type: uploaded.mime_type.clone(),
            file_name: uploaded.file_name.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageDirection {
    Inbound,
    Outbound,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStatistics {
    pub seen_at: Option<DateTime<Utc>>,
    pub read_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Agent {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerIdentity {
    pub id: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: Uuid,
    pub thread_id: Uuid,
    pub content: MessageContent,
    pub created_at: DateTime<Utc>,
    pub attachments: Vec<Attachment>,
    pub direction: MessageDirection,
    pub user_statistics: Option<UserStatistics>,
    pub author_agent: Option<Agent>,
    pub author_customer: Option<CustomerIdentity>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatThread {
    pub id: Uuid,
    pub name: Option<String>,
    pub messages: Vec<Message>,
    pub scroll_token: String,
    pub has_more_messages_to_load: bool,
    pub assigned_agent: Option<Agent>,
}

impl ChatThread {
    pub fn new(id: Uuid) -> Self {
        Self {
            id,
            name: None,
            messages: Vec::new(),
            scroll_token: String::new(),
            has_more_messages_to_load: false,
            assigned_agent: None,
        }
    }

    pub fn oldest_message_date(&self) -> Option<DateTime<Utc>> {
        self.messages.iter().map(|m| m.created_at).min()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreadRef {
    pub id_on_external_platform: Uuid,
    pub thread_name: String,
}

impl From<&ChatThread> for ThreadRef {
    fn from(thread: &ChatThread) -> Self {
        Self {
            id_on_external_platform: thread.id,
            thread_name: thread.name.clone().unwrap_or_default(),
        }
    }
}
