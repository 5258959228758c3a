use crate::connection::Connection;
use crate::envelope::build_envelope;
use crate::error::{ChatError, Result};
use crate::fields::{CustomFieldSource, CustomFields};
use crate::pagination::build_load_more;
use crate::protocol::{EventType, ProtocolEvent};
use crate::types::{Attachment, ChatThread, Message, MessageDirection, OutboundMessage};
use crate::upload::AttachmentUploader;
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

#[derive(Clone)]
pub struct MessagePipeline {
    connection: Arc<dyn Connection>,
    uploader: AttachmentUploader,
    fields: Option<Arc<dyn CustomFieldSource>>,
}

impl MessagePipeline {
    pub fn new(connection: Arc<dyn Connection>, uploader: AttachmentUploader) -> Self {
        Self {
            connection,
            uploader,
            fields: None,
        }
    }

    pub fn with_field_source(mut self, fields: Arc<dyn CustomFieldSource>) -> Self {
        self.fields = Some(fields);
        self
    }

    /// Uploads the attachments, transmits the message and returns its local
    /// representation. The returned message shares its id with the envelope
    /// so the server echo can be matched against it.
    pub async fn send(&self, message: &OutboundMessage, thread: &ChatThread) -> Result<Message> {
        self.connection.check_for_connection()?;
        if message.text.trim().is_empty() && message.attachments.is_empty() {
            return Err(ChatError::missing("text"));
        }

        let context = self.connection.context();
        let customer = context
            .customer
            .clone()
            .ok_or_else(|| ChatError::missing("customer"))?;

        let customer_fields = self.customer_fields();
        let contact_fields = self.contact_fields(thread.id);

        let uploaded = self.uploader.upload(&message.attachments, &context).await?;
        let attachments: Vec<Attachment> = uploaded.iter().map(Attachment::from).collect();

        let envelope = build_envelope(
            message,
            thread,
            uploaded,
            &customer_fields,
            &contact_fields,
            &context,
            self.connection.access_token(),
        );
        let message_id = envelope.id;
        let content = envelope.message_content.payload.clone();

        let frame = ProtocolEvent::new(EventType::SendMessage, envelope, &context).encode()?;
        self.connection.send(frame).await?;
        info!(
            thread_id = %thread.id,
            message_id = %message_id,
            attachments = attachments.len(),
            "message sent"
        );

        Ok(Message {
            id: message_id,
            thread_id: thread.id,
            content,
            created_at: Utc::now(),
            attachments,
            direction: MessageDirection::Outbound,
            user_statistics: None,
            author_agent: thread.assigned_agent.clone(),
            author_customer: Some(customer),
        })
    }

    pub async fn load_more(&self, thread: &ChatThread) -> Result<()> {
        self.connection.check_for_connection()?;
        let request = build_load_more(thread)?;

        let context = self.connection.context();
        let frame = ProtocolEvent::new(EventType::LoadMoreMessages, request, &context).encode()?;
        self.connection.send(frame).await?;
        debug!(thread_id = %thread.id, "requested older messages");
        Ok(())
    }

    fn customer_fields(&self) -> CustomFields {
        let Some(source) = self.fields.as_ref() else {
            return CustomFields::new();
        };
        source.customer_fields().unwrap_or_else(|err| {
            warn!("customer custom fields unavailable: {err:?}");
            CustomFields::new()
        })
    }

    fn contact_fields(&self, thread_id: Uuid) -> CustomFields {
        let Some(source) = self.fields.as_ref() else {
            return CustomFields::new();
        };
        source.contact_fields(thread_id).unwrap_or_else(|err| {
            warn!(%thread_id, "contact custom fields unavailable: {err:?}");
            CustomFields::new()
        })
    }
}
