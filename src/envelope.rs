use crate::connection::{AccessToken, ConnectionContext, DeviceFingerprint};
use crate::fields::CustomFields;
use crate::types::{ChatThread, MessageContent, OutboundMessage, ThreadRef, UploadedAttachment};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const TEXT_CONTENT: &str = "TEXT";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvelopeContent {
    #[serde(rename = "type")]
    pub kind: String,
    pub payload: MessageContent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomFieldEntry {
    pub ident: String,
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomFieldSet {
    pub custom_fields: Vec<CustomFieldEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageEnvelope {
    pub thread: ThreadRef,
    pub message_content: EnvelopeContent,
    pub id: Uuid,
    pub customer: CustomFieldSet,
    pub consumer_contact: CustomFieldSet,
    pub attachments: Vec<UploadedAttachment>,
    pub browser_fingerprint: DeviceFingerprint,
    pub access_token: Option<AccessToken>,
}

pub fn filter_custom_fields(fields: &CustomFields) -> CustomFieldSet {
    let mut custom_fields: Vec<CustomFieldEntry> = fields
        .iter()
        .filter(|(_, field)| field.has_value())
        .filter_map(|(ident, field)| {
            field.value.as_ref().map(|value| CustomFieldEntry {
                ident: ident.clone(),
                value: value.clone(),
            })
        })
        .collect();
    custom_fields.sort_by(|a, b| a.ident.cmp(&b.ident));
    CustomFieldSet { custom_fields }
}

pub fn build_envelope(
    message: &OutboundMessage,
    thread: &ChatThread,
    uploaded: Vec<UploadedAttachment>,
    customer_fields: &CustomFields,
    contact_fields: &CustomFields,
    context: &ConnectionContext,
    access_token: Option<AccessToken>,
) -> MessageEnvelope {
    MessageEnvelope {
        thread: ThreadRef::from(thread),
        message_content: EnvelopeContent {
            kind: TEXT_CONTENT.to_string(),
            payload: MessageContent {
                text: message.text.clone(),
                postback: message.postback.clone(),
            },
        },
        id: Uuid::new_v4(),
        customer: filter_custom_fields(customer_fields),
        consumer_contact: filter_custom_fields(contact_fields),
        attachments: uploaded,
        browser_fingerprint: context.device_fingerprint.clone(),
        access_token,
    }
}
