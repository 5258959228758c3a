use crate::config::{resolve_documents_dir, ClientConfig};
use crate::connection::ConnectionContext;
use crate::error::{ChatError, Result};
use crate::source::{DataSourceResolver, ScopedAccess};
use crate::types::{AttachmentDescriptor, UploadedAttachment};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use futures::stream::{self, StreamExt, TryStreamExt};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct UploadRequest<'a> {
    content: String,
    file_name: &'a str,
    mime_type: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UploadResponse {
    file_url: String,
}

pub fn upload_url(context: &ConnectionContext) -> Result<Url> {
    let base = context.chat_url.trim().trim_end_matches('/');
    let channel = context.channel_id.trim();
    if base.is_empty() || channel.is_empty() {
        return Err(ChatError::missing("uploadUrl"));
    }
    let raw = format!(
        "{}/1.0/brand/{}/channel/{}/attachment",
        base,
        context.brand_id,
        utf8_percent_encode(channel, PATH_SEGMENT)
    );
    let url = Url::parse(&raw).map_err(|_| ChatError::missing("uploadUrl"))?;
    if url.cannot_be_a_base() {
        return Err(ChatError::missing("uploadUrl"));
    }
    Ok(url)
}

pub fn ensure_complete(
    requested: usize,
    uploaded: Vec<UploadedAttachment>,
) -> Result<Vec<UploadedAttachment>> {
    if uploaded.len() < requested {
        warn!(
            requested,
            uploaded = uploaded.len(),
            "attachment upload came back short"
        );
        return Err(ChatError::AttachmentError);
    }
    Ok(uploaded)
}

#[derive(Clone)]
pub struct AttachmentUploader {
    resolver: DataSourceResolver,
    max_concurrent: usize,
}

impl Default for AttachmentUploader {
    fn default() -> Self {
        Self::new(DataSourceResolver::default(), 1)
    }
}

impl AttachmentUploader {
    pub fn new(resolver: DataSourceResolver, max_concurrent: usize) -> Self {
        Self {
            resolver,
            max_concurrent: max_concurrent.max(1),
        }
    }

    pub fn from_config(cfg: &ClientConfig, access: Arc<dyn ScopedAccess>) -> Self {
        let resolver = DataSourceResolver::new(resolve_documents_dir(&cfg.storage), access);
        Self::new(resolver, cfg.upload.max_concurrent_uploads)
    }

    // Results keep input order. The first failure drops in-flight siblings.
    pub async fn upload(
        &self,
        descriptors: &[AttachmentDescriptor],
        context: &ConnectionContext,
    ) -> Result<Vec<UploadedAttachment>> {
        if descriptors.is_empty() {
            return Ok(Vec::new());
        }
        let url = upload_url(context)?;

        let uploaded: Vec<UploadedAttachment> = stream::iter(descriptors)
            .map(|descriptor| self.upload_one(&context.http, &url, descriptor))
            .buffered(self.max_concurrent)
            .try_collect()
            .await?;

        ensure_complete(descriptors.len(), uploaded)
    }

    async fn upload_one(
        &self,
        http: &Client,
        url: &Url,
        descriptor: &AttachmentDescriptor,
    ) -> Result<UploadedAttachment> {
        let data = self.resolver.fetch(&descriptor.source).await?;
        let file_name = descriptor.file_name();
        debug!(file_name = %file_name, size = data.len(), "uploading attachment");

        let body = UploadRequest {
            content: STANDARD.encode(&data),
            file_name: &file_name,
            mime_type: &descriptor.mime_type,
        };
        let resp = http.post(url.clone()).json(&body).send().await?;
        let status = resp.status();
        if !status.is_success() {
            warn!(file_name = %file_name, status = status.as_u16(), "attachment upload rejected");
            return Err(ChatError::ServerError {
                status: status.as_u16(),
            });
        }

        let raw = resp.bytes().await?;
        let decoded: UploadResponse =
            serde_json::from_slice(&raw).map_err(|_| ChatError::missing("decodedData"))?;

        Ok(UploadedAttachment {
            url: decoded.file_url,
            friendly_name: descriptor.friendly_name.clone(),
            mime_type: descriptor.mime_type.clone(),
            file_name,
        })
    }
}
