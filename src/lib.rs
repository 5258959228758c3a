pub mod config;
pub mod connection;
pub mod envelope;
pub mod error;
pub mod fields;
pub mod logging;
pub mod pagination;
pub mod pipeline;
pub mod protocol;
pub mod source;
pub mod types;
pub mod upload;

pub use config::ClientConfig;
pub use connection::{AccessToken, ChannelConnection, Connection, ConnectionContext, DeviceFingerprint};
pub use error::{ChatError, Result};
pub use fields::{CustomField, CustomFieldSource, StaticFieldSource};
pub use pipeline::MessagePipeline;
pub use source::{DataSourceResolver, ScopedAccess, UnrestrictedAccess};
pub use types::{
    AttachmentDescriptor, AttachmentSource, ChatThread, Message, MessageDirection,
    OutboundMessage, UploadedAttachment,
};
pub use upload::AttachmentUploader;
