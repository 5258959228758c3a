use crate::error::{ChatError, Result};
use crate::types::CustomerIdentity;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;
use tokio::sync::mpsc;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceFingerprint {
    pub device_token: Option<String>,
    pub device_type: Option<String>,
    pub application_type: String,
    pub os: Option<String>,
    pub os_version: Option<String>,
    pub language: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessToken {
    pub token: String,
}

#[derive(Debug, Clone)]
pub struct ConnectionContext {
    pub chat_url: String,
    pub brand_id: i64,
    pub channel_id: String,
    pub device_fingerprint: DeviceFingerprint,
    pub customer: Option<CustomerIdentity>,
    pub http: reqwest::Client,
}

/// The already-established bidirectional connection. Its lifecycle belongs to
/// the transport layer; the pipeline only checks it and hands it frames.
#[async_trait]
pub trait Connection: Send + Sync {
    fn check_for_connection(&self) -> Result<()>;
    fn context(&self) -> ConnectionContext;
    fn access_token(&self) -> Option<AccessToken>;
    async fn send(&self, frame: String) -> Result<()>;
}

pub struct ChannelConnection {
    tx: mpsc::Sender<String>,
    connected: AtomicBool,
    context: RwLock<ConnectionContext>,
    access_token: RwLock<Option<AccessToken>>,
}

impl ChannelConnection {
    pub fn new(context: ConnectionContext, buffer: usize) -> (Self, mpsc::Receiver<String>) {
        let (tx, rx) = mpsc::channel(buffer.max(1));
        let conn = Self {
            tx,
            connected: AtomicBool::new(false),
            context: RwLock::new(context),
            access_token: RwLock::new(None),
        };
        (conn, rx)
    }

    pub fn set_connected(&self, connected: bool) {
        self.connected.store(connected, Ordering::SeqCst);
    }

    pub fn set_access_token(&self, token: Option<AccessToken>) {
        let mut guard = self
            .access_token
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = token;
    }

    pub fn set_customer(&self, customer: Option<CustomerIdentity>) {
        let mut guard = self
            .context
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        guard.customer = customer;
    }
}

#[async_trait]
impl Connection for ChannelConnection {
    fn check_for_connection(&self) -> Result<()> {
        if self.connected.load(Ordering::SeqCst) && !self.tx.is_closed() {
            Ok(())
        } else {
            Err(ChatError::NotConnected)
        }
    }

    fn context(&self) -> ConnectionContext {
        self.context
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn access_token(&self) -> Option<AccessToken> {
        self.access_token
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    async fn send(&self, frame: String) -> Result<()> {
        if self.tx.send(frame).await.is_err() {
            self.set_connected(false);
            return Err(ChatError::NotConnected);
        }
        Ok(())
    }
}
