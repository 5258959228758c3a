use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub upload: UploadConfig,
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadConfig {
    pub max_concurrent_uploads: usize,
    pub timeout_seconds: u64,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_concurrent_uploads: 4,
            timeout_seconds: 60,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub documents_dir: Option<String>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            documents_dir: Some("~/.chat-outbound/documents".to_string()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub filter: String,
    pub ansi: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            ansi: true,
        }
    }
}

pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}

pub fn resolve_config_path() -> PathBuf {
    env::var("CHAT_OUTBOUND_CONFIG")
        .ok()
        .map(PathBuf::from)
        .unwrap_or_else(|| expand_tilde("~/.chat-outbound/config.json"))
}

pub fn load_config() -> ClientConfig {
    let config_path = resolve_config_path();

    let mut cfg = ClientConfig::default();

    if config_path.exists() {
        if let Ok(raw) = fs::read_to_string(&config_path) {
            if let Ok(file_cfg) = serde_json::from_str::<ClientConfig>(&raw) {
                cfg = file_cfg;
            }
        }
    }

    apply_env_overrides(&mut cfg);
    cfg
}

fn apply_env_overrides(cfg: &mut ClientConfig) {
    if let Ok(filter) = env::var("CHAT_OUTBOUND_LOG") {
        if !filter.trim().is_empty() {
            cfg.logging.filter = filter;
        }
    }

    if let Ok(raw) = env::var("CHAT_OUTBOUND_UPLOAD_CONCURRENCY") {
        if let Ok(n) = raw.trim().parse::<usize>() {
            if n > 0 {
                cfg.upload.max_concurrent_uploads = n;
            }
        }
    }

    if let Ok(raw) = env::var("CHAT_OUTBOUND_UPLOAD_TIMEOUT_SECS") {
        if let Ok(secs) = raw.trim().parse::<u64>() {
            if secs > 0 {
                cfg.upload.timeout_seconds = secs;
            }
        }
    }

    if let Ok(dir) = env::var("CHAT_OUTBOUND_DOCUMENTS_DIR") {
        if !dir.trim().is_empty() {
            cfg.storage.documents_dir = Some(dir);
        }
    }
}

pub fn resolve_documents_dir(cfg: &StorageConfig) -> Option<PathBuf> {
    cfg.documents_dir
        .as_deref()
        .filter(|dir| !dir.trim().is_empty())
        .map(expand_tilde)
}

pub fn build_http_client(cfg: &UploadConfig) -> anyhow::Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(cfg.timeout_seconds.max(1)))
        .build()?;
    Ok(client)
}
