use chat_outbound::config::{
    build_http_client, expand_tilde, load_config, resolve_config_path, resolve_documents_dir,
    ClientConfig, StorageConfig, UploadConfig,
};
use std::io::Write;
use std::path::PathBuf;

#[test]
fn test_default_config() {
    let cfg = ClientConfig::default();
    assert_eq!(cfg.upload.max_concurrent_uploads, 4);
    assert_eq!(cfg.upload.timeout_seconds, 60);
    assert_eq!(cfg.logging.filter, "info");
    assert!(cfg.logging.ansi);
    assert_eq!(
        cfg.storage.documents_dir.as_deref(),
        Some("~/.chat-outbound/documents")
    );
}

#[test]
fn test_partial_json_uses_defaults() {
    let cfg: ClientConfig = serde_json::from_str(r#"{"upload":{"max_concurrent_uploads":2}}"#).unwrap();
    assert_eq!(cfg.upload.max_concurrent_uploads, 2);
    assert_eq!(cfg.upload.timeout_seconds, 60);
    assert_eq!(cfg.logging.filter, "info");
}

#[test]
fn test_empty_json_is_default() {
    let cfg: ClientConfig = serde_json::from_str("{}").unwrap();
    assert_eq!(cfg.upload.max_concurrent_uploads, 4);
    assert!(cfg.storage.documents_dir.is_some());
}

#[test]
fn test_expand_tilde_relative() {
    assert_eq!(expand_tilde("relative/dir"), PathBuf::from("relative/dir"));
}

#[test]
fn test_resolve_documents_dir_absolute() {
    let cfg = StorageConfig {
        documents_dir: Some("/var/app/docs".to_string()),
    };
    assert_eq!(
        resolve_documents_dir(&cfg),
        Some(PathBuf::from("/var/app/docs"))
    );
}

#[test]
fn test_build_http_client_zero_timeout() {
    let cfg = UploadConfig {
        max_concurrent_uploads: 1,
        timeout_seconds: 0,
    };
    assert!(build_http_client(&cfg).is_ok());
}

// Environment is process-wide, so every env-driven case lives in one test.
#[test]
fn test_load_config_file_and_env_overrides() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{"upload":{{"max_concurrent_uploads":3,"timeout_seconds":10}},"logging":{{"filter":"debug","ansi":false}}}}"#
    )
    .unwrap();

    std::env::set_var("CHAT_OUTBOUND_CONFIG", file.path());
    std::env::remove_var("CHAT_OUTBOUND_LOG");
    std::env::remove_var("CHAT_OUTBOUND_UPLOAD_CONCURRENCY");
    std::env::remove_var("CHAT_OUTBOUND_UPLOAD_TIMEOUT_SECS");
    std::env::remove_var("CHAT_OUTBOUND_DOCUMENTS_DIR");
    assert_eq!(resolve_config_path(), file.path().to_path_buf());

    let cfg = load_config();
    assert_eq!(cfg.upload.max_concurrent_uploads, 3);
    assert_eq!(cfg.upload.timeout_seconds, 10);
    assert_eq!(cfg.logging.filter, "debug");
    assert!(!cfg.logging.ansi);

    std::env::set_var("CHAT_OUTBOUND_LOG", "chat_outbound=trace");
    std::env::set_var("CHAT_OUTBOUND_UPLOAD_CONCURRENCY", "8");
    std::env::set_var("CHAT_OUTBOUND_UPLOAD_TIMEOUT_SECS", "not-a-number");
    std::env::set_var("CHAT_OUTBOUND_DOCUMENTS_DIR", "/srv/docs");
    let cfg = load_config();
    assert_eq!(cfg.logging.filter, "chat_outbound=trace");
    assert_eq!(cfg.upload.max_concurrent_uploads, 8);
    assert_eq!(cfg.upload.timeout_seconds, 10);
    assert_eq!(cfg.storage.documents_dir.as_deref(), Some("/srv/docs"));

    std::env::set_var("CHAT_OUTBOUND_UPLOAD_CONCURRENCY", "0");
    std::env::set_var("CHAT_OUTBOUND_LOG", "   ");
    let cfg = load_config();
    assert_eq!(cfg.upload.max_concurrent_uploads, 3);
    assert_eq!(cfg.logging.filter, "debug");

    std::env::set_var("CHAT_OUTBOUND_CONFIG", "/definitely/missing/config.json");
    std::env::remove_var("CHAT_OUTBOUND_LOG");
    std::env::remove_var("CHAT_OUTBOUND_UPLOAD_CONCURRENCY");
    std::env::remove_var("CHAT_OUTBOUND_UPLOAD_TIMEOUT_SECS");
    std::env::remove_var("CHAT_OUTBOUND_DOCUMENTS_DIR");
    let cfg = load_config();
    assert_eq!(cfg.upload.max_concurrent_uploads, 4);

    std::env::remove_var("CHAT_OUTBOUND_CONFIG");
}
