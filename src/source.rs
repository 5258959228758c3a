use crate::error::{ChatError, Result};
use crate::types::AttachmentSource;
use bytes::Bytes;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// Access grant for locations outside the application's own storage.
/// `stop_accessing` is called exactly once for every successful
/// `start_accessing`.
pub trait ScopedAccess: Send + Sync {
    fn start_accessing(&self, location: &Path) -> bool;
    fn stop_accessing(&self, location: &Path);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct UnrestrictedAccess;

impl ScopedAccess for UnrestrictedAccess {
    fn start_accessing(&self, _location: &Path) -> bool {
        true
    }

    fn stop_accessing(&self, _location: &Path) {}
}

#[derive(Clone)]
pub struct DataSourceResolver {
    documents_dir: Option<PathBuf>,
    access: Arc<dyn ScopedAccess>,
}

impl Default for DataSourceResolver {
    fn default() -> Self {
        Self::new(None, Arc::new(UnrestrictedAccess))
    }
}

impl DataSourceResolver {
    pub fn new(documents_dir: Option<PathBuf>, access: Arc<dyn ScopedAccess>) -> Self {
        Self {
            documents_dir,
            access,
        }
    }

    // `..` components are not normalized by `starts_with`, so such paths never
    // count as private.
    pub fn is_private(&self, location: &Path) -> bool {
        if location
            .components()
            .any(|component| component == Component::ParentDir)
        {
            return false;
        }
        self.documents_dir
            .as_ref()
            .is_some_and(|dir| location.starts_with(dir))
    }

    pub async fn fetch(&self, source: &AttachmentSource) -> Result<Bytes> {
        match source {
            AttachmentSource::Memory(data) => Ok(data.clone()),
            AttachmentSource::Location(path) if self.is_private(path) => {
                debug!(path = %path.display(), "reading private document");
                let data = tokio::fs::read(path).await?;
                Ok(Bytes::from(data))
            }
            AttachmentSource::Location(path) => self.fetch_scoped(path.clone()).await,
        }
    }

    // Acquire, read and release run together on the blocking pool so the
    // release still happens if the awaiting future is dropped.
    async fn fetch_scoped(&self, path: PathBuf) -> Result<Bytes> {
        let access = Arc::clone(&self.access);
        let task = tokio::task::spawn_blocking(move || {
            if !access.start_accessing(&path) {
                return Err(ChatError::NoSuchFile(path.display().to_string()));
            }
            let read = std::fs::read(&path);
            access.stop_accessing(&path);
            read.map(Bytes::from).map_err(ChatError::from)
        });
        match task.await {
            Ok(result) => result,
            Err(join_err) => Err(ChatError::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                join_err,
            ))),
        }
    }
}
