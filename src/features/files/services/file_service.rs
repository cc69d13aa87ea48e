use std::sync::Arc;

use tokio::fs::File;
use tracing::info;

use crate::core::error::Result;
use crate::modules::storage::LocalFileStore;
use crate::shared::types::UploadedFile;

/// Service for raw poster files, independent of movie records
pub struct FileService {
    store: Arc<LocalFileStore>,
}

impl FileService {
    pub fn new(store: Arc<LocalFileStore>) -> Self {
        Self { store }
    }

    /// Store an upload under its own name, replacing any existing file.
    ///
    /// Returns the stored name.
    pub async fn upload(&self, file: UploadedFile) -> Result<String> {
        let name = self.store.store(&file.file_name, &file.data).await?;
        info!(
            "File uploaded: {} ({} bytes, {})",
            name,
            file.data.len(),
            file.content_type.as_deref().unwrap_or("unknown type")
        );
        Ok(name)
    }

    /// Open a stored file with its length in bytes
    pub async fn open(&self, name: &str) -> Result<(File, u64)> {
        self.store.open(name).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::AppError;
    use crate::shared::test_helpers::upload;
    use tokio::io::AsyncReadExt;

    #[tokio::test]
    async fn test_upload_replaces_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let service = FileService::new(Arc::new(LocalFileStore::new(dir.path())));

        assert_eq!(service.upload(upload("a.jpg", b"one")).await.unwrap(), "a.jpg");
        service.upload(upload("a.jpg", b"two")).await.unwrap();

        let (mut file, len) = service.open("a.jpg").await.unwrap();
        let mut buf = Vec::new();
        file.read_to_end(&mut buf).await.unwrap();
        assert_eq!(buf, b"two");
        assert_eq!(len, 3);
    }

    #[tokio::test]
    async fn test_open_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let service = FileService::new(Arc::new(LocalFileStore::new(dir.path())));

        assert!(matches!(
            service.open("nope.jpg").await,
            Err(AppError::NotFound(_))
        ));
    }
}
