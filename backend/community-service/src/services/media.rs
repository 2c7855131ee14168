//! Image uploads to blob storage

use crate::error::{AppError, Result};
use remote_store::RemoteStore;

pub struct MediaService {
    store: RemoteStore,
    max_bytes: usize,
}

impl MediaService {
    pub fn new(store: RemoteStore, max_bytes: usize) -> Self {
        Self { store, max_bytes }
    }

    /// Upload an image and return its public URL
    pub async fn upload(
        &self,
        bucket: &str,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String> {
        check_upload(content_type, bytes.len(), self.max_bytes)?;

        let url = self
            .store
            .storage()
            .upload(bucket, path, bytes, content_type)
            .await?;

        Ok(url)
    }
}

fn check_upload(content_type: &str, size: usize, max_bytes: usize) -> Result<()> {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    if !essence.starts_with("image/") {
        return Err(AppError::Validation(format!(
            "only images can be uploaded, got '{}'",
            content_type
        )));
    }
    if size == 0 {
        return Err(AppError::Validation("upload is empty".to_string()));
    }
    if size > max_bytes {
        return Err(AppError::Validation(format!(
            "upload of {} bytes exceeds the {} byte limit",
            size, max_bytes
        )));
    }
    Ok(())
}
