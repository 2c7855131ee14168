//! Blob storage: single-shot uploads returning a public URL

use crate::client::{check, RemoteStore};
use crate::error::{Result, StoreError};
use reqwest::header::CONTENT_TYPE;
use reqwest::Method;
use tracing::info;

pub struct Storage {
    store: RemoteStore,
}

impl Storage {
    pub(crate) fn new(store: RemoteStore) -> Self {
        Self { store }
    }

    /// Upload `bytes` to `bucket/path` and return its public URL.
    ///
    /// No retry and no chunking; an existing object at the same path is an error.
    pub async fn upload(
        &self,
        bucket: &str,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String> {
        let object = object_path(bucket, path)?;
        let size = bytes.len();

        let response = self
            .store
            .request(Method::POST, &self.store.storage_url(&format!("object/{}", object)))
            .header(CONTENT_TYPE, content_type)
            .header("x-upsert", "false")
            .body(bytes)
            .send()
            .await?;
        check(response).await?;

        info!(bucket, path, size, "Uploaded object to remote storage");
        Ok(self.public_url_for(&object))
    }

    pub fn public_url(&self, bucket: &str, path: &str) -> Result<String> {
        Ok(self.public_url_for(&object_path(bucket, path)?))
    }

    fn public_url_for(&self, object: &str) -> String {
        self.store
            .storage_url(&format!("object/public/{}", object))
    }
}

/// `bucket/seg/seg` with every segment percent-encoded
fn object_path(bucket: &str, path: &str) -> Result<String> {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    if bucket.is_empty() || segments.is_empty() || segments.iter().any(|s| *s == "..") {
        return Err(StoreError::InvalidConfig(format!(
            "invalid object path '{}/{}'",
            bucket, path
        )));
    }

    let mut encoded = vec![urlencoding::encode(bucket).into_owned()];
    encoded.extend(segments.iter().map(|s| urlencoding::encode(s).into_owned()));
    Ok(encoded.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_path_encoding() {
        assert_eq!(
            object_path("media", "news/2024 photo.png").unwrap(),
            "media/news/2024%20photo.png"
        );
        assert_eq!(object_path("media", "/a//b").unwrap(), "media/a/b");
        assert!(object_path("media", "../secret").is_err());
        assert!(object_path("", "a.png").is_err());
        assert!(object_path("media", "").is_err());
    }
}
