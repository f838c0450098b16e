//! Blob storage for uploaded model files.

use anyhow::{anyhow, Context, Result};
use reqwest::Client;
use shared::settings::StorageSettings;
use std::env;
use std::time::Duration;
use url::Url;

#[derive(Debug, Clone)]
pub struct UploadRequest {
    /// Object path inside the bucket, e.g. `vrm-analysis/alice.vrm`
    pub path: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct UploadOptions {
    /// Replace an existing object at the same path.
    pub upsert: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub path: String,
    pub public_url: String,
}

#[async_trait::async_trait]
pub trait BlobStorage: Send + Sync {
    async fn upload(&self, request: UploadRequest, options: UploadOptions) -> Result<StoredObject>;
}

/// `prefix/name`, keeping only the final component of `name`.
pub fn object_path(prefix: &str, name: &str) -> String {
    let file_name = name.rsplit(['/', '\\']).next().unwrap_or(name);
    let prefix = prefix.trim_matches('/');
    if prefix.is_empty() {
        file_name.to_string()
    } else {
        format!("{}/{}", prefix, file_name)
    }
}

/// Object storage reached over HTTP.
///
/// Uploads go to `POST {base}/storage/v1/object/{bucket}/{path}` and are
/// served from `{base}/storage/v1/object/public/{bucket}/{path}`.
pub struct HttpBlobStorage {
    http: Client,
    base_url: Url,
    bucket: String,
    api_key: Option<String>,
}

impl HttpBlobStorage {
    pub fn from_settings(settings: &StorageSettings) -> Result<Self> {
        let base = settings
            .base_url
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| anyhow!("Storage is not configured: missing base URL"))?;
        let base_url = Url::parse(base).with_context(|| format!("invalid storage URL {}", base))?;
        if base_url.cannot_be_a_base() {
            return Err(anyhow!("invalid storage URL {}", base));
        }

        let api_key = settings
            .api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            // Try environment variable as fallback
            .or_else(|| env::var("STORAGE_API_KEY").ok());

        Ok(Self {
            http: Client::builder().timeout(Duration::from_secs(120)).build()?,
            base_url,
            bucket: settings.bucket.clone(),
            api_key,
        })
    }

    fn object_url(&self, public: bool, path: &str) -> Result<Url> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| anyhow!("storage URL cannot hold a path"))?;
            segments.pop_if_empty().extend(["storage", "v1", "object"]);
            if public {
                segments.push("public");
            }
            segments.push(&self.bucket);
            segments.extend(path.split('/').filter(|s| !s.is_empty()));
        }
        Ok(url)
    }

    pub fn upload_url(&self, path: &str) -> Result<Url> {
        self.object_url(false, path)
    }

    pub fn public_url(&self, path: &str) -> Result<Url> {
        self.object_url(true, path)
    }
}

#[async_trait::async_trait]
impl BlobStorage for HttpBlobStorage {
    async fn upload(&self, request: UploadRequest, options: UploadOptions) -> Result<StoredObject> {
        let url = self.upload_url(&request.path)?;
        let size = request.bytes.len();

        let mut builder = self
            .http
            .post(url)
            .header("Content-Type", request.content_type.as_str())
            .header("x-upsert", if options.upsert { "true" } else { "false" })
            .body(request.bytes);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }

        let resp = builder.send().await.context("storage upload failed")?;
        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(anyhow!("storage error: {} {}", status, body.trim()));
        }

        tracing::info!(path = %request.path, size, "uploaded model file");
        Ok(StoredObject {
            public_url: self.public_url(&request.path)?.to_string(),
            path: request.path,
        })
    }
}

/// Stands in when no storage endpoint is configured; every upload fails.
pub struct UnconfiguredStorage;

#[async_trait::async_trait]
impl BlobStorage for UnconfiguredStorage {
    async fn upload(&self, request: UploadRequest, _options: UploadOptions) -> Result<StoredObject> {
        Err(anyhow!(
            "Storage is not configured, cannot upload {}",
            request.path
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn storage(base: &str) -> HttpBlobStorage {
        HttpBlobStorage::from_settings(&StorageSettings {
            base_url: Some(base.into()),
            api_key: Some("key".into()),
            ..StorageSettings::default()
        })
        .unwrap()
    }

    #[test]
    fn test_object_path() {
        assert_eq!(object_path("vrm-analysis", "alice.vrm"), "vrm-analysis/alice.vrm");
        assert_eq!(object_path("/vrm-analysis/", "dir/alice.vrm"), "vrm-analysis/alice.vrm");
        assert_eq!(object_path("", "C:\\models\\bob.glb"), "bob.glb");
    }

    #[test]
    fn test_urls() {
        let s = storage("https://store.example.com/");
        assert_eq!(
            s.upload_url("vrm-analysis/alice.vrm").unwrap().as_str(),
            "https://store.example.com/storage/v1/object/uploads/vrm-analysis/alice.vrm"
        );
        assert_eq!(
            s.public_url("vrm-analysis/My Model.vrm").unwrap().as_str(),
            "https://store.example.com/storage/v1/object/public/uploads/vrm-analysis/My%20Model.vrm"
        );
    }

    #[test]
    fn test_base_url_required() {
        let err = HttpBlobStorage::from_settings(&StorageSettings::default())
            .err()
            .map(|e| e.to_string())
            .unwrap_or_default();
        assert!(err.contains("missing base URL"));
        assert!(HttpBlobStorage::from_settings(&StorageSettings {
            base_url: Some("not a url".into()),
            ..StorageSettings::default()
        })
        .is_err());
    }

    #[tokio::test]
    async fn test_unconfigured_storage_rejects_uploads() {
        let err = UnconfiguredStorage
            .upload(
                UploadRequest {
                    path: "vrm-analysis/a.vrm".into(),
                    content_type: "model/gltf-binary".into(),
                    bytes: vec![1, 2, 3],
                },
                UploadOptions { upsert: true },
            )
            .await
            .unwrap_err();
        assert!(err.to_string().contains("not configured"));
    }
}
