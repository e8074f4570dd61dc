use async_trait::async_trait;
use log::{error, info, warn};
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FileStoreError {
    #[error("duplicate")]
    Duplicate,
    #[error("not_found")]
    NotFound,
    #[error("other: {0}")]
    Other(String),
}

/// Object storage for uploaded media. Keys are content addressed
/// (`{folder}/{hash prefix}/{hash}.{ext}`), so saving the same bytes twice
/// surfaces as `Duplicate` and callers can hand back the existing URL.
#[async_trait]
pub trait FileStore: Send + Sync {
    async fn save(&self, key: &str, bytes: &[u8]) -> Result<(), FileStoreError>;
    async fn load(&self, key: &str) -> Result<(Vec<u8>, String), FileStoreError>;
    async fn delete(&self, key: &str) -> Result<(), FileStoreError>;
    /// Absolute or site-relative URL clients use to fetch the object.
    fn public_url(&self, key: &str) -> String;
}

pub fn object_key(folder: &str, hash: &str, ext: &str) -> String {
    format!("{}/{}/{}.{}", folder, &hash[0..2], hash, ext)
}

fn valid_key(key: &str) -> bool {
    !key.is_empty() && key.split('/').all(|seg| !seg.is_empty() && seg != "." && seg != "..")
}

// ---------------- Local filesystem implementation (default) ----------------

pub struct FsFileStore {
    root: PathBuf,
    public_base: String,
}

impl FsFileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let public_base = std::env::var("PUBLIC_FILES_BASE").unwrap_or_default();
        Self { root: root.into(), public_base }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(key)
    }
}

#[async_trait]
impl FileStore for FsFileStore {
    async fn save(&self, key: &str, bytes: &[u8]) -> Result<(), FileStoreError> {
        if !valid_key(key) {
            return Err(FileStoreError::Other(format!("invalid key '{key}'")));
        }
        let path = self.path_for(key);
        if tokio::fs::try_exists(&path).await.unwrap_or(false) {
            return Err(FileStoreError::Duplicate);
        }
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| FileStoreError::Other(e.to_string()))?;
        }
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| FileStoreError::Other(e.to_string()))
    }

    async fn load(&self, key: &str) -> Result<(Vec<u8>, String), FileStoreError> {
        if !valid_key(key) {
            return Err(FileStoreError::NotFound);
        }
        let bytes = tokio::fs::read(self.path_for(key))
            .await
            .map_err(|_| FileStoreError::NotFound)?;
        let mime = infer::get(&bytes)
            .map(|t| t.mime_type().to_string())
            .unwrap_or_else(|| "application/octet-stream".into());
        Ok((bytes, mime))
    }

    async fn delete(&self, key: &str) -> Result<(), FileStoreError> {
        if !valid_key(key) {
            return Ok(());
        }
        // Best-effort delete: treat not found as success
        let _ = tokio::fs::remove_file(self.path_for(key)).await;
        Ok(())
    }

    fn public_url(&self, key: &str) -> String {
        if self.public_base.is_empty() {
            format!("/files/{}", key)
        } else {
            format!("{}/{}", self.public_base.trim_end_matches('/'), key)
        }
    }
}

// ---------------- S3 implementation (MinIO compatible) ----------------

pub struct S3FileStore {
    bucket: String,
    client: aws_sdk_s3::Client,
    public_base: String,
}

impl S3FileStore {
    pub async fn new() -> anyhow::Result<Self> {
        use aws_credential_types::provider::SharedCredentialsProvider;
        use aws_credential_types::Credentials;

        let bucket = std::env::var("S3_BUCKET").unwrap_or_else(|_| "reportal-uploads".into());
        let endpoint = std::env::var("S3_ENDPOINT")
            .map_err(|_| anyhow::anyhow!("S3_ENDPOINT must be set (MinIO / S3 endpoint)"))?;
        let region = std::env::var("S3_REGION").unwrap_or_else(|_| "us-east-1".into());
        let access = std::env::var("S3_ACCESS_KEY").unwrap_or_default();
        let secret = std::env::var("S3_SECRET_KEY").unwrap_or_default();
        let public_base = std::env::var("PUBLIC_FILES_BASE")
            .unwrap_or_else(|_| format!("{}/{}", endpoint.trim_end_matches('/'), bucket));

        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(aws_sdk_s3::config::Region::new(region.clone()))
            .endpoint_url(endpoint);
        if !access.is_empty() && !secret.is_empty() {
            let creds = Credentials::new(access, secret, None, None, "static");
            loader = loader.credentials_provider(SharedCredentialsProvider::new(creds));
        }
        let conf = loader.load().await;
        // MinIO and most local endpoints lack wildcard DNS, so address by path
        let s3_conf = aws_sdk_s3::config::Builder::from(&conf)
            .force_path_style(true)
            .build();
        let client = aws_sdk_s3::Client::from_conf(s3_conf);
        info!("S3 client ready (path-style, bucket '{bucket}')");

        ensure_bucket(&client, &bucket, &region).await?;
        Ok(Self { bucket, client, public_base })
    }
}

/// Create the bucket when a HEAD says it is missing. MinIO in docker-compose
/// can come up after this process, so creation retries with growing pauses.
async fn ensure_bucket(client: &aws_sdk_s3::Client, bucket: &str, region: &str) -> anyhow::Result<()> {
    if client.head_bucket().bucket(bucket).send().await.is_ok() {
        return Ok(());
    }
    warn!("bucket '{bucket}' not reachable yet, creating");
    let mut attempt = 0u32;
    loop {
        attempt += 1;
        let err = match client.create_bucket().bucket(bucket).send().await {
            Ok(_) => {
                info!("created bucket '{bucket}' on attempt {attempt}");
                return Ok(());
            }
            Err(e) => e,
        };
        if attempt >= 8 {
            error!("create_bucket gave up on '{bucket}' after {attempt} attempts: {err:?}");
            let hint = if region != "us-east-1" {
                " (non-us-east-1 endpoints may need a CreateBucketConfiguration)"
            } else {
                ""
            };
            return Err(anyhow::anyhow!("failed to ensure bucket '{bucket}': {err}{hint}"));
        }
        let pause = std::time::Duration::from_millis(u64::from(200 * attempt * attempt));
        warn!("create_bucket attempt {attempt} for '{bucket}' failed: {err:?}, next try in {pause:?}");
        tokio::time::sleep(pause).await;
    }
}

#[async_trait]
impl FileStore for S3FileStore {
    async fn save(&self, key: &str, bytes: &[u8]) -> Result<(), FileStoreError> {
        use aws_sdk_s3::primitives::ByteStream;
        if !valid_key(key) {
            return Err(FileStoreError::Other(format!("invalid key '{key}'")));
        }
        // HEAD first to detect duplicate
        if self
            .client
            .head_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .is_ok()
        {
            return Err(FileStoreError::Duplicate);
        }
        let put = self
            .client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(bytes.to_vec()))
            // Content type helps when serving directly from S3/MinIO
            .content_type(
                infer::get(bytes)
                    .map(|t| t.mime_type().to_string())
                    .unwrap_or_else(|| "application/octet-stream".into()),
            );
        if let Err(e) = put.send().await {
            error!(
                "put_object failed key={key} bucket={} err={:?}",
                self.bucket, e
            );
            let hint = if e.to_string().contains("NoSuchBucket") {
                " (bucket missing or not yet propagated)"
            } else if e.to_string().contains("AccessDenied") {
                " (check S3_ACCESS_KEY/S3_SECRET_KEY permissions)"
            } else {
                ""
            };
            return Err(FileStoreError::Other(format!("{}{}", e, hint)));
        }
        Ok(())
    }

    async fn load(&self, key: &str) -> Result<(Vec<u8>, String), FileStoreError> {
        if !valid_key(key) {
            return Err(FileStoreError::NotFound);
        }
        let obj = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|_| FileStoreError::NotFound)?;
        let data = obj
            .body
            .collect()
            .await
            .map_err(|e| FileStoreError::Other(e.to_string()))?;
        // ContentType may be None; fall back to sniffing
        let bytes = Vec::from(data.into_bytes().as_ref());
        let mime = infer::get(&bytes)
            .map(|t| t.mime_type().to_string())
            .unwrap_or_else(|| "application/octet-stream".into());
        Ok((bytes, mime))
    }

    async fn delete(&self, key: &str) -> Result<(), FileStoreError> {
        // Missing objects count as deleted
        let _ = self
            .client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await;
        Ok(())
    }

    fn public_url(&self, key: &str) -> String {
        format!("{}/{}", self.public_base.trim_end_matches('/'), key)
    }
}

/// Backend selection for main: `STORAGE_BACKEND=s3` for object storage,
/// anything else (or unset) stores under `FILES_DIR` on local disk.
pub async fn build_file_store() -> anyhow::Result<Arc<dyn FileStore>> {
    match std::env::var("STORAGE_BACKEND").unwrap_or_else(|_| "fs".into()).as_str() {
        "s3" => Ok(Arc::new(S3FileStore::new().await?)),
        _ => {
            let root = std::env::var("FILES_DIR").unwrap_or_else(|_| "./data/files".into());
            Ok(Arc::new(FsFileStore::new(root)))
        }
    }
}
