//! S3 storage backend implementation

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_s3::config::{Credentials, Region};
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;
use std::sync::Arc;
use tracing::{debug, info};

use crate::storage::{
    config::S3Config,
    error::{StorageError, StorageResult},
    traits::{BatchSource, SummarySink},
};

/// One object in an S3 bucket, usable as batch source or summary sink
#[derive(Clone)]
pub struct S3Backend {
    client: Arc<Client>,
    bucket: String,
    key: String,
}

impl S3Backend {
    /// Create new S3 backend for `key` inside the configured bucket
    pub async fn new(config: &S3Config, key: impl Into<String>) -> StorageResult<Self> {
        info!("Initializing S3 backend for bucket {}", config.bucket);

        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()));

        if let Some(ref endpoint) = config.endpoint {
            loader = loader.endpoint_url(endpoint);
        }

        match (&config.access_key_id, &config.secret_access_key) {
            (Some(access_key), Some(secret_key)) => {
                loader = loader.credentials_provider(Credentials::new(
                    access_key.clone(),
                    secret_key.clone(),
                    None,
                    None,
                    "tweetflow-config",
                ));
            }
            (None, None) => {}
            _ => {
                return Err(StorageError::configuration(
                    "access_key_id and secret_access_key must be set together",
                ))
            }
        }

        let shared = loader.load().await;
        let s3_config = aws_sdk_s3::config::Builder::from(&shared)
            .force_path_style(config.force_path_style)
            .build();

        Ok(Self {
            client: Arc::new(Client::from_conf(s3_config)),
            bucket: config.bucket.clone(),
            key: key.into(),
        })
    }

    fn uri(&self) -> String {
        format!("s3://{}/{}", self.bucket, self.key)
    }
}

#[async_trait]
impl BatchSource for S3Backend {
    fn location(&self) -> String {
        self.uri()
    }

    async fn fetch_batch(&self) -> StorageResult<Vec<u8>> {
        debug!("Fetching {}", self.uri());

        let result = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(&self.key)
            .send()
            .await
            .map_err(|e| {
                let no_such_key = e
                    .as_service_error()
                    .map(|se| se.is_no_such_key())
                    .unwrap_or(false);
                if no_such_key {
                    StorageError::not_found(self.uri())
                } else {
                    StorageError::unavailable(format!("Failed to fetch {}: {}", self.uri(), e))
                }
            })?;

        let bytes = result
            .body
            .collect()
            .await
            .map_err(|e| StorageError::backend(format!("Failed to read {}: {}", self.uri(), e)))?
            .into_bytes();

        Ok(bytes.to_vec())
    }
}

#[async_trait]
impl SummarySink for S3Backend {
    fn location(&self) -> String {
        self.uri()
    }

    async fn write_summary(&self, body: &[u8]) -> StorageResult<()> {
        debug!("Uploading {} bytes to {}", body.len(), self.uri());

        // A single PutObject replaces the object atomically
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(&self.key)
            .content_type("text/csv")
            .body(ByteStream::from(body.to_vec()))
            .send()
            .await
            .map_err(|e| StorageError::unavailable(format!("Failed to upload {}: {}", self.uri(), e)))?;

        Ok(())
    }
}
