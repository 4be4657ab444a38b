use aws_config::Region;
use aws_sdk_s3::config::Credentials;
use aws_sdk_s3::primitives::ByteStream;
use bytes::Bytes;
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::ArchiveConfig;

/// Keeps a copy of every raw upload in S3 / MinIO.
#[derive(Clone)]
pub struct UploadArchive {
    client: aws_sdk_s3::Client,
    bucket: String,
}

impl UploadArchive {
    /// Constructs an S3 client configured for MinIO (local) or AWS (production).
    pub async fn from_config(config: &ArchiveConfig) -> Self {
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(Region::new("us-east-1"));

        if let (Some(key_id), Some(secret)) = (&config.access_key_id, &config.secret_access_key) {
            loader = loader.credentials_provider(Credentials::new(
                key_id,
                secret,
                None,
                None,
                "analyzer-static",
            ));
        }
        if let Some(endpoint) = &config.endpoint {
            loader = loader.endpoint_url(endpoint);
        }

        let sdk_config = loader.load().await;
        let s3_config = aws_sdk_s3::config::Builder::from(&sdk_config)
            .force_path_style(config.endpoint.is_some())
            .build();

        Self {
            client: aws_sdk_s3::Client::from_conf(s3_config),
            bucket: config.bucket.clone(),
        }
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// Stores the upload and returns its key, or `None` if the put failed.
    /// The original filename never reaches the key.
    pub async fn store(&self, id: Uuid, mime_type: &str, bytes: Bytes) -> Option<String> {
        let key = storage_key(id, mime_type);
        let result = self
            .client
            .put_object()
            .bucket(&self.bucket)
            .key(&key)
            .body(ByteStream::from(bytes))
            .content_type(mime_type)
            .send()
            .await;

        match result {
            Ok(_) => {
                info!("Archived upload to s3://{}/{}", self.bucket, key);
                Some(key)
            }
            Err(e) => {
                warn!("Archiving upload {id} failed, continuing without it: {e}");
                None
            }
        }
    }
}

fn storage_key(id: Uuid, mime_type: &str) -> String {
    if mime_type == "application/pdf" {
        format!("uploads/{id}.pdf")
    } else {
        format!("uploads/{id}")
    }
}
