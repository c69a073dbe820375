use std::sync::Arc;

use async_trait::async_trait;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;
use serde_json::json;

use scribe_domain::{languages, DomainError, ObjectStorePort, Transcription, TranscriptSink};

/// Object storage over S3. The bucket name is resolved from the process
/// environment on every call, so a missing variable fails the
/// invocation rather than process startup.
pub struct S3ObjectStore {
    client: Client,
    bucket_env: String,
}

impl S3ObjectStore {
    pub fn new(client: Client, bucket_env: impl Into<String>) -> Self {
        Self {
            client,
            bucket_env: bucket_env.into(),
        }
    }

    fn bucket(&self) -> Result<String, DomainError> {
        std::env::var(&self.bucket_env).map_err(|_| {
            DomainError::configuration_error(&format!(
                "environment variable {} is not set",
                self.bucket_env
            ))
        })
    }
}

#[async_trait]
impl ObjectStorePort for S3ObjectStore {
    async fn fetch(&self, key: &str) -> Result<Vec<u8>, DomainError> {
        let bucket = self.bucket()?;
        let output = self
            .client
            .get_object()
            .bucket(&bucket)
            .key(key)
            .send()
            .await
            .map_err(|err| {
                DomainError::external_service_error(
                    "object-store",
                    &format!("failed to download {key}: {}", DisplayErrorContext(err)),
                )
            })?;
        let bytes = output.body.collect().await.map_err(|err| {
            DomainError::external_service_error(
                "object-store",
                &format!("failed to read body of {key}: {err}"),
            )
        })?;

        let body = bytes.into_bytes().to_vec();
        tracing::debug!(key, bucket = %bucket, byte_count = body.len(), "downloaded object");
        Ok(body)
    }

    async fn store(
        &self,
        key: &str,
        body: Vec<u8>,
        content_type: &str,
    ) -> Result<(), DomainError> {
        let bucket = self.bucket()?;
        let byte_count = body.len();
        self.client
            .put_object()
            .bucket(&bucket)
            .key(key)
            .content_type(content_type)
            .body(ByteStream::from(body))
            .send()
            .await
            .map_err(|err| {
                DomainError::external_service_error(
                    "object-store",
                    &format!("failed to upload {key}: {}", DisplayErrorContext(err)),
                )
            })?;

        tracing::debug!(key, bucket = %bucket, byte_count, "uploaded object");
        Ok(())
    }
}

/// Archive-mode sink: serializes the transcription to a JSON array and
/// uploads it as a text file next to the audio object.
pub struct TextFileArchiveSink {
    store: Arc<dyn ObjectStorePort>,
}

impl TextFileArchiveSink {
    pub fn new(store: Arc<dyn ObjectStorePort>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl TranscriptSink for TextFileArchiveSink {
    async fn persist(&self, key: &str, transcription: &Transcription) -> Result<(), DomainError> {
        let body = serde_json::to_vec(&archive_entries(transcription))
            .map_err(|err| DomainError::internal_error(&err.to_string()))?;
        self.store
            .store(&format!("{key}.txt"), body, "text/plain")
            .await
    }
}

/// One entry per language: the detected-language transcript, plus an
/// English entry only when a translation occurred.
fn archive_entries(transcription: &Transcription) -> Vec<serde_json::Value> {
    let mut entries = vec![json!({
        "language": transcription.language,
        "transcript": transcription.transcript,
    })];
    if !transcription.is_english() {
        entries.push(json!({
            "language": languages::ENGLISH,
            "transcript": transcription.english,
        }));
    }
    entries
}
