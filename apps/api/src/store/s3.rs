use async_trait::async_trait;
use aws_config::Region;
use aws_sdk_s3::config::Credentials;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use tracing::debug;

use super::{DocumentStore, StoreError};
use crate::config::S3Settings;
use crate::models::content::ContentDocument;

/// Stores the document as a single JSON object, `<key>.json`, in one bucket.
pub struct S3Store {
    client: aws_sdk_s3::Client,
    bucket: String,
}

impl S3Store {
    pub fn new(client: aws_sdk_s3::Client, bucket: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
        }
    }

    /// Constructs a client for MinIO (local) or AWS (production).
    pub async fn from_settings(settings: &S3Settings) -> Self {
        let credentials = Credentials::new(
            &settings.access_key_id,
            &settings.secret_access_key,
            None,
            None,
            "folio-static",
        );

        let s3_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(Region::new(settings.region.clone()))
            .credentials_provider(credentials)
            .endpoint_url(&settings.endpoint)
            .load()
            .await;

        Self::new(aws_sdk_s3::Client::new(&s3_config), &settings.bucket)
    }
}

pub fn object_key(key: &str) -> String {
    format!("{key}.json")
}

#[async_trait]
impl DocumentStore for S3Store {
    async fn fetch(&self, key: &str) -> Result<Option<ContentDocument>, StoreError> {
        let object_key = object_key(key);
        let output = match self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(&object_key)
            .send()
            .await
        {
            Ok(output) => output,
            Err(err) => {
                if err
                    .as_service_error()
                    .map(|e| e.is_no_such_key())
                    .unwrap_or(false)
                {
                    debug!("No object at s3://{}/{}", self.bucket, object_key);
                    return Ok(None);
                }
                return Err(StoreError::S3(DisplayErrorContext(&err).to_string()));
            }
        };

        let body = output
            .body
            .collect()
            .await
            .map_err(|e| StoreError::S3(format!("failed to read object body: {e}")))?
            .into_bytes();

        Ok(Some(serde_json::from_slice(&body)?))
    }

    async fn put(&self, key: &str, doc: &ContentDocument) -> Result<(), StoreError> {
        let object_key = object_key(key);
        let body = serde_json::to_vec(doc)?;

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(&object_key)
            .body(ByteStream::from(body))
            .content_type("application/json")
            .send()
            .await
            .map_err(|e| StoreError::S3(DisplayErrorContext(&e).to_string()))?;

        debug!("Wrote content document to s3://{}/{}", self.bucket, object_key);
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "s3"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_key_appends_json_extension() {
        assert_eq!(object_key("portfolio/owner"), "portfolio/owner.json");
    }
}
