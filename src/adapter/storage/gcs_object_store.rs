//! Cloud Storage Object Store
//!
//! ObjectStoreのCloud Storage実装

use anyhow::{Context, Result};
use async_trait::async_trait;
use google_cloud_storage::client::Client;
use google_cloud_storage::http::objects::get::GetObjectRequest;
use google_cloud_storage::http::objects::upload::{Media, UploadObjectRequest, UploadType};
use log::{info, warn};

use crate::domain::errors::PipelineError;
use crate::domain::repositories::object_repository::ObjectStore;

pub const CONTENT_TYPE: &str = "application/json";

/// Object store writing into a single Cloud Storage bucket
pub struct GcsObjectStore {
    client: Client,
    bucket: String,
}

impl GcsObjectStore {
    pub fn new(client: Client, bucket: String) -> Self {
        Self { client, bucket }
    }

    /// Best effort: a failed metadata read is logged, never returned
    async fn log_object_metadata(&self, path: &str) {
        let request = GetObjectRequest {
            bucket: self.bucket.clone(),
            object: path.to_string(),
            ..Default::default()
        };

        match self.client.get_object(&request).await {
            Ok(object) => info!(
                "Cloud Storage object created: gs://{}/{} (created_at: {:?})",
                self.bucket, path, object.time_created
            ),
            Err(e) => warn!("Error reading object attrs for {}: {}", path, e),
        }
    }
}

#[cfg_attr(coverage_nightly, coverage(off))]
#[async_trait]
impl ObjectStore for GcsObjectStore {
    async fn upload(&self, path: &str, data: Vec<u8>) -> Result<()> {
        let byte_count = data.len();

        let mut media = Media::new(path.to_string());
        media.content_type = CONTENT_TYPE.into();
        let upload_type = UploadType::Simple(media);

        let request = UploadObjectRequest {
            bucket: self.bucket.clone(),
            ..Default::default()
        };

        self.client
            .upload_object(&request, data, &upload_type)
            .await
            .map_err(|e| PipelineError::Service {
                operation: "upload object".to_string(),
                message: e.to_string(),
            })
            .with_context(|| {
                format!(
                    "Failed to write {} bytes to gs://{}/{}",
                    byte_count, self.bucket, path
                )
            })?;

        self.log_object_metadata(path).await;
        Ok(())
    }
}
