// src/store.rs
//
//! The storage seam the sync engine runs against.
//!
//! Exactly two capabilities are needed: list every key under a prefix, and
//! copy one object to a local file. `S3ObjectSource` is the real
//! implementation; tests drive the engine through a recording double.

use anyhow::{Context, Result};
use async_trait::async_trait;
use aws_sdk_s3::Client;
use bytes::Bytes;
use std::path::Path;
use tokio::fs;
use tracing::debug;

use crate::s3_client::client;

/// Read-only view of one bucket.
#[async_trait]
pub trait ObjectSource: Send + Sync {
    /// List every key that starts with `prefix` (handles pagination).
    async fn list(&self, prefix: &str) -> Result<Vec<String>>;

    /// Copy the object at `key` into the file at `dest`, returning the
    /// number of bytes written. `dest`'s parent directory must exist.
    async fn fetch(&self, key: &str, dest: &Path) -> Result<u64>;
}

/// [`ObjectSource`] over a real S3 bucket via the shared anonymous client.
pub struct S3ObjectSource {
    client: Client,
    bucket: String,
}

impl S3ObjectSource {
    /// Bind to `bucket`. Builds the shared client if this is the first use,
    /// which is why this is sync code: see [`crate::s3_client::client`].
    pub fn open(bucket: &str) -> Result<Self> {
        Ok(Self {
            client: client()?,
            bucket: bucket.to_owned(),
        })
    }
}

#[async_trait]
impl ObjectSource for S3ObjectSource {
    async fn list(&self, prefix: &str) -> Result<Vec<String>> {
        let mut keys = Vec::new();
        let mut cont: Option<String> = None;
        loop {
            let mut req = self
                .client
                .list_objects_v2()
                .bucket(&self.bucket)
                .prefix(prefix);
            if let Some(token) = &cont {
                req = req.continuation_token(token);
            }
            let resp = req.send().await.context("list_objects_v2 failed")?;
            let page = resp.contents();
            debug!(
                "list page: {} key(s) under s3://{}/{}",
                page.len(),
                self.bucket,
                prefix
            );
            for obj in page {
                if let Some(k) = obj.key() {
                    keys.push(k.to_owned());
                }
            }
            if let Some(token) = resp.next_continuation_token() {
                cont = Some(token.to_string());
            } else {
                break;
            }
        }
        Ok(keys)
    }

    async fn fetch(&self, key: &str, dest: &Path) -> Result<u64> {
        let resp = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .with_context(|| format!("get_object failed for {}", key))?;
        let body: Bytes = resp
            .body
            .collect()
            .await
            .context("collect body failed")?
            .into_bytes();
        fs::write(dest, &body)
            .await
            .with_context(|| format!("writing {}", dest.display()))?;
        Ok(body.len() as u64)
    }
}
