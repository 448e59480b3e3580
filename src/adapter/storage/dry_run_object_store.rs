//! Dry-run Object Store
//!
//! アップロードせずに内容を標準出力へ表示するObjectStore実装

use anyhow::Result;
use async_trait::async_trait;
use log::info;
use std::sync::Mutex;

use crate::domain::repositories::object_repository::ObjectStore;

/// Prints objects instead of uploading them and keeps a copy in memory
#[derive(Default)]
pub struct DryRunObjectStore {
    objects: Mutex<Vec<(String, Vec<u8>)>>,
}

impl DryRunObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Objects "written" so far, in order
    pub fn objects(&self) -> Vec<(String, Vec<u8>)> {
        self.objects
            .lock()
            .map(|objects| objects.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl ObjectStore for DryRunObjectStore {
    async fn upload(&self, path: &str, data: Vec<u8>) -> Result<()> {
        info!("DRY RUN MODE - Would upload {} bytes to {}", data.len(), path);
        println!("--- {} ---", path);
        print!("{}", String::from_utf8_lossy(&data));

        self.objects
            .lock()
            .map_err(|_| anyhow::anyhow!("dry-run object store lock poisoned"))?
            .push((path.to_string(), data));
        Ok(())
    }
}
