// In-memory upload repository implementation
use crate::application::upload_repository::UploadRepository;
use crate::domain::identity::UserId;
use crate::domain::upload::{RecentUploads, UploadSummary};
use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Keeps one recent-uploads window per owner behind a single lock, so a
/// save (append + trim) is atomic with respect to concurrent reads of the
/// same owner's window.
#[derive(Debug, Default)]
pub struct MemoryUploadRepository {
    windows: RwLock<HashMap<UserId, RecentUploads>>,
}

impl MemoryUploadRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UploadRepository for MemoryUploadRepository {
    async fn save(&self, summary: UploadSummary) -> Result<Uuid> {
        let id = summary.id;
        let mut windows = self.windows.write().await;
        windows.entry(summary.owner).or_default().record(summary);
        Ok(id)
    }

    async fn recent(&self, owner: &UserId, limit: usize) -> Result<Vec<UploadSummary>> {
        let windows = self.windows.read().await;
        Ok(windows
            .get(owner)
            .map(|window| window.latest(limit))
            .unwrap_or_default())
    }
}
