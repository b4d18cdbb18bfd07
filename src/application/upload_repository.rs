// Repository trait for upload summary persistence
use crate::domain::identity::UserId;
use crate::domain::upload::UploadSummary;
use async_trait::async_trait;
use uuid::Uuid;

#[async_trait]
pub trait UploadRepository: Send + Sync {
    /// Persist a processed upload and trim the owner's window to the
    /// recent limit. Returns the stored summary id.
    async fn save(&self, summary: UploadSummary) -> anyhow::Result<Uuid>;

    /// Up to `limit` most recent summaries for an owner, newest first.
    /// Never mutates the window.
    async fn recent(&self, owner: &UserId, limit: usize) -> anyhow::Result<Vec<UploadSummary>>;
}
