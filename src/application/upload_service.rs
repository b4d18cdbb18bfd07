// Upload service - Use case for processing a CSV upload
use crate::application::upload_repository::UploadRepository;
use crate::domain::columns::ColumnMap;
use crate::domain::error::IngestError;
use crate::domain::identity::Identity;
use crate::domain::stats::aggregate;
use crate::domain::upload::UploadSummary;
use crate::infrastructure::csv_reader::read_csv;
use chrono::Utc;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UploadError {
    #[error(transparent)]
    Ingest(#[from] IngestError),

    #[error("Failed to persist upload summary")]
    Repository(#[source] anyhow::Error),
}

#[derive(Clone)]
pub struct UploadService {
    repository: Arc<dyn UploadRepository>,
}

impl UploadService {
    pub fn new(repository: Arc<dyn UploadRepository>) -> Self {
        Self { repository }
    }

    /// Run the full ingestion pipeline for one uploaded file: parse the
    /// CSV, resolve columns, aggregate statistics, persist the summary.
    ///
    /// Fail-fast: any error aborts the upload and nothing is persisted,
    /// so the owner's recent-uploads window is left untouched.
    pub async fn process_upload(
        &self,
        owner: &Identity,
        file_name: &str,
        content: &[u8],
    ) -> Result<UploadSummary, UploadError> {
        let table = read_csv(content)?;
        let columns = ColumnMap::resolve(&table.headers)?;
        let (overall, per_type) = aggregate(&table.rows, &columns)?;

        let summary = UploadSummary::new(
            owner.id,
            file_name.to_string(),
            Utc::now(),
            overall,
            per_type,
        );

        let id = self
            .repository
            .save(summary.clone())
            .await
            .map_err(UploadError::Repository)?;

        tracing::info!(
            "Processed upload {} ({}) for {}: {} records, {} types",
            id,
            file_name,
            owner.username,
            summary.total_records,
            summary.type_distribution.len()
        );

        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::identity::UserId;
    use crate::infrastructure::memory_repository::MemoryUploadRepository;

    fn service() -> (UploadService, Arc<MemoryUploadRepository>) {
        let repository = Arc::new(MemoryUploadRepository::new());
        (UploadService::new(repository.clone()), repository)
    }

    fn operator() -> Identity {
        Identity {
            id: UserId::new(),
            username: "operator".to_string(),
        }
    }

    #[tokio::test]
    async fn test_process_upload_persists_summary() {
        let (service, repository) = service();
        let owner = operator();
        let csv = b"Equipment Name,Type,Flow Rate,Pressure,Temp\n\
                    Pump1,A,10,5,20\n\
                    Pump2,B,bad,5,20\n\
                    Pump3,A,12,6,22\n";

        let summary = service
            .process_upload(&owner, "readings.csv", csv)
            .await
            .unwrap();

        assert_eq!(summary.total_records, 2);
        assert_eq!(summary.avg_flowrate, 11.0);
        assert_eq!(summary.avg_pressure, 5.5);
        assert_eq!(summary.avg_temperature, 21.0);
        assert_eq!(summary.type_distribution["A"], 2);
        assert_eq!(summary.per_type_stats["A"].count, 2);

        let recent = repository.recent(&owner.id, 5).await.unwrap();
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].id, summary.id);
    }

    #[tokio::test]
    async fn test_missing_column_persists_nothing() {
        let (service, repository) = service();
        let owner = operator();
        let csv = b"equipment,type,flowrate,temperature\nPump1,A,10,20\n";

        let err = service
            .process_upload(&owner, "readings.csv", csv)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            UploadError::Ingest(IngestError::MissingColumn("pressure"))
        ));

        let recent = repository.recent(&owner.id, 5).await.unwrap();
        assert!(recent.is_empty());
    }

    #[tokio::test]
    async fn test_all_rows_invalid_persists_nothing() {
        let (service, repository) = service();
        let owner = operator();
        let csv = b"equipment,type,flowrate,pressure,temperature\nPump1,A,x,y,z\n";

        let err = service
            .process_upload(&owner, "readings.csv", csv)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            UploadError::Ingest(IngestError::EmptyResult)
        ));
        assert!(repository.recent(&owner.id, 5).await.unwrap().is_empty());
    }
}
