// Upload summary and recent-uploads window domain models
use crate::domain::identity::UserId;
use crate::domain::stats::{OverallStats, PerTypeStats};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use uuid::Uuid;

/// How many processed uploads stay visible per user.
pub const RECENT_WINDOW: usize = 5;

/// The persisted result of one successful upload. Immutable once created;
/// only superseded by window trimming.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UploadSummary {
    pub id: Uuid,
    pub owner: UserId,
    pub file_name: String,
    pub uploaded_at: DateTime<Utc>,
    pub total_records: u64,
    pub avg_flowrate: f64,
    pub avg_pressure: f64,
    pub avg_temperature: f64,
    pub type_distribution: BTreeMap<String, u64>,
    pub per_type_stats: PerTypeStats,
}

impl UploadSummary {
    pub fn new(
        owner: UserId,
        file_name: String,
        uploaded_at: DateTime<Utc>,
        overall: OverallStats,
        per_type: PerTypeStats,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            owner,
            file_name,
            uploaded_at,
            total_records: overall.total_records,
            avg_flowrate: overall.avg_flowrate,
            avg_pressure: overall.avg_pressure,
            avg_temperature: overall.avg_temperature,
            type_distribution: overall.type_distribution,
            per_type_stats: per_type,
        }
    }

    /// The overall-stats view of this summary, as consumed by tables and
    /// charts.
    pub fn overall_stats(&self) -> OverallStats {
        OverallStats {
            total_records: self.total_records,
            avg_flowrate: self.avg_flowrate,
            avg_pressure: self.avg_pressure,
            avg_temperature: self.avg_temperature,
            type_distribution: self.type_distribution.clone(),
        }
    }
}

/// Bounded, recency-ordered view of one owner's processed uploads.
/// Invariant: at most `RECENT_WINDOW` entries, newest first.
#[derive(Debug, Clone, Default)]
pub struct RecentUploads {
    entries: Vec<UploadSummary>,
}

impl RecentUploads {
    pub fn record(&mut self, summary: UploadSummary) {
        self.entries.insert(0, summary);
        self.entries.truncate(RECENT_WINDOW);
    }

    /// Up to `limit` most recent summaries, newest first.
    pub fn latest(&self, limit: usize) -> Vec<UploadSummary> {
        self.entries.iter().take(limit).cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::stats::OverallStats;

    fn summary(owner: UserId, file_name: &str) -> UploadSummary {
        let overall = OverallStats {
            total_records: 1,
            avg_flowrate: 1.0,
            avg_pressure: 1.0,
            avg_temperature: 1.0,
            type_distribution: BTreeMap::from([("A".to_string(), 1)]),
        };
        UploadSummary::new(
            owner,
            file_name.to_string(),
            Utc::now(),
            overall,
            BTreeMap::new(),
        )
    }

    #[test]
    fn test_window_keeps_five_newest_first() {
        let owner = UserId::new();
        let mut window = RecentUploads::default();
        for i in 0..6 {
            window.record(summary(owner, &format!("readings-{i}.csv")));
        }

        assert_eq!(window.len(), 5);
        let names: Vec<String> = window
            .latest(RECENT_WINDOW)
            .into_iter()
            .map(|s| s.file_name)
            .collect();
        assert_eq!(
            names,
            vec![
                "readings-5.csv",
                "readings-4.csv",
                "readings-3.csv",
                "readings-2.csv",
                "readings-1.csv"
            ]
        );
        // The oldest of the six is gone for good.
        assert!(!names.contains(&"readings-0.csv".to_string()));
    }

    #[test]
    fn test_latest_does_not_mutate() {
        let owner = UserId::new();
        let mut window = RecentUploads::default();
        window.record(summary(owner, "a.csv"));
        window.record(summary(owner, "b.csv"));

        let _ = window.latest(1);
        assert_eq!(window.len(), 2);
        assert_eq!(window.latest(RECENT_WINDOW)[0].file_name, "b.csv");
    }

    #[test]
    fn test_overall_stats_round_trip() {
        let s = summary(UserId::new(), "a.csv");
        let overall = s.overall_stats();
        assert_eq!(overall.total_records, s.total_records);
        assert_eq!(overall.type_distribution, s.type_distribution);
    }
}
