//! Report persistence keyed by session id

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use super::types::Report;
use crate::error::StoreError;

const REPORT_FILE: &str = "report.json";

/// Storage for finalized reports
#[async_trait]
pub trait ReportStore: Send + Sync {
    async fn save(&self, report: &Report) -> Result<(), StoreError>;

    async fn load(&self, session_id: &str) -> Result<Option<Report>, StoreError>;
}

/// In-process report store
#[derive(Default)]
pub struct MemoryReportStore {
    reports: RwLock<HashMap<String, Report>>,
}

impl MemoryReportStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.reports.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.reports.read().await.is_empty()
    }
}

#[async_trait]
impl ReportStore for MemoryReportStore {
    async fn save(&self, report: &Report) -> Result<(), StoreError> {
        self.reports
            .write()
            .await
            .insert(report.session_id.clone(), report.clone());
        Ok(())
    }

    async fn load(&self, session_id: &str) -> Result<Option<Report>, StoreError> {
        Ok(self.reports.read().await.get(session_id).cloned())
    }
}

/// Writes `<root>/<session_id>/report.json`
pub struct JsonFileReportStore {
    root: PathBuf,
}

impl JsonFileReportStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path for a session's report, or `None` for ids that are not a single
    /// safe path component
    fn report_path(&self, session_id: &str) -> Option<PathBuf> {
        let safe = !session_id.is_empty()
            && session_id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        safe.then(|| self.root.join(session_id).join(REPORT_FILE))
    }
}

#[async_trait]
impl ReportStore for JsonFileReportStore {
    async fn save(&self, report: &Report) -> Result<(), StoreError> {
        let path = self.report_path(&report.session_id).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("unsafe session id: {}", report.session_id),
            )
        })?;

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_string_pretty(report)?;
        tokio::fs::write(&path, json).await?;
        debug!("Wrote report to {}", path.display());
        Ok(())
    }

    async fn load(&self, session_id: &str) -> Result<Option<Report>, StoreError> {
        let Some(path) = self.report_path(session_id) else {
            return Ok(None);
        };

        match tokio::fs::read_to_string(&path).await {
            Ok(contents) => Ok(Some(serde_json::from_str(&contents)?)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attention::AttentionSummary;
    use chrono::Utc;
    use tempfile::TempDir;

    fn report(session_id: &str) -> Report {
        Report {
            session_id: session_id.to_string(),
            summary: "Steady performance.".to_string(),
            questions: vec![],
            attention: AttentionSummary::default(),
            finalized_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn memory_store_round_trips() {
        let store = MemoryReportStore::new();
        assert!(store.load("abc").await.unwrap().is_none());

        let saved = report("abc");
        store.save(&saved).await.unwrap();

        assert_eq!(store.load("abc").await.unwrap(), Some(saved));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn file_store_writes_report_json_under_session_dir() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileReportStore::new(dir.path());

        let saved = report("3f2a9c");
        store.save(&saved).await.unwrap();

        let path = dir.path().join("3f2a9c").join("report.json");
        assert!(path.exists());
        assert_eq!(store.load("3f2a9c").await.unwrap(), Some(saved));
    }

    #[tokio::test]
    async fn file_store_missing_report_is_none() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileReportStore::new(dir.path());
        assert!(store.load("never-finalized").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn file_store_rejects_path_traversal() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileReportStore::new(dir.path());

        assert!(matches!(
            store.save(&report("../escape")).await,
            Err(StoreError::Io(_))
        ));
        assert!(store.load("../escape").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn file_store_surfaces_corrupt_json() {
        let dir = TempDir::new().unwrap();
        let session_dir = dir.path().join("broken");
        std::fs::create_dir_all(&session_dir).unwrap();
        std::fs::write(session_dir.join("report.json"), "{not json").unwrap();

        let store = JsonFileReportStore::new(dir.path());
        assert!(matches!(
            store.load("broken").await,
            Err(StoreError::Serialization(_))
        ));
    }
}
