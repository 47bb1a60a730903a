//! Report storage selection

use std::path::PathBuf;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use super::store::{JsonFileReportStore, MemoryReportStore, ReportStore};

/// Where finalized reports are kept
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory for `<session_id>/report.json`; reports stay in memory when unset
    #[serde(default)]
    pub report_dir: Option<PathBuf>,
}

impl StorageConfig {
    pub fn build_store(&self) -> Arc<dyn ReportStore> {
        match &self.report_dir {
            Some(dir) => {
                info!(dir = %dir.display(), "Persisting reports to disk");
                Arc::new(JsonFileReportStore::new(dir.clone()))
            }
            None => Arc::new(MemoryReportStore::new()),
        }
    }
}
