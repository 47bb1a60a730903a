//! Final reports: types, persistence, and the finalizer

mod config;
mod finalizer;
mod store;
mod types;

pub use config::StorageConfig;
pub use finalizer::{FALLBACK_SUMMARY, ReportFinalizer};
pub use store::{JsonFileReportStore, MemoryReportStore, ReportStore};
pub use types::{FinalizeInput, QuestionReport, Report};
