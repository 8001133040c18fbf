use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use uuid::Uuid;

/// How a report's content was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportKind {
    /// Built from the grant store and company profile.
    Generated,
    /// Built from caller-supplied text, verbatim.
    FromText,
}

/// Metadata for a rendered report artifact. The PDF bytes themselves live on
/// disk at `file_path`; `file_size` is captured at generation time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub id: Uuid,
    pub name: String,
    /// The raw supplied text for [`ReportKind::FromText`]; empty otherwise.
    pub description: String,
    pub kind: ReportKind,
    pub file_path: PathBuf,
    pub file_size: u64,
    pub generated_at: DateTime<Utc>,
}
