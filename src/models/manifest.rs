//! Run manifest written next to the aggregator outputs

use serde::Serialize;

use super::content::ContentKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceStatus {
    Success,
    Failed,
}

/// A file produced by the run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutputFile {
    /// Path relative to the output directory, `/`-separated.
    pub path: String,
    pub bytes: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SourceReport {
    pub index: usize,
    pub url: String,
    pub status: SourceStatus,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub detected: Vec<ContentKind>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub files: Vec<OutputFile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fetched_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SourceReport {
    pub fn failed(index: usize, url: &str, error: &str) -> Self {
        SourceReport {
            index,
            url: url.to_string(),
            status: SourceStatus::Failed,
            detected: Vec::new(),
            files: Vec::new(),
            fetched_at: None,
            error: Some(error.to_string()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == SourceStatus::Success
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Manifest {
    pub generated_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository: Option<String>,
    pub total_sources: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub sources: Vec<SourceReport>,
    pub outputs: Vec<OutputFile>,
}
