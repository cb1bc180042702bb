pub mod aggregator;
pub mod zone_fetcher;

use std::path::PathBuf;

pub use aggregator::run_aggregator;
pub use zone_fetcher::run_zone_fetch;

/// Outcome of one pipeline run.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    /// Output files written, excluding the manifest.
    pub artifacts: Vec<PathBuf>,
    pub manifest: Option<PathBuf>,
    /// Sources or zones attempted.
    pub attempted: usize,
    pub succeeded: usize,
    pub failed: usize,
}

impl RunSummary {
    /// Whether anything useful was written. Drives the process exit code.
    pub fn produced_output(&self) -> bool {
        !self.artifacts.is_empty()
    }
}
