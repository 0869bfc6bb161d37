// crates/ports/src/filesystem.rs
use std::path::{Path, PathBuf};

use dwalk_shared_kernel::{DomainResult, FileRecord, Result, Timestamp};
use serde::{Deserialize, Serialize};

/// Input parameters controlling record collection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WalkPlan {
    pub roots: Vec<PathBuf>,
    pub follow_links: bool,
}

/// Port producing the local shard of the record list.
pub trait RecordSource: Send + Sync {
    fn collect(&self, plan: &WalkPlan) -> Result<Vec<FileRecord>>;
}

/// Port reading the modification time of a reference file (`--anewer`, `--cnewer`).
pub trait ReferenceTimes: Send + Sync {
    /// # Errors
    /// Returns [`dwalk_shared_kernel::DomainError::ReferenceFile`] when the path is missing or cannot be stat'ed.
    fn modify_time(&self, path: &Path) -> DomainResult<Timestamp>;
}
