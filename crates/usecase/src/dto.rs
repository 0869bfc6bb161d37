use dwalk_domain::{analytics::WalkSummary, distribution::DistributionReport};
use dwalk_shared_kernel::FileRecord;
use serde::Serialize;

/// Result of processing one worker's shard.
///
/// `summary` and `distribution` are global (already reduced); `records`
/// is the local filtered, optionally sorted, list.
#[derive(Debug, Clone, Serialize)]
pub struct ProcessOutput {
    pub records: Vec<FileRecord>,
    pub summary: WalkSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distribution: Option<DistributionReport>,
}
