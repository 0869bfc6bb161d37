//! Size distribution: separators, automatic bucket planning and histograms.

pub mod histogram;
pub mod planner;
pub mod report;
pub mod separators;

pub use histogram::{BucketSource, DistributionPlan, Histogrammer};
pub use planner::BucketPlanner;
pub use report::{BinRow, Bound, DistributionReport};
pub use separators::{MAX_SEPARATORS, SeparatorSet};
