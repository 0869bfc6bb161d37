use dwalk_ports::Reducer;
use dwalk_shared_kernel::{FileSize, SizeRecord};
use log::{debug, info};

use super::{DistributionPlan, SeparatorSet};

/// Bits per binary size unit step (B -> KB -> MB ...).
const MAGNITUDE_STEP: u32 = 10;

/// Derives power-of-1024 buckets from the largest size seen in the run.
pub struct BucketPlanner;

impl BucketPlanner {
    /// Builds `[1, 2^10, 2^20, ..., 2^magnitude]` where `magnitude` is
    /// `ceil(log2(global_max_size))` rounded up to a multiple of ten.
    ///
    /// `0` and `1` have no positive logarithm and yield `[1]`. A power of
    /// 64 or more does not fit `u64`; `u64::MAX` takes its place.
    pub fn derive_default(global_max_size: u64) -> SeparatorSet {
        let mut values = vec![1];
        if global_max_size <= 1 {
            return SeparatorSet::from_ascending(values);
        }

        let bits = u64::BITS - (global_max_size - 1).leading_zeros();
        let magnitude = bits.div_ceil(MAGNITUDE_STEP) * MAGNITUDE_STEP;

        let mut power = MAGNITUDE_STEP;
        while power <= magnitude {
            match 1_u64.checked_shl(power) {
                Some(value) => values.push(value),
                None => {
                    values.push(u64::MAX);
                    break;
                }
            }
            power += MAGNITUDE_STEP;
        }
        debug!("derived {} separators for max size {global_max_size}", values.len());
        SeparatorSet::from_ascending(values)
    }

    /// Largest record size in the local shard, `0` when the shard is empty.
    pub fn local_max<R: SizeRecord>(records: &[R]) -> u64 {
        records.iter().map(SizeRecord::size).max().unwrap_or(0)
    }

    /// Reduces the local maximum across all workers and plans automatic buckets.
    ///
    /// Collective: every worker must call this.
    pub fn plan_auto<R: SizeRecord>(records: &[R], reducer: &dyn Reducer) -> DistributionPlan {
        let global_max = reducer.global_max(Self::local_max(records));
        info!("Max File Size: {}", FileSize::new(global_max).to_human());
        DistributionPlan::auto(Self::derive_default(global_max), global_max)
    }
}
