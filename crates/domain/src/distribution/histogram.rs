use dwalk_ports::Reducer;
use dwalk_shared_kernel::SizeRecord;
use log::{debug, warn};
use serde::Serialize;

use super::{BinRow, Bound, DistributionReport, SeparatorSet};

/// Where the separators of a distribution came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "mode")]
pub enum BucketSource {
    /// Parsed from `--distribution size:...`; the last bin is open-ended.
    User,
    /// Derived by the planner; `ceiling` labels the upper bound of the last bin.
    Auto { max_size: u64, ceiling: u64 },
}

/// Separators used for classification plus how to label the final bin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistributionPlan {
    separators: SeparatorSet,
    source: BucketSource,
}

impl DistributionPlan {
    pub fn user(separators: SeparatorSet) -> Self {
        Self { separators, source: BucketSource::User }
    }

    /// The largest derived separator becomes the ceiling: it is not used to
    /// classify, it only labels the last bin, so the last bin holds every
    /// size above the second-largest separator.
    pub fn auto(derived: SeparatorSet, max_size: u64) -> Self {
        let mut values = derived.into_vec();
        let ceiling = values.pop().unwrap_or(max_size);
        Self {
            separators: SeparatorSet::from_ascending(values),
            source: BucketSource::Auto { max_size, ceiling },
        }
    }

    pub fn separators(&self) -> &SeparatorSet {
        &self.separators
    }

    pub fn source(&self) -> BucketSource {
        self.source
    }

    pub fn is_auto(&self) -> bool {
        matches!(self.source, BucketSource::Auto { .. })
    }

    pub fn bin_count(&self) -> usize {
        self.separators.bin_count()
    }
}

/// Classifies records into bins and combines counts across workers.
pub struct Histogrammer;

impl Histogrammer {
    /// Index of the first bin whose upper bound is `>= size`; the overflow
    /// bin (`separators.len()`) when none is.
    ///
    /// A size equal to a separator belongs to that separator's bin.
    #[inline]
    pub fn bin_index(size: u64, separators: &SeparatorSet) -> usize {
        separators
            .iter()
            .position(|&upper| size <= upper)
            .unwrap_or(separators.len())
    }

    /// Per-bin counts for the local shard; length is `separators.len() + 1`.
    pub fn classify_and_count<R: SizeRecord>(records: &[R], separators: &SeparatorSet) -> Vec<u64> {
        let mut counts = vec![0_u64; separators.bin_count()];
        for record in records {
            counts[Self::bin_index(record.size(), separators)] += 1;
        }
        counts
    }

    /// Element-wise global sum of `local` counts.
    ///
    /// Collective: every worker must call this with the same length.
    pub fn combine(local: &[u64], reducer: &dyn Reducer) -> Vec<u64> {
        let global = reducer.global_sum(local);
        debug_assert_eq!(global.len(), local.len());
        global
    }

    /// Pairs each global count with its bin bounds.
    ///
    /// Counts beyond the plan's bins are dropped and missing bins are not
    /// reported; either mismatch is logged.
    pub fn render(global_counts: &[u64], plan: &DistributionPlan) -> DistributionReport {
        if global_counts.len() != plan.bin_count() {
            warn!("expected {} bin counts, got {}", plan.bin_count(), global_counts.len());
        }
        let separators = plan.separators().as_slice();
        let last = separators.len();
        let rows = global_counts
            .iter()
            .take(plan.bin_count())
            .enumerate()
            .map(|(i, &count)| {
                let lower = if i == 0 { 0 } else { separators[i - 1] };
                let upper = if i < last {
                    Bound::Bytes(separators[i])
                } else {
                    match plan.source() {
                        BucketSource::User => Bound::Max,
                        BucketSource::Auto { ceiling, .. } => Bound::Bytes(ceiling),
                    }
                };
                BinRow { lower, upper, count }
            })
            .collect();
        DistributionReport::new(rows, plan.source())
    }

    /// Classify, combine and render in one collective step.
    pub fn distribute<R: SizeRecord>(
        records: &[R],
        plan: &DistributionPlan,
        reducer: &dyn Reducer,
    ) -> DistributionReport {
        let local = Self::classify_and_count(records, plan.separators());
        debug!("rank {} local bin counts: {local:?}", reducer.rank());
        let global = Self::combine(&local, reducer);
        Self::render(&global, plan)
    }
}
