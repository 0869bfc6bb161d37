// crates/ports/src/reduction.rs

/// Collective reduction over every worker of a run.
///
/// Each call is a full barrier: all workers must make the same sequence of
/// calls with slices of identical length, otherwise the run deadlocks.
/// Implementations must be exact and independent of worker order; a sum
/// that does not fit in `u64` is a contract violation and may panic.
pub trait Reducer: Send + Sync {
    /// Index of this worker, `0..ranks()`.
    fn rank(&self) -> usize;

    fn ranks(&self) -> usize;

    /// Element-wise sum of `local` across all workers.
    fn global_sum(&self, local: &[u64]) -> Vec<u64>;

    /// Maximum of `local` across all workers.
    fn global_max(&self, local: u64) -> u64;

    /// The single worker allowed to write reports.
    fn is_coordinator(&self) -> bool {
        self.rank() == 0
    }
}
