// crates/infra/src/reduction.rs
use std::sync::{Arc, Barrier, Mutex, PoisonError};

use dwalk_ports::Reducer;

/// Reducer for a run with a single worker: every collective is the identity.
#[derive(Debug, Default, Clone, Copy)]
pub struct SoloReducer;

impl Reducer for SoloReducer {
    fn rank(&self) -> usize {
        0
    }

    fn ranks(&self) -> usize {
        1
    }

    fn global_sum(&self, local: &[u64]) -> Vec<u64> {
        local.to_vec()
    }

    fn global_max(&self, local: u64) -> u64 {
        local
    }
}

#[derive(Debug)]
struct Shared {
    barrier: Barrier,
    slots: Mutex<Vec<Vec<u64>>>,
}

/// In-process collective over a fixed group of threads.
///
/// Each member deposits its contribution, waits for the whole group, reads
/// the combined value, then waits again so the next round cannot overwrite
/// a slot another member has not read yet.
#[derive(Debug, Clone)]
pub struct ThreadGroupReducer {
    rank: usize,
    ranks: usize,
    shared: Arc<Shared>,
}

impl ThreadGroupReducer {
    /// One handle per member; move each into its own thread.
    pub fn group(size: usize) -> Vec<Self> {
        let shared = Arc::new(Shared { barrier: Barrier::new(size), slots: Mutex::new(vec![Vec::new(); size]) });
        (0..size).map(|rank| Self { rank, ranks: size, shared: Arc::clone(&shared) }).collect()
    }

    fn exchange(&self, local: &[u64], fold: fn(u64, u64) -> u64) -> Vec<u64> {
        {
            let mut slots = self.shared.slots.lock().unwrap_or_else(PoisonError::into_inner);
            slots[self.rank] = local.to_vec();
        }
        self.shared.barrier.wait();

        let combined = {
            let slots = self.shared.slots.lock().unwrap_or_else(PoisonError::into_inner);
            let mut acc = local.to_vec();
            for (rank, slot) in slots.iter().enumerate() {
                if rank == self.rank {
                    continue;
                }
                for (total, value) in acc.iter_mut().zip(slot) {
                    *total = fold(*total, *value);
                }
            }
            acc
        };
        self.shared.barrier.wait();
        combined
    }
}

fn exact_sum(total: u64, value: u64) -> u64 {
    match total.checked_add(value) {
        Some(sum) => sum,
        None => panic!("global sum overflowed u64: {total} + {value}"),
    }
}

impl Reducer for ThreadGroupReducer {
    fn rank(&self) -> usize {
        self.rank
    }

    fn ranks(&self) -> usize {
        self.ranks
    }

    /// # Panics
    ///
    /// When a column of the group's contributions does not fit in `u64`.
    /// Every member folds the same values, so the whole group panics together.
    fn global_sum(&self, local: &[u64]) -> Vec<u64> {
        self.exchange(local, exact_sum)
    }

    fn global_max(&self, local: u64) -> u64 {
        self.exchange(&[local], u64::max).first().copied().unwrap_or(local)
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;

    #[test]
    fn solo_is_identity() {
        let reducer = SoloReducer;
        assert_eq!(reducer.global_sum(&[1, 2, 3]), vec![1, 2, 3]);
        assert_eq!(reducer.global_max(9), 9);
        assert!(reducer.is_coordinator());
    }

    #[test]
    fn group_sums_and_maxes_across_threads() {
        let handles: Vec<_> = ThreadGroupReducer::group(4)
            .into_iter()
            .map(|reducer| {
                thread::spawn(move || {
                    let rank = reducer.rank() as u64;
                    let sum = reducer.global_sum(&[rank, 1]);
                    let max = reducer.global_max(rank * 10);
                    (reducer.is_coordinator(), sum, max)
                })
            })
            .collect();

        let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(results.iter().filter(|(coordinator, _, _)| *coordinator).count(), 1);
        for (_, sum, max) in results {
            assert_eq!(sum, vec![6, 4]);
            assert_eq!(max, 30);
        }
    }

    #[test]
    fn consecutive_rounds_do_not_mix() {
        let handles: Vec<_> = ThreadGroupReducer::group(3)
            .into_iter()
            .map(|reducer| {
                thread::spawn(move || (0..20u64).map(|round| reducer.global_sum(&[round])[0]).collect::<Vec<_>>())
            })
            .collect();

        for handle in handles {
            let sums = handle.join().unwrap();
            assert_eq!(sums, (0..20u64).map(|round| round * 3).collect::<Vec<_>>());
        }
    }

    #[test]
    fn overflowing_sum_fails_every_member() {
        let handles: Vec<_> = ThreadGroupReducer::group(2)
            .into_iter()
            .map(|reducer| thread::spawn(move || reducer.global_sum(&[u64::MAX, 1])))
            .collect();

        for handle in handles {
            assert!(handle.join().is_err());
        }
    }

    #[test]
    fn sums_up_to_u64_max_exactly() {
        let handles: Vec<_> = ThreadGroupReducer::group(2)
            .into_iter()
            .map(|reducer| {
                let local = if reducer.is_coordinator() { u64::MAX - 5 } else { 5 };
                thread::spawn(move || reducer.global_sum(&[local]))
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), vec![u64::MAX]);
        }
    }
}
