use std::fmt;

use dwalk_ports::Reducer;
use dwalk_shared_kernel::{EntryKind, FileSize, SizeRecord};
use log::warn;
use serde::Serialize;

/// Entry counts and regular-file bytes for a walked list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct WalkSummary {
    pub dirs: u64,
    pub files: u64,
    pub links: u64,
    pub other: u64,
    pub bytes: u64,
}

impl WalkSummary {
    pub fn from_records<R: SizeRecord>(records: &[R]) -> Self {
        records.iter().fold(Self::default(), |mut acc, record| {
            match record.kind() {
                EntryKind::Dir => acc.dirs += 1,
                EntryKind::File => {
                    acc.files += 1;
                    acc.bytes = acc.bytes.saturating_add(record.size());
                }
                EntryKind::Symlink => acc.links += 1,
                _ => acc.other += 1,
            }
            acc
        })
    }

    pub const fn items(&self) -> u64 {
        self.dirs + self.files + self.links + self.other
    }

    /// Mean regular-file size, `0` without files.
    pub const fn average_file_size(&self) -> u64 {
        if self.files == 0 { 0 } else { self.bytes / self.files }
    }

    /// Sums the local counters across all workers in a single reduction.
    ///
    /// Collective: every worker must call this. A reducer that returns the
    /// wrong number of sums leaves the local counters in place.
    #[must_use]
    pub fn combine(&self, reducer: &dyn Reducer) -> Self {
        let global = reducer.global_sum(&[self.dirs, self.files, self.links, self.other, self.bytes]);
        match global.as_slice() {
            &[dirs, files, links, other, bytes] => Self { dirs, files, links, other, bytes },
            other => {
                warn!("summary reduction returned {} values instead of 5; keeping local counts", other.len());
                *self
            }
        }
    }
}

impl fmt::Display for WalkSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Items: {}", self.items())?;
        writeln!(f, "  Directories: {}", self.dirs)?;
        writeln!(f, "  Files: {}", self.files)?;
        writeln!(f, "  Links: {}", self.links)?;
        write!(
            f,
            "  Data: {} ({} per file)",
            FileSize::new(self.bytes).to_human(),
            FileSize::new(self.average_file_size()).to_human()
        )
    }
}
