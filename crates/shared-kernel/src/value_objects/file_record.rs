use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{EntryKind, Timestamp};

/// Read-only view of one walked filesystem entry.
///
/// The record list owns the entries; filtering and histogramming only borrow them.
pub trait SizeRecord {
    fn path(&self) -> &Path;
    fn kind(&self) -> EntryKind;
    fn size(&self) -> u64;
    fn uid(&self) -> u32;
    fn gid(&self) -> u32;
    fn atime(&self) -> Timestamp;
    fn mtime(&self) -> Timestamp;
    fn ctime(&self) -> Timestamp;
}

impl<T: SizeRecord + ?Sized> SizeRecord for &T {
    fn path(&self) -> &Path {
        (**self).path()
    }

    fn kind(&self) -> EntryKind {
        (**self).kind()
    }

    fn size(&self) -> u64 {
        (**self).size()
    }

    fn uid(&self) -> u32 {
        (**self).uid()
    }

    fn gid(&self) -> u32 {
        (**self).gid()
    }

    fn atime(&self) -> Timestamp {
        (**self).atime()
    }

    fn mtime(&self) -> Timestamp {
        (**self).mtime()
    }

    fn ctime(&self) -> Timestamp {
        (**self).ctime()
    }
}

/// Owned entry produced by the walker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    pub path: PathBuf,
    pub kind: EntryKind,
    pub size: u64,
    pub uid: u32,
    pub gid: u32,
    pub atime: Timestamp,
    pub mtime: Timestamp,
    pub ctime: Timestamp,
}

impl FileRecord {
    /// An entry of `kind` owned by uid and gid 0 with every timestamp at the epoch.
    pub fn new(path: impl Into<PathBuf>, kind: EntryKind, size: u64) -> Self {
        Self {
            path: path.into(),
            kind,
            size,
            uid: 0,
            gid: 0,
            atime: Timestamp::EPOCH,
            mtime: Timestamp::EPOCH,
            ctime: Timestamp::EPOCH,
        }
    }

    #[must_use]
    pub fn with_owner(mut self, uid: u32, gid: u32) -> Self {
        self.uid = uid;
        self.gid = gid;
        self
    }

    #[must_use]
    pub fn with_times(mut self, atime: Timestamp, mtime: Timestamp, ctime: Timestamp) -> Self {
        self.atime = atime;
        self.mtime = mtime;
        self.ctime = ctime;
        self
    }
}

impl SizeRecord for FileRecord {
    fn path(&self) -> &Path {
        &self.path
    }

    fn kind(&self) -> EntryKind {
        self.kind
    }

    fn size(&self) -> u64 {
        self.size
    }

    fn uid(&self) -> u32 {
        self.uid
    }

    fn gid(&self) -> u32 {
        self.gid
    }

    fn atime(&self) -> Timestamp {
        self.atime
    }

    fn mtime(&self) -> Timestamp {
        self.mtime
    }

    fn ctime(&self) -> Timestamp {
        self.ctime
    }
}
