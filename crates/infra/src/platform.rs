// crates/infra/src/platform.rs
//! Platform-specific access to ownership and timestamps.
//!
//! Unix exposes owner ids and nanosecond timestamps through `MetadataExt`;
//! elsewhere the owner is reported as `0` and times come from the portable
//! `Metadata` accessors.

use std::fs::Metadata;

use dwalk_shared_kernel::Timestamp;

/// Owner and timestamps of one `stat` result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatFields {
    pub uid: u32,
    pub gid: u32,
    pub atime: Timestamp,
    pub mtime: Timestamp,
    pub ctime: Timestamp,
}

#[cfg(unix)]
pub fn stat_fields(meta: &Metadata) -> StatFields {
    use std::os::unix::fs::MetadataExt;

    let stamp = |secs: i64, nanos: i64| Timestamp::new(secs, u32::try_from(nanos).unwrap_or(0));
    StatFields {
        uid: meta.uid(),
        gid: meta.gid(),
        atime: stamp(meta.atime(), meta.atime_nsec()),
        mtime: stamp(meta.mtime(), meta.mtime_nsec()),
        ctime: stamp(meta.ctime(), meta.ctime_nsec()),
    }
}

#[cfg(not(unix))]
pub fn stat_fields(meta: &Metadata) -> StatFields {
    let stamp = |time: std::io::Result<std::time::SystemTime>| time.map(Timestamp::from).unwrap_or(Timestamp::EPOCH);
    let mtime = stamp(meta.modified());
    StatFields {
        uid: 0,
        gid: 0,
        atime: stamp(meta.accessed()),
        mtime,
        // no status-change time; creation time is the closest portable value
        ctime: meta.created().map(Timestamp::from).unwrap_or(mtime),
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, SystemTime};

    use super::*;

    #[test]
    fn modification_time_matches_std() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("f");
        std::fs::write(&path, b"x").unwrap();
        let meta = std::fs::metadata(&path).unwrap();

        let fields = stat_fields(&meta);
        let expected = Timestamp::from(meta.modified().unwrap());
        assert_eq!(fields.mtime, expected);

        let now = Timestamp::from(SystemTime::now() + Duration::from_secs(5));
        assert!(fields.mtime < now);
    }
}
