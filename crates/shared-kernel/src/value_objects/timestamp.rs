use std::{
    fmt,
    time::{SystemTime, UNIX_EPOCH},
};

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Seconds and nanoseconds since the Unix epoch, as reported by `stat`.
///
/// Ordering compares seconds first, then nanoseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[must_use]
pub struct Timestamp {
    secs: i64,
    nanos: u32,
}

impl Timestamp {
    pub const EPOCH: Self = Self { secs: 0, nanos: 0 };

    /// Nanoseconds at or above one second are carried into `secs`.
    pub const fn new(secs: i64, nanos: u32) -> Self {
        Self {
            secs: secs + (nanos / 1_000_000_000) as i64,
            nanos: nanos % 1_000_000_000,
        }
    }

    pub const fn from_secs(secs: i64) -> Self {
        Self { secs, nanos: 0 }
    }

    pub fn now() -> Self {
        Self::from(SystemTime::now())
    }

    #[inline]
    pub const fn secs(self) -> i64 {
        self.secs
    }

    #[inline]
    pub const fn nanos(self) -> u32 {
        self.nanos
    }

    /// Whole seconds elapsed from `self` to `later`; zero when `later` is not after `self`.
    ///
    /// The difference of two `i64` second counts can exceed `i64`; it is
    /// taken in `i128` and always fits in `u64`.
    pub fn seconds_until(self, later: Self) -> u64 {
        if later <= self {
            return 0;
        }
        let mut secs = i128::from(later.secs) - i128::from(self.secs);
        if later.nanos < self.nanos {
            secs -= 1;
        }
        u64::try_from(secs).unwrap_or(u64::MAX)
    }

    pub fn to_local(self) -> Option<DateTime<Local>> {
        DateTime::from_timestamp(self.secs, self.nanos).map(|dt| dt.with_timezone(&Local))
    }
}

impl From<SystemTime> for Timestamp {
    fn from(time: SystemTime) -> Self {
        match time.duration_since(UNIX_EPOCH) {
            Ok(after) => Self::new(i64::try_from(after.as_secs()).unwrap_or(i64::MAX), after.subsec_nanos()),
            Err(err) => {
                let before = err.duration();
                let secs = -i64::try_from(before.as_secs()).unwrap_or(i64::MAX);
                if before.subsec_nanos() == 0 {
                    Self::from_secs(secs)
                } else {
                    Self { secs: secs - 1, nanos: 1_000_000_000 - before.subsec_nanos() }
                }
            }
        }
    }
}

impl From<DateTime<Local>> for Timestamp {
    fn from(dt: DateTime<Local>) -> Self {
        Self::new(dt.timestamp(), dt.timestamp_subsec_nanos())
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_local() {
            Some(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S")),
            None => write!(f, "{}.{:09}", self.secs, self.nanos),
        }
    }
}
