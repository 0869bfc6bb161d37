use std::{fmt, path::Path};

use dwalk_ports::{NameResolver, ReferenceTimes};
use dwalk_shared_kernel::{DomainError, DomainResult, EntryKind, SizeRecord, Timestamp, parse_byte_size};

const SECS_PER_MINUTE: u64 = 60;
const SECS_PER_DAY: u64 = 24 * 60 * 60;

/// Filter flags accepted on the command line, one per predicate kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PredicateKind {
    Amin,
    Mmin,
    Cmin,
    Atime,
    Mtime,
    Ctime,
    Anewer,
    Cnewer,
    Uid,
    Gid,
    User,
    Group,
    Size,
    Type,
}

impl PredicateKind {
    pub const ALL: [Self; 14] = [
        Self::Amin,
        Self::Mmin,
        Self::Cmin,
        Self::Atime,
        Self::Mtime,
        Self::Ctime,
        Self::Anewer,
        Self::Cnewer,
        Self::Uid,
        Self::Gid,
        Self::User,
        Self::Group,
        Self::Size,
        Self::Type,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Amin => "amin",
            Self::Mmin => "mmin",
            Self::Cmin => "cmin",
            Self::Atime => "atime",
            Self::Mtime => "mtime",
            Self::Ctime => "ctime",
            Self::Anewer => "anewer",
            Self::Cnewer => "cnewer",
            Self::Uid => "uid",
            Self::Gid => "gid",
            Self::User => "user",
            Self::Group => "group",
            Self::Size => "size",
            Self::Type => "type",
        }
    }

    fn construction_error(self, input: &str, reason: impl Into<String>) -> DomainError {
        DomainError::PredicateConstruction {
            kind: self.as_str().to_string(),
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for PredicateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `N` exactly, `+N` more than, `-N` less than.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Exactly,
    MoreThan,
    LessThan,
}

impl Comparison {
    /// Splits a leading `+`/`-` off `text`.
    fn split(text: &str) -> (Self, &str) {
        if let Some(rest) = text.strip_prefix('+') {
            (Self::MoreThan, rest)
        } else if let Some(rest) = text.strip_prefix('-') {
            (Self::LessThan, rest)
        } else {
            (Self::Exactly, text)
        }
    }

    #[inline]
    pub fn holds(self, value: u64, target: u64) -> bool {
        match self {
            Self::Exactly => value == target,
            Self::MoreThan => value > target,
            Self::LessThan => value < target,
        }
    }
}

/// Age window in whole minutes or days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelativeWindow {
    pub comparison: Comparison,
    pub magnitude: u64,
}

impl RelativeWindow {
    pub fn parse(text: &str) -> Option<Self> {
        let (comparison, digits) = Comparison::split(text.trim());
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let magnitude = digits.parse().ok()?;
        Some(Self { comparison, magnitude })
    }

    /// Compares the age of `time` relative to `now`, truncated to `unit_secs`.
    /// Timestamps in the future have age zero.
    pub fn matches(&self, time: Timestamp, now: Timestamp, unit_secs: u64) -> bool {
        let age = time.seconds_until(now) / unit_secs;
        self.comparison.holds(age, self.magnitude)
    }
}

/// Byte-size comparison for `--size`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeThreshold {
    pub comparison: Comparison,
    pub bytes: u64,
}

impl SizeThreshold {
    pub fn matches(&self, size: u64) -> bool {
        self.comparison.holds(size, self.bytes)
    }
}

/// One typed inclusion condition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    Amin(RelativeWindow),
    Mmin(RelativeWindow),
    Cmin(RelativeWindow),
    Atime(RelativeWindow),
    Mtime(RelativeWindow),
    Ctime(RelativeWindow),
    /// Access time strictly newer than the reference file's modification time.
    Anewer(Timestamp),
    /// Status-change time strictly newer than the reference file's modification time.
    Cnewer(Timestamp),
    Uid(u32),
    Gid(u32),
    User(String),
    Group(String),
    Size(SizeThreshold),
    Type(EntryKind),
}

impl Predicate {
    pub fn kind(&self) -> PredicateKind {
        match self {
            Self::Amin(_) => PredicateKind::Amin,
            Self::Mmin(_) => PredicateKind::Mmin,
            Self::Cmin(_) => PredicateKind::Cmin,
            Self::Atime(_) => PredicateKind::Atime,
            Self::Mtime(_) => PredicateKind::Mtime,
            Self::Ctime(_) => PredicateKind::Ctime,
            Self::Anewer(_) => PredicateKind::Anewer,
            Self::Cnewer(_) => PredicateKind::Cnewer,
            Self::Uid(_) => PredicateKind::Uid,
            Self::Gid(_) => PredicateKind::Gid,
            Self::User(_) => PredicateKind::User,
            Self::Group(_) => PredicateKind::Group,
            Self::Size(_) => PredicateKind::Size,
            Self::Type(_) => PredicateKind::Type,
        }
    }

    /// Builds a relative time predicate from `+N`, `-N` or `N`.
    ///
    /// # Errors
    /// [`DomainError::PredicateConstruction`] when `kind` is not a relative time
    /// kind or `input` is not a signed whole number.
    pub fn relative(kind: PredicateKind, input: &str) -> DomainResult<Self> {
        let window = RelativeWindow::parse(input)
            .ok_or_else(|| kind.construction_error(input, "expected N, +N or -N"))?;
        match kind {
            PredicateKind::Amin => Ok(Self::Amin(window)),
            PredicateKind::Mmin => Ok(Self::Mmin(window)),
            PredicateKind::Cmin => Ok(Self::Cmin(window)),
            PredicateKind::Atime => Ok(Self::Atime(window)),
            PredicateKind::Mtime => Ok(Self::Mtime(window)),
            PredicateKind::Ctime => Ok(Self::Ctime(window)),
            other => Err(other.construction_error(input, "not a relative time filter")),
        }
    }

    /// Builds `--anewer`/`--cnewer` from an already captured reference time.
    ///
    /// # Errors
    /// [`DomainError::PredicateConstruction`] for any other kind.
    pub fn newer(kind: PredicateKind, reference: Timestamp) -> DomainResult<Self> {
        match kind {
            PredicateKind::Anewer => Ok(Self::Anewer(reference)),
            PredicateKind::Cnewer => Ok(Self::Cnewer(reference)),
            other => Err(other.construction_error(&reference.to_string(), "not a reference file filter")),
        }
    }

    /// # Errors
    /// [`DomainError::PredicateConstruction`] when `input` is not a `u32`.
    pub fn uid(input: &str) -> DomainResult<Self> {
        parse_id(PredicateKind::Uid, input).map(Self::Uid)
    }

    /// # Errors
    /// [`DomainError::PredicateConstruction`] when `input` is not a `u32`.
    pub fn gid(input: &str) -> DomainResult<Self> {
        parse_id(PredicateKind::Gid, input).map(Self::Gid)
    }

    /// # Errors
    /// [`DomainError::PredicateConstruction`] when `name` is empty.
    pub fn user(name: &str) -> DomainResult<Self> {
        non_empty(PredicateKind::User, name).map(Self::User)
    }

    /// # Errors
    /// [`DomainError::PredicateConstruction`] when `name` is empty.
    pub fn group(name: &str) -> DomainResult<Self> {
        non_empty(PredicateKind::Group, name).map(Self::Group)
    }

    /// Builds `--size` from `N`, `+N` or `-N`, where `N` accepts byte units.
    ///
    /// # Errors
    /// [`DomainError::PredicateConstruction`] when the size part does not parse.
    pub fn size(input: &str) -> DomainResult<Self> {
        let (comparison, rest) = Comparison::split(input.trim());
        let bytes = parse_byte_size(rest)
            .map_err(|err| PredicateKind::Size.construction_error(input, err.to_string()))?;
        Ok(Self::Size(SizeThreshold { comparison, bytes }))
    }

    /// Builds `--type` from a single `b c d f l p s` character.
    ///
    /// # Errors
    /// [`DomainError::PredicateConstruction`] for any other input.
    pub fn entry_type(input: &str) -> DomainResult<Self> {
        let mut chars = input.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => EntryKind::from_type_char(c)
                .map(Self::Type)
                .ok_or_else(|| PredicateKind::Type.construction_error(input, "unsupported file type")),
            _ => Err(PredicateKind::Type.construction_error(input, "expected one of b, c, d, f, l, p, s")),
        }
    }

    /// Builds any kind from its command-line text. Reference file kinds stat
    /// `input` through `references`.
    ///
    /// # Errors
    /// The constructor errors above, or [`DomainError::ReferenceFile`].
    pub fn parse(kind: PredicateKind, input: &str, references: &dyn ReferenceTimes) -> DomainResult<Self> {
        match kind {
            PredicateKind::Amin
            | PredicateKind::Mmin
            | PredicateKind::Cmin
            | PredicateKind::Atime
            | PredicateKind::Mtime
            | PredicateKind::Ctime => Self::relative(kind, input),
            PredicateKind::Anewer | PredicateKind::Cnewer => {
                Self::newer(kind, references.modify_time(Path::new(input))?)
            }
            PredicateKind::Uid => Self::uid(input),
            PredicateKind::Gid => Self::gid(input),
            PredicateKind::User => Self::user(input),
            PredicateKind::Group => Self::group(input),
            PredicateKind::Size => Self::size(input),
            PredicateKind::Type => Self::entry_type(input),
        }
    }

    /// Total: a record the predicate cannot judge (unknown owner name, ...) does not match.
    pub fn holds<R: SizeRecord + ?Sized>(&self, record: &R, now: Timestamp, resolver: &dyn NameResolver) -> bool {
        match self {
            Self::Amin(w) => w.matches(record.atime(), now, SECS_PER_MINUTE),
            Self::Mmin(w) => w.matches(record.mtime(), now, SECS_PER_MINUTE),
            Self::Cmin(w) => w.matches(record.ctime(), now, SECS_PER_MINUTE),
            Self::Atime(w) => w.matches(record.atime(), now, SECS_PER_DAY),
            Self::Mtime(w) => w.matches(record.mtime(), now, SECS_PER_DAY),
            Self::Ctime(w) => w.matches(record.ctime(), now, SECS_PER_DAY),
            Self::Anewer(reference) => record.atime() > *reference,
            Self::Cnewer(reference) => record.ctime() > *reference,
            Self::Uid(uid) => record.uid() == *uid,
            Self::Gid(gid) => record.gid() == *gid,
            Self::User(name) => resolver.uid_to_name(record.uid()).is_some_and(|n| n == *name),
            Self::Group(name) => resolver.gid_to_name(record.gid()).is_some_and(|n| n == *name),
            Self::Size(threshold) => threshold.matches(record.size()),
            Self::Type(kind) => record.kind() == *kind,
        }
    }
}

fn parse_id(kind: PredicateKind, input: &str) -> DomainResult<u32> {
    input
        .trim()
        .parse()
        .map_err(|_| kind.construction_error(input, "expected a numeric id"))
}

fn non_empty(kind: PredicateKind, name: &str) -> DomainResult<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(kind.construction_error(name, "name must not be empty"));
    }
    Ok(name.to_string())
}
