// domain analytics sorting utilities
use std::{cmp::Ordering, str::FromStr};

use dwalk_ports::NameResolver;
use dwalk_shared_kernel::{DomainError, SizeRecord};

/// Maximum number of comma-separated sort fields.
pub const MAX_SORT_FIELDS: usize = 7;

/// Direction of one sort key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl SortOrder {
    #[inline]
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Ascending => ordering,
            Self::Descending => ordering.reverse(),
        }
    }
}

impl From<bool> for SortOrder {
    #[inline]
    fn from(desc: bool) -> Self {
        if desc { Self::Descending } else { Self::Ascending }
    }
}

/// Record fields available for ordering the listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Name,
    User,
    Group,
    Uid,
    Gid,
    Atime,
    Mtime,
    Ctime,
    Size,
}

impl FromStr for SortKey {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(Self::Name),
            "user" => Ok(Self::User),
            "group" => Ok(Self::Group),
            "uid" => Ok(Self::Uid),
            "gid" => Ok(Self::Gid),
            "atime" => Ok(Self::Atime),
            "mtime" => Ok(Self::Mtime),
            "ctime" => Ok(Self::Ctime),
            "size" => Ok(Self::Size),
            other => Err(DomainError::InvalidSortField { field: other.to_string() }),
        }
    }
}

impl SortKey {
    /// Users and groups compare by resolved name; ids without a name compare as their decimal text.
    pub fn compare<R: SizeRecord + ?Sized>(&self, a: &R, b: &R, resolver: &dyn NameResolver) -> Ordering {
        match self {
            Self::Name => a.path().cmp(b.path()),
            Self::User => {
                let name = |r: &R| resolver.uid_to_name(r.uid()).unwrap_or_else(|| r.uid().to_string());
                name(a).cmp(&name(b))
            }
            Self::Group => {
                let name = |r: &R| resolver.gid_to_name(r.gid()).unwrap_or_else(|| r.gid().to_string());
                name(a).cmp(&name(b))
            }
            Self::Uid => a.uid().cmp(&b.uid()),
            Self::Gid => a.gid().cmp(&b.gid()),
            Self::Atime => a.atime().cmp(&b.atime()),
            Self::Mtime => a.mtime().cmp(&b.mtime()),
            Self::Ctime => a.ctime().cmp(&b.ctime()),
            Self::Size => a.size().cmp(&b.size()),
        }
    }
}

/// One sort key with its direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    key: SortKey,
    order: SortOrder,
}

impl SortSpec {
    pub fn new(key: SortKey, order: SortOrder) -> Self {
        Self { key, order }
    }

    pub fn ascending(key: SortKey) -> Self {
        Self::new(key, SortOrder::Ascending)
    }

    pub fn descending(key: SortKey) -> Self {
        Self::new(key, SortOrder::Descending)
    }

    pub fn key(&self) -> SortKey {
        self.key
    }

    pub fn order(&self) -> SortOrder {
        self.order
    }
}

/// Comma-separated sort fields, e.g. `size,-mtime,name`; `-` sorts descending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortStrategy {
    specs: Vec<SortSpec>,
}

impl SortStrategy {
    pub fn new(specs: Vec<SortSpec>) -> Self {
        Self { specs }
    }

    pub fn specs(&self) -> &[SortSpec] {
        &self.specs
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// Stable in-place sort; records equal on every key keep their order.
    pub fn apply<R: SizeRecord>(&self, records: &mut [R], resolver: &dyn NameResolver) {
        if records.is_empty() || self.specs.is_empty() {
            return;
        }
        records.sort_by(|a, b| self.compare(a, b, resolver));
    }

    fn compare<R: SizeRecord>(&self, a: &R, b: &R, resolver: &dyn NameResolver) -> Ordering {
        for spec in &self.specs {
            let cmp = spec.key.compare(a, b, resolver);
            if cmp != Ordering::Equal {
                return spec.order.apply(cmp);
            }
        }
        Ordering::Equal
    }
}

impl FromStr for SortStrategy {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let specs = s
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(|part| match part.strip_prefix('-') {
                Some(field) => field.parse().map(SortSpec::descending),
                None => part.parse().map(SortSpec::ascending),
            })
            .collect::<Result<Vec<_>, _>>()?;

        if specs.is_empty() {
            return Err(DomainError::InvalidSortField { field: s.to_string() });
        }
        if specs.len() > MAX_SORT_FIELDS {
            return Err(DomainError::TooManySortFields { max: MAX_SORT_FIELDS });
        }
        Ok(Self::new(specs))
    }
}
