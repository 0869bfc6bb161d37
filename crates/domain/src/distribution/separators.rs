use std::{fmt, str::FromStr};

use dwalk_shared_kernel::{DomainError, DomainResult, parse_byte_size};
use serde::Serialize;

/// Upper bound on the number of separators a distribution may carry.
pub const MAX_SEPARATORS: usize = 128;

const FIELD_KEYWORD: &str = "size";

/// Strictly ascending, duplicate-free byte-size thresholds.
///
/// `n` separators describe `n + 1` bins: `[0, s0]`, `(s0, s1]`, ..., `(s[n-1], ∞)`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SeparatorSet {
    separators: Vec<u64>,
}

impl SeparatorSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Caller guarantees `values` is strictly ascending and within capacity.
    pub(crate) fn from_ascending(values: Vec<u64>) -> Self {
        debug_assert!(values.windows(2).all(|w| w[0] < w[1]));
        debug_assert!(values.len() <= MAX_SEPARATORS);
        Self { separators: values }
    }

    /// Inserts `value` at its sorted position.
    ///
    /// # Errors
    /// [`DomainError::SeparatorCapacity`] when the set is full,
    /// [`DomainError::DuplicateSeparator`] when `value` is already present.
    /// The set is left untouched on failure.
    pub fn insert(&mut self, value: u64) -> DomainResult<()> {
        if self.separators.len() >= MAX_SEPARATORS {
            return Err(DomainError::SeparatorCapacity { max: MAX_SEPARATORS });
        }
        match self.separators.binary_search(&value) {
            Ok(_) => Err(DomainError::DuplicateSeparator { value }),
            Err(pos) => {
                self.separators.insert(pos, value);
                Ok(())
            }
        }
    }

    /// Parses a `--distribution` argument.
    ///
    /// `size` alone yields an empty set, which requests automatic buckets.
    /// `size:<n>[,<n>...]` inserts every value in order; values accept byte
    /// units (`4KB`, `1.5MB`). A single trailing comma is ignored. Parsing
    /// stops at the first bad token or duplicate.
    ///
    /// # Errors
    /// [`DomainError::InvalidDistribution`] for an unknown field or missing `:`,
    /// [`DomainError::InvalidByteSize`] for a malformed value, and the
    /// [`insert`](Self::insert) errors.
    pub fn parse(text: &str) -> DomainResult<Self> {
        let invalid = |reason: &str| DomainError::InvalidDistribution {
            input: text.to_string(),
            reason: reason.to_string(),
        };

        let Some(rest) = text.strip_prefix(FIELD_KEYWORD) else {
            return Err(invalid("only the 'size' field is supported"));
        };
        if rest.is_empty() {
            return Ok(Self::new());
        }
        let Some(list) = rest.strip_prefix(':') else {
            return Err(invalid("expected ':' after 'size'"));
        };

        let list = list.strip_suffix(',').unwrap_or(list);
        let mut set = Self::new();
        for token in list.split(',') {
            let value = parse_byte_size(token)?;
            set.insert(value)?;
        }
        Ok(set)
    }

    pub fn as_slice(&self) -> &[u64] {
        &self.separators
    }

    pub fn iter(&self) -> std::slice::Iter<'_, u64> {
        self.separators.iter()
    }

    pub fn len(&self) -> usize {
        self.separators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.separators.is_empty()
    }

    /// Number of bins these separators describe, overflow bin included.
    pub fn bin_count(&self) -> usize {
        self.separators.len() + 1
    }

    pub fn into_vec(self) -> Vec<u64> {
        self.separators
    }
}

impl FromStr for SeparatorSet {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl<'a> IntoIterator for &'a SeparatorSet {
    type Item = &'a u64;
    type IntoIter = std::slice::Iter<'a, u64>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for SeparatorSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, value) in self.separators.iter().enumerate() {
            if i != 0 {
                f.write_str(", ")?;
            }
            write!(f, "{value}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_keeps_ascending_order() {
        let mut set = SeparatorSet::new();
        for value in [50, 10, 30, 40, 20, 60] {
            set.insert(value).expect("distinct values insert");
        }
        assert_eq!(set.as_slice(), &[10, 20, 30, 40, 50, 60]);
    }

    #[test]
    fn duplicate_is_rejected_without_mutation() {
        let mut set = SeparatorSet::new();
        set.insert(100).unwrap();
        set.insert(50).unwrap();
        let err = set.insert(100).expect_err("duplicate must fail");
        assert!(matches!(err, DomainError::DuplicateSeparator { value: 100 }));
        assert_eq!(set.as_slice(), &[50, 100]);
    }

    #[test]
    fn capacity_is_checked_before_insertion() {
        let mut set = SeparatorSet::new();
        for value in 0..MAX_SEPARATORS as u64 {
            set.insert(value * 2).unwrap();
        }
        let err = set.insert(1).expect_err("full set rejects inserts");
        assert!(matches!(err, DomainError::SeparatorCapacity { max: MAX_SEPARATORS }));
        assert_eq!(set.len(), MAX_SEPARATORS);
        assert!(!set.as_slice().contains(&1));
    }

    #[test]
    fn bare_keyword_requests_automatic_buckets() {
        let set = SeparatorSet::parse("size").expect("keyword alone parses");
        assert!(set.is_empty());
        assert_eq!(set.bin_count(), 1);
    }

    #[test]
    fn parses_values_with_units_in_sorted_order() {
        let set: SeparatorSet = "size:1MB,1KB,500".parse().expect("separators parse");
        assert_eq!(set.as_slice(), &[500, 1024, 1024 * 1024]);
        assert_eq!(set.to_string(), "500, 1024, 1048576");
    }

    #[test]
    fn duplicate_token_aborts_parsing() {
        let err = SeparatorSet::parse("size:100,50,100").expect_err("second 100 is a duplicate");
        assert!(matches!(err, DomainError::DuplicateSeparator { value: 100 }));
    }

    #[test]
    fn equal_values_in_different_units_are_duplicates() {
        let err = SeparatorSet::parse("size:1KB,1024").expect_err("1KB == 1024");
        assert!(matches!(err, DomainError::DuplicateSeparator { value: 1024 }));
    }

    #[test]
    fn malformed_token_names_the_token() {
        let err = SeparatorSet::parse("size:10,abc").expect_err("abc is not a size");
        match err {
            DomainError::InvalidByteSize { token, .. } => assert_eq!(token, "abc"),
            other => panic!("unexpected error: {other}"),
        }
        assert!(SeparatorSet::parse("size:").is_err());
        assert!(SeparatorSet::parse("size:1,,2").is_err());
    }

    #[test]
    fn single_trailing_comma_is_ignored() {
        assert_eq!(SeparatorSet::parse("size:10,").unwrap().as_slice(), &[10]);
        assert_eq!(SeparatorSet::parse("size:1KB,10,").unwrap().as_slice(), &[10, 1024]);
        assert!(SeparatorSet::parse("size:,").is_err());
        assert!(SeparatorSet::parse("size:10,,").is_err());
    }

    #[test]
    fn rejects_unknown_field_or_missing_colon() {
        for input in ["mtime:10", "sizes", "size;10", ""] {
            let err = SeparatorSet::parse(input).expect_err("invalid distribution");
            assert!(matches!(err, DomainError::InvalidDistribution { .. }), "{input}");
        }
    }
}
