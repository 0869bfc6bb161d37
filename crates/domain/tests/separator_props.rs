use dwalk_domain::distribution::{MAX_SEPARATORS, SeparatorSet};
use dwalk_shared_kernel::DomainError;
use proptest::prelude::*;

proptest! {
    #[test]
    fn any_insertion_order_matches_sorted_dedup(values in prop::collection::vec(any::<u64>(), 0..MAX_SEPARATORS)) {
        let mut set = SeparatorSet::new();
        for value in &values {
            // duplicates are reported and skipped
            let _ = set.insert(*value);
        }

        let mut expected = values.clone();
        expected.sort_unstable();
        expected.dedup();
        prop_assert_eq!(set.as_slice(), expected.as_slice());
    }

    #[test]
    fn separators_stay_strictly_ascending(values in prop::collection::vec(0u64..10_000, 0..64)) {
        let mut set = SeparatorSet::new();
        for value in values {
            let before = set.as_slice().to_vec();
            match set.insert(value) {
                Ok(()) => prop_assert_eq!(set.len(), before.len() + 1),
                Err(DomainError::DuplicateSeparator { value: dup }) => {
                    prop_assert_eq!(dup, value);
                    prop_assert_eq!(set.as_slice(), before.as_slice());
                }
                Err(other) => prop_assert!(false, "unexpected error: {other}"),
            }
            prop_assert!(set.as_slice().windows(2).all(|w| w[0] < w[1]));
        }
    }
}

#[test]
fn capacity_is_enforced_before_duplicate_check() {
    let mut set = SeparatorSet::new();
    for value in 0..MAX_SEPARATORS as u64 {
        set.insert(value).unwrap();
    }
    let err = set.insert(0).expect_err("set is full");
    assert!(matches!(err, DomainError::SeparatorCapacity { max: MAX_SEPARATORS }));
    assert_eq!(set.len(), MAX_SEPARATORS);
}

#[test]
fn parse_reports_first_bad_token() {
    let err = SeparatorSet::parse("size:1KB,abc,2KB").expect_err("bad token");
    assert!(matches!(err, DomainError::InvalidByteSize { ref token, .. } if token == "abc"));

    let err = SeparatorSet::parse("time:10").expect_err("unsupported field");
    assert!(matches!(err, DomainError::InvalidDistribution { .. }));
}
