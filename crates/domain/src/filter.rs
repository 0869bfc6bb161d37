//! Predicate chain narrowing the record list before reporting.

pub mod chain;
pub mod predicate;

pub use chain::PredicateChain;
pub use predicate::{Comparison, Predicate, PredicateKind, RelativeWindow, SizeThreshold};
