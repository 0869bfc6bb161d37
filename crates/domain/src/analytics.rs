pub mod sort;
pub mod summary;

pub use sort::{MAX_SORT_FIELDS, SortKey, SortOrder, SortSpec, SortStrategy};
pub use summary::WalkSummary;
