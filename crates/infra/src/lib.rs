// crates/infra/src/lib.rs
#![allow(clippy::multiple_crate_versions)]

pub mod filesystem;
pub mod identity;
pub mod persistence;
pub mod platform;
pub mod reduction;

pub use filesystem::{FsReferenceTimes, WalkRecordSource};
pub use identity::SystemNameResolver;
pub use persistence::{FileWriter, ListingWriter};
pub use reduction::{SoloReducer, ThreadGroupReducer};
