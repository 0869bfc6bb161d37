//! # Ports
//!
//! Interface definitions for external collaborators.
//!
//! - [`reduction`]: collective sum/max across workers
//! - [`identity`]: uid/gid to name resolution
//! - [`filesystem`]: record collection and reference-file timestamps
//!
//! The domain depends on these traits only; adapters live in `dwalk_infra`.

#![allow(clippy::multiple_crate_versions)]

pub mod filesystem;
pub mod identity;
pub mod reduction;

pub use filesystem::{RecordSource, ReferenceTimes, WalkPlan};
pub use identity::NameResolver;
pub use reduction::Reducer;
