#![allow(clippy::multiple_crate_versions)]

pub use error::{DomainError, DomainResult, DwalkError, InfraResult, InfrastructureError, PresentationError, Result};

pub mod error;
pub mod value_objects;

pub use value_objects::{EntryKind, FileRecord, FileSize, SizeRecord, Timestamp, parse_byte_size};
