// tests/common/mod.rs
//! Shared test helpers.
#![allow(dead_code)]

use std::{fs, path::Path};

use dwalk_shared_kernel::{EntryKind, FileRecord};

/// Create a file filled with `size` zero bytes.
///
/// # Panics
///
/// Panics with a descriptive message if file creation fails.
pub fn create_sized_file(dir: &Path, name: &str, size: usize) {
    let path = dir.join(name);
    fs::write(&path, vec![0u8; size]).unwrap_or_else(|e| panic!("Failed to create test file at {path:?}: {e}"));
}

/// Regular-file records with the given sizes, named `f0`, `f1`, ...
pub fn file_records(sizes: &[u64]) -> Vec<FileRecord> {
    sizes.iter().enumerate().map(|(i, size)| FileRecord::new(format!("f{i}"), EntryKind::File, *size)).collect()
}
