// crates/infra/src/filesystem.rs
use std::{
    fs,
    path::{Path, PathBuf},
};

use dwalk_ports::filesystem::{RecordSource, ReferenceTimes, WalkPlan};
use dwalk_shared_kernel::{
    DomainError, DomainResult, EntryKind, FileRecord, InfrastructureError, Result, Timestamp,
};
use ignore::WalkBuilder;
use log::{debug, warn};

use crate::platform::stat_fields;

/// Walks every root with `ignore::WalkBuilder` and stats each entry.
///
/// Nothing is filtered at walk time: hidden files, ignore files and VCS
/// excludes are all visited. Entries that cannot be stat'ed are logged and
/// skipped.
#[derive(Debug, Default)]
pub struct WalkRecordSource;

impl WalkRecordSource {
    pub fn new() -> Self {
        Self
    }

    pub fn walk(plan: &WalkPlan) -> Result<Vec<FileRecord>> {
        let mut records = Vec::new();
        for root in &plan.roots {
            ensure_root_exists(root)?;
            let mut root_records = collect_from_root(root, plan.follow_links);
            debug!("{}: {} entries", root.display(), root_records.len());
            records.append(&mut root_records);
        }
        Ok(records)
    }
}

impl RecordSource for WalkRecordSource {
    fn collect(&self, plan: &WalkPlan) -> Result<Vec<FileRecord>> {
        Self::walk(plan)
    }
}

fn ensure_root_exists(root: &Path) -> Result<()> {
    fs::symlink_metadata(root).map(drop).map_err(|source| {
        InfrastructureError::FileSystemOperation {
            operation: "stat".to_string(),
            path: root.to_path_buf(),
            source,
        }
        .into()
    })
}

fn collect_from_root(root: &Path, follow_links: bool) -> Vec<FileRecord> {
    let mut builder = WalkBuilder::new(root);
    builder
        .follow_links(follow_links)
        .hidden(false)
        .parents(false)
        .ignore(false)
        .git_ignore(false)
        .git_global(false)
        .git_exclude(false);

    builder
        .build()
        .filter_map(|result| match result {
            Ok(entry) => build_record(entry.into_path(), follow_links),
            Err(err) => {
                warn!("walk error: {err}");
                None
            }
        })
        .collect()
}

fn build_record(path: PathBuf, follow_links: bool) -> Option<FileRecord> {
    let metadata = if follow_links { fs::metadata(&path) } else { fs::symlink_metadata(&path) };
    let metadata = match metadata {
        Ok(meta) => meta,
        Err(err) => {
            warn!("cannot stat {}: {err}", path.display());
            return None;
        }
    };

    let fields = stat_fields(&metadata);
    let kind = EntryKind::from_file_type(metadata.file_type());
    Some(
        FileRecord::new(path, kind, metadata.len())
            .with_owner(fields.uid, fields.gid)
            .with_times(fields.atime, fields.mtime, fields.ctime),
    )
}

/// Reads reference modification times with `stat` (symlinks followed).
#[derive(Debug, Default, Clone, Copy)]
pub struct FsReferenceTimes;

impl ReferenceTimes for FsReferenceTimes {
    fn modify_time(&self, path: &Path) -> DomainResult<Timestamp> {
        fs::metadata(path)
            .map(|meta| stat_fields(&meta).mtime)
            .map_err(|source| DomainError::ReferenceFile { path: path.to_path_buf(), source })
    }
}
