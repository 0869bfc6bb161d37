use std::{
    fs::{File, FileTimes},
    path::Path,
    sync::Arc,
    time::{Duration, SystemTime},
};

use dwalk_domain::{
    config::{DistributionRequest, FilterArg, RunConfig},
    distribution::{Bound, SeparatorSet},
    filter::PredicateKind,
};
use dwalk_infra::{FsReferenceTimes, SoloReducer, SystemNameResolver, WalkRecordSource};
use dwalk_usecase::ProcessFileList;
use tempfile::tempdir;

use crate::common::create_sized_file;

fn process(config: &RunConfig) -> dwalk_usecase::ProcessOutput {
    let resolver = Arc::new(SystemNameResolver::from_contents("", ""));
    ProcessFileList::new(&WalkRecordSource::new(), &FsReferenceTimes, resolver, &SoloReducer)
        .run(config)
        .expect("processing succeeds")
}

#[test]
fn walks_filters_and_distributes_a_tree() {
    let dir = tempdir().unwrap();
    create_sized_file(dir.path(), "a", 0);
    create_sized_file(dir.path(), "b", 1024);
    create_sized_file(dir.path(), "c", 1025);
    std::fs::create_dir(dir.path().join("nested")).unwrap();
    create_sized_file(&dir.path().join("nested"), "d", 5000);

    let config = RunConfig {
        paths: vec![dir.path().to_path_buf()],
        filters: vec![FilterArg::new(PredicateKind::Type, "f")],
        distribution: Some(DistributionRequest::Separators("size:1024,4096".parse::<SeparatorSet>().unwrap())),
        ..RunConfig::default()
    };
    let output = process(&config);

    assert_eq!(output.summary.files, 4);
    assert_eq!(output.summary.dirs, 0);
    assert_eq!(output.summary.bytes, 1024 + 1025 + 5000);

    let report = output.distribution.expect("distribution requested");
    assert_eq!(report.counts(), vec![2, 1, 1]);
    assert_eq!(report.rows()[2].upper, Bound::Max);
}

#[test]
fn anewer_keeps_entries_accessed_after_the_reference_change() {
    let dir = tempdir().unwrap();
    let now = SystemTime::now();
    let hour = Duration::from_secs(3600);
    create_sized_file(dir.path(), "reference", 1);
    create_sized_file(dir.path(), "old", 1);
    create_sized_file(dir.path(), "new", 1);
    set_times(&dir.path().join("reference"), now - hour, now - hour);
    set_times(&dir.path().join("old"), now - 2 * hour, now - 2 * hour);
    set_times(&dir.path().join("new"), now, now - 2 * hour);

    let config = RunConfig {
        paths: vec![dir.path().to_path_buf()],
        filters: vec![
            FilterArg::new(PredicateKind::Type, "f"),
            FilterArg::new(PredicateKind::Anewer, dir.path().join("reference").to_string_lossy()),
        ],
        ..RunConfig::default()
    };
    let output = process(&config);
    let names: Vec<_> = output.records.iter().filter_map(|r| r.path.file_name()).collect();
    assert!(names.iter().any(|n| *n == "new"));
    assert!(!names.iter().any(|n| *n == "old"));
    assert!(!names.iter().any(|n| *n == "reference"));
}

fn set_times(path: &Path, accessed: SystemTime, modified: SystemTime) {
    let file = File::options().write(true).open(path).unwrap();
    file.set_times(FileTimes::new().set_accessed(accessed).set_modified(modified)).unwrap();
}

#[test]
fn summary_counts_every_kind_without_filters() {
    let dir = tempdir().unwrap();
    create_sized_file(dir.path(), "file", 3);
    std::fs::create_dir(dir.path().join("sub")).unwrap();

    let output = process(&RunConfig { paths: vec![dir.path().to_path_buf()], ..RunConfig::default() });
    // root directory, sub directory, one file
    assert_eq!(output.summary.items(), 3);
    assert_eq!(output.summary.dirs, 2);
    assert_eq!(output.summary.bytes, 3);
}
