use std::{sync::Arc, thread};

use dwalk_domain::{
    config::{DistributionRequest, RunConfig},
    distribution::BucketSource,
};
use dwalk_infra::{FsReferenceTimes, SoloReducer, SystemNameResolver, ThreadGroupReducer, WalkRecordSource};
use dwalk_ports::NameResolver;
use dwalk_shared_kernel::FileRecord;
use dwalk_usecase::{ProcessFileList, ProcessOutput};

use crate::common::file_records;

const SIZES: [u64; 12] = [0, 1, 2, 1023, 1024, 1025, 4096, 65_536, 1 << 20, (1 << 20) + 1, 7 << 20, 3];

fn resolver() -> Arc<dyn NameResolver> {
    Arc::new(SystemNameResolver::from_contents("", ""))
}

fn process_shard(records: Vec<FileRecord>, config: &RunConfig, reducer: &dyn dwalk_ports::Reducer) -> ProcessOutput {
    ProcessFileList::new(&WalkRecordSource::new(), &FsReferenceTimes, resolver(), reducer)
        .process(records, config)
        .expect("shard processes")
}

fn run_group(shards: Vec<Vec<FileRecord>>, config: &RunConfig) -> Vec<ProcessOutput> {
    let handles: Vec<_> = ThreadGroupReducer::group(shards.len())
        .into_iter()
        .zip(shards)
        .map(|(reducer, shard)| {
            let config = config.clone();
            thread::spawn(move || process_shard(shard, &config, &reducer))
        })
        .collect();
    handles.into_iter().map(|h| h.join().expect("worker thread")).collect()
}

#[test]
fn every_worker_sees_the_single_process_result() {
    let config = RunConfig { distribution: Some(DistributionRequest::Auto), ..RunConfig::default() };
    let all = file_records(&SIZES);
    let expected = process_shard(all.clone(), &config, &SoloReducer);

    let shards = vec![all[..5].to_vec(), Vec::new(), all[5..9].to_vec(), all[9..].to_vec()];
    let outputs = run_group(shards, &config);

    for output in &outputs {
        assert_eq!(output.summary, expected.summary);
        assert_eq!(output.distribution, expected.distribution);
    }
    let report = expected.distribution.expect("auto distribution");
    assert_eq!(report.source(), BucketSource::Auto { max_size: 7 << 20, ceiling: 1 << 30 });
    assert_eq!(report.total(), SIZES.len() as u64);
}

#[test]
fn user_separators_combine_exactly() {
    let config = RunConfig {
        distribution: Some(DistributionRequest::Separators("size:1KB,1MB".parse().unwrap())),
        ..RunConfig::default()
    };
    let all = file_records(&SIZES);
    let shards: Vec<Vec<FileRecord>> = all.chunks(2).map(<[FileRecord]>::to_vec).collect();
    let outputs = run_group(shards, &config);

    let counts = outputs[0].distribution.as_ref().map(|r| r.counts());
    // <=1KB: 0,1,2,1023,1024,3 ; <=1MB: 1025,4096,65536,1MB ; above: 1MB+1, 7MB
    assert_eq!(counts, Some(vec![6, 4, 2]));
    assert!(outputs.iter().all(|o| o.distribution.as_ref().map(|r| r.counts()) == counts));
}
