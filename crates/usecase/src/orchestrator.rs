use std::sync::Arc;

use dwalk_domain::{
    analytics::WalkSummary,
    config::{DistributionRequest, FilterArg, RunConfig},
    distribution::{BucketPlanner, DistributionPlan, DistributionReport, Histogrammer},
    filter::PredicateChain,
};
use dwalk_ports::{NameResolver, RecordSource, Reducer, ReferenceTimes, WalkPlan};
use dwalk_shared_kernel::{DomainResult, FileRecord, Result, Timestamp};
use log::{debug, info};

use crate::dto::ProcessOutput;

/// Filter, sort, summarize and distribute the local shard of a run.
///
/// Every worker of a run must call [`process`](Self::process) with the same
/// configuration: the summary and the distribution are collective.
pub struct ProcessFileList<'a> {
    source: &'a dyn RecordSource,
    references: &'a dyn ReferenceTimes,
    resolver: Arc<dyn NameResolver>,
    reducer: &'a dyn Reducer,
    now: Timestamp,
}

impl<'a> ProcessFileList<'a> {
    pub fn new(
        source: &'a dyn RecordSource,
        references: &'a dyn ReferenceTimes,
        resolver: Arc<dyn NameResolver>,
        reducer: &'a dyn Reducer,
    ) -> Self {
        Self { source, references, resolver, reducer, now: Timestamp::now() }
    }

    /// Overrides the instant relative time filters are measured from.
    #[must_use]
    pub fn with_now(mut self, now: Timestamp) -> Self {
        self.now = now;
        self
    }

    /// Collects the shard from the record source, then processes it.
    pub fn run(&self, config: &RunConfig) -> Result<ProcessOutput> {
        let plan = WalkPlan { roots: config.paths.clone(), follow_links: config.follow_links };
        let records = self.source.collect(&plan)?;
        info!("Walked {} items", records.len());
        self.process(records, config)
    }

    pub fn process(&self, mut records: Vec<FileRecord>, config: &RunConfig) -> Result<ProcessOutput> {
        let chain = self.build_chain(&config.filters)?;
        if !chain.is_empty() {
            let before = records.len();
            chain.retain(&mut records);
            debug!("filter kept {} of {before} items", records.len());
        }

        if let Some(strategy) = &config.sort {
            strategy.apply(&mut records, self.resolver.as_ref());
        }

        let summary = WalkSummary::from_records(&records).combine(self.reducer);
        let distribution = config.distribution.as_ref().map(|request| self.distribute(&records, request));

        Ok(ProcessOutput { records, summary, distribution })
    }

    /// Builds the predicate chain in command-line order.
    pub fn build_chain(&self, filters: &[FilterArg]) -> DomainResult<PredicateChain> {
        let mut chain = PredicateChain::new(self.now, Arc::clone(&self.resolver));
        for filter in filters {
            chain.append_parsed(filter.kind, &filter.value, self.references)?;
        }
        Ok(chain)
    }

    fn distribute(&self, records: &[FileRecord], request: &DistributionRequest) -> DistributionReport {
        let plan = match request {
            DistributionRequest::Separators(set) => DistributionPlan::user(set.clone()),
            DistributionRequest::Auto => BucketPlanner::plan_auto(records, self.reducer),
        };
        info!("Separators: {}", plan.separators());
        Histogrammer::distribute(records, &plan, self.reducer)
    }
}
