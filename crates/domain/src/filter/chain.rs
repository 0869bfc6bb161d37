use std::{fmt, sync::Arc};

use dwalk_ports::{NameResolver, ReferenceTimes};
use dwalk_shared_kernel::{DomainResult, SizeRecord, Timestamp};
use log::debug;

use super::{Predicate, PredicateKind};

/// Ordered, AND-combined list of predicates.
///
/// Built once before any record is processed, then evaluated read-only.
/// Every relative time predicate compares against the same captured `now`.
pub struct PredicateChain {
    predicates: Vec<Predicate>,
    now: Timestamp,
    resolver: Arc<dyn NameResolver>,
}

impl PredicateChain {
    pub fn new(now: Timestamp, resolver: Arc<dyn NameResolver>) -> Self {
        Self { predicates: Vec::new(), now, resolver }
    }

    pub fn append(&mut self, predicate: Predicate) {
        debug!("filter #{}: {:?}", self.predicates.len() + 1, predicate);
        self.predicates.push(predicate);
    }

    /// Parses `input` for `kind` and appends the result.
    ///
    /// # Errors
    /// Propagates the construction error; the chain is unchanged on failure.
    pub fn append_parsed(
        &mut self,
        kind: PredicateKind,
        input: &str,
        references: &dyn ReferenceTimes,
    ) -> DomainResult<()> {
        let predicate = Predicate::parse(kind, input, references)?;
        self.append(predicate);
        Ok(())
    }

    /// `true` when every predicate holds; an empty chain accepts everything.
    pub fn evaluates<R: SizeRecord + ?Sized>(&self, record: &R) -> bool {
        let resolver = self.resolver.as_ref();
        self.predicates.iter().all(|p| p.holds(record, self.now, resolver))
    }

    /// Borrows the passing records in input order.
    pub fn filter<'a, R: SizeRecord>(&self, records: &'a [R]) -> Vec<&'a R> {
        records.iter().filter(|record| self.evaluates(*record)).collect()
    }

    /// Drops failing records in place, keeping input order.
    pub fn retain<R: SizeRecord>(&self, records: &mut Vec<R>) {
        if self.predicates.is_empty() {
            return;
        }
        records.retain(|record| self.evaluates(record));
    }

    pub fn now(&self) -> Timestamp {
        self.now
    }

    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    pub fn len(&self) -> usize {
        self.predicates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }
}

impl fmt::Debug for PredicateChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PredicateChain")
            .field("predicates", &self.predicates)
            .field("now", &self.now)
            .finish_non_exhaustive()
    }
}
