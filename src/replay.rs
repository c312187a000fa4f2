use log::debug;

use crate::cache::{AccessOutcome, CacheSim};
use crate::config::CacheConfig;
use crate::error::{SimError, TraceError};
use crate::stats::{Stats, StatsAccumulator};
use crate::trace::OperationRecord;

/// Outcomes of the sub-accesses one record performed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RecordOutcome {
    pub first: AccessOutcome,
    /// Only a Modify has a second sub-access.
    pub second: Option<AccessOutcome>,
}

impl RecordOutcome {
    pub fn iter(&self) -> impl Iterator<Item = AccessOutcome> {
        std::iter::once(self.first).chain(self.second)
    }
}

/// A cache plus the totals of everything replayed through it.
pub struct Simulator {
    cache: CacheSim,
    stats: StatsAccumulator,
}

impl Simulator {
    pub fn new(config: CacheConfig) -> Result<Self, SimError> {
        Ok(Self {
            cache: CacheSim::new(config)?,
            stats: StatsAccumulator::new(),
        })
    }

    pub fn cache(&self) -> &CacheSim {
        &self.cache
    }

    pub fn stats(&self) -> Stats {
        self.stats.snapshot()
    }

    fn sub_access(&mut self, address: u64) -> AccessOutcome {
        let outcome = self.cache.access(address);
        self.stats.record(outcome);
        outcome
    }

    /// Replays one record. Instruction fetches are skipped and return `None`.
    pub fn apply(&mut self, record: &OperationRecord) -> Option<RecordOutcome> {
        // Modify is a load then a store to the same block
        let count = record.kind.sub_accesses();
        debug_assert!(count <= 2);
        if count == 0 {
            return None;
        }
        let first = self.sub_access(record.address);
        let second = (count > 1).then(|| self.sub_access(record.address));
        debug_assert!(second.is_none_or(AccessOutcome::is_hit));

        let outcome = RecordOutcome { first, second };
        debug!("{} {:#x}: {:?}", record.kind, record.address, outcome);
        Some(outcome)
    }

    /// Feeds every record from `source` through the cache, calling `observe`
    /// after each applied one.
    ///
    /// The first source error ends the run. Records before it stay counted
    /// and are returned in the error as `partial`.
    pub fn run<I, T, F>(&mut self, source: I, mut observe: F) -> Result<Stats, SimError>
    where
        I: IntoIterator<Item = Result<T, TraceError>>,
        T: AsRef<OperationRecord>,
        F: FnMut(&T, &RecordOutcome),
    {
        for (index, item) in source.into_iter().enumerate() {
            let item = item.map_err(|source| SimError::Trace {
                index,
                source,
                partial: self.stats(),
            })?;
            if let Some(outcome) = self.apply(item.as_ref()) {
                observe(&item, &outcome);
            }
        }
        Ok(self.stats())
    }
}

/// Replays `source` against a fresh cache built from `config`.
pub fn replay<I, T>(config: CacheConfig, source: I) -> Result<Stats, SimError>
where
    I: IntoIterator<Item = Result<T, TraceError>>,
    T: AsRef<OperationRecord>,
{
    replay_with(config, source, |_, _| {})
}

/// Like [`replay`], reporting every applied record to `observe`.
pub fn replay_with<I, T, F>(config: CacheConfig, source: I, observe: F) -> Result<Stats, SimError>
where
    I: IntoIterator<Item = Result<T, TraceError>>,
    T: AsRef<OperationRecord>,
    F: FnMut(&T, &RecordOutcome),
{
    Simulator::new(config)?.run(source, observe)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TraceErrorKind;
    use crate::trace::OperationKind;

    fn ok(records: &[OperationRecord]) -> Vec<Result<OperationRecord, TraceError>> {
        records.iter().copied().map(Ok).collect()
    }

    fn stats(hits: u64, misses: u64, evictions: u64) -> Stats {
        Stats {
            hits,
            misses,
            evictions,
        }
    }

    #[test]
    fn one_line_cache_thrashes() {
        let config = CacheConfig::new(0, 1, 0).unwrap();
        let trace = [
            OperationRecord::load(0x0),
            OperationRecord::load(0x10),
            OperationRecord::load(0x0),
        ];
        assert_eq!(replay(config, ok(&trace)).unwrap(), stats(0, 3, 2));
    }

    #[test]
    fn fetches_are_skipped() {
        let config = CacheConfig::new(0, 1, 0).unwrap();
        let mut sim = Simulator::new(config).unwrap();
        assert_eq!(sim.apply(&OperationRecord::fetch(0x40)), None);
        assert_eq!(sim.stats(), Stats::default());
        assert!(!sim.cache().contains(0, 0x40));
    }

    #[test]
    fn cold_modify_is_miss_then_hit() {
        let config = CacheConfig::new(0, 1, 0).unwrap();
        let mut sim = Simulator::new(config).unwrap();
        let out = sim.apply(&OperationRecord::modify(0x8)).unwrap();
        assert_eq!(out.first, AccessOutcome::Miss);
        assert_eq!(out.second, Some(AccessOutcome::Hit));
        assert_eq!(sim.stats(), stats(1, 1, 0));

        // evicts 0x8, then hits itself
        let out = sim.apply(&OperationRecord::modify(0x9)).unwrap();
        assert_eq!(
            out.iter().collect::<Vec<_>>(),
            [AccessOutcome::MissEviction, AccessOutcome::Hit]
        );
        assert_eq!(sim.stats(), stats(2, 2, 1));
    }

    #[test]
    fn outcome_shape_follows_sub_access_count() {
        let config = CacheConfig::new(1, 2, 2).unwrap();
        let mut sim = Simulator::new(config).unwrap();
        for kind in [
            OperationKind::Load,
            OperationKind::Store,
            OperationKind::Modify,
            OperationKind::InstructionFetch,
        ] {
            let before = sim.stats().accesses();
            let applied = sim
                .apply(&OperationRecord::new(kind, 0x40))
                .map_or(0, |o| o.iter().count());
            assert_eq!(applied, kind.sub_accesses());
            assert_eq!(sim.stats().accesses() - before, kind.sub_accesses() as u64);
        }
    }

    #[test]
    fn warm_modify_is_two_hits() {
        let config = CacheConfig::new(2, 2, 4).unwrap();
        let trace = [OperationRecord::load(0x100), OperationRecord::modify(0x104)];
        assert_eq!(replay(config, ok(&trace)).unwrap(), stats(2, 1, 0));
    }

    #[test]
    fn trace_error_keeps_partial_counts() {
        let config = CacheConfig::new(0, 1, 0).unwrap();
        let source: Vec<Result<OperationRecord, TraceError>> = vec![
            Ok(OperationRecord::load(0x1)),
            Ok(OperationRecord::load(0x1)),
            Err(TraceError::new(3, TraceErrorKind::MissingSize)),
            Ok(OperationRecord::load(0x2)),
        ];
        match replay(config, source) {
            Err(SimError::Trace {
                index,
                source,
                partial,
            }) => {
                assert_eq!(index, 2);
                assert_eq!(source.line, 3);
                assert_eq!(partial, stats(1, 1, 0));
            }
            other => panic!("expected trace error, got {other:?}"),
        }
    }

    #[test]
    fn observer_sees_applied_records_only() {
        let config = CacheConfig::new(0, 2, 0).unwrap();
        let trace = [
            OperationRecord::fetch(0x0),
            OperationRecord::store(0x1),
            OperationRecord::modify(0x1),
        ];
        let mut seen = Vec::new();
        replay_with(config, ok(&trace), |r: &OperationRecord, o: &RecordOutcome| {
            seen.push((r.kind, *o))
        })
        .unwrap();
        assert_eq!(
            seen,
            [
                (
                    OperationKind::Store,
                    RecordOutcome {
                        first: AccessOutcome::Miss,
                        second: None
                    }
                ),
                (
                    OperationKind::Modify,
                    RecordOutcome {
                        first: AccessOutcome::Hit,
                        second: Some(AccessOutcome::Hit)
                    }
                ),
            ]
        );
    }
}
