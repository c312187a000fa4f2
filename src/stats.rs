use crate::cache::AccessOutcome;

/// Final hit/miss/eviction totals of a replay.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Stats {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
}

impl Stats {
    pub fn accesses(&self) -> u64 {
        self.hits + self.misses
    }

    pub fn hit_rate(&self) -> f64 {
        let total = self.accesses();
        if total > 0 {
            self.hits as f64 / total as f64
        } else {
            0.0
        }
    }
}

/// Running totals owned by one replay pass.
#[derive(Default, Debug)]
pub struct StatsAccumulator {
    totals: Stats,
}

impl StatsAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record(&mut self, outcome: AccessOutcome) {
        match outcome {
            AccessOutcome::Hit => self.totals.hits += 1,
            AccessOutcome::Miss => self.totals.misses += 1,
            AccessOutcome::MissEviction => {
                self.totals.misses += 1;
                self.totals.evictions += 1;
            }
        }
    }

    pub fn snapshot(&self) -> Stats {
        self.totals
    }
}
