pub mod address;
pub mod lru;

use log::{debug, info, trace};

use crate::config::CacheConfig;
use crate::error::AllocationError;
use address::{DecodedAddress, decode};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheLine {
    pub tag: u64,
    pub valid: bool,
    pub last_used: u64, // For LRU policy
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Lookup {
    Hit,
    Miss,
}

/// Result of one sub-access against the cache.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccessOutcome {
    Hit,
    Miss,
    MissEviction,
}

impl AccessOutcome {
    pub fn is_hit(self) -> bool {
        self == AccessOutcome::Hit
    }
}

pub struct CacheSim {
    lines: Vec<CacheLine>, // [set_index * ways + way_index]
    config: CacheConfig,
    ways: usize,
    access_counter: u64, // Global time for LRU
}

impl CacheSim {
    pub fn new(config: CacheConfig) -> Result<Self, AllocationError> {
        let ways = config.lines_per_set();
        let too_big = || AllocationError {
            set_bits: config.set_bits(),
            lines_per_set: ways,
        };

        let num_lines = config
            .num_sets()
            .and_then(|sets| sets.checked_mul(ways))
            .ok_or_else(too_big)?;

        let mut lines = Vec::new();
        lines.try_reserve_exact(num_lines).map_err(|_| too_big())?;
        lines.resize(num_lines, CacheLine::default());

        info!(
            "cache: {} sets x {} ways, {}-byte blocks",
            num_lines / ways,
            ways,
            1u128 << config.block_bits()
        );

        Ok(Self {
            lines,
            config,
            ways,
            access_counter: 0,
        })
    }

    pub fn num_sets(&self) -> usize {
        self.lines.len() / self.ways
    }

    pub fn decode(&self, addr: u64) -> DecodedAddress {
        decode(addr, self.config.set_bits(), self.config.block_bits())
    }

    fn set(&self, set: usize) -> &[CacheLine] {
        debug_assert!(set < self.num_sets(), "set {set} out of range");
        let base = set * self.ways;
        &self.lines[base..base + self.ways]
    }

    fn set_mut(&mut self, set: usize) -> &mut [CacheLine] {
        debug_assert!(set < self.num_sets(), "set {set} out of range");
        let base = set * self.ways;
        &mut self.lines[base..base + self.ways]
    }

    fn tick(&mut self) -> u64 {
        self.access_counter += 1;
        self.access_counter
    }

    /// Looks for a valid line holding `tag`. A hit refreshes that line to MRU.
    /// `set` must come from [`CacheSim::decode`].
    pub(crate) fn lookup(&mut self, set: usize, tag: u64) -> Lookup {
        let Some(way) = self
            .set(set)
            .iter()
            .position(|line| line.valid && line.tag == tag)
        else {
            return Lookup::Miss;
        };

        let now = self.tick();
        lru::touch(&mut self.set_mut(set)[way], now);
        Lookup::Hit
    }

    /// Places `tag` in `set` after a miss, returning the evicted tag if the set was full.
    pub(crate) fn insert(&mut self, set: usize, tag: u64) -> Option<u64> {
        let now = self.tick();
        let lines = self.set_mut(set);
        debug_assert!(!lines.iter().any(|l| l.valid && l.tag == tag));

        let way = lru::select_victim(lines);
        let victim = &mut lines[way];
        let evicted = victim.valid.then_some(victim.tag);

        *victim = CacheLine {
            tag,
            valid: true,
            last_used: now,
        };

        if let Some(old) = evicted {
            debug!("set {set} way {way}: evict tag {old:#x} by {tag:#x}");
        }
        evicted
    }

    /// One full access: decode, look up, and fill on a miss.
    pub fn access(&mut self, addr: u64) -> AccessOutcome {
        let DecodedAddress { tag, set_index, .. } = self.decode(addr);
        let outcome = match self.lookup(set_index, tag) {
            Lookup::Hit => AccessOutcome::Hit,
            Lookup::Miss => match self.insert(set_index, tag) {
                Some(_) => AccessOutcome::MissEviction,
                None => AccessOutcome::Miss,
            },
        };
        trace!("access {addr:#x} set={set_index} tag={tag:#x} -> {outcome:?}");
        outcome
    }

    /// Whether a valid line in `set` holds `tag`. Doesn't touch recency.
    ///
    /// Panics if `set` is not below [`CacheSim::num_sets`].
    pub fn contains(&self, set: usize, tag: u64) -> bool {
        self.set(set).iter().any(|line| line.valid && line.tag == tag)
    }
}
