//! Least Recently Used replacement.
//!
//! Every line carries a `last_used` stamp taken from a counter that only
//! grows. Touching a line (hit or fill) gives it the newest stamp, so the
//! least recently used line in a set is the one with the smallest stamp.

use super::CacheLine;

/// Marks `line` as the most recently used one, stamping it with `now`.
#[inline]
pub fn touch(line: &mut CacheLine, now: u64) {
    line.last_used = now;
}

/// Picks the line to fill in a set after a miss.
///
/// The first invalid line wins. Once the set is full the victim is the line
/// with the oldest stamp; equal stamps resolve to the lowest index.
pub fn select_victim(set: &[CacheLine]) -> usize {
    debug_assert!(!set.is_empty());

    if let Some(empty) = set.iter().position(|line| !line.valid) {
        return empty;
    }

    let mut victim = 0;
    let mut oldest = u64::MAX;
    for (i, line) in set.iter().enumerate() {
        if line.last_used < oldest {
            oldest = line.last_used;
            victim = i;
        }
    }
    victim
}
