use std::{fs, io, path::Path};

use crate::cache::AccessOutcome;
use crate::replay::RecordOutcome;
use crate::stats::Stats;
use crate::trace::TraceEntry;

/// `hits:<h> misses:<m> evictions:<e>`
pub fn summary(stats: &Stats) -> String {
    format!(
        "hits:{} misses:{} evictions:{}",
        stats.hits, stats.misses, stats.evictions
    )
}

/// `hit rate: <pct>% (<hits> / <accesses>)`, or `n/a` when nothing was accessed.
pub fn hit_rate(stats: &Stats) -> String {
    let total = stats.accesses();
    if total > 0 {
        format!(
            "hit rate: {:.2}% ({} / {})",
            stats.hit_rate() * 100.0,
            stats.hits,
            total
        )
    } else {
        "hit rate: n/a".to_string()
    }
}

/// Writes the space-separated totals file read by cache-lab graders.
pub fn write_results(path: &Path, stats: &Stats) -> io::Result<()> {
    fs::write(
        path,
        format!("{} {} {}\n", stats.hits, stats.misses, stats.evictions),
    )
}

fn outcome_word(outcome: AccessOutcome) -> &'static str {
    match outcome {
        AccessOutcome::Hit => "hit",
        AccessOutcome::Miss => "miss",
        AccessOutcome::MissEviction => "miss eviction",
    }
}

/// Echoes a trace entry followed by what each of its sub-accesses did,
/// e.g. `M 20,1 miss eviction hit`.
pub fn verbose_line(entry: &TraceEntry, outcome: &RecordOutcome) -> String {
    let mut line = format!(
        "{} {:x},{}",
        entry.record.kind, entry.record.address, entry.size
    );
    for o in outcome.iter() {
        line.push(' ');
        line.push_str(outcome_word(o));
    }
    line
}
