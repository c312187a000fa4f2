//! Trace-driven simulator of a set-associative cache with LRU replacement.
//!
//! A cache of 2^S sets, E lines per set and 2^B byte blocks is built from a
//! [`CacheConfig`]; [`replay`] then pushes a stream of [`OperationRecord`]s
//! through it and returns the hit, miss and eviction totals.

pub mod cache;
pub mod config;
pub mod error;
pub mod replay;
pub mod report;
pub mod stats;
pub mod trace;

pub use cache::{AccessOutcome, CacheSim};
pub use config::CacheConfig;
pub use error::{AllocationError, ConfigError, SimError, TraceError, TraceErrorKind};
pub use replay::{RecordOutcome, Simulator, replay, replay_with};
pub use stats::Stats;
pub use trace::{OperationKind, OperationRecord, TraceEntry, TraceReader};
