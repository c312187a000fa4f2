use std::{error::Error, fmt, io};

use crate::stats::Stats;

/// Widest address the simulator decodes, in bits.
pub const ADDRESS_BITS: u32 = u64::BITS;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A set holds zero lines (E < 1).
    NoLines { lines_per_set: i64 },
    /// A bit width below zero.
    NegativeWidth { field: &'static str, value: i64 },
    /// Set-index and block-offset bits don't fit in an address.
    AddressWidthExceeded { set_bits: u32, block_bits: u32 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NoLines { lines_per_set } => {
                write!(f, "lines per set must be at least 1, got {lines_per_set}")
            }
            ConfigError::NegativeWidth { field, value } => {
                write!(f, "{field} must not be negative, got {value}")
            }
            ConfigError::AddressWidthExceeded {
                set_bits,
                block_bits,
            } => write!(
                f,
                "set bits ({set_bits}) + block bits ({block_bits}) exceed the {ADDRESS_BITS}-bit address width"
            ),
        }
    }
}

impl Error for ConfigError {}

/// Cache storage for 2^S sets of E lines could not be reserved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllocationError {
    pub set_bits: u32,
    pub lines_per_set: usize,
}

impl fmt::Display for AllocationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "cannot allocate 2^{} sets of {} lines",
            self.set_bits, self.lines_per_set
        )
    }
}

impl Error for AllocationError {}

#[derive(Debug)]
pub enum TraceErrorKind {
    UnknownOperation(String),
    MissingAddress,
    InvalidAddress(String),
    MissingSize,
    InvalidSize(String),
    TrailingInput(String),
    Io(io::Error),
}

/// A trace line that could not be turned into an operation record.
#[derive(Debug)]
pub struct TraceError {
    /// 1-based line number in the trace source.
    pub line: usize,
    pub kind: TraceErrorKind,
}

impl TraceError {
    pub fn new(line: usize, kind: TraceErrorKind) -> Self {
        Self { line, kind }
    }
}

impl fmt::Display for TraceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "trace line {}: ", self.line)?;
        match &self.kind {
            TraceErrorKind::UnknownOperation(op) => write!(f, "unknown operation {op:?}"),
            TraceErrorKind::MissingAddress => f.write_str("missing address"),
            TraceErrorKind::InvalidAddress(s) => write!(f, "invalid hex address {s:?}"),
            TraceErrorKind::MissingSize => f.write_str("missing byte count after address"),
            TraceErrorKind::InvalidSize(s) => write!(f, "invalid byte count {s:?}"),
            TraceErrorKind::TrailingInput(s) => write!(f, "unexpected trailing input {s:?}"),
            TraceErrorKind::Io(e) => write!(f, "read failed: {e}"),
        }
    }
}

impl Error for TraceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match &self.kind {
            TraceErrorKind::Io(e) => Some(e),
            _ => None,
        }
    }
}

/// Everything that can stop a simulation run.
#[derive(Debug)]
pub enum SimError {
    Config(ConfigError),
    Allocation(AllocationError),
    /// Record `index` (0-based) of the trace failed. `partial` holds the totals
    /// of every record before it.
    Trace {
        index: usize,
        source: TraceError,
        partial: Stats,
    },
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::Config(e) => write!(f, "invalid cache configuration: {e}"),
            SimError::Allocation(e) => write!(f, "cache allocation failed: {e}"),
            SimError::Trace { index, source, .. } => {
                write!(f, "replay stopped at record {index}: {source}")
            }
        }
    }
}

impl Error for SimError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            SimError::Config(e) => Some(e),
            SimError::Allocation(e) => Some(e),
            SimError::Trace { source, .. } => Some(source),
        }
    }
}

impl From<ConfigError> for SimError {
    fn from(e: ConfigError) -> Self {
        SimError::Config(e)
    }
}

impl From<AllocationError> for SimError {
    fn from(e: AllocationError) -> Self {
        SimError::Allocation(e)
    }
}
