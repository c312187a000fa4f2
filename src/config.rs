use crate::error::{ADDRESS_BITS, ConfigError};

/// Cache geometry: 2^`set_bits` sets of `lines_per_set` lines, 2^`block_bits` byte blocks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CacheConfig {
    set_bits: u32,
    lines_per_set: usize,
    block_bits: u32,
}

impl CacheConfig {
    pub fn new(
        set_bits: u32,
        lines_per_set: usize,
        block_bits: u32,
    ) -> Result<Self, ConfigError> {
        if lines_per_set < 1 {
            return Err(ConfigError::NoLines { lines_per_set: 0 });
        }
        match set_bits.checked_add(block_bits) {
            Some(total) if total <= ADDRESS_BITS => {}
            _ => {
                return Err(ConfigError::AddressWidthExceeded {
                    set_bits,
                    block_bits,
                });
            }
        }
        Ok(Self {
            set_bits,
            lines_per_set,
            block_bits,
        })
    }

    /// Builds a config from unchecked signed values, as typed on a command line.
    pub fn from_signed(
        set_bits: i64,
        lines_per_set: i64,
        block_bits: i64,
    ) -> Result<Self, ConfigError> {
        let width = |field: &'static str, value: i64| -> Result<u32, ConfigError> {
            if value < 0 {
                return Err(ConfigError::NegativeWidth { field, value });
            }
            // anything past u32 is far beyond the address width anyway
            Ok(u32::try_from(value).unwrap_or(u32::MAX))
        };
        let s = width("set bits", set_bits)?;
        let b = width("block bits", block_bits)?;
        if lines_per_set < 1 {
            return Err(ConfigError::NoLines { lines_per_set });
        }
        let e = usize::try_from(lines_per_set).unwrap_or(usize::MAX);
        Self::new(s, e, b)
    }

    pub fn set_bits(&self) -> u32 {
        self.set_bits
    }

    pub fn lines_per_set(&self) -> usize {
        self.lines_per_set
    }

    pub fn block_bits(&self) -> u32 {
        self.block_bits
    }

    /// Number of sets, if it fits in `usize`.
    pub fn num_sets(&self) -> Option<usize> {
        1usize.checked_shl(self.set_bits)
    }
}
