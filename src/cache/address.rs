#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DecodedAddress {
    pub tag: u64,
    pub set_index: usize,
    pub offset: u64,
}

/// Mask of the low `bits` bits; all ones once `bits` reaches the word width.
#[inline]
fn low_mask(bits: u32) -> u64 {
    1u64.checked_shl(bits).map_or(u64::MAX, |v| v - 1)
}

/// Logical shift right that yields 0 instead of overflowing at 64.
#[inline]
fn shr(word: u64, bits: u32) -> u64 {
    word.checked_shr(bits).unwrap_or(0)
}

/// Splits `address` into tag | set index | block offset.
#[inline]
pub fn decode(address: u64, set_bits: u32, block_bits: u32) -> DecodedAddress {
    let offset = address & low_mask(block_bits);
    let set_index = shr(address, block_bits) & low_mask(set_bits);
    let tag = shr(address, block_bits.saturating_add(set_bits));

    DecodedAddress {
        tag,
        set_index: set_index as usize,
        offset,
    }
}
