//! Address decomposition.
//!
//! This module splits 32-bit byte addresses into the three fields used to locate
//! a line in a set-associative cache. It provides the following:
//! 1. **Layout:** The bit widths of the offset and index fields for one cache geometry.
//! 2. **Decomposition:** Bit-exact extraction of tag, set index and block offset.
//! 3. **Composition:** The inverse mapping, used to rebuild the base address of a resident line.
//!
//! Address layout (most significant bit first):
//!
//! ```text
//! | tag (tag_bits) | index (index_bits) | offset (offset_bits) |
//! ```

use super::constants::ADDRESS_BITS;

/// A byte address in the simulated 32-bit address space.
pub type Address = u32;

/// Returns a mask with the lowest `bits` bits set.
///
/// Saturates at 32 bits so that a field covering the whole address is valid.
#[inline]
pub const fn low_mask(bits: u32) -> u32 {
    if bits >= ADDRESS_BITS {
        u32::MAX
    } else {
        (1u32 << bits) - 1
    }
}

/// Fields of an address under a particular [`AddressLayout`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DecodedAddress {
    /// Line identifier within the selected set.
    pub tag: u32,
    /// Set index.
    pub index: u32,
    /// Byte offset within the block.
    pub offset: u32,
}

/// Bit widths of the offset and index fields; the tag takes the remaining bits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AddressLayout {
    offset_bits: u32,
    index_bits: u32,
}

impl AddressLayout {
    /// Creates a layout from the block-offset and index widths.
    ///
    /// The caller guarantees `offset_bits + index_bits <= 32`; cache geometry
    /// resolution rejects configurations that would violate it.
    pub const fn new(offset_bits: u32, index_bits: u32) -> Self {
        Self {
            offset_bits,
            index_bits,
        }
    }

    /// Width of the block-offset field.
    #[inline]
    pub const fn offset_bits(&self) -> u32 {
        self.offset_bits
    }

    /// Width of the set-index field.
    #[inline]
    pub const fn index_bits(&self) -> u32 {
        self.index_bits
    }

    /// Width of the tag field.
    #[inline]
    pub const fn tag_bits(&self) -> u32 {
        ADDRESS_BITS - self.offset_bits - self.index_bits
    }

    /// Byte offset of `addr` within its block.
    #[inline]
    pub const fn offset(&self, addr: Address) -> u32 {
        addr & low_mask(self.offset_bits)
    }

    /// Set index of `addr`.
    #[inline]
    pub const fn index(&self, addr: Address) -> u32 {
        shr(addr, self.offset_bits) & low_mask(self.index_bits)
    }

    /// Tag of `addr`.
    #[inline]
    pub const fn tag(&self, addr: Address) -> u32 {
        shr(addr, self.offset_bits + self.index_bits)
    }

    /// Splits `addr` into tag, index and offset.
    #[inline]
    pub const fn decompose(&self, addr: Address) -> DecodedAddress {
        DecodedAddress {
            tag: self.tag(addr),
            index: self.index(addr),
            offset: self.offset(addr),
        }
    }

    /// Reassembles an address from its fields.
    ///
    /// Fields wider than their slot are truncated to the slot width.
    #[inline]
    pub const fn compose(&self, fields: DecodedAddress) -> Address {
        shl(fields.tag, self.offset_bits + self.index_bits)
            | shl(fields.index & low_mask(self.index_bits), self.offset_bits)
            | (fields.offset & low_mask(self.offset_bits))
    }

    /// Base address of the block holding `addr` (offset cleared).
    #[inline]
    pub const fn block_base(&self, addr: Address) -> Address {
        addr & !low_mask(self.offset_bits)
    }
}

/// Logical right shift that yields 0 for a full-width shift.
#[inline]
const fn shr(value: u32, bits: u32) -> u32 {
    match value.checked_shr(bits) {
        Some(v) => v,
        None => 0,
    }
}

/// Left shift that yields 0 for a full-width shift.
#[inline]
const fn shl(value: u32, bits: u32) -> u32 {
    match value.checked_shl(bits) {
        Some(v) => v,
        None => 0,
    }
}
