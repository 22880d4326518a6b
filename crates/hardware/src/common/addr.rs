//! Address ranges.
//!
//! This module defines the interval primitive used by every part of the address map. It provides:
//! 1. **Validation:** Ranges are non-empty and never wrap past the end of the 64-bit address space.
//! 2. **Queries:** Containment, overlap, and end-address computation on half-open intervals.
//! 3. **Rebasing:** Translating a global address into an offset relative to the range base.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::ConfigError;

/// A half-open interval `[base, base + size)` of the 64-bit address space.
///
/// Ranges are immutable value types. Construction rejects empty ranges and ranges whose end
/// would not be representable, so `end()` can never overflow.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "RawRange", into = "RawRange")]
pub struct AddressRange {
    base: u64,
    size: u64,
}

/// Unchecked wire form of [`AddressRange`]; validated on deserialization.
#[derive(Clone, Copy, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawRange {
    base: u64,
    size: u64,
}

impl AddressRange {
    /// Creates a range covering `size` bytes starting at `base`.
    ///
    /// # Arguments
    ///
    /// * `base` - First address of the range.
    /// * `size` - Number of bytes covered; must be non-zero.
    ///
    /// # Returns
    ///
    /// The range, or `ConfigError::InvalidRange` if `size` is zero or `base + size` overflows.
    pub const fn new(base: u64, size: u64) -> Result<Self, ConfigError> {
        if size == 0 || base.checked_add(size).is_none() {
            return Err(ConfigError::InvalidRange { base, size });
        }
        Ok(Self { base, size })
    }

    /// Returns the first address of the range.
    #[inline]
    pub const fn base(&self) -> u64 {
        self.base
    }

    /// Returns the number of bytes covered.
    #[inline]
    pub const fn size(&self) -> u64 {
        self.size
    }

    /// Returns the exclusive end address (`base + size`).
    #[inline]
    pub const fn end(&self) -> u64 {
        // Construction guarantees this does not overflow.
        self.base + self.size
    }

    /// Returns `true` if `addr` lies in `[base, end)`.
    #[inline]
    pub const fn contains(&self, addr: u64) -> bool {
        addr >= self.base && addr < self.end()
    }

    /// Returns `true` if the two half-open intervals share at least one address.
    #[inline]
    pub const fn overlaps(&self, other: &Self) -> bool {
        self.base < other.end() && other.base < self.end()
    }

    /// Returns `true` if `other` lies entirely inside this range.
    pub const fn encloses(&self, other: &Self) -> bool {
        other.base >= self.base && other.end() <= self.end()
    }

    /// Returns the offset of `addr` from the range base, or `None` when `addr` is outside.
    pub const fn offset_of(&self, addr: u64) -> Option<u64> {
        if self.contains(addr) {
            Some(addr - self.base)
        } else {
            None
        }
    }

    /// Returns the `size`-byte window starting `offset` bytes after this range's base.
    ///
    /// Used to place a cluster-local window inside a global region. Fails unless the window
    /// lies entirely inside `self`.
    pub fn subrange(&self, offset: u64, size: u64) -> Result<Self, ConfigError> {
        let Some(base) = self.base.checked_add(offset) else {
            return Err(ConfigError::InvalidRange {
                base: self.base,
                size: offset,
            });
        };
        match Self::new(base, size) {
            Ok(sub) if self.encloses(&sub) => Ok(sub),
            Ok(_) => Err(ConfigError::InvalidRange { base, size }),
            Err(e) => Err(e),
        }
    }
}

impl fmt::Display for AddressRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:#x}, {:#x})", self.base, self.end())
    }
}

impl TryFrom<RawRange> for AddressRange {
    type Error = ConfigError;

    fn try_from(raw: RawRange) -> Result<Self, Self::Error> {
        Self::new(raw.base, raw.size)
    }
}

impl From<AddressRange> for RawRange {
    fn from(range: AddressRange) -> Self {
        Self {
            base: range.base,
            size: range.size,
        }
    }
}
