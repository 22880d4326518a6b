//! Cluster-local memories.

use serde::Serialize;

/// Plain memory window (TCDM, zero memory).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Memory {
    /// Size in bytes.
    pub size: u64,
    /// Reads return zero and writes are dropped.
    pub zero: bool,
}

impl Memory {
    /// Creates a read/write memory of `size` bytes.
    pub const fn new(size: u64) -> Self {
        Self { size, zero: false }
    }

    /// Creates a zero memory of `size` bytes.
    pub const fn zero(size: u64) -> Self {
        Self { size, zero: true }
    }
}

/// Cluster peripheral register window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Peripherals {
    /// Size in bytes.
    pub size: u64,
}
