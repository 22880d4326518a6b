//! Common types shared by every part of the topology core.
//!
//! This module provides the two building blocks used across layout computation, routing, and
//! topology construction:
//! 1. **Address ranges:** The validated half-open interval type.
//! 2. **Error handling:** Configuration, unmapped-address, and signature errors.

/// Address range type.
pub mod addr;

/// Error types.
pub mod error;

pub use addr::AddressRange;
pub use error::{ConfigError, Result, SignatureMismatch, TopologyError, UnmappedAddress};
