//! Snitch chip topology library.
//!
//! This crate computes the address map of a multi-cluster Snitch chip and builds the component
//! graph a simulation engine consumes. It provides:
//! 1. **Configuration:** Typed architecture properties with defaults, plus a named property
//!    registry for user overrides.
//! 2. **Layout:** Fixed regions, cluster bases, and hart-ID allocation, computed once.
//! 3. **Routing:** Address routers with non-overlapping, optionally rebasing mappings.
//! 4. **Topology:** The board, chip, and SoC hierarchy with typed port bindings, frozen after
//!    the build and safe to query from many threads.
//!
//! ```
//! use snitchsim_core::{ArchProperties, ChipArch, TopologyBuilder};
//!
//! let props = ArchProperties::default();
//! let arch = ChipArch::compute_layout(&props).unwrap();
//! let topology = TopologyBuilder::new(&arch).build().unwrap();
//! let route = topology.resolve_narrow(0x1500).unwrap();
//! assert_eq!(route.local_addr, 0x500);
//! ```

/// Chip address layout (fixed regions, cluster placement, hart allocation).
pub mod arch;
/// Address ranges and error types.
pub mod common;
/// Architecture configuration and property registry.
pub mod config;
/// Topology construction (routers, devices, clusters, binding graph).
pub mod soc;

/// Computed chip layout.
pub use crate::arch::{ChipArch, ClusterArch};
/// Error types and result alias.
pub use crate::common::{AddressRange, ConfigError, Result, TopologyError};
/// Typed architecture configuration.
pub use crate::config::{ArchProperties, HbmType, PropertyRegistry};
/// Topology builder and its frozen result.
pub use crate::soc::{Topology, TopologyBuilder};
