//! Binary loader.
//!
//! The loader writes the binary into the chip through the narrow plane, then asserts `start`
//! on every cluster at once. The contents of the binary are opaque to the topology core.

use std::path::PathBuf;

use serde::Serialize;

/// Name of the loader's address-carrying output.
pub const OUT_PORT: &str = "out";

/// Name of the loader's release-from-reset output.
pub const START_PORT: &str = "start";

/// Loader description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Loader {
    /// Binary to load, if any.
    pub binary: Option<PathBuf>,
    /// Address the cores start fetching from.
    pub entry_addr: u64,
}
