//! HBM external memory.
//!
//! The external memory sits on the board, outside the chip, and is reached through the wide
//! plane. Which model backs it is chosen by the `hbm_type` property; the routing core treats
//! both the same way.

use serde::Serialize;

use crate::config::HbmType;

/// External memory model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "model", rename_all = "snake_case")]
pub enum HbmModel {
    /// Plain memory of `size` bytes.
    Simple {
        /// Size in bytes.
        size: u64,
        /// Whether atomic memory operations are supported.
        atomics: bool,
    },
    /// DRAMSys model; sizes and timings come from its own configuration.
    Dramsys {
        /// Size of the window routed to the model.
        size: u64,
    },
}

impl HbmModel {
    /// Selects the model for `hbm_type`.
    pub const fn for_type(hbm_type: HbmType, size: u64) -> Self {
        match hbm_type {
            HbmType::Simple => Self::Simple {
                size,
                atomics: true,
            },
            HbmType::Dramsys => Self::Dramsys { size },
        }
    }

    /// Returns the instance name the board gives this model.
    pub const fn instance_name(&self) -> &'static str {
        match self {
            Self::Simple { .. } => "mem",
            Self::Dramsys { .. } => "ddr",
        }
    }

    /// Returns the size of the routed window.
    pub const fn size(&self) -> u64 {
        match self {
            Self::Simple { size, .. } | Self::Dramsys { size } => *size,
        }
    }
}
