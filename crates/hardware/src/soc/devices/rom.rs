//! Boot ROM.

use serde::Serialize;

/// Stimulus image the boot ROM is preloaded with.
pub const BOOTROM_STIMULUS: &str = "pulp/snitch/bootrom.bin";

/// Read-only memory holding the boot code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BootRom {
    /// Size in bytes.
    pub size: u64,
    /// Image file the external model preloads; never read here.
    pub stim_file: String,
}

impl BootRom {
    /// Creates a boot ROM of `size` bytes loaded from the default stimulus image.
    pub fn new(size: u64) -> Self {
        Self {
            size,
            stim_file: BOOTROM_STIMULUS.to_string(),
        }
    }
}
