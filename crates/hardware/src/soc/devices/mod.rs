//! Leaf devices of the topology.
//!
//! Devices are structural descriptions only: the routing core records what each leaf is and
//! how large its window is, and leaves behaviour (timing, storage, execution) to the external
//! device models. It provides:
//! 1. **Terminal devices:** Boot ROM, HBM, and cluster-local memories service accesses.
//! 2. **Masters:** The binary loader, cores, and DMA engines issue accesses but never
//!    receive them on an address-carrying port.

/// Boot ROM.
pub mod rom;

/// HBM external memory.
pub mod hbm;

/// Cluster-local memories and peripheral windows.
pub mod memory;

/// Binary loader.
pub mod loader;

/// Cores and DMA engines.
pub mod pe;

use serde::Serialize;

pub use pe::{Core, Dma};
pub use hbm::HbmModel;
pub use loader::Loader;
pub use memory::{Memory, Peripherals};
pub use rom::BootRom;

/// A leaf component of the binding graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Device {
    /// Boot ROM.
    BootRom(BootRom),
    /// External memory.
    Hbm(HbmModel),
    /// Plain memory (TCDM, zero memory).
    Memory(Memory),
    /// Memory-mapped peripheral registers.
    Peripherals(Peripherals),
    /// Binary loader.
    Loader(Loader),
    /// Core.
    Core(Core),
    /// DMA engine.
    Dma(Dma),
}

impl Device {
    /// Returns `true` if the device services accesses rather than forwarding or issuing them.
    pub const fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::BootRom(_) | Self::Hbm(_) | Self::Memory(_) | Self::Peripherals(_)
        )
    }

    /// Returns the size of the window the device services, if it has one.
    pub const fn size(&self) -> Option<u64> {
        match self {
            Self::BootRom(rom) => Some(rom.size),
            Self::Hbm(hbm) => Some(hbm.size()),
            Self::Memory(mem) => Some(mem.size),
            Self::Peripherals(periph) => Some(periph.size),
            Self::Loader(_) | Self::Core(_) | Self::Dma(_) => None,
        }
    }

    /// Returns a short kind label for reports.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::BootRom(_) => "rom",
            Self::Hbm(HbmModel::Simple { .. }) => "memory",
            Self::Hbm(HbmModel::Dramsys { .. }) => "dramsys",
            Self::Memory(_) => "memory",
            Self::Peripherals(_) => "peripherals",
            Self::Loader(_) => "loader",
            Self::Core(_) => "core",
            Self::Dma(_) => "dma",
        }
    }
}
