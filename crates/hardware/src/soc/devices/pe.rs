//! Processing elements: cores and DMA engines.

use serde::Serialize;

/// A core with its global hart identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Core {
    /// Global hart ID.
    pub hart_id: usize,
    /// Index inside its cluster.
    pub local_id: usize,
}

/// Cluster DMA engine; issues bulk transfers on the wide plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Dma {
    /// Cluster the engine belongs to.
    pub cluster: usize,
}
