//! Cluster collaborator interface.
//!
//! The topology builder does not know what a cluster contains. It hands each cluster its slot
//! of the chip address map and its first hart ID, and expects back the ports it wires to the
//! SoC. It provides:
//! 1. **`ClusterPorts`:** The core count and the boundary ports of one cluster.
//! 2. **`ClusterBuilder`:** The trait implemented by cluster sub-topology builders.

use crate::arch::ClusterArch;
use crate::common::Result;
use crate::soc::graph::{BindingGraph, ComponentId, ForwardPort, Io, Wire};

/// Boundary of one instantiated cluster.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClusterPorts {
    /// Group that owns the cluster's components.
    pub component: ComponentId,
    /// Number of cores the cluster instantiated.
    pub nb_core: usize,
    /// Receives narrow-plane accesses to the cluster window, already rebased.
    pub narrow_input: ForwardPort<Io>,
    /// Receives wide-plane accesses.
    pub wide_input: ForwardPort<Io>,
    /// Releases the cores from reset.
    pub fetch_enable: ForwardPort<Wire>,
    /// Cluster master on the narrow plane.
    pub narrow_soc: ForwardPort<Io>,
    /// Cluster master on the wide plane.
    pub wide_soc: ForwardPort<Io>,
}

/// Builds the sub-topology of one cluster.
///
/// Implementations add their components under `parent` and must report exactly
/// `arch.nb_core` cores; the builder rejects any other count since hart IDs were allotted from
/// it.
pub trait ClusterBuilder {
    /// Instantiates cluster `arch.id` under `parent`.
    ///
    /// # Arguments
    ///
    /// * `graph` - Graph being built.
    /// * `parent` - Component that owns the cluster.
    /// * `arch` - Cluster window, hart range, and local layout.
    fn build(
        &self,
        graph: &mut BindingGraph,
        parent: ComponentId,
        arch: &ClusterArch,
    ) -> Result<ClusterPorts>;
}
