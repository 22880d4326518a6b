//! System-on-Chip topology.
//!
//! This module organizes the components that make up the chip: the address routers of both
//! interconnect planes, the leaf devices, the cluster sub-topology, and the builder that
//! assembles them into a binding graph.

/// Board, chip, and SoC assembly.
pub mod builder;

/// Default Snitch cluster collaborator.
pub mod cluster;

/// Leaf device descriptions.
pub mod devices;

/// Component tree and typed port bindings.
pub mod graph;

/// Address routers.
pub mod interconnect;

/// Cluster collaborator interface.
pub mod traits;

pub use builder::{MapRow, Topology, TopologyBuilder};
pub use cluster::SnitchClusterBuilder;
pub use graph::{BindingGraph, ComponentId, Route};
pub use interconnect::Router;
pub use traits::{ClusterBuilder, ClusterPorts};
