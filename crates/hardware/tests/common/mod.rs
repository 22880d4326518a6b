//! Shared fixtures and mocks.

pub mod mocks;

use snitchsim_core::common::AddressRange;
use snitchsim_core::{ArchProperties, ChipArch, Topology, TopologyBuilder};

/// Properties for `nb_cluster` clusters of `nb_core` cores, everything else default.
pub fn props(nb_cluster: usize, nb_core: usize) -> ArchProperties {
    ArchProperties {
        nb_cluster,
        nb_core_per_cluster: nb_core,
        ..ArchProperties::default()
    }
}

/// Computes the layout for `props`, panicking on error.
pub fn layout(props: &ArchProperties) -> ChipArch {
    ChipArch::compute_layout(props).expect("layout")
}

/// Builds the default topology for `nb_cluster` x `nb_core`.
pub fn topology(nb_cluster: usize, nb_core: usize) -> Topology {
    let arch = layout(&props(nb_cluster, nb_core));
    TopologyBuilder::new(&arch).build().expect("topology")
}

/// Shorthand for a valid range.
pub fn range(base: u64, size: u64) -> AddressRange {
    AddressRange::new(base, size).expect("range")
}
