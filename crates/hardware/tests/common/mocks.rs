//! Mock cluster collaborator.

use mockall::mock;
use snitchsim_core::arch::ClusterArch;
use snitchsim_core::common::Result;
use snitchsim_core::soc::graph::{BindingGraph, ComponentId};
use snitchsim_core::soc::traits::{ClusterBuilder, ClusterPorts};

mock! {
    pub Cluster {}
    impl ClusterBuilder for Cluster {
        fn build(
            &self,
            graph: &mut BindingGraph,
            parent: ComponentId,
            arch: &ClusterArch,
        ) -> Result<ClusterPorts>;
    }
}
