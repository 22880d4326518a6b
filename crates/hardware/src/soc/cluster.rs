//! Default Snitch cluster.
//!
//! One cluster is a group holding a local crossbar, three memory windows, the compute cores,
//! and a DMA engine:
//!
//! ```text
//!  narrow_input ─┐                     ┌─> tcdm      [0, tcdm)
//!                ├─> xbar ─────────────┼─> periph    [tcdm, +periph)
//!  wide_input ───┘    ^                └─> zero_mem  [periph, +zero)
//!                     │ data
//!  fetch_enable ──> pe0..peN ── soc ──> narrow_soc
//!                     idma ──── out ──> wide_soc
//! ```
//!
//! Accesses arrive already rebased by the SoC narrow router, so the crossbar maps its windows
//! at their local offsets and forwards addresses unchanged.

use crate::arch::ClusterArch;
use crate::common::{AddressRange, Result};
use crate::soc::devices::{Core, Device, Dma, Memory, Peripherals};
use crate::soc::graph::{BindingGraph, ComponentId, Io, Wire};
use crate::soc::interconnect::{MappingAttrs, Router};
use crate::soc::traits::{ClusterBuilder, ClusterPorts};

/// Bandwidth of the cluster crossbar in bytes per cycle.
pub const XBAR_BANDWIDTH: u64 = 64;

/// Builds the reference Snitch cluster.
#[derive(Debug, Clone, Copy, Default)]
pub struct SnitchClusterBuilder;

impl SnitchClusterBuilder {
    fn add_memory(
        graph: &mut BindingGraph,
        cluster: ComponentId,
        xbar: ComponentId,
        name: &str,
        range: AddressRange,
        device: Device,
    ) -> Result<()> {
        let (_, input) = graph.add_terminal(cluster, name, device)?;
        let _ = graph.map(xbar, name, input, range, false, MappingAttrs::default())?;
        Ok(())
    }
}

impl ClusterBuilder for SnitchClusterBuilder {
    fn build(
        &self,
        graph: &mut BindingGraph,
        parent: ComponentId,
        arch: &ClusterArch,
    ) -> Result<ClusterPorts> {
        let cluster = graph.add_group(parent, format!("cluster_{}", arch.id))?;

        let narrow_input = graph.declare_forward::<Io>(cluster, "narrow_input")?;
        let wide_input = graph.declare_forward::<Io>(cluster, "wide_input")?;
        let fetch_enable = graph.declare_forward::<Wire>(cluster, "fetch_enable")?;
        let narrow_soc = graph.declare_forward::<Io>(cluster, "narrow_soc")?;
        let wide_soc = graph.declare_forward::<Io>(cluster, "wide_soc")?;

        let xbar = graph.add_router(cluster, Router::new("xbar", XBAR_BANDWIDTH))?;
        let xbar_narrow = graph.router_input(xbar)?;
        let xbar_wide = graph.add_router_input(xbar, "wide")?;
        graph.bind(narrow_input, xbar_narrow);
        graph.bind(wide_input, xbar_wide);

        Self::add_memory(
            graph,
            cluster,
            xbar,
            "tcdm",
            arch.tcdm,
            Device::Memory(Memory::new(arch.tcdm.size())),
        )?;
        Self::add_memory(
            graph,
            cluster,
            xbar,
            "periph",
            arch.periph,
            Device::Peripherals(Peripherals {
                size: arch.periph.size(),
            }),
        )?;
        Self::add_memory(
            graph,
            cluster,
            xbar,
            "zero_mem",
            arch.zero_mem,
            Device::Memory(Memory::zero(arch.zero_mem.size())),
        )?;

        for (local_id, hart_id) in arch.hart_ids.clone().enumerate() {
            let pe = graph.add_device(
                cluster,
                format!("pe{local_id}"),
                Device::Core(Core { hart_id, local_id }),
            )?;
            let data = graph.declare_output::<Io>(pe, "data")?;
            let soc = graph.declare_output::<Io>(pe, "soc")?;
            let fetch = graph.declare_input::<Wire>(pe, "fetch_enable")?;
            graph.bind(data, xbar_narrow);
            graph.bind(soc, narrow_soc);
            graph.bind(fetch_enable, fetch);
        }

        let idma = graph.add_device(cluster, "idma", Device::Dma(Dma { cluster: arch.id }))?;
        let idma_out = graph.declare_output::<Io>(idma, "out")?;
        graph.bind(idma_out, wide_soc);

        tracing::debug!(
            cluster = arch.id,
            nb_core = arch.nb_core,
            first_hart = arch.hart_ids.start,
            "built cluster"
        );

        Ok(ClusterPorts {
            component: cluster,
            nb_core: arch.nb_core,
            narrow_input,
            wide_input,
            fetch_enable,
            narrow_soc,
            wide_soc,
        })
    }
}
