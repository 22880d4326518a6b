//! Board, chip, and SoC construction.
//!
//! This module turns a computed [`ChipArch`] into an immutable [`Topology`]. It performs:
//! 1. **Hierarchy:** A `board` root owning the `chip` group, which owns the `soc` group. The HBM
//!    device belongs to the board and is reached through the `soc.hbm` and `chip.hbm` forward
//!    ports.
//! 2. **Planes:** One narrow router (control traffic) and one wide router (bulk traffic). The
//!    narrow router bridges the HBM window into the wide router without rebasing; the wide
//!    router rebases it once, at the last hop before the memory.
//! 3. **Clusters:** Each cluster comes from the [`ClusterBuilder`] collaborator at its slot of
//!    the cluster region. Its window is mapped on the narrow router with rebase, and its two
//!    master ports drive the router inputs.
//! 4. **Boot path:** The boot ROM is mapped on the narrow router with rebase. The loader writes
//!    through the narrow router and its `start` signal fans out to every cluster.
//! 5. **Finalization:** The graph is validated before it is returned; there is no partially
//!    built topology.

use std::path::PathBuf;

use serde::Serialize;

use crate::arch::{ChipArch, ClusterArch};
use crate::common::{AddressRange, ConfigError, Result};
use crate::soc::cluster::SnitchClusterBuilder;
use crate::soc::devices::{BootRom, Device, HbmModel, Loader, loader};
use crate::soc::graph::{BindingGraph, ComponentId, Io, OutputPort, PortId, Route, Wire};
use crate::soc::interconnect::{DEFAULT_INPUT, MappingAttrs, Router};
use crate::soc::traits::{ClusterBuilder, ClusterPorts};

/// One row of a router's address map, with its downstream target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MapRow {
    /// Window on the router input.
    pub range: AddressRange,
    /// Output port name.
    pub port: String,
    /// Path of the component the output leads to.
    pub target: String,
    /// Whether the window base is subtracted.
    pub rebase: bool,
    /// Pass-through metadata.
    pub attrs: MappingAttrs,
}

/// Builds a [`Topology`] from a chip layout.
pub struct TopologyBuilder<'a> {
    arch: &'a ChipArch,
    cluster_builder: Box<dyn ClusterBuilder + 'a>,
    binary: Option<PathBuf>,
}

impl std::fmt::Debug for TopologyBuilder<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TopologyBuilder")
            .field("nb_cluster", &self.arch.nb_cluster())
            .field("binary", &self.binary)
            .finish_non_exhaustive()
    }
}

impl<'a> TopologyBuilder<'a> {
    /// Creates a builder using the default Snitch cluster.
    pub fn new(arch: &'a ChipArch) -> Self {
        Self {
            arch,
            cluster_builder: Box::new(SnitchClusterBuilder),
            binary: None,
        }
    }

    /// Replaces the cluster collaborator.
    #[must_use]
    pub fn with_cluster_builder(mut self, builder: Box<dyn ClusterBuilder + 'a>) -> Self {
        self.cluster_builder = builder;
        self
    }

    /// Sets the binary the loader is given. The file is never read.
    #[must_use]
    pub fn with_binary(mut self, path: impl Into<PathBuf>) -> Self {
        self.binary = Some(path.into());
        self
    }

    /// Builds and validates the topology.
    ///
    /// # Returns
    ///
    /// The frozen topology, or the first error hit. Nothing is returned on failure.
    pub fn build(self) -> Result<Topology> {
        let arch = self.arch;
        let ic = arch.interconnect;

        let mut graph = BindingGraph::new("board");
        let board = graph.root();
        let chip = graph.add_group(board, "chip")?;
        let soc = graph.add_group(chip, "soc")?;
        let chip_hbm = graph.declare_forward::<Io>(chip, "hbm")?;
        let soc_hbm = graph.declare_forward::<Io>(soc, "hbm")?;

        let narrow = graph.add_router(soc, Router::new("narrow_axi", ic.narrow_bandwidth))?;
        let wide = graph.add_router(soc, Router::new("wide_axi", ic.wide_bandwidth))?;
        let narrow_in = graph.router_input(narrow)?;
        let wide_in = graph.router_input(wide)?;

        let (_, rom_in) = graph.add_terminal(
            soc,
            "rom",
            Device::BootRom(BootRom::new(arch.bootrom.size())),
        )?;
        let _ = graph.map(narrow, "rom", rom_in, arch.bootrom, true, MappingAttrs::default())?;

        let _ = graph.map(
            wide,
            "hbm",
            soc_hbm,
            arch.hbm,
            true,
            MappingAttrs::latency(ic.hbm_latency),
        )?;
        let _ = graph.map(narrow, "hbm", wide_in, arch.hbm, false, MappingAttrs::default())?;

        let mut clusters = Vec::with_capacity(arch.nb_cluster());
        for cluster in &arch.clusters {
            let ports = self.build_cluster(&mut graph, soc, cluster)?;
            graph.bind(ports.narrow_soc, narrow_in);
            graph.bind(ports.wide_soc, wide_in);
            let _ = graph.map(
                narrow,
                format!("cluster_{}", cluster.id),
                ports.narrow_input,
                cluster.region,
                true,
                MappingAttrs::default(),
            )?;
            clusters.push(ports);
        }

        if let Some(path) = &self.binary
            && !path.exists()
        {
            tracing::warn!(path = %path.display(), "binary does not exist");
        }
        let loader_id = graph.add_device(
            soc,
            "loader",
            Device::Loader(Loader {
                binary: self.binary.clone(),
                entry_addr: arch.loader_entry,
            }),
        )?;
        let loader_out = graph.declare_output::<Io>(loader_id, loader::OUT_PORT)?;
        let loader_start = graph.declare_output::<Wire>(loader_id, loader::START_PORT)?;
        graph.bind(loader_out, narrow_in);
        for ports in &clusters {
            graph.bind(loader_start, ports.fetch_enable);
        }

        let hbm = HbmModel::for_type(arch.hbm_type, arch.hbm.size());
        let (mem, _) = graph.add_terminal(board, hbm.instance_name(), Device::Hbm(hbm))?;
        graph.bind(soc_hbm, chip_hbm);
        graph.bind_by_name(chip, "hbm", mem, DEFAULT_INPUT)?;

        graph.validate()?;

        tracing::info!(
            components = graph.components().len(),
            bindings = graph.bindings().len(),
            nb_cluster = clusters.len(),
            "built topology"
        );

        Ok(Topology {
            arch: arch.clone(),
            graph,
            narrow,
            wide,
            clusters,
            loader_out,
            loader_start,
        })
    }

    fn build_cluster(
        &self,
        graph: &mut BindingGraph,
        soc: ComponentId,
        cluster: &ClusterArch,
    ) -> Result<ClusterPorts> {
        let ports = self.cluster_builder.build(graph, soc, cluster)?;
        if ports.nb_core != cluster.nb_core {
            return Err(ConfigError::CoreCountMismatch {
                cluster: cluster.id,
                expected: cluster.nb_core,
                reported: ports.nb_core,
            }
            .into());
        }
        Ok(ports)
    }
}

/// Frozen chip topology.
///
/// Every query takes `&self`; a topology can be shared between threads and queried
/// concurrently.
#[derive(Debug, Clone, Serialize)]
pub struct Topology {
    arch: ChipArch,
    graph: BindingGraph,
    narrow: ComponentId,
    wide: ComponentId,
    #[serde(skip)]
    clusters: Vec<ClusterPorts>,
    #[serde(skip)]
    loader_out: OutputPort<Io>,
    #[serde(skip)]
    loader_start: OutputPort<Wire>,
}

impl Topology {
    /// Builds the default topology for `arch`.
    pub fn from_arch(arch: &ChipArch) -> Result<Self> {
        TopologyBuilder::new(arch).build()
    }

    /// Returns the binding graph.
    pub const fn graph(&self) -> &BindingGraph {
        &self.graph
    }

    /// Returns the layout the topology was built from.
    pub const fn arch(&self) -> &ChipArch {
        &self.arch
    }

    /// Returns the narrow router.
    pub const fn narrow(&self) -> ComponentId {
        self.narrow
    }

    /// Returns the wide router.
    pub const fn wide(&self) -> ComponentId {
        self.wide
    }

    /// Returns the ports of cluster `id`.
    pub fn cluster(&self, id: usize) -> Option<&ClusterPorts> {
        self.clusters.get(id)
    }

    /// Returns the loader's address-carrying output.
    pub const fn loader_port(&self) -> OutputPort<Io> {
        self.loader_out
    }

    /// Routes `addr` entering at `router` to a terminal device.
    pub fn route(&self, router: ComponentId, addr: u64) -> Result<Route> {
        self.graph.route(router, addr)
    }

    /// Routes an access entering the narrow plane.
    pub fn resolve_narrow(&self, addr: u64) -> Result<Route> {
        self.graph.route(self.narrow, addr)
    }

    /// Routes an access entering the wide plane.
    pub fn resolve_wide(&self, addr: u64) -> Result<Route> {
        self.graph.route(self.wide, addr)
    }

    /// Routes a write issued by the loader.
    pub fn resolve_load(&self, addr: u64) -> Result<Route> {
        self.graph.route_from(self.loader_out, addr)
    }

    /// Returns every input the loader's `start` signal reaches.
    pub fn start_targets(&self) -> Result<Vec<PortId>> {
        self.graph.reachable_inputs(self.loader_start.id())
    }

    /// Lists the mapping table of `router`, sorted by address.
    pub fn address_map(&self, router: ComponentId) -> Result<Vec<MapRow>> {
        let table = self.graph.router(router)?;
        let component = self.graph.component(router);
        table
            .entries_by_address()
            .map(|entry| {
                let name = table.output_name(entry.port).unwrap_or_default().to_string();
                let output = self.graph.find_port(router, &name).ok_or_else(|| {
                    ConfigError::UnboundPort {
                        component: component.path.clone(),
                        port: name.clone(),
                    }
                })?;
                let target = self.graph.follow(output)?;
                Ok(MapRow {
                    range: entry.range,
                    port: name,
                    target: self.graph.port_path(target),
                    rebase: entry.rebase,
                    attrs: entry.attrs,
                })
            })
            .collect()
    }

    /// Returns the path of a component.
    pub fn path(&self, id: ComponentId) -> &str {
        &self.graph.component(id).path
    }

    /// Looks a component up by path, e.g. `board/chip/soc/rom`.
    pub fn lookup(&self, path: &str) -> Option<ComponentId> {
        self.graph.lookup(path)
    }
}
