//! Global address layout of the chip.
//!
//! This module computes, once and deterministically, where everything lives. It provides:
//! 1. **Fixed regions:** Boot ROM and HBM windows, taken from the configuration.
//! 2. **Cluster placement:** Cluster `id` starts at `cluster.base + id * cluster.size`.
//! 3. **Hart allocation:** A running counter hands each cluster a contiguous hart-ID range.
//! 4. **Fail-fast checks:** Zero clusters or cores, hart counts that overflow, a cluster footprint
//!    larger than its stride, and overlapping regions are rejected before any component is
//!    instantiated.

use std::ops::Range;

use serde::Serialize;

use crate::common::{AddressRange, ConfigError};
use crate::config::{ArchProperties, ClusterConfig, HbmType, InterconnectConfig};

/// Layout of one cluster.
///
/// `region` is the cluster window in the chip address map. The `tcdm`, `periph`, and `zero_mem`
/// ranges are cluster-local (zero-based), which is the view a cluster gets once the narrow
/// router has rebased the access.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClusterArch {
    /// Cluster index.
    pub id: usize,
    /// Cluster window in the chip address map.
    pub region: AddressRange,
    /// Number of cores.
    pub nb_core: usize,
    /// Global hart IDs owned by this cluster.
    pub hart_ids: Range<usize>,
    /// Local TCDM window.
    pub tcdm: AddressRange,
    /// Local peripheral window.
    pub periph: AddressRange,
    /// Local zero-memory window.
    pub zero_mem: AddressRange,
}

impl ClusterArch {
    /// Computes the layout of one cluster.
    ///
    /// # Arguments
    ///
    /// * `props` - Architecture properties (core count and internal sizes).
    /// * `id` - Cluster index.
    /// * `region` - Window allotted to the cluster in the chip address map.
    /// * `first_hart_id` - First global hart ID of the cluster.
    ///
    /// # Returns
    ///
    /// The cluster layout, or an error if the cluster has no cores, its hart range does not fit
    /// in `usize`, or its internal layout does not fit in `region`.
    pub fn new(
        props: &ArchProperties,
        id: usize,
        region: AddressRange,
        first_hart_id: usize,
    ) -> Result<Self, ConfigError> {
        let nb_core = props.core_count(id);
        if nb_core == 0 {
            return Err(ConfigError::NoCores { cluster: id });
        }

        let footprint = Self::footprint_of(&props.cluster)?;
        if footprint > region.size() {
            return Err(ConfigError::ClusterFootprint {
                footprint,
                stride: region.size(),
            });
        }

        let last_hart_id = first_hart_id
            .checked_add(nb_core)
            .ok_or(ConfigError::HartOverflow { cluster: id })?;

        let sizes = &props.cluster;
        let tcdm = AddressRange::new(0, sizes.tcdm_size)?;
        let periph = AddressRange::new(tcdm.end(), sizes.periph_size)?;
        let zero_mem = AddressRange::new(periph.end(), sizes.zero_mem_size)?;

        Ok(Self {
            id,
            region,
            nb_core,
            hart_ids: first_hart_id..last_hart_id,
            tcdm,
            periph,
            zero_mem,
        })
    }

    /// Returns the number of bytes one cluster needs for its internal layout.
    pub fn footprint_of(sizes: &ClusterConfig) -> Result<u64, ConfigError> {
        sizes
            .tcdm_size
            .checked_add(sizes.periph_size)
            .and_then(|s| s.checked_add(sizes.zero_mem_size))
            .ok_or(ConfigError::InvalidRange {
                base: 0,
                size: u64::MAX,
            })
    }

    /// Returns the cluster base address in the chip address map.
    pub const fn base(&self) -> u64 {
        self.region.base()
    }

    /// Returns the global hart ID of local core `core`, if it exists.
    pub fn hart_id(&self, core: usize) -> Option<usize> {
        (core < self.nb_core).then(|| self.hart_ids.start + core)
    }
}

/// Complete chip address layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChipArch {
    /// Boot ROM window.
    pub bootrom: AddressRange,
    /// HBM window.
    pub hbm: AddressRange,
    /// Window of cluster 0; its size is the stride between clusters.
    pub cluster_region: AddressRange,
    /// Per-cluster layouts, indexed by cluster ID.
    pub clusters: Vec<ClusterArch>,
    /// External memory model.
    pub hbm_type: HbmType,
    /// Router and mapping parameters.
    pub interconnect: InterconnectConfig,
    /// Address the loader starts the cores at.
    pub loader_entry: u64,
}

impl ChipArch {
    /// Computes the full chip layout from validated properties.
    ///
    /// # Arguments
    ///
    /// * `props` - Architecture properties.
    ///
    /// # Returns
    ///
    /// The layout, or the first `ConfigError` found. Nothing is instantiated on failure.
    pub fn compute_layout(props: &ArchProperties) -> Result<Self, ConfigError> {
        props.validate()?;

        let map = &props.memory_map;
        let bootrom = AddressRange::new(map.bootrom.base, map.bootrom.size)?;
        let hbm = AddressRange::new(map.hbm_base, props.hbm_size)?;
        let cluster_region = AddressRange::new(map.cluster.base, map.cluster.size)?;

        let footprint = ClusterArch::footprint_of(&props.cluster)?;
        if footprint > cluster_region.size() {
            return Err(ConfigError::ClusterFootprint {
                footprint,
                stride: cluster_region.size(),
            });
        }

        let span_size = (props.nb_cluster as u64)
            .checked_mul(cluster_region.size())
            .ok_or(ConfigError::InvalidRange {
                base: cluster_region.base(),
                size: u64::MAX,
            })?;
        let span = AddressRange::new(cluster_region.base(), span_size)?;

        check_disjoint("bootrom", bootrom, "hbm", hbm)?;
        check_disjoint("bootrom", bootrom, "clusters", span)?;
        check_disjoint("hbm", hbm, "clusters", span)?;

        let mut clusters = Vec::with_capacity(props.nb_cluster);
        let mut current_hart_id = 0;
        for id in 0..props.nb_cluster {
            let region = span.subrange(id as u64 * cluster_region.size(), cluster_region.size())?;
            let cluster = ClusterArch::new(props, id, region, current_hart_id)?;
            tracing::debug!(
                cluster = id,
                base = format_args!("{:#x}", cluster.base()),
                harts = ?cluster.hart_ids,
                "placed cluster"
            );
            current_hart_id = cluster.hart_ids.end;
            clusters.push(cluster);
        }

        let loader_entry = bootrom
            .base()
            .checked_add(props.interconnect.loader_entry_offset)
            .ok_or(ConfigError::InvalidRange {
                base: bootrom.base(),
                size: props.interconnect.loader_entry_offset,
            })?;

        tracing::info!(
            nb_cluster = clusters.len(),
            nb_hart = current_hart_id,
            hbm_type = %props.hbm_type,
            "computed chip layout"
        );

        Ok(Self {
            bootrom,
            hbm,
            cluster_region,
            clusters,
            hbm_type: props.hbm_type,
            interconnect: props.interconnect,
            loader_entry,
        })
    }

    /// Returns the number of clusters.
    pub fn nb_cluster(&self) -> usize {
        self.clusters.len()
    }

    /// Returns the base address of cluster `id`, if it exists.
    pub fn cluster_base(&self, id: usize) -> Option<u64> {
        self.clusters.get(id).map(ClusterArch::base)
    }

    /// Returns the layout of cluster `id`.
    pub fn cluster(&self, id: usize) -> Option<&ClusterArch> {
        self.clusters.get(id)
    }

    /// Returns the total number of harts on the chip.
    pub fn nb_hart(&self) -> usize {
        self.clusters.last().map_or(0, |c| c.hart_ids.end)
    }

    /// Returns the window covering every cluster.
    pub fn cluster_span(&self) -> AddressRange {
        self.clusters
            .first()
            .zip(self.clusters.last())
            .and_then(|(first, last)| {
                AddressRange::new(first.base(), last.region.end() - first.base()).ok()
            })
            .unwrap_or(self.cluster_region)
    }
}

fn check_disjoint(
    a: &'static str,
    a_range: AddressRange,
    b: &'static str,
    b_range: AddressRange,
) -> Result<(), ConfigError> {
    if a_range.overlaps(&b_range) {
        return Err(ConfigError::RegionOverlap {
            a,
            a_range,
            b,
            b_range,
        });
    }
    Ok(())
}
