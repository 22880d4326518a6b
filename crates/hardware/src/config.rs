//! Architecture configuration for the Snitch chip.
//!
//! This module defines the typed configuration consumed at topology-build time. It provides:
//! 1. **Defaults:** Baseline memory map, cluster layout, and interconnect constants.
//! 2. **Structures:** `ArchProperties` with memory-map, cluster, and interconnect sections.
//! 3. **Validation:** Unknown keys, out-of-set enum values, and non-positive counts are rejected
//!    when the configuration is parsed, before any layout is computed.
//! 4. **Named properties:** `ArchProperties::declare` publishes the user-facing properties on a
//!    [`PropertyRegistry`] so overrides such as `soc/nb_cluster=2` merge over the defaults.
//!
//! Configuration is supplied as JSON (`ArchProperties::from_json` / `from_file`) or built from
//! `ArchProperties::default()` and adjusted through the registry.

/// Named, typed property registry.
pub mod registry;

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::common::ConfigError;
pub use registry::{Cast, PropertyDecl, PropertyRegistry, PropertyValue};

/// Default configuration constants.
///
/// These values describe the reference Snitch board when nothing is overridden.
mod defaults {
    /// Number of clusters on the chip.
    pub const NB_CLUSTER: usize = 1;

    /// Cores per cluster (8 compute cores plus one DMA core).
    pub const NB_CORE_PER_CLUSTER: usize = 9;

    /// Size of the HBM external memory (2 GiB).
    pub const HBM_SIZE: u64 = 0x8000_0000;

    /// Base address of the HBM window in the chip address map.
    pub const HBM_BASE: u64 = 0x8000_0000;

    /// Base address of the boot ROM.
    pub const BOOTROM_BASE: u64 = 0x0000_1000;

    /// Size of the boot ROM (64 KiB).
    pub const BOOTROM_SIZE: u64 = 0x0001_0000;

    /// Base address of cluster 0.
    pub const CLUSTER_BASE: u64 = 0x1000_0000;

    /// Address stride between consecutive clusters (256 KiB).
    pub const CLUSTER_SIZE: u64 = 0x0004_0000;

    /// Tightly-coupled data memory per cluster (128 KiB).
    pub const TCDM_SIZE: u64 = 0x0002_0000;

    /// Cluster peripheral window (64 KiB).
    pub const PERIPH_SIZE: u64 = 0x0001_0000;

    /// Cluster zero-memory window (64 KiB).
    pub const ZERO_MEM_SIZE: u64 = 0x0001_0000;

    /// Narrow (64-bit) AXI bandwidth in bytes per cycle.
    pub const NARROW_BANDWIDTH: u64 = 8;

    /// Wide (512-bit) AXI bandwidth in bytes per cycle.
    pub const WIDE_BANDWIDTH: u64 = 64;

    /// Latency annotated on the wide-plane HBM mapping, in cycles.
    pub const HBM_LATENCY: u64 = 100;

    /// Offset of the loader entry point from the boot ROM base.
    pub const LOADER_ENTRY_OFFSET: u64 = 0x20;
}

/// External memory model behind the HBM window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HbmType {
    /// Plain memory with a fixed access model.
    #[default]
    Simple,
    /// Higher-fidelity DRAMSys model.
    Dramsys,
}

impl HbmType {
    /// Accepted spellings, in declaration order.
    pub const ALLOWED: [&'static str; 2] = ["simple", "dramsys"];

    /// Returns the property spelling of this variant.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Simple => "simple",
            Self::Dramsys => "dramsys",
        }
    }
}

impl fmt::Display for HbmType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HbmType {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "simple" => Ok(Self::Simple),
            "dramsys" => Ok(Self::Dramsys),
            _ => Err(ConfigError::NotAllowed {
                name: "hbm_type".to_string(),
                value: value.to_string(),
                allowed: Self::ALLOWED.iter().map(ToString::to_string).collect(),
            }),
        }
    }
}

/// Root architecture configuration.
///
/// # Examples
///
/// ```
/// use snitchsim_core::config::{ArchProperties, HbmType};
///
/// let json = r#"{
///     "nb_cluster": 2,
///     "hbm_type": "dramsys",
///     "memory_map": { "cluster": { "base": 268435456, "size": 262144 } }
/// }"#;
///
/// let props = ArchProperties::from_json(json).unwrap();
/// assert_eq!(props.nb_cluster, 2);
/// assert_eq!(props.nb_core_per_cluster, 9);
/// assert_eq!(props.hbm_type, HbmType::Dramsys);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ArchProperties {
    /// Number of clusters
    #[serde(default = "ArchProperties::default_nb_cluster")]
    pub nb_cluster: usize,

    /// Number of cores per cluster
    #[serde(default = "ArchProperties::default_nb_core_per_cluster")]
    pub nb_core_per_cluster: usize,

    /// Per-cluster core counts; when non-empty, overrides `nb_core_per_cluster` cluster by cluster
    #[serde(default)]
    pub cluster_cores: Vec<usize>,

    /// Size of the HBM external memory in bytes
    #[serde(default = "ArchProperties::default_hbm_size")]
    pub hbm_size: u64,

    /// Type of the HBM external memory
    #[serde(default)]
    pub hbm_type: HbmType,

    /// Fixed regions of the chip address map
    #[serde(default)]
    pub memory_map: MemoryMapConfig,

    /// Internal layout of one cluster
    #[serde(default)]
    pub cluster: ClusterConfig,

    /// Router bandwidths and mapping annotations
    #[serde(default)]
    pub interconnect: InterconnectConfig,
}

impl ArchProperties {
    fn default_nb_cluster() -> usize {
        defaults::NB_CLUSTER
    }

    fn default_nb_core_per_cluster() -> usize {
        defaults::NB_CORE_PER_CLUSTER
    }

    fn default_hbm_size() -> u64 {
        defaults::HBM_SIZE
    }

    /// Parses and validates a JSON configuration.
    ///
    /// # Arguments
    ///
    /// * `json` - JSON document; missing fields take their defaults, unknown fields are rejected.
    ///
    /// # Returns
    ///
    /// The validated configuration, or the first parse or validation error.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let props: Self = serde_json::from_str(json)?;
        props.validate()?;
        Ok(props)
    }

    /// Reads, parses, and validates a JSON configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Checks the invariants that serde cannot express.
    ///
    /// Rejects zero clusters, zero cores, a zero-sized HBM, a `cluster_cores` list whose length
    /// differs from `nb_cluster`, and zero-sized cluster memories.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.nb_cluster == 0 {
            return Err(ConfigError::NotPositive("nb_cluster"));
        }
        if self.nb_core_per_cluster == 0 {
            return Err(ConfigError::NotPositive("nb_core_per_cluster"));
        }
        if self.hbm_size == 0 {
            return Err(ConfigError::NotPositive("hbm_size"));
        }
        if !self.cluster_cores.is_empty() {
            if self.cluster_cores.len() != self.nb_cluster {
                return Err(ConfigError::ClusterCountMismatch {
                    expected: self.nb_cluster,
                    found: self.cluster_cores.len(),
                });
            }
            if let Some(cluster) = self.cluster_cores.iter().position(|&n| n == 0) {
                return Err(ConfigError::NoCores { cluster });
            }
        }
        self.cluster.validate()?;
        self.interconnect.validate()
    }

    /// Returns the number of cores of cluster `id`.
    pub fn core_count(&self, id: usize) -> usize {
        self.cluster_cores
            .get(id)
            .copied()
            .unwrap_or(self.nb_core_per_cluster)
    }

    /// Declares the user-facing properties on `registry` and merges any overrides it holds.
    ///
    /// The current field values act as defaults. The returned configuration is validated.
    ///
    /// # Arguments
    ///
    /// * `registry` - Registry holding user overrides; the four properties are declared on it.
    ///
    /// # Returns
    ///
    /// The merged configuration, or the first declaration, cast, or validation error.
    pub fn declare(mut self, registry: &mut PropertyRegistry) -> Result<Self, ConfigError> {
        self.hbm_size = registry.declare_int(
            "hbm_size",
            self.hbm_size,
            "Size of the HBM external memory",
        )?;

        let hbm_type = registry.declare_choice(
            "hbm_type",
            self.hbm_type.as_str(),
            &HbmType::ALLOWED,
            "Type of the HBM external memory",
        )?;
        self.hbm_type = hbm_type.parse()?;

        self.nb_cluster = registry.declare_usize(
            "soc/nb_cluster",
            self.nb_cluster,
            "Number of clusters",
        )?;

        self.nb_core_per_cluster = registry.declare_usize(
            "soc/cluster/nb_core",
            self.nb_core_per_cluster,
            "Number of cores per cluster",
        )?;

        self.validate()?;
        Ok(self)
    }
}

impl Default for ArchProperties {
    fn default() -> Self {
        Self {
            nb_cluster: defaults::NB_CLUSTER,
            nb_core_per_cluster: defaults::NB_CORE_PER_CLUSTER,
            cluster_cores: Vec::new(),
            hbm_size: defaults::HBM_SIZE,
            hbm_type: HbmType::default(),
            memory_map: MemoryMapConfig::default(),
            cluster: ClusterConfig::default(),
            interconnect: InterconnectConfig::default(),
        }
    }
}

/// Raw `(base, size)` pair; validated into an address range when the layout is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegionConfig {
    /// Base address
    pub base: u64,
    /// Size in bytes
    pub size: u64,
}

impl RegionConfig {
    /// Creates a region description.
    pub const fn new(base: u64, size: u64) -> Self {
        Self { base, size }
    }
}

/// Fixed regions of the chip address map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MemoryMapConfig {
    /// Boot ROM window
    #[serde(default = "MemoryMapConfig::default_bootrom")]
    pub bootrom: RegionConfig,

    /// Base of the HBM window (its size is `hbm_size`)
    #[serde(default = "MemoryMapConfig::default_hbm_base")]
    pub hbm_base: u64,

    /// Region of cluster 0; its size is also the stride between clusters
    #[serde(default = "MemoryMapConfig::default_cluster")]
    pub cluster: RegionConfig,
}

impl MemoryMapConfig {
    const fn default_bootrom() -> RegionConfig {
        RegionConfig::new(defaults::BOOTROM_BASE, defaults::BOOTROM_SIZE)
    }

    const fn default_hbm_base() -> u64 {
        defaults::HBM_BASE
    }

    const fn default_cluster() -> RegionConfig {
        RegionConfig::new(defaults::CLUSTER_BASE, defaults::CLUSTER_SIZE)
    }
}

impl Default for MemoryMapConfig {
    fn default() -> Self {
        Self {
            bootrom: Self::default_bootrom(),
            hbm_base: defaults::HBM_BASE,
            cluster: Self::default_cluster(),
        }
    }
}

/// Internal address layout of one cluster, relative to the cluster base.
///
/// TCDM sits at offset 0, followed by the peripheral window and the zero memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClusterConfig {
    /// TCDM size in bytes
    #[serde(default = "ClusterConfig::default_tcdm_size")]
    pub tcdm_size: u64,

    /// Peripheral window size in bytes
    #[serde(default = "ClusterConfig::default_periph_size")]
    pub periph_size: u64,

    /// Zero-memory window size in bytes
    #[serde(default = "ClusterConfig::default_zero_mem_size")]
    pub zero_mem_size: u64,
}

impl ClusterConfig {
    const fn default_tcdm_size() -> u64 {
        defaults::TCDM_SIZE
    }

    const fn default_periph_size() -> u64 {
        defaults::PERIPH_SIZE
    }

    const fn default_zero_mem_size() -> u64 {
        defaults::ZERO_MEM_SIZE
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.tcdm_size == 0 {
            return Err(ConfigError::NotPositive("cluster.tcdm_size"));
        }
        if self.periph_size == 0 {
            return Err(ConfigError::NotPositive("cluster.periph_size"));
        }
        if self.zero_mem_size == 0 {
            return Err(ConfigError::NotPositive("cluster.zero_mem_size"));
        }
        Ok(())
    }
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            tcdm_size: defaults::TCDM_SIZE,
            periph_size: defaults::PERIPH_SIZE,
            zero_mem_size: defaults::ZERO_MEM_SIZE,
        }
    }
}

/// Interconnect parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InterconnectConfig {
    /// Narrow router bandwidth in bytes per cycle
    #[serde(default = "InterconnectConfig::default_narrow_bandwidth")]
    pub narrow_bandwidth: u64,

    /// Wide router bandwidth in bytes per cycle
    #[serde(default = "InterconnectConfig::default_wide_bandwidth")]
    pub wide_bandwidth: u64,

    /// Latency annotated on the wide-plane HBM mapping
    #[serde(default = "InterconnectConfig::default_hbm_latency")]
    pub hbm_latency: u64,

    /// Loader entry point offset from the boot ROM base
    #[serde(default = "InterconnectConfig::default_loader_entry_offset")]
    pub loader_entry_offset: u64,
}

impl InterconnectConfig {
    const fn default_narrow_bandwidth() -> u64 {
        defaults::NARROW_BANDWIDTH
    }

    const fn default_wide_bandwidth() -> u64 {
        defaults::WIDE_BANDWIDTH
    }

    const fn default_hbm_latency() -> u64 {
        defaults::HBM_LATENCY
    }

    const fn default_loader_entry_offset() -> u64 {
        defaults::LOADER_ENTRY_OFFSET
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.narrow_bandwidth == 0 {
            return Err(ConfigError::NotPositive("interconnect.narrow_bandwidth"));
        }
        if self.wide_bandwidth == 0 {
            return Err(ConfigError::NotPositive("interconnect.wide_bandwidth"));
        }
        Ok(())
    }
}

impl Default for InterconnectConfig {
    fn default() -> Self {
        Self {
            narrow_bandwidth: defaults::NARROW_BANDWIDTH,
            wide_bandwidth: defaults::WIDE_BANDWIDTH,
            hbm_latency: defaults::HBM_LATENCY,
            loader_entry_offset: defaults::LOADER_ENTRY_OFFSET,
        }
    }
}
