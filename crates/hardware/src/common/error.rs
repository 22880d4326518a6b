//! Topology construction and routing errors.
//!
//! This module defines the three failure categories of the address-map core. It provides:
//! 1. **Configuration errors:** Invalid or contradictory build-time input, always raised before
//!    any component is handed to the simulation engine.
//! 2. **Unmapped addresses:** A resolution request outside every mapping of a router (a bus fault).
//! 3. **Signature mismatches:** A binding between two ports whose type signatures differ.
//!
//! `TopologyError` unifies the three so build and access paths can use a single `?` chain.

use std::path::PathBuf;

use thiserror::Error;

use super::addr::AddressRange;

/// Invalid or contradictory build-time input.
///
/// Every variant is detected during the build phase and aborts it; none are retried.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A range was empty or its end does not fit in 64 bits.
    #[error("invalid address range: base {base:#x}, size {size:#x}")]
    InvalidRange {
        /// Requested base address.
        base: u64,
        /// Requested size in bytes.
        size: u64,
    },

    /// A new mapping overlaps an existing mapping on the same router.
    #[error("router '{router}': mapping {new} overlaps existing mapping {existing}")]
    OverlappingMapping {
        /// Router name.
        router: String,
        /// Range that was rejected.
        new: AddressRange,
        /// Range already present in the table.
        existing: AddressRange,
    },

    /// A mapping names an output port the router never declared.
    #[error("router '{router}' has no output port #{port}")]
    UndeclaredPort {
        /// Router name.
        router: String,
        /// Port index that was referenced.
        port: usize,
    },

    /// A port was declared twice under the same name on one component.
    #[error("'{component}' already declares port '{port}'")]
    DuplicatePort {
        /// Component or router name.
        component: String,
        /// Duplicated port name.
        port: String,
    },

    /// A property was declared twice.
    #[error("property '{0}' is already declared")]
    DuplicateProperty(String),

    /// A property was read before being declared.
    #[error("property '{0}' is not declared")]
    UndeclaredProperty(String),

    /// An override was recorded after its property had been declared.
    #[error("property '{0}' is already declared; overrides must come first")]
    LateOverride(String),

    /// A user override names no declared property.
    #[error("unknown property '{0}'")]
    UnknownProperty(String),

    /// A property value could not be cast to the declared type.
    #[error("property '{name}': cannot read '{value}' as {expected}")]
    InvalidPropertyValue {
        /// Property name.
        name: String,
        /// Raw value supplied.
        value: String,
        /// Expected type.
        expected: &'static str,
    },

    /// A property value is outside its allowed set.
    #[error("property '{name}': '{value}' is not one of {allowed:?}")]
    NotAllowed {
        /// Property name.
        name: String,
        /// Rejected value.
        value: String,
        /// Accepted values.
        allowed: Vec<String>,
    },

    /// A numeric setting must be strictly positive.
    #[error("'{0}' must be greater than zero")]
    NotPositive(&'static str),

    /// `cluster_cores` does not list one entry per cluster.
    #[error("cluster_cores lists {found} clusters but nb_cluster is {expected}")]
    ClusterCountMismatch {
        /// Configured cluster count.
        expected: usize,
        /// Length of the override list.
        found: usize,
    },

    /// A cluster was configured with no cores.
    #[error("cluster {cluster} has no cores")]
    NoCores {
        /// Cluster index.
        cluster: usize,
    },

    /// The running hart counter does not fit in `usize`.
    #[error("hart IDs of cluster {cluster} overflow the hart counter")]
    HartOverflow {
        /// Cluster index.
        cluster: usize,
    },

    /// A cluster's internal layout does not fit in its slot of the cluster region.
    #[error("cluster footprint {footprint:#x} exceeds the cluster stride {stride:#x}")]
    ClusterFootprint {
        /// Bytes needed by one cluster.
        footprint: u64,
        /// Bytes allotted per cluster.
        stride: u64,
    },

    /// Two fixed regions of the chip address map overlap.
    #[error("region '{a}' {a_range} overlaps region '{b}' {b_range}")]
    RegionOverlap {
        /// First region name.
        a: &'static str,
        /// First region range.
        a_range: AddressRange,
        /// Second region name.
        b: &'static str,
        /// Second region range.
        b_range: AddressRange,
    },

    /// The cluster collaborator reported a core count different from the computed layout.
    #[error("cluster {cluster} reports {reported} cores, layout expects {expected}")]
    CoreCountMismatch {
        /// Cluster index.
        cluster: usize,
        /// Count used for hart allocation.
        expected: usize,
        /// Count reported by the collaborator.
        reported: usize,
    },

    /// A port that must be connected has no binding.
    #[error("port '{port}' of '{component}' is not bound")]
    UnboundPort {
        /// Component path.
        component: String,
        /// Port name.
        port: String,
    },

    /// An address-carrying port resolves to more than one target.
    #[error("port '{port}' of '{component}' is bound to {count} targets")]
    AmbiguousBinding {
        /// Component path.
        component: String,
        /// Port name.
        port: String,
        /// Number of targets found.
        count: usize,
    },

    /// A binding used a port against its direction.
    #[error("port '{port}' of '{component}' cannot be used as {role}")]
    DirectionMismatch {
        /// Component path.
        component: String,
        /// Port name.
        port: String,
        /// Role the port was used in (`source` or `target`).
        role: &'static str,
    },

    /// A component name is already used under the same parent.
    #[error("component '{0}' already exists")]
    DuplicateComponent(String),

    /// Routing did not reach a terminal device within the hop limit.
    #[error("routing {addr:#x} did not terminate after {hops} hops")]
    RoutingLoop {
        /// Address being routed.
        addr: u64,
        /// Hops taken.
        hops: usize,
    },

    /// The referenced component is not a router.
    #[error("component '{0}' is not a router")]
    NotARouter(String),

    /// An address-carrying binding ends on a component that cannot service accesses.
    #[error("port '{port}' of '{component}' does not lead to a router or terminal device")]
    NotTerminal {
        /// Component path.
        component: String,
        /// Port name.
        port: String,
    },

    /// Malformed JSON configuration.
    #[error("invalid configuration: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration file could not be read.
    #[error("cannot read {}: {source}", path.display())]
    Io {
        /// File path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// A resolution request fell outside every mapping of a router.
///
/// Models a bus fault; callers must propagate it rather than substitute a default.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unmapped address {addr:#x} on router '{router}'")]
pub struct UnmappedAddress {
    /// Router that rejected the access.
    pub router: String,
    /// Address as seen on that router's input.
    pub addr: u64,
}

/// Two ports with different type signatures were bound together.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("cannot bind '{from}' to '{to}': signature '{found}' does not match '{expected}'")]
pub struct SignatureMismatch {
    /// Source port path.
    pub from: String,
    /// Target port path.
    pub to: String,
    /// Signature of the target port.
    pub expected: String,
    /// Signature of the source port.
    pub found: String,
}

/// Any failure of the topology core.
#[derive(Debug, Error)]
pub enum TopologyError {
    /// Build-time configuration error.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Bus fault during resolution.
    #[error(transparent)]
    Unmapped(#[from] UnmappedAddress),
    /// Binding between incompatible ports.
    #[error(transparent)]
    Signature(#[from] SignatureMismatch),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, TopologyError>;
