//! Address router.
//!
//! This module implements the N-input, M-output address decoder used for every interconnect
//! plane. It provides:
//! 1. **Port declaration:** Output ports are declared by name and referenced by handle.
//! 2. **Mapping registration:** Each mapping binds an address window to one output port, with an
//!    optional rebase. Overlapping windows are rejected and leave the table untouched.
//! 3. **Resolution:** An incoming address selects exactly one mapping; the local address is the
//!    offset inside the window when rebasing, the address itself otherwise. Addresses outside
//!    every window are a bus fault.
//!
//! Resolution takes `&self` and never mutates, so a frozen router can be shared between any
//! number of simulated bus masters.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::common::{AddressRange, ConfigError, UnmappedAddress};

/// Name of the input port every router starts with.
pub const DEFAULT_INPUT: &str = "input";

/// Handle to an output port of one router.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct RouterPort(usize);

impl RouterPort {
    /// Returns the index of the port in declaration order.
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Opaque per-mapping metadata, passed through to the caller on resolution.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct MappingAttrs {
    /// Extra latency in cycles for accesses through this mapping.
    pub latency: Option<u64>,
    /// Bandwidth in bytes per cycle for accesses through this mapping.
    pub bandwidth: Option<u64>,
}

impl MappingAttrs {
    /// Metadata carrying only a latency.
    pub const fn latency(cycles: u64) -> Self {
        Self {
            latency: Some(cycles),
            bandwidth: None,
        }
    }
}

/// One row of a router's mapping table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct MappingEntry {
    /// Window on the router input that selects this mapping.
    pub range: AddressRange,
    /// Output port the access leaves through.
    pub port: RouterPort,
    /// Whether the window base is subtracted from the address.
    pub rebase: bool,
    /// Pass-through metadata.
    pub attrs: MappingAttrs,
}

impl MappingEntry {
    /// Translates `addr` (which must lie in `range`) to the address seen downstream.
    #[inline]
    pub const fn translate(&self, addr: u64) -> u64 {
        if self.rebase {
            addr - self.range.base()
        } else {
            addr
        }
    }
}

/// Outcome of a successful resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Resolved {
    /// Output port selected.
    pub port: RouterPort,
    /// Address forwarded on that port.
    pub local_addr: u64,
    /// The mapping that matched.
    pub entry: MappingEntry,
}

/// Address router with a non-overlapping mapping table.
///
/// Entries are kept in insertion order for reporting, and indexed by base address for lookup.
#[derive(Clone, Debug, Serialize)]
pub struct Router {
    // Serialized as part of the owning component.
    #[serde(skip)]
    name: String,
    /// Bandwidth in bytes per cycle (informational).
    bandwidth: u64,
    inputs: Vec<String>,
    outputs: Vec<String>,
    entries: Vec<MappingEntry>,
    #[serde(skip)]
    by_base: BTreeMap<u64, usize>,
}

impl Router {
    /// Creates a router with a single input port named [`DEFAULT_INPUT`] and no outputs.
    ///
    /// # Arguments
    ///
    /// * `name` - Instance name, used in error messages.
    /// * `bandwidth` - Bytes per cycle; informational only.
    pub fn new(name: impl Into<String>, bandwidth: u64) -> Self {
        Self {
            name: name.into(),
            bandwidth,
            inputs: vec![DEFAULT_INPUT.to_string()],
            outputs: Vec::new(),
            entries: Vec::new(),
            by_base: BTreeMap::new(),
        }
    }

    /// Returns the instance name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the bandwidth in bytes per cycle.
    pub const fn bandwidth(&self) -> u64 {
        self.bandwidth
    }

    /// Declares an additional input port. Every input sees the same mapping table.
    ///
    /// Declaring an existing input name is a no-op.
    pub fn declare_input_port(&mut self, name: impl Into<String>) {
        let name = name.into();
        if !self.inputs.contains(&name) {
            self.inputs.push(name);
        }
    }

    /// Returns the input port names.
    pub fn inputs(&self) -> &[String] {
        &self.inputs
    }

    /// Declares a named, initially unbound output port.
    ///
    /// # Returns
    ///
    /// A handle for use in [`Router::add_mapping`], or `DuplicatePort` if the name is taken.
    pub fn declare_output_port(&mut self, name: impl Into<String>) -> Result<RouterPort, ConfigError> {
        let name = name.into();
        if self.outputs.contains(&name) {
            return Err(ConfigError::DuplicatePort {
                component: self.name.clone(),
                port: name,
            });
        }
        self.outputs.push(name);
        Ok(RouterPort(self.outputs.len() - 1))
    }

    /// Returns the name of an output port.
    pub fn output_name(&self, port: RouterPort) -> Option<&str> {
        self.outputs.get(port.0).map(String::as_str)
    }

    /// Returns the output port names in declaration order.
    pub fn outputs(&self) -> &[String] {
        &self.outputs
    }

    /// Registers a mapping from `range` to `port`.
    ///
    /// # Arguments
    ///
    /// * `range` - Input-side window that selects the mapping.
    /// * `port` - Declared output port.
    /// * `rebase` - Subtract `range.base()` from forwarded addresses.
    /// * `attrs` - Pass-through metadata.
    ///
    /// # Returns
    ///
    /// `UndeclaredPort` if `port` was not declared on this router, `OverlappingMapping` if
    /// `range` intersects an existing window. The table is unchanged on error.
    pub fn add_mapping(
        &mut self,
        range: AddressRange,
        port: RouterPort,
        rebase: bool,
        attrs: MappingAttrs,
    ) -> Result<(), ConfigError> {
        if port.0 >= self.outputs.len() {
            return Err(ConfigError::UndeclaredPort {
                router: self.name.clone(),
                port: port.0,
            });
        }

        self.check_free(range)?;

        tracing::debug!(
            router = %self.name,
            %range,
            port = self.outputs[port.0].as_str(),
            rebase,
            "added mapping"
        );
        let _ = self.by_base.insert(range.base(), self.entries.len());
        self.entries.push(MappingEntry {
            range,
            port,
            rebase,
            attrs,
        });
        Ok(())
    }

    /// Fails with `OverlappingMapping` if `range` intersects a window already in the table.
    pub fn check_free(&self, range: AddressRange) -> Result<(), ConfigError> {
        // Windows are disjoint and sorted, so only the last window starting before
        // `range.end()` can reach into `range`.
        if let Some((_, &idx)) = self.by_base.range(..range.end()).next_back() {
            let existing = self.entries[idx].range;
            if existing.overlaps(&range) {
                return Err(ConfigError::OverlappingMapping {
                    router: self.name.clone(),
                    new: range,
                    existing,
                });
            }
        }
        Ok(())
    }

    /// Resolves an incoming address to an output port and a forwarded address.
    ///
    /// # Arguments
    ///
    /// * `addr` - Address on the router input.
    ///
    /// # Returns
    ///
    /// The selected port and forwarded address, or `UnmappedAddress` if no window contains
    /// `addr`.
    pub fn resolve(&self, addr: u64) -> Result<Resolved, UnmappedAddress> {
        self.by_base
            .range(..=addr)
            .next_back()
            .map(|(_, &idx)| self.entries[idx])
            .filter(|entry| entry.range.contains(addr))
            .map(|entry| Resolved {
                port: entry.port,
                local_addr: entry.translate(addr),
                entry,
            })
            .ok_or_else(|| UnmappedAddress {
                router: self.name.clone(),
                addr,
            })
    }

    /// Returns the mapping table in insertion order.
    pub fn entries(&self) -> &[MappingEntry] {
        &self.entries
    }

    /// Returns the mapping table sorted by window base.
    pub fn entries_by_address(&self) -> impl Iterator<Item = &MappingEntry> {
        self.by_base.values().map(|&idx| &self.entries[idx])
    }
}
