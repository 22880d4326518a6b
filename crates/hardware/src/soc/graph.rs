//! Component hierarchy and typed port bindings.
//!
//! The graph is the static result of a topology build. It provides:
//! 1. **Component arena:** Groups (board, chip, soc, clusters), routers, and leaf devices, each
//!    owned by exactly one parent and addressed by a slash-separated path.
//! 2. **Typed ports:** Declaring a port returns a handle carrying its signature as a type
//!    parameter, so a binding between mismatched signatures does not compile. Name-based binding
//!    goes through [`BindingGraph::bind_dyn`], the single runtime signature check.
//! 3. **Forward ports:** Hierarchy boundaries re-export an inner port; traversal passes through
//!    them transparently.
//! 4. **Routing:** An address injected at a router is resolved hop by hop, applying each
//!    mapping's rebase, until it reaches a terminal device.

use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;

use serde::Serialize;

use crate::common::{AddressRange, ConfigError, Result, SignatureMismatch, TopologyError};
use crate::soc::devices::Device;
use crate::soc::interconnect::{DEFAULT_INPUT, MappingAttrs, MappingEntry, Router, RouterPort};

/// Routing gives up after this many router hops.
pub const MAX_HOPS: usize = 16;

/// Structural type tag of a port.
pub trait Signature: Copy + 'static {
    /// Tag compared for exact equality at bind time.
    const NAME: &'static str;
}

/// Address-ranged read/write requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Io {}

impl Signature for Io {
    const NAME: &'static str = "io";
}

/// Single-bit level signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Wire {}

impl Signature for Wire {
    const NAME: &'static str = "wire<bool>";
}

/// Index of a component in the arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ComponentId(usize);

impl ComponentId {
    /// Returns the arena index.
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Index of a port in the arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct PortId(usize);

impl PortId {
    /// Returns the arena index.
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Role of a port on its component.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Receives requests or signals.
    Input,
    /// Issues requests or signals.
    Output,
    /// Re-exports an inner port across a hierarchy boundary; both source and target.
    Forward,
}

impl Direction {
    const fn can_source(self) -> bool {
        matches!(self, Self::Output | Self::Forward)
    }

    const fn can_sink(self) -> bool {
        matches!(self, Self::Input | Self::Forward)
    }
}

/// Typed handle to an input port.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct InputPort<S> {
    id: PortId,
    _sig: PhantomData<fn() -> S>,
}

/// Typed handle to an output port.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct OutputPort<S> {
    id: PortId,
    _sig: PhantomData<fn() -> S>,
}

/// Typed handle to a forward port.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ForwardPort<S> {
    id: PortId,
    _sig: PhantomData<fn() -> S>,
}

macro_rules! port_handle {
    ($ty:ident) => {
        impl<S> $ty<S> {
            const fn new(id: PortId) -> Self {
                Self {
                    id,
                    _sig: PhantomData,
                }
            }

            /// Returns the untyped port ID.
            pub const fn id(self) -> PortId {
                self.id
            }
        }
    };
}

port_handle!(InputPort);
port_handle!(OutputPort);
port_handle!(ForwardPort);

/// A port that can be the source of a binding.
pub trait Source<S: Signature>: Copy {
    /// Returns the untyped port ID.
    fn port_id(self) -> PortId;
}

/// A port that can be the target of a binding.
pub trait Sink<S: Signature>: Copy {
    /// Returns the untyped port ID.
    fn port_id(self) -> PortId;
}

impl<S: Signature> Source<S> for OutputPort<S> {
    fn port_id(self) -> PortId {
        self.id
    }
}

impl<S: Signature> Source<S> for ForwardPort<S> {
    fn port_id(self) -> PortId {
        self.id
    }
}

impl<S: Signature> Sink<S> for InputPort<S> {
    fn port_id(self) -> PortId {
        self.id
    }
}

impl<S: Signature> Sink<S> for ForwardPort<S> {
    fn port_id(self) -> PortId {
        self.id
    }
}

/// What a component is.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ComponentKind {
    /// Hierarchy node with no behaviour of its own.
    Group,
    /// Address router.
    Router(Router),
    /// Leaf device.
    Device(Device),
}

/// One node of the component tree.
#[derive(Debug, Clone, Serialize)]
pub struct Component {
    /// Instance name, unique among siblings.
    pub name: String,
    /// Slash-separated path from the root.
    pub path: String,
    /// Owning parent; `None` for the root.
    pub parent: Option<ComponentId>,
    /// Owned children in creation order.
    pub children: Vec<ComponentId>,
    /// Component kind.
    #[serde(flatten)]
    pub kind: ComponentKind,
    /// Declared ports.
    pub ports: Vec<PortId>,
    /// Graph port of each router output, indexed by [`RouterPort::index`].
    #[serde(skip)]
    router_ports: Vec<PortId>,
}

impl Component {
    /// Returns the router if this component is one.
    pub const fn as_router(&self) -> Option<&Router> {
        match &self.kind {
            ComponentKind::Router(router) => Some(router),
            _ => None,
        }
    }

    /// Returns the device if this component is one.
    pub const fn as_device(&self) -> Option<&Device> {
        match &self.kind {
            ComponentKind::Device(device) => Some(device),
            _ => None,
        }
    }

    /// Returns `true` if the component services accesses itself.
    pub const fn is_terminal(&self) -> bool {
        match &self.kind {
            ComponentKind::Device(device) => device.is_terminal(),
            _ => false,
        }
    }
}

/// Declared port.
#[derive(Debug, Clone, Serialize)]
pub struct PortInfo {
    /// Owning component.
    pub owner: ComponentId,
    /// Port name, unique on its owner.
    pub name: String,
    /// Port role.
    pub direction: Direction,
    /// Signature tag.
    pub signature: &'static str,
}

/// Directed edge from a source port to a target port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Binding {
    /// Output or forward port.
    pub from: PortId,
    /// Input or forward port.
    pub to: PortId,
}

/// One router traversal of a routed access.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Hop {
    /// Path of the router.
    pub router: String,
    /// Mapping that matched.
    pub entry: MappingEntry,
    /// Address on the router input.
    pub addr_in: u64,
    /// Address forwarded downstream.
    pub addr_out: u64,
}

/// Outcome of routing an address to a terminal device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Route {
    /// Terminal device.
    pub target: ComponentId,
    /// Path of the terminal device.
    pub target_path: String,
    /// Address the device sees.
    pub local_addr: u64,
    /// Router hops in traversal order.
    pub hops: Vec<Hop>,
    /// Metadata of the last hop.
    pub attrs: MappingAttrs,
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for hop in &self.hops {
            writeln!(
                f,
                "{:<24} {:#012x} -> {:#012x}  via {}{}",
                hop.router,
                hop.addr_in,
                hop.addr_out,
                hop.entry.range,
                if hop.entry.rebase { " (rebase)" } else { "" }
            )?;
        }
        write!(f, "{} @ {:#x}", self.target_path, self.local_addr)
    }
}

/// Component tree plus typed port bindings.
#[derive(Debug, Clone, Serialize)]
pub struct BindingGraph {
    components: Vec<Component>,
    ports: Vec<PortInfo>,
    bindings: Vec<Binding>,
    #[serde(skip)]
    port_index: HashMap<(ComponentId, String), PortId>,
    #[serde(skip)]
    paths: HashMap<String, ComponentId>,
}

impl BindingGraph {
    /// Creates a graph holding a single root group.
    pub fn new(root_name: impl Into<String>) -> Self {
        let name = root_name.into();
        let mut paths = HashMap::new();
        let _ = paths.insert(name.clone(), ComponentId(0));
        Self {
            components: vec![Component {
                path: name.clone(),
                name,
                parent: None,
                children: Vec::new(),
                kind: ComponentKind::Group,
                ports: Vec::new(),
                router_ports: Vec::new(),
            }],
            ports: Vec::new(),
            bindings: Vec::new(),
            port_index: HashMap::new(),
            paths,
        }
    }

    /// Returns the root component.
    pub const fn root(&self) -> ComponentId {
        ComponentId(0)
    }

    fn add_component(
        &mut self,
        parent: ComponentId,
        name: impl Into<String>,
        kind: ComponentKind,
    ) -> Result<ComponentId> {
        let name = name.into();
        let path = format!("{}/{}", self.component(parent).path, name);
        if self.paths.contains_key(&path) {
            return Err(ConfigError::DuplicateComponent(path).into());
        }
        let id = ComponentId(self.components.len());
        tracing::trace!(%path, "added component");
        let _ = self.paths.insert(path.clone(), id);
        self.components.push(Component {
            name,
            path,
            parent: Some(parent),
            children: Vec::new(),
            kind,
            ports: Vec::new(),
            router_ports: Vec::new(),
        });
        self.components[parent.0].children.push(id);
        Ok(id)
    }

    /// Adds a hierarchy group under `parent`.
    pub fn add_group(&mut self, parent: ComponentId, name: impl Into<String>) -> Result<ComponentId> {
        self.add_component(parent, name, ComponentKind::Group)
    }

    /// Adds a leaf device under `parent`.
    pub fn add_device(
        &mut self,
        parent: ComponentId,
        name: impl Into<String>,
        device: Device,
    ) -> Result<ComponentId> {
        self.add_component(parent, name, ComponentKind::Device(device))
    }

    /// Adds a terminal device together with its `input` port.
    pub fn add_terminal(
        &mut self,
        parent: ComponentId,
        name: impl Into<String>,
        device: Device,
    ) -> Result<(ComponentId, InputPort<Io>)> {
        let id = self.add_device(parent, name, device)?;
        let input = self.declare_input::<Io>(id, DEFAULT_INPUT)?;
        Ok((id, input))
    }

    /// Adds a router under `parent` and declares a graph input for each of its inputs.
    pub fn add_router(&mut self, parent: ComponentId, router: Router) -> Result<ComponentId> {
        let inputs = router.inputs().to_vec();
        let name = router.name().to_string();
        let id = self.add_component(parent, name, ComponentKind::Router(router))?;
        for input in inputs {
            let _ = self.declare_port_dyn(id, input, Direction::Input, Io::NAME)?;
        }
        Ok(id)
    }

    /// Declares a port with a runtime signature tag.
    pub fn declare_port_dyn(
        &mut self,
        owner: ComponentId,
        name: impl Into<String>,
        direction: Direction,
        signature: &'static str,
    ) -> Result<PortId> {
        let name = name.into();
        let key = (owner, name);
        if self.port_index.contains_key(&key) {
            return Err(ConfigError::DuplicatePort {
                component: self.component(owner).path.clone(),
                port: key.1,
            }
            .into());
        }
        let id = PortId(self.ports.len());
        self.ports.push(PortInfo {
            owner,
            name: key.1.clone(),
            direction,
            signature,
        });
        self.components[owner.0].ports.push(id);
        let _ = self.port_index.insert(key, id);
        Ok(id)
    }

    /// Declares an input port.
    pub fn declare_input<S: Signature>(
        &mut self,
        owner: ComponentId,
        name: impl Into<String>,
    ) -> Result<InputPort<S>> {
        self.declare_port_dyn(owner, name, Direction::Input, S::NAME)
            .map(InputPort::new)
    }

    /// Declares an output port.
    pub fn declare_output<S: Signature>(
        &mut self,
        owner: ComponentId,
        name: impl Into<String>,
    ) -> Result<OutputPort<S>> {
        self.declare_port_dyn(owner, name, Direction::Output, S::NAME)
            .map(OutputPort::new)
    }

    /// Declares a forward port.
    pub fn declare_forward<S: Signature>(
        &mut self,
        owner: ComponentId,
        name: impl Into<String>,
    ) -> Result<ForwardPort<S>> {
        self.declare_port_dyn(owner, name, Direction::Forward, S::NAME)
            .map(ForwardPort::new)
    }

    /// Returns the router's default input port.
    pub fn router_input(&self, router: ComponentId) -> Result<InputPort<Io>> {
        self.router_input_named(router, DEFAULT_INPUT)
    }

    /// Returns a named input port of a router.
    pub fn router_input_named(&self, router: ComponentId, name: &str) -> Result<InputPort<Io>> {
        let _ = self.router(router)?;
        self.find_port(router, name)
            .filter(|&id| self.ports[id.0].direction == Direction::Input)
            .map(InputPort::new)
            .ok_or_else(|| {
                ConfigError::UnboundPort {
                    component: self.component(router).path.clone(),
                    port: name.to_string(),
                }
                .into()
            })
    }

    /// Declares an additional input on a router.
    pub fn add_router_input(
        &mut self,
        router: ComponentId,
        name: impl Into<String>,
    ) -> Result<InputPort<Io>> {
        let name = name.into();
        let input = self.declare_input::<Io>(router, name.clone())?;
        self.router_mut(router)?.declare_input_port(name);
        Ok(input)
    }

    /// Declares a router output together with its graph port.
    pub fn declare_router_output(
        &mut self,
        router: ComponentId,
        name: impl Into<String>,
    ) -> Result<(RouterPort, OutputPort<Io>)> {
        let name = name.into();
        if self.find_port(router, &name).is_some() {
            return Err(ConfigError::DuplicatePort {
                component: self.component(router).path.clone(),
                port: name,
            }
            .into());
        }
        let port = self.router_mut(router)?.declare_output_port(name.clone())?;
        let output = self.declare_output::<Io>(router, name)?;
        self.components[router.0].router_ports.push(output.id);
        Ok((port, output))
    }

    /// Registers a mapping on a router output that was declared earlier.
    pub fn add_router_mapping(
        &mut self,
        router: ComponentId,
        range: AddressRange,
        port: RouterPort,
        rebase: bool,
        attrs: MappingAttrs,
    ) -> Result<()> {
        self.router_mut(router)?
            .add_mapping(range, port, rebase, attrs)
            .map_err(Into::into)
    }

    /// Declares a router output named `name`, maps `range` to it, and binds it to `target`.
    ///
    /// # Arguments
    ///
    /// * `router` - Router to extend.
    /// * `name` - Output port name.
    /// * `target` - Downstream input or forward port.
    /// * `range` - Window on the router input.
    /// * `rebase` - Subtract the window base before forwarding.
    /// * `attrs` - Pass-through metadata.
    ///
    /// # Returns
    ///
    /// The new output handle. On error neither the router nor the graph is modified.
    pub fn map(
        &mut self,
        router: ComponentId,
        name: impl Into<String>,
        target: impl Sink<Io>,
        range: AddressRange,
        rebase: bool,
        attrs: MappingAttrs,
    ) -> Result<OutputPort<Io>> {
        let name = name.into();
        self.router(router)?.check_free(range)?;
        let target_id = target.port_id();
        if !self.port(target_id).direction.can_sink() {
            return Err(self.direction_error(target_id, "target"));
        }
        let (port, output) = self.declare_router_output(router, name)?;
        self.add_router_mapping(router, range, port, rebase, attrs)?;
        self.bindings.push(Binding {
            from: output.id,
            to: target_id,
        });
        tracing::debug!(
            from = %self.port_path(output.id),
            to = %self.port_path(target_id),
            "bound mapping"
        );
        Ok(output)
    }

    /// Binds two typed ports of the same signature.
    pub fn bind<S: Signature>(&mut self, from: impl Source<S>, to: impl Sink<S>) {
        let (from, to) = (from.port_id(), to.port_id());
        tracing::debug!(from = %self.port_path(from), to = %self.port_path(to), "bound");
        self.bindings.push(Binding { from, to });
    }

    /// Binds two ports by ID, checking direction and signature at runtime.
    ///
    /// This is the only place signatures are compared; typed handles go through
    /// [`BindingGraph::bind`] and are checked by the compiler.
    pub fn bind_dyn(&mut self, from: PortId, to: PortId) -> Result<()> {
        if !self.port(from).direction.can_source() {
            return Err(self.direction_error(from, "source"));
        }
        if !self.port(to).direction.can_sink() {
            return Err(self.direction_error(to, "target"));
        }
        let (found, expected) = (self.port(from).signature, self.port(to).signature);
        if found != expected {
            return Err(SignatureMismatch {
                from: self.port_path(from),
                to: self.port_path(to),
                expected: expected.to_string(),
                found: found.to_string(),
            }
            .into());
        }
        tracing::debug!(from = %self.port_path(from), to = %self.port_path(to), "bound");
        self.bindings.push(Binding { from, to });
        Ok(())
    }

    /// Binds two ports looked up by component and port name.
    pub fn bind_by_name(
        &mut self,
        from: ComponentId,
        from_port: &str,
        to: ComponentId,
        to_port: &str,
    ) -> Result<()> {
        let from_id = self.require_port(from, from_port)?;
        let to_id = self.require_port(to, to_port)?;
        self.bind_dyn(from_id, to_id)
    }

    fn require_port(&self, owner: ComponentId, name: &str) -> Result<PortId> {
        self.find_port(owner, name).ok_or_else(|| {
            ConfigError::UnboundPort {
                component: self.component(owner).path.clone(),
                port: name.to_string(),
            }
            .into()
        })
    }

    fn direction_error(&self, port: PortId, role: &'static str) -> TopologyError {
        let info = self.port(port);
        ConfigError::DirectionMismatch {
            component: self.component(info.owner).path.clone(),
            port: info.name.clone(),
            role,
        }
        .into()
    }

    /// Collects every input port reached from `port` through forward ports.
    pub fn reachable_inputs(&self, port: PortId) -> Result<Vec<PortId>> {
        let mut found = Vec::new();
        let mut stack = vec![(port, 0_usize)];
        while let Some((current, depth)) = stack.pop() {
            if depth > self.ports.len() {
                return Err(ConfigError::RoutingLoop {
                    addr: 0,
                    hops: depth,
                }
                .into());
            }
            for binding in self.bindings.iter().filter(|b| b.from == current) {
                match self.port(binding.to).direction {
                    Direction::Forward => stack.push((binding.to, depth + 1)),
                    _ => found.push(binding.to),
                }
            }
        }
        Ok(found)
    }

    /// Follows an address-carrying port to the unique input port it reaches.
    ///
    /// # Returns
    ///
    /// `UnboundPort` if nothing is reached, `AmbiguousBinding` if more than one input is.
    pub fn follow(&self, port: PortId) -> Result<PortId> {
        let targets = self.reachable_inputs(port)?;
        let info = self.port(port);
        match targets.as_slice() {
            [target] => Ok(*target),
            [] => Err(ConfigError::UnboundPort {
                component: self.component(info.owner).path.clone(),
                port: info.name.clone(),
            }
            .into()),
            _ => Err(ConfigError::AmbiguousBinding {
                component: self.component(info.owner).path.clone(),
                port: info.name.clone(),
                count: targets.len(),
            }
            .into()),
        }
    }

    /// Checks that every mapped router output leads to a router or a terminal device.
    pub fn validate(&self) -> Result<()> {
        for component in &self.components {
            let Some(router) = component.as_router() else {
                continue;
            };
            for entry in router.entries() {
                let port = component
                    .router_ports
                    .get(entry.port.index())
                    .copied()
                    .ok_or_else(|| ConfigError::UndeclaredPort {
                        router: component.path.clone(),
                        port: entry.port.index(),
                    })?;
                let target = self.follow(port)?;
                let owner = self.component(self.port(target).owner);
                if owner.as_router().is_none() && !owner.is_terminal() {
                    return Err(ConfigError::NotTerminal {
                        component: component.path.clone(),
                        port: self.port(port).name.clone(),
                    }
                    .into());
                }
            }
        }
        Ok(())
    }

    /// Routes `addr`, entering at `router`, to a terminal device.
    ///
    /// # Arguments
    ///
    /// * `router` - Router whose input receives the access.
    /// * `addr` - Address on that input.
    ///
    /// # Returns
    ///
    /// The terminal device, the address it sees, and every hop taken. Fails with
    /// `UnmappedAddress` at the first router that has no window for the address, and with
    /// `RoutingLoop` after [`MAX_HOPS`] hops.
    pub fn route(&self, router: ComponentId, addr: u64) -> Result<Route> {
        let mut hops = Vec::new();
        let mut current = router;
        let mut addr_in = addr;
        while hops.len() < MAX_HOPS {
            let component = self.component(current);
            let resolved = self.router(current)?.resolve(addr_in)?;
            let out = component
                .router_ports
                .get(resolved.port.index())
                .copied()
                .ok_or_else(|| ConfigError::UndeclaredPort {
                    router: component.path.clone(),
                    port: resolved.port.index(),
                })?;
            hops.push(Hop {
                router: component.path.clone(),
                entry: resolved.entry,
                addr_in,
                addr_out: resolved.local_addr,
            });

            let target = self.follow(out)?;
            let owner_id = self.port(target).owner;
            let owner = self.component(owner_id);
            if owner.as_router().is_some() {
                current = owner_id;
                addr_in = resolved.local_addr;
                continue;
            }
            if !owner.is_terminal() {
                return Err(ConfigError::NotTerminal {
                    component: component.path.clone(),
                    port: self.port(out).name.clone(),
                }
                .into());
            }
            return Ok(Route {
                target: owner_id,
                target_path: owner.path.clone(),
                local_addr: resolved.local_addr,
                hops,
                attrs: resolved.entry.attrs,
            });
        }
        Err(ConfigError::RoutingLoop {
            addr,
            hops: hops.len(),
        }
        .into())
    }

    /// Routes an access issued on a master's output port.
    pub fn route_from(&self, master: OutputPort<Io>, addr: u64) -> Result<Route> {
        let target = self.follow(master.id)?;
        let owner_id = self.port(target).owner;
        let owner = self.component(owner_id);
        if owner.as_router().is_some() {
            return self.route(owner_id, addr);
        }
        if owner.is_terminal() {
            return Ok(Route {
                target: owner_id,
                target_path: owner.path.clone(),
                local_addr: addr,
                hops: Vec::new(),
                attrs: MappingAttrs::default(),
            });
        }
        Err(ConfigError::NotTerminal {
            component: self.component(self.port(master.id).owner).path.clone(),
            port: self.port(master.id).name.clone(),
        }
        .into())
    }

    /// Looks a component up by path.
    pub fn lookup(&self, path: &str) -> Option<ComponentId> {
        self.paths.get(path).copied()
    }

    /// Returns a component.
    ///
    /// IDs are only handed out by this graph, so every ID is valid.
    pub fn component(&self, id: ComponentId) -> &Component {
        &self.components[id.0]
    }

    /// Returns every component in creation order.
    pub fn components(&self) -> &[Component] {
        &self.components
    }

    /// Returns the router at `id`, or `NotARouter`.
    pub fn router(&self, id: ComponentId) -> Result<&Router> {
        let component = self.component(id);
        component
            .as_router()
            .ok_or_else(|| ConfigError::NotARouter(component.path.clone()).into())
    }

    fn router_mut(&mut self, id: ComponentId) -> Result<&mut Router> {
        let component = &mut self.components[id.0];
        match &mut component.kind {
            ComponentKind::Router(router) => Ok(router),
            _ => Err(ConfigError::NotARouter(component.path.clone()).into()),
        }
    }

    /// Returns a port.
    pub fn port(&self, id: PortId) -> &PortInfo {
        &self.ports[id.0]
    }

    /// Finds a port by owner and name.
    pub fn find_port(&self, owner: ComponentId, name: &str) -> Option<PortId> {
        self.port_index.get(&(owner, name.to_string())).copied()
    }

    /// Returns `component/port` for a port.
    pub fn port_path(&self, id: PortId) -> String {
        let info = self.port(id);
        format!("{}.{}", self.component(info.owner).path, info.name)
    }

    /// Returns every binding in creation order.
    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }
}
