//! # Binding Graph Tests
//!
//! Component naming, typed and dynamic bindings, forward-port traversal, and multi-hop routing.

use snitchsim_core::common::{ConfigError, TopologyError};
use snitchsim_core::soc::devices::{Core, Device, Memory};
use snitchsim_core::soc::graph::{
    BindingGraph, Direction, ForwardPort, InputPort, Io, MAX_HOPS, OutputPort, Signature, Wire,
};
use snitchsim_core::soc::interconnect::{MappingAttrs, Router};

use crate::common::range;

fn memory(size: u64) -> Device {
    Device::Memory(Memory::new(size))
}

// ══════════════════════════════════════════════════════════
// 1. Components and ports
// ══════════════════════════════════════════════════════════

#[test]
fn test_paths_and_lookup() {
    let mut graph = BindingGraph::new("board");
    let chip = graph.add_group(graph.root(), "chip").unwrap();
    let soc = graph.add_group(chip, "soc").unwrap();
    assert_eq!(graph.component(soc).path, "board/chip/soc");
    assert_eq!(graph.lookup("board/chip/soc"), Some(soc));
    assert_eq!(graph.component(chip).children, vec![soc]);
    assert_eq!(graph.component(soc).parent, Some(chip));
}

#[test]
fn test_same_name_under_different_parents() {
    let mut graph = BindingGraph::new("board");
    let a = graph.add_group(graph.root(), "a").unwrap();
    let b = graph.add_group(graph.root(), "b").unwrap();
    assert!(graph.add_group(a, "x").is_ok());
    assert!(graph.add_group(b, "x").is_ok());
    assert!(matches!(
        graph.add_group(a, "x"),
        Err(TopologyError::Config(ConfigError::DuplicateComponent(_)))
    ));
}

#[test]
fn test_duplicate_port_rejected() {
    let mut graph = BindingGraph::new("top");
    let g = graph.root();
    let _ = graph.declare_input::<Io>(g, "in").unwrap();
    assert!(graph.declare_output::<Wire>(g, "in").is_err());
}

#[test]
fn test_router_ports_declared() {
    let mut graph = BindingGraph::new("top");
    let r = graph.add_router(graph.root(), Router::new("xbar", 64)).unwrap();
    let wide = graph.add_router_input(r, "wide").unwrap();
    assert_eq!(graph.router_input_named(r, "wide").unwrap(), wide);
    assert_eq!(graph.router(r).unwrap().inputs().len(), 2);
    assert_eq!(graph.port(wide.id()).direction, Direction::Input);
}

#[test]
fn test_not_a_router() {
    let mut graph = BindingGraph::new("top");
    let g = graph.add_group(graph.root(), "g").unwrap();
    assert!(matches!(
        graph.router(g),
        Err(TopologyError::Config(ConfigError::NotARouter(_)))
    ));
}

// ══════════════════════════════════════════════════════════
// 2. Bindings
// ══════════════════════════════════════════════════════════

#[test]
fn test_bind_dyn_signature_mismatch() {
    let mut graph = BindingGraph::new("top");
    let core = Device::Core(Core {
        hart_id: 0,
        local_id: 0,
    });
    let a = graph.add_device(graph.root(), "a", core).unwrap();
    let (m, _) = graph.add_terminal(graph.root(), "m", memory(0x10)).unwrap();
    let _ = graph.declare_output::<Wire>(a, "irq").unwrap();

    let err = graph.bind_by_name(a, "irq", m, "input").unwrap_err();
    match err {
        TopologyError::Signature(e) => {
            assert_eq!(e.found, "wire<bool>");
            assert_eq!(e.expected, "io");
            assert_eq!(e.from, "top/a.irq");
            assert_eq!(e.to, "top/m.input");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(graph.bindings().is_empty());
}

#[test]
fn test_bind_dyn_direction_checked() {
    let mut graph = BindingGraph::new("top");
    let (m, input) = graph.add_terminal(graph.root(), "m", memory(0x10)).unwrap();
    let (n, _) = graph.add_terminal(graph.root(), "n", memory(0x10)).unwrap();
    let err = graph.bind_by_name(m, "input", n, "input").unwrap_err();
    assert!(matches!(
        err,
        TopologyError::Config(ConfigError::DirectionMismatch { role: "source", .. })
    ));
    assert!(graph.bind_dyn(input.id(), input.id()).is_err());
}

#[test]
fn test_bind_by_name_unknown_port() {
    let mut graph = BindingGraph::new("top");
    let (m, _) = graph.add_terminal(graph.root(), "m", memory(0x10)).unwrap();
    assert!(matches!(
        graph.bind_by_name(m, "out", m, "input"),
        Err(TopologyError::Config(ConfigError::UnboundPort { .. }))
    ));
}

#[test]
fn test_follow_unbound_and_ambiguous() {
    let mut graph = BindingGraph::new("top");
    let root = graph.root();
    let out = graph.declare_output::<Io>(root, "out").unwrap();
    assert!(matches!(
        graph.follow(out.id()),
        Err(TopologyError::Config(ConfigError::UnboundPort { .. }))
    ));

    let (_, a) = graph.add_terminal(root, "a", memory(0x10)).unwrap();
    let (_, b) = graph.add_terminal(root, "b", memory(0x10)).unwrap();
    graph.bind(out, a);
    graph.bind(out, b);
    assert!(matches!(
        graph.follow(out.id()),
        Err(TopologyError::Config(ConfigError::AmbiguousBinding { count: 2, .. }))
    ));
}

#[test]
fn test_wire_fan_out_through_forward() {
    let mut graph = BindingGraph::new("top");
    let root = graph.root();
    let start = graph.declare_output::<Wire>(root, "start").unwrap();
    let group = graph.add_group(root, "cluster").unwrap();
    let fetch = graph.declare_forward::<Wire>(group, "fetch_enable").unwrap();
    graph.bind(start, fetch);
    for i in 0..3 {
        let pe = graph
            .add_device(group, format!("pe{i}"), Device::Core(Core { hart_id: i, local_id: i }))
            .unwrap();
        let input = graph.declare_input::<Wire>(pe, "fetch_enable").unwrap();
        graph.bind(fetch, input);
    }
    assert_eq!(graph.reachable_inputs(start.id()).unwrap().len(), 3);
}

fn chain<S: Signature>(
    graph: &mut BindingGraph,
    out: OutputPort<S>,
    fwd: ForwardPort<S>,
    input: InputPort<S>,
) {
    graph.bind(out, fwd);
    graph.bind(fwd, input);
}

#[test]
fn test_generic_bind_for_every_signature() {
    let mut graph = BindingGraph::new("top");
    let root = graph.root();
    let group = graph.add_group(root, "g").unwrap();
    let dev = graph.add_device(group, "dev", memory(0x10)).unwrap();

    let out = graph.declare_output::<Io>(root, "out").unwrap();
    let fwd = graph.declare_forward::<Io>(group, "io").unwrap();
    let input = graph.declare_input::<Io>(dev, "input").unwrap();
    chain(&mut graph, out, fwd, input);

    let irq = graph.declare_output::<Wire>(root, "irq").unwrap();
    let irq_fwd = graph.declare_forward::<Wire>(group, "irq").unwrap();
    let irq_in = graph.declare_input::<Wire>(dev, "irq").unwrap();
    chain(&mut graph, irq, irq_fwd, irq_in);

    assert_eq!(graph.bindings().len(), 4);
    assert_eq!(graph.reachable_inputs(out.id()).unwrap(), vec![input.id()]);
    assert_eq!(graph.reachable_inputs(irq.id()).unwrap(), vec![irq_in.id()]);
}

// ══════════════════════════════════════════════════════════
// 3. Mapping and routing
// ══════════════════════════════════════════════════════════

#[test]
fn test_map_failure_is_atomic() {
    let mut graph = BindingGraph::new("top");
    let root = graph.root();
    let r = graph.add_router(root, Router::new("r", 8)).unwrap();
    let (_, a) = graph.add_terminal(root, "a", memory(0x1000)).unwrap();
    let (_, b) = graph.add_terminal(root, "b", memory(0x1000)).unwrap();
    let _ = graph
        .map(r, "a", a, range(0x1000, 0x1000), true, MappingAttrs::default())
        .unwrap();
    let bindings = graph.bindings().len();

    let err = graph
        .map(r, "b", b, range(0x1800, 0x1000), true, MappingAttrs::default())
        .unwrap_err();
    assert!(matches!(
        err,
        TopologyError::Config(ConfigError::OverlappingMapping { .. })
    ));
    assert_eq!(graph.bindings().len(), bindings);
    assert_eq!(graph.router(r).unwrap().outputs().len(), 1);
    assert!(graph.find_port(r, "b").is_none());
}

#[test]
fn test_two_hop_route_rebases_once() {
    let mut graph = BindingGraph::new("top");
    let root = graph.root();
    let narrow = graph.add_router(root, Router::new("narrow", 8)).unwrap();
    let wide = graph.add_router(root, Router::new("wide", 64)).unwrap();
    let wide_in = graph.router_input(wide).unwrap();
    let (mem, mem_in) = graph.add_terminal(root, "mem", memory(0x1000)).unwrap();

    let window = range(0x8000_0000, 0x1000);
    let _ = graph
        .map(narrow, "bridge", wide_in, window, false, MappingAttrs::default())
        .unwrap();
    let _ = graph
        .map(wide, "mem", mem_in, window, true, MappingAttrs::latency(100))
        .unwrap();
    graph.validate().unwrap();

    let route = graph.route(narrow, 0x8000_0040).unwrap();
    assert_eq!(route.target, mem);
    assert_eq!(route.local_addr, 0x40);
    assert_eq!(route.hops.len(), 2);
    assert_eq!(route.hops[0].addr_out, 0x8000_0040);
    assert_eq!(route.hops[1].addr_out, 0x40);
    assert_eq!(route.attrs.latency, Some(100));
}

#[test]
fn test_route_to_group_is_not_terminal() {
    let mut graph = BindingGraph::new("top");
    let root = graph.root();
    let r = graph.add_router(root, Router::new("r", 8)).unwrap();
    let g = graph.add_group(root, "g").unwrap();
    let input = graph.declare_input::<Io>(g, "in").unwrap();
    let _ = graph
        .map(r, "g", input, range(0, 0x100), false, MappingAttrs::default())
        .unwrap();
    assert!(matches!(
        graph.validate(),
        Err(TopologyError::Config(ConfigError::NotTerminal { .. }))
    ));
    assert!(graph.route(r, 0x10).is_err());
}

#[test]
fn test_routing_loop_detected() {
    let mut graph = BindingGraph::new("top");
    let root = graph.root();
    let a = graph.add_router(root, Router::new("a", 8)).unwrap();
    let b = graph.add_router(root, Router::new("b", 8)).unwrap();
    let a_in = graph.router_input(a).unwrap();
    let b_in = graph.router_input(b).unwrap();
    let all = range(0, 0x1000);
    let _ = graph.map(a, "to_b", b_in, all, false, MappingAttrs::default()).unwrap();
    let _ = graph.map(b, "to_a", a_in, all, false, MappingAttrs::default()).unwrap();

    let err = graph.route(a, 0x10).unwrap_err();
    assert!(matches!(
        err,
        TopologyError::Config(ConfigError::RoutingLoop { addr: 0x10, hops }) if hops == MAX_HOPS
    ));
}

#[test]
fn test_unmapped_in_second_hop() {
    let mut graph = BindingGraph::new("top");
    let root = graph.root();
    let a = graph.add_router(root, Router::new("a", 8)).unwrap();
    let b = graph.add_router(root, Router::new("b", 8)).unwrap();
    let b_in = graph.router_input(b).unwrap();
    let (_, mem) = graph.add_terminal(root, "mem", memory(0x100)).unwrap();
    let _ = graph
        .map(a, "to_b", b_in, range(0x1000, 0x1000), true, MappingAttrs::default())
        .unwrap();
    let _ = graph
        .map(b, "mem", mem, range(0, 0x100), false, MappingAttrs::default())
        .unwrap();

    assert_eq!(graph.route(a, 0x1080).unwrap().local_addr, 0x80);
    match graph.route(a, 0x1200).unwrap_err() {
        TopologyError::Unmapped(e) => {
            assert_eq!(e.router, "b");
            assert_eq!(e.addr, 0x200);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_graph_serializes() {
    let mut graph = BindingGraph::new("top");
    let (_, _) = graph.add_terminal(graph.root(), "m", memory(0x10)).unwrap();
    let json = serde_json::to_value(&graph).unwrap();
    assert_eq!(json["components"][1]["path"], "top/m");
    assert_eq!(json["components"][1]["kind"], "device");
    assert_eq!(json["ports"][0]["signature"], "io");
}
