
/// Binding graph ports, bindings, and routing.
pub mod graph;
