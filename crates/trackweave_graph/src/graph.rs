// SPDX-License-Identifier: MIT OR Apache-2.0
//! Graph data structure owning nodes, ports, and edges.
//!
//! Storage is an arena per record class: an [`IndexMap`] keeps records in
//! dense slots with O(1) ID-to-slot lookup, and removal swaps the last
//! record into the hole. External IDs are monotonic `u32`s allocated from 1
//! and never reused; a serializer can restore records at exact IDs through
//! the `insert_*_at` primitives.

use crate::edge::{EdgeId, EdgeRecord};
use crate::node::{NodeId, NodeKind, NodeRecord};
use crate::port::{PortDataType, PortId, PortRecord, PortSpec};
use crate::schema::NodeSchema;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Result of creating a node from its schema layout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedNode {
    /// The new node
    pub node: NodeId,
    /// Input port IDs, index-aligned with the schema layout
    pub inputs: Vec<PortId>,
    /// Output port IDs, index-aligned with the schema layout
    pub outputs: Vec<PortId>,
}

/// A typed node/port/edge graph with stable external IDs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Graph {
    nodes: IndexMap<NodeId, NodeRecord>,
    ports: IndexMap<PortId, PortRecord>,
    edges: IndexMap<EdgeId, EdgeRecord>,
    next_node: u32,
    next_port: u32,
    next_edge: u32,
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}

impl Graph {
    /// Create an empty graph
    pub fn new() -> Self {
        Self {
            nodes: IndexMap::new(),
            ports: IndexMap::new(),
            edges: IndexMap::new(),
            next_node: 1,
            next_port: 1,
            next_edge: 1,
        }
    }

    // ---- creation -------------------------------------------------------

    /// Create a node of `kind` with the port layout the schema declares.
    ///
    /// The returned port lists are index-aligned with the layout; callers
    /// may address ports positionally from here on.
    pub fn create_node(
        &mut self,
        schema: &NodeSchema,
        kind: NodeKind,
        position: [f32; 2],
    ) -> CreatedNode {
        let node = self.add_node(kind.tag(), position);
        let mut inputs = Vec::new();
        let mut outputs = Vec::new();

        if let Some(layout) = schema.layout(kind) {
            inputs.reserve(layout.inputs.len());
            outputs.reserve(layout.outputs.len());
            for template in &layout.inputs {
                let tag = PortSpec::input(template.data_type).encode();
                if let Some(port) = self.add_input_port(node, tag) {
                    inputs.push(port);
                }
            }
            for template in &layout.outputs {
                let tag = PortSpec::output(template.data_type).encode();
                if let Some(port) = self.add_output_port(node, tag) {
                    outputs.push(port);
                }
            }
        }

        CreatedNode {
            node,
            inputs,
            outputs,
        }
    }

    /// Add a bare node record. Prefer [`Graph::create_node`]; this primitive
    /// does not allocate ports.
    pub fn add_node(&mut self, kind_tag: u16, position: [f32; 2]) -> NodeId {
        let id = NodeId(self.next_node);
        self.next_node = self
            .next_node
            .checked_add(1)
            .expect("node id space exhausted");
        self.nodes.insert(
            id,
            NodeRecord {
                id,
                kind_tag,
                position,
                inputs: Vec::new(),
                outputs: Vec::new(),
            },
        );
        id
    }

    /// Append an input port to a node. `None` if the node is unknown.
    pub fn add_input_port(&mut self, node: NodeId, spec_tag: u16) -> Option<PortId> {
        self.add_port(node, spec_tag, true)
    }

    /// Append an output port to a node. `None` if the node is unknown.
    pub fn add_output_port(&mut self, node: NodeId, spec_tag: u16) -> Option<PortId> {
        self.add_port(node, spec_tag, false)
    }

    fn add_port(&mut self, node: NodeId, spec_tag: u16, is_input: bool) -> Option<PortId> {
        let record = self.nodes.get_mut(&node)?;
        let id = PortId(self.next_port);
        self.next_port = self
            .next_port
            .checked_add(1)
            .expect("port id space exhausted");
        if is_input {
            record.inputs.push(id);
        } else {
            record.outputs.push(id);
        }
        self.ports.insert(
            id,
            PortRecord {
                id,
                owner: node,
                spec_tag,
            },
        );
        Some(id)
    }

    /// Add an edge between two existing ports. `None` if either port is
    /// unknown. Direction and type rules are validated externally
    /// (see [`crate::validation`]); this primitive does not enforce them.
    pub fn add_edge(&mut self, source: PortId, target: PortId) -> Option<EdgeId> {
        if !self.ports.contains_key(&source) || !self.ports.contains_key(&target) {
            return None;
        }
        let id = EdgeId(self.next_edge);
        self.next_edge = self
            .next_edge
            .checked_add(1)
            .expect("edge id space exhausted");
        self.edges.insert(id, EdgeRecord { id, source, target });
        Some(id)
    }

    // ---- restore-at-ID (persistence boundary) ---------------------------

    /// Insert a node at a caller-specified ID, bypassing allocation.
    /// Returns `false` if the ID is already taken. The allocator always
    /// advances past restored IDs.
    pub fn insert_node_at(&mut self, id: NodeId, kind_tag: u16, position: [f32; 2]) -> bool {
        if self.nodes.contains_key(&id) {
            return false;
        }
        self.nodes.insert(
            id,
            NodeRecord {
                id,
                kind_tag,
                position,
                inputs: Vec::new(),
                outputs: Vec::new(),
            },
        );
        if id.0 >= self.next_node {
            self.next_node = id.0.checked_add(1).expect("node id space exhausted");
        }
        true
    }

    /// Insert an input port at a caller-specified ID. Returns `false` if
    /// the ID is taken or the owner is unknown.
    pub fn insert_input_port_at(&mut self, id: PortId, node: NodeId, spec_tag: u16) -> bool {
        self.insert_port_at(id, node, spec_tag, true)
    }

    /// Insert an output port at a caller-specified ID. Returns `false` if
    /// the ID is taken or the owner is unknown.
    pub fn insert_output_port_at(&mut self, id: PortId, node: NodeId, spec_tag: u16) -> bool {
        self.insert_port_at(id, node, spec_tag, false)
    }

    fn insert_port_at(&mut self, id: PortId, node: NodeId, spec_tag: u16, is_input: bool) -> bool {
        if self.ports.contains_key(&id) {
            return false;
        }
        let Some(record) = self.nodes.get_mut(&node) else {
            return false;
        };
        if is_input {
            record.inputs.push(id);
        } else {
            record.outputs.push(id);
        }
        self.ports.insert(
            id,
            PortRecord {
                id,
                owner: node,
                spec_tag,
            },
        );
        if id.0 >= self.next_port {
            self.next_port = id.0.checked_add(1).expect("port id space exhausted");
        }
        true
    }

    /// Insert an edge at a caller-specified ID. Returns `false` if the ID
    /// is taken or either port is unknown.
    pub fn insert_edge_at(&mut self, id: EdgeId, source: PortId, target: PortId) -> bool {
        if self.edges.contains_key(&id)
            || !self.ports.contains_key(&source)
            || !self.ports.contains_key(&target)
        {
            return false;
        }
        self.edges.insert(id, EdgeRecord { id, source, target });
        if id.0 >= self.next_edge {
            self.next_edge = id.0.checked_add(1).expect("edge id space exhausted");
        }
        true
    }

    // ---- removal --------------------------------------------------------

    /// Remove only the node record. Ports and edges are untouched; use
    /// [`Graph::remove_node_cascade`] unless the caller has already
    /// detached them.
    pub fn remove_node(&mut self, id: NodeId) -> bool {
        self.nodes.swap_remove(&id).is_some()
    }

    /// Remove a port record and detach it from its owner's port lists.
    ///
    /// Precondition: no edge references the port. This is not checked;
    /// violating it leaves dangling edge endpoints. The cascade path
    /// removes edges first by construction.
    pub fn remove_port(&mut self, id: PortId) -> bool {
        let Some(record) = self.ports.swap_remove(&id) else {
            return false;
        };
        if let Some(owner) = self.nodes.get_mut(&record.owner) {
            owner.inputs.retain(|&p| p != id);
            owner.outputs.retain(|&p| p != id);
        }
        true
    }

    /// Remove an edge record unconditionally
    pub fn remove_edge(&mut self, id: EdgeId) -> bool {
        self.edges.swap_remove(&id).is_some()
    }

    /// Remove a node together with its ports and every edge touching them.
    ///
    /// Order is edges, then ports, then the node; any other order would
    /// leave a dangling reference.
    pub fn remove_node_cascade(&mut self, id: NodeId) {
        let Some(record) = self.nodes.get(&id) else {
            return;
        };
        let ports: Vec<PortId> = record
            .inputs
            .iter()
            .chain(&record.outputs)
            .copied()
            .collect();

        for &port in &ports {
            self.remove_edges_for_port(port);
        }
        for &port in &ports {
            self.remove_port(port);
        }
        self.remove_node(id);
    }

    fn remove_edges_for_port(&mut self, port: PortId) {
        let doomed: Vec<EdgeId> = self
            .edges
            .values()
            .filter(|e| e.involves_port(port))
            .map(|e| e.id)
            .collect();
        for edge in doomed {
            self.edges.swap_remove(&edge);
        }
    }

    // ---- lookup ---------------------------------------------------------

    /// Current arena slot of a node, `None` for unknown/removed IDs
    pub fn node_index(&self, id: NodeId) -> Option<usize> {
        self.nodes.get_index_of(&id)
    }

    /// Current arena slot of a port
    pub fn port_index(&self, id: PortId) -> Option<usize> {
        self.ports.get_index_of(&id)
    }

    /// Current arena slot of an edge
    pub fn edge_index(&self, id: EdgeId) -> Option<usize> {
        self.edges.get_index_of(&id)
    }

    /// Node record by ID
    pub fn node(&self, id: NodeId) -> Option<&NodeRecord> {
        self.nodes.get(&id)
    }

    /// Port record by ID
    pub fn port(&self, id: PortId) -> Option<&PortRecord> {
        self.ports.get(&id)
    }

    /// Edge record by ID
    pub fn edge(&self, id: EdgeId) -> Option<&EdgeRecord> {
        self.edges.get(&id)
    }

    /// Typed decode of a node's stored kind tag
    pub fn node_kind(&self, id: NodeId) -> Option<NodeKind> {
        self.nodes.get(&id)?.kind()
    }

    /// Typed decode of a port's stored spec tag
    pub fn port_spec(&self, id: PortId) -> Option<PortSpec> {
        self.ports.get(&id)?.spec()
    }

    /// A node's authoring position
    pub fn node_position(&self, id: NodeId) -> Option<[f32; 2]> {
        Some(self.nodes.get(&id)?.position)
    }

    /// Move a node. Returns `false` for unknown IDs.
    pub fn set_node_position(&mut self, id: NodeId, position: [f32; 2]) -> bool {
        match self.nodes.get_mut(&id) {
            Some(record) => {
                record.position = position;
                true
            }
            None => false,
        }
    }

    /// Input port IDs in schema creation order; empty for unknown nodes
    pub fn input_ports(&self, node: NodeId) -> &[PortId] {
        self.nodes.get(&node).map_or(&[][..], |n| &n.inputs)
    }

    /// Output port IDs in schema creation order; empty for unknown nodes
    pub fn output_ports(&self, node: NodeId) -> &[PortId] {
        self.nodes.get(&node).map_or(&[][..], |n| &n.outputs)
    }

    /// Input port at a fixed position in the node's layout
    pub fn input_at(&self, node: NodeId, index: usize) -> Option<PortId> {
        self.input_ports(node).get(index).copied()
    }

    /// Output port at a fixed position in the node's layout
    pub fn output_at(&self, node: NodeId, index: usize) -> Option<PortId> {
        self.output_ports(node).get(index).copied()
    }

    /// The `ordinal`-th input port (list order) whose decoded spec carries
    /// `data_type` — for node kinds with several same-typed ports
    /// distinguished by relative order.
    pub fn input_by_spec(
        &self,
        node: NodeId,
        data_type: PortDataType,
        ordinal: usize,
    ) -> Option<PortId> {
        self.port_by_spec(self.input_ports(node), data_type, ordinal)
    }

    /// The `ordinal`-th output port (list order) whose decoded spec carries
    /// `data_type`
    pub fn output_by_spec(
        &self,
        node: NodeId,
        data_type: PortDataType,
        ordinal: usize,
    ) -> Option<PortId> {
        self.port_by_spec(self.output_ports(node), data_type, ordinal)
    }

    fn port_by_spec(
        &self,
        ports: &[PortId],
        data_type: PortDataType,
        ordinal: usize,
    ) -> Option<PortId> {
        let mut matches = 0;
        for &id in ports {
            let Some(spec) = self.port_spec(id) else {
                continue;
            };
            if spec.data_type == data_type {
                if matches == ordinal {
                    return Some(id);
                }
                matches += 1;
            }
        }
        None
    }

    // ---- enumeration ----------------------------------------------------

    /// All node records, in arena order
    pub fn nodes(&self) -> impl Iterator<Item = &NodeRecord> {
        self.nodes.values()
    }

    /// All port records, in arena order
    pub fn ports(&self) -> impl Iterator<Item = &PortRecord> {
        self.ports.values()
    }

    /// All edge records, in arena order
    pub fn edges(&self) -> impl Iterator<Item = &EdgeRecord> {
        self.edges.values()
    }

    /// All node IDs
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.keys().copied()
    }

    /// Number of live nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of live ports
    pub fn port_count(&self) -> usize {
        self.ports.len()
    }

    /// Number of live edges
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    // ---- traversal ------------------------------------------------------

    /// Edges whose source is one of the node's output ports
    pub fn outgoing_edges(&self, node: NodeId) -> Vec<EdgeId> {
        let outputs = self.output_ports(node);
        self.edges
            .values()
            .filter(|e| outputs.contains(&e.source))
            .map(|e| e.id)
            .collect()
    }

    /// Edges whose target is one of the node's input ports
    pub fn incoming_edges(&self, node: NodeId) -> Vec<EdgeId> {
        let inputs = self.input_ports(node);
        self.edges
            .values()
            .filter(|e| inputs.contains(&e.target))
            .map(|e| e.id)
            .collect()
    }

    /// Distinct nodes fed by this node's outputs, in discovery order
    pub fn successor_nodes(&self, node: NodeId) -> Vec<NodeId> {
        let outputs = self.output_ports(node);
        let mut seen = HashSet::new();
        let mut result = Vec::new();
        for edge in self.edges.values() {
            if !outputs.contains(&edge.source) {
                continue;
            }
            let Some(port) = self.ports.get(&edge.target) else {
                continue;
            };
            if seen.insert(port.owner) {
                result.push(port.owner);
            }
        }
        result
    }

    /// Distinct nodes feeding this node's inputs, in discovery order
    pub fn predecessor_nodes(&self, node: NodeId) -> Vec<NodeId> {
        let inputs = self.input_ports(node);
        let mut seen = HashSet::new();
        let mut result = Vec::new();
        for edge in self.edges.values() {
            if !inputs.contains(&edge.target) {
                continue;
            }
            let Some(port) = self.ports.get(&edge.source) else {
                continue;
            };
            if seen.insert(port.owner) {
                result.push(port.owner);
            }
        }
        result
    }

    /// Nodes with no incoming edges
    pub fn source_nodes(&self) -> Vec<NodeId> {
        self.nodes
            .keys()
            .copied()
            .filter(|&id| self.incoming_edges(id).is_empty())
            .collect()
    }

    /// Nodes with no outgoing edges
    pub fn sink_nodes(&self) -> Vec<NodeId> {
        self.nodes
            .keys()
            .copied()
            .filter(|&id| self.outgoing_edges(id).is_empty())
            .collect()
    }

    /// Whether any directed cycle exists
    pub fn has_cycle(&self) -> bool {
        let mut visited = HashSet::new();
        let mut in_stack = HashSet::new();
        for id in self.nodes.keys().copied() {
            if !visited.contains(&id) && self.cycle_visit(id, &mut visited, &mut in_stack) {
                return true;
            }
        }
        false
    }

    fn cycle_visit(
        &self,
        node: NodeId,
        visited: &mut HashSet<NodeId>,
        in_stack: &mut HashSet<NodeId>,
    ) -> bool {
        visited.insert(node);
        in_stack.insert(node);
        for successor in self.successor_nodes(node) {
            if in_stack.contains(&successor) {
                return true;
            }
            if !visited.contains(&successor) && self.cycle_visit(successor, visited, in_stack) {
                return true;
            }
        }
        in_stack.remove(&node);
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::port::PortDirection;

    fn schema() -> NodeSchema {
        NodeSchema::builtin()
    }

    #[test]
    fn create_node_matches_schema_for_every_kind() {
        let schema = schema();
        let mut graph = Graph::new();

        for kind in NodeKind::ALL {
            let created = graph.create_node(&schema, kind, [0.0, 0.0]);
            assert_eq!(created.inputs.len(), schema.input_count(kind), "{kind:?}");
            assert_eq!(created.outputs.len(), schema.output_count(kind), "{kind:?}");
            assert_eq!(graph.node_kind(created.node), Some(kind));

            for (index, &port) in created.inputs.iter().enumerate() {
                let spec = graph.port_spec(port).unwrap();
                assert_eq!(Some(spec), schema.input_spec(kind, index), "{kind:?}[{index}]");
            }
            for (index, &port) in created.outputs.iter().enumerate() {
                let spec = graph.port_spec(port).unwrap();
                assert_eq!(Some(spec), schema.output_spec(kind, index));
            }
        }
    }

    #[test]
    fn ids_start_at_one_and_never_recycle() {
        let schema = schema();
        let mut graph = Graph::new();

        let first = graph.create_node(&schema, NodeKind::Scalar, [0.0, 0.0]);
        assert_eq!(first.node, NodeId(1));

        graph.remove_node_cascade(first.node);
        let second = graph.create_node(&schema, NodeKind::Scalar, [0.0, 0.0]);
        assert_ne!(second.node, first.node);
    }

    #[test]
    fn positional_and_spec_lookup() {
        let schema = schema();
        let mut graph = Graph::new();
        let bridge = graph.create_node(&schema, NodeKind::Bridge, [0.0, 0.0]);

        assert_eq!(graph.input_at(bridge.node, 0), Some(bridge.inputs[0]));
        assert_eq!(graph.input_at(bridge.node, 3), Some(bridge.inputs[3]));
        assert_eq!(graph.input_at(bridge.node, 4), None);
        assert_eq!(graph.output_at(bridge.node, 1), Some(bridge.outputs[1]));

        // Bridge has two anchor inputs distinguished by relative order.
        assert_eq!(
            graph.input_by_spec(bridge.node, PortDataType::Anchor, 0),
            Some(bridge.inputs[0])
        );
        assert_eq!(
            graph.input_by_spec(bridge.node, PortDataType::Anchor, 1),
            Some(bridge.inputs[1])
        );
        assert_eq!(graph.input_by_spec(bridge.node, PortDataType::Anchor, 2), None);
        assert_eq!(
            graph.input_by_spec(bridge.node, PortDataType::Scalar, 1),
            Some(bridge.inputs[3])
        );
        assert_eq!(
            graph.output_by_spec(bridge.node, PortDataType::Path, 0),
            Some(bridge.outputs[1])
        );
    }

    #[test]
    fn cascade_removes_edges_then_ports_then_node() {
        let schema = schema();
        let mut graph = Graph::new();
        let a = graph.create_node(&schema, NodeKind::Force, [0.0, 0.0]);
        let b = graph.create_node(&schema, NodeKind::Force, [1.0, 0.0]);

        // a.anchor_out -> b.anchor_in
        let edge = graph.add_edge(a.outputs[0], b.inputs[0]).unwrap();
        assert_eq!(graph.edge_count(), 1);

        graph.remove_node_cascade(a.node);

        assert_eq!(graph.node_index(a.node), None);
        assert_eq!(graph.edge_index(edge), None);
        for port in a.inputs.iter().chain(&a.outputs) {
            assert_eq!(graph.port_index(*port), None);
        }
        for edge in graph.edges() {
            assert!(!a.inputs.contains(&edge.source) && !a.inputs.contains(&edge.target));
            assert!(!a.outputs.contains(&edge.source) && !a.outputs.contains(&edge.target));
        }

        // b keeps its ports, in order
        assert_eq!(graph.input_ports(b.node), b.inputs.as_slice());
        assert_eq!(graph.output_ports(b.node), b.outputs.as_slice());
    }

    #[test]
    fn arena_swaps_leave_other_nodes_port_order_intact() {
        let schema = schema();
        let mut graph = Graph::new();
        let first = graph.create_node(&schema, NodeKind::Curved, [0.0, 0.0]);
        let second = graph.create_node(&schema, NodeKind::Anchor, [1.0, 0.0]);
        let third = graph.create_node(&schema, NodeKind::CopyPath, [2.0, 0.0]);

        graph.remove_node_cascade(first.node);

        assert_eq!(graph.input_ports(second.node), second.inputs.as_slice());
        assert_eq!(graph.input_ports(third.node), third.inputs.as_slice());
        assert_eq!(graph.output_ports(third.node), third.outputs.as_slice());
    }

    #[test]
    fn lookups_return_none_for_removed_ids() {
        let schema = schema();
        let mut graph = Graph::new();
        let created = graph.create_node(&schema, NodeKind::Reverse, [0.0, 0.0]);

        graph.remove_node_cascade(created.node);

        assert_eq!(graph.node_index(created.node), None);
        assert_eq!(graph.node_kind(created.node), None);
        assert_eq!(graph.port_spec(created.inputs[0]), None);
        assert!(graph.input_ports(created.node).is_empty());
        assert_eq!(graph.input_at(created.node, 0), None);
    }

    #[test]
    fn restore_at_exact_ids() {
        let schema = schema();
        let mut graph = Graph::new();
        let a = graph.create_node(&schema, NodeKind::Force, [0.5, -2.0]);
        let b = graph.create_node(&schema, NodeKind::Reverse, [3.0, 1.0]);
        let edge = graph.add_edge(a.outputs[0], b.inputs[0]).unwrap();

        // Replay the enumeration into an empty graph.
        let mut restored = Graph::new();
        for node in graph.nodes() {
            assert!(restored.insert_node_at(node.id, node.kind_tag, node.position));
        }
        for node in graph.nodes() {
            for &port in &node.inputs {
                let record = graph.port(port).unwrap();
                assert!(restored.insert_input_port_at(port, node.id, record.spec_tag));
            }
            for &port in &node.outputs {
                let record = graph.port(port).unwrap();
                assert!(restored.insert_output_port_at(port, node.id, record.spec_tag));
            }
        }
        for record in graph.edges() {
            assert!(restored.insert_edge_at(record.id, record.source, record.target));
        }

        assert_eq!(restored.node_count(), graph.node_count());
        assert_eq!(restored.port_count(), graph.port_count());
        assert_eq!(restored.edge_count(), graph.edge_count());
        assert_eq!(restored.input_ports(a.node), a.inputs.as_slice());
        assert_eq!(restored.output_ports(a.node), a.outputs.as_slice());
        assert_eq!(restored.node_position(a.node), Some([0.5, -2.0]));
        assert_eq!(restored.edge(edge).unwrap().source, a.outputs[0]);

        // Fresh allocation never collides with restored IDs.
        let max_port = graph.ports().map(|p| p.id.0).max().unwrap();
        let fresh = restored.create_node(&schema, NodeKind::Scalar, [0.0, 0.0]);
        assert!(fresh.node.0 > b.node.0);
        assert!(fresh.outputs.iter().all(|p| p.0 > max_port));
    }

    #[test]
    fn insert_at_rejects_duplicates_and_unknown_owners() {
        let mut graph = Graph::new();
        assert!(graph.insert_node_at(NodeId(7), NodeKind::Scalar.tag(), [0.0, 0.0]));
        assert!(!graph.insert_node_at(NodeId(7), NodeKind::Vector.tag(), [0.0, 0.0]));

        let tag = PortSpec::output(PortDataType::Scalar).encode();
        assert!(graph.insert_output_port_at(PortId(9), NodeId(7), tag));
        assert!(!graph.insert_output_port_at(PortId(9), NodeId(7), tag));
        assert!(!graph.insert_input_port_at(PortId(10), NodeId(99), tag));

        assert!(!graph.insert_edge_at(EdgeId(1), PortId(9), PortId(10)));
    }

    #[test]
    fn traversal_queries() {
        let schema = schema();
        let mut graph = Graph::new();
        let anchor = graph.create_node(&schema, NodeKind::Anchor, [0.0, 0.0]);
        let force = graph.create_node(&schema, NodeKind::Force, [1.0, 0.0]);
        let reverse = graph.create_node(&schema, NodeKind::Reverse, [2.0, 0.0]);

        graph.add_edge(anchor.outputs[0], force.inputs[0]).unwrap();
        graph.add_edge(force.outputs[0], reverse.inputs[0]).unwrap();

        assert_eq!(graph.successor_nodes(anchor.node), vec![force.node]);
        assert_eq!(graph.predecessor_nodes(reverse.node), vec![force.node]);
        assert_eq!(graph.outgoing_edges(force.node).len(), 1);
        assert_eq!(graph.incoming_edges(force.node).len(), 1);
        assert_eq!(graph.source_nodes(), vec![anchor.node]);
        assert_eq!(graph.sink_nodes(), vec![reverse.node]);
        assert!(!graph.has_cycle());

        // Close the loop: reverse feeds the anchor-typed input of force.
        graph.add_edge(reverse.outputs[0], force.inputs[0]).unwrap();
        assert!(graph.has_cycle());
    }

    #[test]
    fn remove_port_detaches_from_owner() {
        let schema = schema();
        let mut graph = Graph::new();
        let node = graph.create_node(&schema, NodeKind::Curved, [0.0, 0.0]);

        assert!(graph.remove_port(node.inputs[2]));
        assert_eq!(graph.input_ports(node.node).len(), 5);
        assert!(!graph.input_ports(node.node).contains(&node.inputs[2]));
        // Remaining order is preserved.
        assert_eq!(graph.input_at(node.node, 2), Some(node.inputs[3]));
    }
}
