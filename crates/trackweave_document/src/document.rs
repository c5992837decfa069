// SPDX-License-Identifier: MIT OR Apache-2.0
//! The composed document: graph topology, keyframe curves, and input
//! overrides kept consistent through composite operations.

use crate::keyframe::Keyframe;
use crate::overrides::Overrides;
use crate::store::KeyframeStore;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use trackweave_graph::{
    CreatedNode, Graph, NodeId, NodeKind, NodeSchema, PortDataType, PropertyId,
};

/// A literal value stored against a node input
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OverrideValue {
    /// Scalar literal
    Scalar(f32),
    /// Vector literal
    Vector([f32; 3]),
    /// Flag literal
    Flag(i32),
}

/// Why a literal read or write was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum OverrideError {
    /// The node does not exist
    #[error("node not found")]
    NodeNotFound,
    /// The node has no input at that slot
    #[error("input slot not found")]
    InputNotFound,
    /// The value's type does not match the input port's data type
    #[error("value type does not match the input port")]
    TypeMismatch,
}

/// One editable track document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Document {
    /// Node/port/edge topology
    pub graph: Graph,
    /// Keyframe curves keyed by `(node, property)`
    pub keyframes: KeyframeStore,
    /// Literal input values keyed by `(node, slot)`
    pub overrides: Overrides,
}

impl Document {
    /// Create an empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a node with its schema ports, seeding the scalar defaults
    /// the layout declares for its inputs.
    pub fn create_node(
        &mut self,
        schema: &NodeSchema,
        kind: NodeKind,
        position: [f32; 2],
    ) -> CreatedNode {
        let created = self.graph.create_node(schema, kind, position);
        if let Some(layout) = schema.layout(kind) {
            for (slot, template) in layout.inputs.iter().enumerate() {
                if let Some(default) = template.default {
                    self.overrides
                        .set_scalar(created.node, slot as u8, default);
                }
            }
        }
        created
    }

    /// Remove a node everywhere: topology (cascading to ports and edges),
    /// keyframe curves, and override entries.
    pub fn remove_node(&mut self, node: NodeId) {
        self.graph.remove_node_cascade(node);
        self.keyframes.remove_node(node);
        self.overrides.remove_node(node);
        tracing::debug!(node = node.0, "removed node from document");
    }

    /// Store a literal against an input port, routed by the port's data
    /// type. Flags are not port-backed and go through
    /// [`Document::set_flag`] instead.
    pub fn set_input_literal(
        &mut self,
        node: NodeId,
        slot: u8,
        value: OverrideValue,
    ) -> Result<(), OverrideError> {
        match (self.input_data_type(node, slot)?, value) {
            (PortDataType::Scalar, OverrideValue::Scalar(v)) => {
                self.overrides.set_scalar(node, slot, v);
                Ok(())
            }
            (PortDataType::Vector, OverrideValue::Vector(v)) => {
                self.overrides.set_vector(node, slot, v);
                Ok(())
            }
            _ => Err(OverrideError::TypeMismatch),
        }
    }

    /// Read the literal stored against an input port, `Ok(None)` when the
    /// slot is valid but unset
    pub fn input_literal(
        &self,
        node: NodeId,
        slot: u8,
    ) -> Result<Option<OverrideValue>, OverrideError> {
        match self.input_data_type(node, slot)? {
            PortDataType::Scalar => Ok(self
                .overrides
                .scalar(node, slot)
                .map(OverrideValue::Scalar)),
            PortDataType::Vector => Ok(self
                .overrides
                .vector(node, slot)
                .map(OverrideValue::Vector)),
            _ => Err(OverrideError::TypeMismatch),
        }
    }

    fn input_data_type(&self, node: NodeId, slot: u8) -> Result<PortDataType, OverrideError> {
        if self.graph.node(node).is_none() {
            return Err(OverrideError::NodeNotFound);
        }
        let port = self
            .graph
            .input_at(node, usize::from(slot))
            .ok_or(OverrideError::InputNotFound)?;
        let spec = self
            .graph
            .port_spec(port)
            .ok_or(OverrideError::InputNotFound)?;
        Ok(spec.data_type)
    }

    /// Set a scalar slot directly, without port routing. Used for the
    /// reserved meta slots.
    pub fn set_scalar(&mut self, node: NodeId, slot: u8, value: f32) {
        self.overrides.set_scalar(node, slot, value);
    }

    /// Read a scalar slot
    pub fn scalar(&self, node: NodeId, slot: u8) -> Option<f32> {
        self.overrides.scalar(node, slot)
    }

    /// Set a vector slot directly
    pub fn set_vector(&mut self, node: NodeId, slot: u8, value: [f32; 3]) {
        self.overrides.set_vector(node, slot, value);
    }

    /// Read a vector slot
    pub fn vector(&self, node: NodeId, slot: u8) -> Option<[f32; 3]> {
        self.overrides.vector(node, slot)
    }

    /// Set a flag slot directly
    pub fn set_flag(&mut self, node: NodeId, slot: u8, value: i32) {
        self.overrides.set_flag(node, slot, value);
    }

    /// Read a flag slot
    pub fn flag(&self, node: NodeId, slot: u8) -> Option<i32> {
        self.overrides.flag(node, slot)
    }

    /// Replace a property's keyframe curve. Empty removes it.
    pub fn set_curve(&mut self, node: NodeId, property: PropertyId, keyframes: &[Keyframe]) {
        self.keyframes.set(node, property, keyframes);
    }

    /// A property's live keyframes
    pub fn curve(&self, node: NodeId, property: PropertyId) -> Option<&[Keyframe]> {
        self.keyframes.try_get(node, property)
    }

    /// Remove a property's curve. Returns whether it existed.
    pub fn remove_curve(&mut self, node: NodeId, property: PropertyId) -> bool {
        self.keyframes.remove(node, property)
    }

    /// Reset the document to empty
    pub fn clear(&mut self) {
        self.graph = Graph::new();
        self.keyframes.clear();
        self.overrides.clear();
    }
}
