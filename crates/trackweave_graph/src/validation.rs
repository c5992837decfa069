// SPDX-License-Identifier: MIT OR Apache-2.0
//! Connection validation.
//!
//! [`Graph::add_edge`] is a storage primitive and accepts any pair of live
//! ports. Interactive callers go through [`connect`], which runs the full
//! rule set first and reports the most specific failure.

use crate::edge::EdgeId;
use crate::graph::Graph;
use crate::port::{PortId, PortSpec};
use thiserror::Error;

/// Why a proposed connection was rejected.
///
/// Checks run in the declaration order below; the first failing rule wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConnectionError {
    /// The source port does not exist
    #[error("source port not found")]
    SourcePortNotFound,
    /// The target port does not exist
    #[error("target port not found")]
    TargetPortNotFound,
    /// Both ports belong to the same node
    #[error("cannot connect a node to itself")]
    SelfConnection,
    /// The source port is not an output
    #[error("connection source must be an output port")]
    SourceMustBeOutput,
    /// The target port is not an input
    #[error("connection target must be an input port")]
    TargetMustBeInput,
    /// The port data types do not match
    #[error("incompatible port types")]
    IncompatiblePortTypes,
}

/// Whether data can flow between two port specs. Types must match exactly;
/// there are no implicit conversions.
pub fn ports_compatible(source: PortSpec, target: PortSpec) -> bool {
    source.data_type == target.data_type
}

/// Validate a proposed connection without mutating the graph.
///
/// Self-connection is checked before direction so that wiring a node to
/// itself is reported as such even when the directions are also wrong.
pub fn validate_connection(
    graph: &Graph,
    source: PortId,
    target: PortId,
) -> Result<(), ConnectionError> {
    let source_record = graph
        .port(source)
        .ok_or(ConnectionError::SourcePortNotFound)?;
    let target_record = graph
        .port(target)
        .ok_or(ConnectionError::TargetPortNotFound)?;

    if source_record.owner == target_record.owner {
        return Err(ConnectionError::SelfConnection);
    }
    if source_record.is_input() {
        return Err(ConnectionError::SourceMustBeOutput);
    }
    if !target_record.is_input() {
        return Err(ConnectionError::TargetMustBeInput);
    }

    // Corrupt spec tags fail the type check rather than panicking.
    let (Some(source_spec), Some(target_spec)) = (source_record.spec(), target_record.spec())
    else {
        return Err(ConnectionError::IncompatiblePortTypes);
    };
    if !ports_compatible(source_spec, target_spec) {
        return Err(ConnectionError::IncompatiblePortTypes);
    }

    Ok(())
}

/// Validate, then add the edge
pub fn connect(graph: &mut Graph, source: PortId, target: PortId) -> Result<EdgeId, ConnectionError> {
    validate_connection(graph, source, target)?;
    // Ports were just validated, so insertion cannot fail.
    graph
        .add_edge(source, target)
        .ok_or(ConnectionError::SourcePortNotFound)
}

/// Re-check every stored edge, reporting the first violation.
///
/// Useful after restoring a document from untrusted data, where edges were
/// inserted through the storage primitives without validation.
pub fn validate_all_edges(graph: &Graph) -> Result<(), (EdgeId, ConnectionError)> {
    for edge in graph.edges() {
        validate_connection(graph, edge.source, edge.target).map_err(|e| (edge.id, e))?;
    }
    Ok(())
}
