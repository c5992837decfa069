// SPDX-License-Identifier: MIT OR Apache-2.0
//! Typed node graph for track authoring.
//!
//! A [`Graph`] owns three arenas of records: nodes, ports, and edges. Every
//! record carries a stable external ID that survives arbitrary removals,
//! while the arenas themselves stay dense. [`NodeSchema`] declares the port
//! layout and property set of each [`NodeKind`], and the [`validation`]
//! module enforces the connection rules on top of the raw storage
//! primitives.

pub mod edge;
pub mod graph;
pub mod node;
pub mod port;
pub mod schema;
pub mod validation;

pub use edge::{EdgeId, EdgeRecord};
pub use graph::{CreatedNode, Graph};
pub use node::{NodeId, NodeKind, NodeRecord};
pub use port::{PortDataType, PortDirection, PortId, PortRecord, PortSpec};
pub use schema::{NodeLayout, NodeSchema, PortTemplate, PropertyId, PropertyKind, PropertyTemplate};
pub use validation::{connect, ports_compatible, validate_all_edges, validate_connection, ConnectionError};
