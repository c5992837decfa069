// SPDX-License-Identifier: MIT OR Apache-2.0
//! Edge (directed connection) definitions.

use crate::port::PortId;
use serde::{Deserialize, Serialize};

/// Unique, stable identifier for an edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EdgeId(pub u32);

/// Storage record for one edge: a directed connection from an output port
/// to an input port
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeRecord {
    /// External identifier
    pub id: EdgeId,
    /// Source port (must be an output)
    pub source: PortId,
    /// Target port (must be an input)
    pub target: PortId,
}

impl EdgeRecord {
    /// Check if this edge touches a specific port
    pub fn involves_port(&self, port_id: PortId) -> bool {
        self.source == port_id || self.target == port_id
    }
}
