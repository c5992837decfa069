// SPDX-License-Identifier: MIT OR Apache-2.0
//! Node identifiers, kinds, and storage records.

use crate::port::PortId;
use serde::{Deserialize, Serialize};

/// Unique, stable identifier for a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub u32);

/// Kind of track-authoring node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    /// Force-driven track section
    Force,
    /// Geometric (roll/pitch/yaw speed) track section
    Geometric,
    /// Constant-radius curved section
    Curved,
    /// Section copied from another path
    CopyPath,
    /// Blend between two anchors
    Bridge,
    /// Free-standing anchor definition
    Anchor,
    /// Anchor reversal
    Reverse,
    /// Path reversal
    ReversePath,
    /// Scalar literal source
    Scalar,
    /// Vector literal source
    Vector,
}

impl NodeKind {
    /// All node kinds, in tag order
    pub const ALL: [Self; 10] = [
        Self::Force,
        Self::Geometric,
        Self::Curved,
        Self::CopyPath,
        Self::Bridge,
        Self::Anchor,
        Self::Reverse,
        Self::ReversePath,
        Self::Scalar,
        Self::Vector,
    ];

    /// Compact storage tag for this kind
    pub fn tag(self) -> u16 {
        match self {
            Self::Force => 0,
            Self::Geometric => 1,
            Self::Curved => 2,
            Self::CopyPath => 3,
            Self::Bridge => 4,
            Self::Anchor => 5,
            Self::Reverse => 6,
            Self::ReversePath => 7,
            Self::Scalar => 8,
            Self::Vector => 9,
        }
    }

    /// Decode a storage tag
    pub fn from_tag(tag: u16) -> Option<Self> {
        match tag {
            0 => Some(Self::Force),
            1 => Some(Self::Geometric),
            2 => Some(Self::Curved),
            3 => Some(Self::CopyPath),
            4 => Some(Self::Bridge),
            5 => Some(Self::Anchor),
            6 => Some(Self::Reverse),
            7 => Some(Self::ReversePath),
            8 => Some(Self::Scalar),
            9 => Some(Self::Vector),
            _ => None,
        }
    }

    /// Display name
    pub fn name(self) -> &'static str {
        match self {
            Self::Force => "Force",
            Self::Geometric => "Geometric",
            Self::Curved => "Curved",
            Self::CopyPath => "Copy Path",
            Self::Bridge => "Bridge",
            Self::Anchor => "Anchor",
            Self::Reverse => "Reverse",
            Self::ReversePath => "Reverse Path",
            Self::Scalar => "Scalar",
            Self::Vector => "Vector",
        }
    }
}

/// Storage record for one node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    /// External identifier
    pub id: NodeId,
    /// Encoded [`NodeKind`] tag
    pub kind_tag: u16,
    /// 2D authoring position
    pub position: [f32; 2],
    /// Input port IDs in schema creation order
    pub inputs: Vec<PortId>,
    /// Output port IDs in schema creation order
    pub outputs: Vec<PortId>,
}

impl NodeRecord {
    /// Typed decode of the stored kind tag
    pub fn kind(&self) -> Option<NodeKind> {
        NodeKind::from_tag(self.kind_tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_tags_roundtrip() {
        for kind in NodeKind::ALL {
            assert_eq!(NodeKind::from_tag(kind.tag()), Some(kind));
        }
        assert_eq!(NodeKind::from_tag(10), None);
        assert_eq!(NodeKind::from_tag(u16::MAX), None);
    }
}
