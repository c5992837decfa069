// SPDX-License-Identifier: MIT OR Apache-2.0
//! Port identifiers, data types, and the compact `PortSpec` codec.

use crate::node::NodeId;
use serde::{Deserialize, Serialize};

/// Unique, stable identifier for a port
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PortId(pub u32);

/// Port direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PortDirection {
    /// Input port
    Input,
    /// Output port
    Output,
}

/// Data type that can flow through a port
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PortDataType {
    /// Scalar value
    Scalar,
    /// 3D vector
    Vector,
    /// Track anchor (position + orientation + physics state)
    Anchor,
    /// Evaluated path section
    Path,
}

impl PortDataType {
    /// All data types, in tag order
    pub const ALL: [Self; 4] = [Self::Scalar, Self::Vector, Self::Anchor, Self::Path];

    /// Compact storage tag for this data type
    pub fn tag(self) -> u8 {
        match self {
            Self::Scalar => 0,
            Self::Vector => 1,
            Self::Anchor => 2,
            Self::Path => 3,
        }
    }

    /// Decode a storage tag
    pub fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            0 => Some(Self::Scalar),
            1 => Some(Self::Vector),
            2 => Some(Self::Anchor),
            3 => Some(Self::Path),
            _ => None,
        }
    }
}

/// Decoded data type + direction of a port
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PortSpec {
    /// Data type flowing through the port
    pub data_type: PortDataType,
    /// Whether the port consumes or produces
    pub direction: PortDirection,
}

impl PortSpec {
    /// Bit set in the encoded tag for output ports
    pub const OUTPUT_BIT: u16 = 1 << 8;

    /// Create a spec
    pub fn new(data_type: PortDataType, direction: PortDirection) -> Self {
        Self {
            data_type,
            direction,
        }
    }

    /// Spec for an input port of the given data type
    pub fn input(data_type: PortDataType) -> Self {
        Self::new(data_type, PortDirection::Input)
    }

    /// Spec for an output port of the given data type
    pub fn output(data_type: PortDataType) -> Self {
        Self::new(data_type, PortDirection::Output)
    }

    /// Encode to a compact storage tag: data type in the low byte,
    /// direction in bit 8.
    pub fn encode(self) -> u16 {
        let mut tag = u16::from(self.data_type.tag());
        if self.direction == PortDirection::Output {
            tag |= Self::OUTPUT_BIT;
        }
        tag
    }

    /// Decode a storage tag. Returns `None` for tags that were not produced
    /// by [`PortSpec::encode`].
    pub fn decode(tag: u16) -> Option<Self> {
        if tag & !(0xFF | Self::OUTPUT_BIT) != 0 {
            return None;
        }
        let data_type = PortDataType::from_tag((tag & 0xFF) as u8)?;
        let direction = if tag & Self::OUTPUT_BIT != 0 {
            PortDirection::Output
        } else {
            PortDirection::Input
        };
        Some(Self {
            data_type,
            direction,
        })
    }

    /// Whether this spec describes an input port
    pub fn is_input(self) -> bool {
        self.direction == PortDirection::Input
    }
}

/// Storage record for one port
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PortRecord {
    /// External identifier
    pub id: PortId,
    /// Owning node
    pub owner: NodeId,
    /// Encoded [`PortSpec`] tag
    pub spec_tag: u16,
}

impl PortRecord {
    /// Typed decode of the stored spec tag
    pub fn spec(&self) -> Option<PortSpec> {
        PortSpec::decode(self.spec_tag)
    }

    /// Direction without a full decode; corrupt tags read as input
    pub fn is_input(&self) -> bool {
        self.spec_tag & PortSpec::OUTPUT_BIT == 0
    }
}
