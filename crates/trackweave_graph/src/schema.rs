// SPDX-License-Identifier: MIT OR Apache-2.0
//! Static node schema: the per-kind port layout every node is created from.
//!
//! The schema is process-wide immutable configuration. Build it once with
//! [`NodeSchema::builtin`] and share it by reference. Entries are
//! append-only across versions: existing layouts must never change shape,
//! or saved documents stop rehydrating.

use crate::node::NodeKind;
use crate::port::{PortDataType, PortSpec};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Timeline property animatable on a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PropertyId {
    /// Roll rate along the section
    RollSpeed,
    /// Vertical force target
    NormalForce,
    /// Lateral force target
    LateralForce,
    /// Pitch rate along the section
    PitchSpeed,
    /// Yaw rate along the section
    YawSpeed,
    /// Driven (fixed) velocity override
    DrivenVelocity,
    /// Heartline offset override
    HeartOffset,
    /// Friction coefficient override
    Friction,
    /// Air resistance override
    Resistance,
    /// Track style selector
    TrackStyle,
}

impl PropertyId {
    /// All properties, in tag order
    pub const ALL: [Self; 10] = [
        Self::RollSpeed,
        Self::NormalForce,
        Self::LateralForce,
        Self::PitchSpeed,
        Self::YawSpeed,
        Self::DrivenVelocity,
        Self::HeartOffset,
        Self::Friction,
        Self::Resistance,
        Self::TrackStyle,
    ];

    /// Compact storage tag, fits the low byte of a packed curve key
    pub fn tag(self) -> u8 {
        match self {
            Self::RollSpeed => 0,
            Self::NormalForce => 1,
            Self::LateralForce => 2,
            Self::PitchSpeed => 3,
            Self::YawSpeed => 4,
            Self::DrivenVelocity => 5,
            Self::HeartOffset => 6,
            Self::Friction => 7,
            Self::Resistance => 8,
            Self::TrackStyle => 9,
        }
    }

    /// Decode a storage tag
    pub fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            0 => Some(Self::RollSpeed),
            1 => Some(Self::NormalForce),
            2 => Some(Self::LateralForce),
            3 => Some(Self::PitchSpeed),
            4 => Some(Self::YawSpeed),
            5 => Some(Self::DrivenVelocity),
            6 => Some(Self::HeartOffset),
            7 => Some(Self::Friction),
            8 => Some(Self::Resistance),
            9 => Some(Self::TrackStyle),
            _ => None,
        }
    }
}

/// How a node kind relates to a timeline property
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PropertyKind {
    /// The property does not exist on this node kind
    #[default]
    Unavailable,
    /// The property is part of the kind's core behavior
    Innate,
    /// The property overrides an inherited value
    Override,
}

/// Template for one port in a node layout
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PortTemplate {
    /// Display name
    pub name: &'static str,
    /// Data type flowing through the port
    pub data_type: PortDataType,
    /// Default literal value for unconnected scalar inputs
    pub default: Option<f32>,
}

/// Template for one timeline property in a node layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertyTemplate {
    /// The property
    pub id: PropertyId,
    /// Innate or override on this kind
    pub kind: PropertyKind,
}

/// Port and property layout for one node kind
#[derive(Debug, Clone, PartialEq)]
pub struct NodeLayout {
    /// The node kind this layout describes
    pub kind: NodeKind,
    /// Input port templates, in creation order
    pub inputs: Vec<PortTemplate>,
    /// Output port templates, in creation order
    pub outputs: Vec<PortTemplate>,
    /// Animatable timeline properties
    pub properties: Vec<PropertyTemplate>,
}

impl NodeLayout {
    /// Spec of the input port at `index`
    pub fn input_spec(&self, index: usize) -> Option<PortSpec> {
        self.inputs.get(index).map(|t| PortSpec::input(t.data_type))
    }

    /// Spec of the output port at `index`
    pub fn output_spec(&self, index: usize) -> Option<PortSpec> {
        self.outputs.get(index).map(|t| PortSpec::output(t.data_type))
    }
}

fn port(name: &'static str, data_type: PortDataType) -> PortTemplate {
    PortTemplate {
        name,
        data_type,
        default: None,
    }
}

fn scalar(name: &'static str, default: f32) -> PortTemplate {
    PortTemplate {
        name,
        data_type: PortDataType::Scalar,
        default: Some(default),
    }
}

fn innate(id: PropertyId) -> PropertyTemplate {
    PropertyTemplate {
        id,
        kind: PropertyKind::Innate,
    }
}

fn overridable(id: PropertyId) -> PropertyTemplate {
    PropertyTemplate {
        id,
        kind: PropertyKind::Override,
    }
}

fn section_overrides() -> Vec<PropertyTemplate> {
    vec![
        overridable(PropertyId::DrivenVelocity),
        overridable(PropertyId::HeartOffset),
        overridable(PropertyId::Friction),
        overridable(PropertyId::Resistance),
        overridable(PropertyId::TrackStyle),
    ]
}

/// Read-only table of node layouts, keyed by kind
#[derive(Debug, Clone)]
pub struct NodeSchema {
    layouts: IndexMap<NodeKind, NodeLayout>,
}

impl NodeSchema {
    /// The built-in layouts for every track-authoring node kind
    pub fn builtin() -> Self {
        use PortDataType::{Anchor, Path, Scalar, Vector};

        let mut schema = Self {
            layouts: IndexMap::new(),
        };

        schema.register(NodeLayout {
            kind: NodeKind::Force,
            inputs: vec![port("Anchor", Anchor), scalar("Duration", 5.0)],
            outputs: vec![port("Anchor", Anchor), port("Path", Path)],
            properties: {
                let mut props = vec![
                    innate(PropertyId::RollSpeed),
                    innate(PropertyId::NormalForce),
                    innate(PropertyId::LateralForce),
                ];
                props.extend(section_overrides());
                props
            },
        });

        schema.register(NodeLayout {
            kind: NodeKind::Geometric,
            inputs: vec![port("Anchor", Anchor), scalar("Duration", 5.0)],
            outputs: vec![port("Anchor", Anchor), port("Path", Path)],
            properties: {
                let mut props = vec![
                    innate(PropertyId::RollSpeed),
                    innate(PropertyId::PitchSpeed),
                    innate(PropertyId::YawSpeed),
                ];
                props.extend(section_overrides());
                props
            },
        });

        schema.register(NodeLayout {
            kind: NodeKind::Curved,
            inputs: vec![
                port("Anchor", Anchor),
                scalar("Radius", 20.0),
                scalar("Arc", 90.0),
                scalar("Axis", 0.0),
                scalar("Lead In", 0.0),
                scalar("Lead Out", 0.0),
            ],
            outputs: vec![port("Anchor", Anchor), port("Path", Path)],
            properties: {
                let mut props = vec![innate(PropertyId::RollSpeed)];
                props.extend(section_overrides());
                props
            },
        });

        schema.register(NodeLayout {
            kind: NodeKind::CopyPath,
            inputs: vec![
                port("Anchor", Anchor),
                port("Path", Path),
                scalar("Start", 0.0),
                scalar("End", 1.0),
            ],
            outputs: vec![port("Anchor", Anchor), port("Path", Path)],
            properties: section_overrides(),
        });

        schema.register(NodeLayout {
            kind: NodeKind::Bridge,
            inputs: vec![
                port("Anchor", Anchor),
                port("Target", Anchor),
                scalar("Out Weight", 0.5),
                scalar("In Weight", 0.5),
            ],
            outputs: vec![port("Anchor", Anchor), port("Path", Path)],
            properties: section_overrides(),
        });

        schema.register(NodeLayout {
            kind: NodeKind::Anchor,
            inputs: vec![
                port("Position", Vector),
                scalar("Roll", 0.0),
                scalar("Pitch", 0.0),
                scalar("Yaw", 0.0),
                scalar("Velocity", 10.0),
                scalar("Heart", 1.1),
                scalar("Friction", 0.021),
                scalar("Resistance", 2e-5),
            ],
            outputs: vec![port("Anchor", Anchor)],
            properties: Vec::new(),
        });

        schema.register(NodeLayout {
            kind: NodeKind::Reverse,
            inputs: vec![port("Anchor", Anchor)],
            outputs: vec![port("Anchor", Anchor)],
            properties: Vec::new(),
        });

        schema.register(NodeLayout {
            kind: NodeKind::ReversePath,
            inputs: vec![port("Path", Path)],
            outputs: vec![port("Path", Path)],
            properties: Vec::new(),
        });

        schema.register(NodeLayout {
            kind: NodeKind::Scalar,
            inputs: Vec::new(),
            outputs: vec![port("Scalar", Scalar)],
            properties: Vec::new(),
        });

        schema.register(NodeLayout {
            kind: NodeKind::Vector,
            inputs: Vec::new(),
            outputs: vec![port("Vector", Vector)],
            properties: Vec::new(),
        });

        schema
    }

    fn register(&mut self, layout: NodeLayout) {
        self.layouts.insert(layout.kind, layout);
    }

    /// Layout for a node kind
    pub fn layout(&self, kind: NodeKind) -> Option<&NodeLayout> {
        self.layouts.get(&kind)
    }

    /// Number of input ports declared for a kind
    pub fn input_count(&self, kind: NodeKind) -> usize {
        self.layout(kind).map_or(0, |l| l.inputs.len())
    }

    /// Number of output ports declared for a kind
    pub fn output_count(&self, kind: NodeKind) -> usize {
        self.layout(kind).map_or(0, |l| l.outputs.len())
    }

    /// Spec of the input port at `index` for a kind
    pub fn input_spec(&self, kind: NodeKind, index: usize) -> Option<PortSpec> {
        self.layout(kind)?.input_spec(index)
    }

    /// Spec of the output port at `index` for a kind
    pub fn output_spec(&self, kind: NodeKind, index: usize) -> Option<PortSpec> {
        self.layout(kind)?.output_spec(index)
    }

    /// Display name of the input port at `index`
    pub fn input_name(&self, kind: NodeKind, index: usize) -> Option<&'static str> {
        Some(self.layout(kind)?.inputs.get(index)?.name)
    }

    /// Default literal value for the input at `index`, if it has one
    pub fn default_input(&self, kind: NodeKind, index: usize) -> Option<f32> {
        self.layout(kind)?.inputs.get(index)?.default
    }

    /// The `index`-th timeline property of a kind
    pub fn property(&self, kind: NodeKind, index: usize) -> Option<PropertyId> {
        Some(self.layout(kind)?.properties.get(index)?.id)
    }

    /// How a kind relates to a property
    pub fn property_kind(&self, kind: NodeKind, property: PropertyId) -> PropertyKind {
        self.layout(kind)
            .and_then(|l| l.properties.iter().find(|p| p.id == property))
            .map_or(PropertyKind::Unavailable, |p| p.kind)
    }

    /// All registered layouts, in registration order
    pub fn layouts(&self) -> impl Iterator<Item = &NodeLayout> {
        self.layouts.values()
    }
}
