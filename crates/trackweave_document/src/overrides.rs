// SPDX-License-Identifier: MIT OR Apache-2.0
//! Per-node input values that are not keyframed.
//!
//! Each map entry is keyed by a packed `(node, slot)` pair. Slots 0..=239
//! address a node's input ports positionally; the [`meta`] range holds
//! per-node settings that have no port at all.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use trackweave_graph::NodeId;

/// Reserved slots for per-node settings without a port.
///
/// Slot values 240..=254 never collide with port indices, which are capped
/// well below by every node layout.
pub mod meta {
    /// Heart offset override toggle target
    pub const OVERRIDE_HEART: u8 = 240;
    /// Friction override toggle target
    pub const OVERRIDE_FRICTION: u8 = 241;
    /// Resistance override toggle target
    pub const OVERRIDE_RESISTANCE: u8 = 242;
    /// Track style override toggle target
    pub const OVERRIDE_TRACK_STYLE: u8 = 243;
    /// Section duration
    pub const DURATION: u8 = 248;
    /// Evaluation priority
    pub const PRIORITY: u8 = 249;
    /// Duration interpretation (time vs distance)
    pub const DURATION_TYPE: u8 = 250;
    /// Car facing flag
    pub const FACING: u8 = 251;
    /// Steering flag
    pub const STEERING: u8 = 252;
    /// Driven-velocity flag
    pub const DRIVEN: u8 = 253;
    /// Render toggle
    pub const RENDER: u8 = 254;
}

/// Pack a `(node, slot)` pair into a map key: node ID in the high bits,
/// slot in the low byte.
pub fn input_key(node: NodeId, slot: u8) -> u64 {
    (u64::from(node.0) << 8) | u64::from(slot)
}

/// Exact inverse of [`input_key`]
pub fn unpack_input_key(key: u64) -> (NodeId, u8) {
    (NodeId((key >> 8) as u32), (key & 0xFF) as u8)
}

/// Scalar, vector, and flag values keyed by `(node, slot)`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Overrides {
    scalars: IndexMap<u64, f32>,
    vectors: IndexMap<u64, [f32; 3]>,
    flags: IndexMap<u64, i32>,
}

impl Overrides {
    /// Create empty maps
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a scalar slot
    pub fn set_scalar(&mut self, node: NodeId, slot: u8, value: f32) {
        self.scalars.insert(input_key(node, slot), value);
    }

    /// Read a scalar slot
    pub fn scalar(&self, node: NodeId, slot: u8) -> Option<f32> {
        self.scalars.get(&input_key(node, slot)).copied()
    }

    /// Remove a scalar slot. Returns whether it was set.
    pub fn remove_scalar(&mut self, node: NodeId, slot: u8) -> bool {
        self.scalars.swap_remove(&input_key(node, slot)).is_some()
    }

    /// Set a vector slot
    pub fn set_vector(&mut self, node: NodeId, slot: u8, value: [f32; 3]) {
        self.vectors.insert(input_key(node, slot), value);
    }

    /// Read a vector slot
    pub fn vector(&self, node: NodeId, slot: u8) -> Option<[f32; 3]> {
        self.vectors.get(&input_key(node, slot)).copied()
    }

    /// Remove a vector slot. Returns whether it was set.
    pub fn remove_vector(&mut self, node: NodeId, slot: u8) -> bool {
        self.vectors.swap_remove(&input_key(node, slot)).is_some()
    }

    /// Set a flag slot
    pub fn set_flag(&mut self, node: NodeId, slot: u8, value: i32) {
        self.flags.insert(input_key(node, slot), value);
    }

    /// Read a flag slot
    pub fn flag(&self, node: NodeId, slot: u8) -> Option<i32> {
        self.flags.get(&input_key(node, slot)).copied()
    }

    /// Remove a flag slot. Returns whether it was set.
    pub fn remove_flag(&mut self, node: NodeId, slot: u8) -> bool {
        self.flags.swap_remove(&input_key(node, slot)).is_some()
    }

    /// Remove every entry belonging to a node, across all three maps
    pub fn remove_node(&mut self, node: NodeId) {
        let keep = |&key: &u64| (key >> 8) as u32 != node.0;
        self.scalars.retain(|key, _| keep(key));
        self.vectors.retain(|key, _| keep(key));
        self.flags.retain(|key, _| keep(key));
    }

    /// Drop all entries
    pub fn clear(&mut self) {
        self.scalars.clear();
        self.vectors.clear();
        self.flags.clear();
    }

    /// Iterate scalar entries as `(node, slot, value)`
    pub fn scalars(&self) -> impl Iterator<Item = (NodeId, u8, f32)> + '_ {
        self.scalars.iter().map(|(&key, &value)| {
            let (node, slot) = unpack_input_key(key);
            (node, slot, value)
        })
    }

    /// Iterate vector entries as `(node, slot, value)`
    pub fn vectors(&self) -> impl Iterator<Item = (NodeId, u8, [f32; 3])> + '_ {
        self.vectors.iter().map(|(&key, &value)| {
            let (node, slot) = unpack_input_key(key);
            (node, slot, value)
        })
    }

    /// Iterate flag entries as `(node, slot, value)`
    pub fn flags(&self) -> impl Iterator<Item = (NodeId, u8, i32)> + '_ {
        self.flags.iter().map(|(&key, &value)| {
            let (node, slot) = unpack_input_key(key);
            (node, slot, value)
        })
    }

    /// Total entries across all three maps
    pub fn len(&self) -> usize {
        self.scalars.len() + self.vectors.len() + self.flags.len()
    }

    /// Whether all three maps are empty
    pub fn is_empty(&self) -> bool {
        self.scalars.is_empty() && self.vectors.is_empty() && self.flags.is_empty()
    }
}
