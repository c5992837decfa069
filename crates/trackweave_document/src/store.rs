// SPDX-License-Identifier: MIT OR Apache-2.0
//! Packed keyframe storage.
//!
//! All curves share one flat `Vec<Keyframe>`. A range table maps a packed
//! `(node, property)` key to the contiguous slice holding that curve's
//! keyframes. Writes append a fresh slice and repoint the range, so stale
//! spans accumulate until [`KeyframeStore::compact`] rebuilds the backing
//! vector.

use crate::keyframe::Keyframe;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use trackweave_graph::{NodeId, PropertyId};

/// Contiguous span of the backing vector holding one curve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurveRange {
    /// First keyframe index
    pub start: u32,
    /// Number of keyframes
    pub len: u32,
}

/// Keyframe curves for every `(node, property)` pair in a document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KeyframeStore {
    keyframes: Vec<Keyframe>,
    ranges: IndexMap<u64, CurveRange>,
}

impl KeyframeStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Pack a `(node, property)` pair into a range-table key: node ID in
    /// the high bits, property tag in the low byte.
    pub fn make_key(node: NodeId, property: PropertyId) -> u64 {
        (u64::from(node.0) << 8) | u64::from(property.tag())
    }

    /// Unpack a range-table key. The property is `None` for tags no
    /// [`PropertyId`] claims.
    pub fn unpack_key(key: u64) -> (NodeId, Option<PropertyId>) {
        let node = NodeId((key >> 8) as u32);
        let property = PropertyId::from_tag((key & 0xFF) as u8);
        (node, property)
    }

    /// Replace a curve with the given keyframes. An empty slice removes
    /// the curve. Old spans are orphaned, not reclaimed.
    pub fn set(&mut self, node: NodeId, property: PropertyId, keyframes: &[Keyframe]) {
        let key = Self::make_key(node, property);
        if keyframes.is_empty() {
            self.ranges.swap_remove(&key);
            return;
        }
        let start = self.keyframes.len() as u32;
        self.keyframes.extend_from_slice(keyframes);
        self.ranges.insert(
            key,
            CurveRange {
                start,
                len: keyframes.len() as u32,
            },
        );
    }

    /// The live keyframes of a curve, `None` if the curve does not exist
    pub fn try_get(&self, node: NodeId, property: PropertyId) -> Option<&[Keyframe]> {
        let range = self.ranges.get(&Self::make_key(node, property))?;
        let start = range.start as usize;
        self.keyframes.get(start..start + range.len as usize)
    }

    /// Remove a curve. Returns whether it existed.
    pub fn remove(&mut self, node: NodeId, property: PropertyId) -> bool {
        self.ranges
            .swap_remove(&Self::make_key(node, property))
            .is_some()
    }

    /// Remove every curve belonging to a node
    pub fn remove_node(&mut self, node: NodeId) {
        self.ranges.retain(|&key, _| (key >> 8) as u32 != node.0);
    }

    /// Drop all curves and backing storage
    pub fn clear(&mut self) {
        self.keyframes.clear();
        self.ranges.clear();
    }

    /// Rebuild the backing vector with only live spans, repointing every
    /// range. Call after heavy editing to reclaim orphaned keyframes.
    pub fn compact(&mut self) {
        let before = self.keyframes.len();
        let mut packed = Vec::with_capacity(self.live_keyframe_count());
        for range in self.ranges.values_mut() {
            let start = range.start as usize;
            let end = start + range.len as usize;
            let new_start = packed.len() as u32;
            packed.extend_from_slice(&self.keyframes[start..end]);
            range.start = new_start;
        }
        self.keyframes = packed;
        tracing::debug!(
            before,
            after = self.keyframes.len(),
            curves = self.ranges.len(),
            "compacted keyframe store"
        );
    }

    /// Iterate live curves as `(node, property, keyframes)`. Keys whose
    /// property tag no longer decodes are skipped.
    pub fn curves(&self) -> impl Iterator<Item = (NodeId, PropertyId, &[Keyframe])> {
        self.ranges.iter().filter_map(|(&key, range)| {
            let (node, property) = Self::unpack_key(key);
            let start = range.start as usize;
            let slice = self.keyframes.get(start..start + range.len as usize)?;
            Some((node, property?, slice))
        })
    }

    /// Number of live curves
    pub fn curve_count(&self) -> usize {
        self.ranges.len()
    }

    /// Total keyframes in the backing vector, orphaned spans included
    pub fn keyframe_count(&self) -> usize {
        self.keyframes.len()
    }

    fn live_keyframe_count(&self) -> usize {
        self.ranges.values().map(|r| r.len as usize).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn curve(values: &[(f32, f32)]) -> Vec<Keyframe> {
        values.iter().map(|&(t, v)| Keyframe::new(t, v)).collect()
    }

    #[test]
    fn set_then_get_returns_exact_keyframes() {
        let mut store = KeyframeStore::new();
        let keys = curve(&[(0.0, 1.0), (1.0, 2.0), (2.0, 0.5)]);
        store.set(NodeId(5), PropertyId::RollSpeed, &keys);

        assert_eq!(store.try_get(NodeId(5), PropertyId::RollSpeed), Some(keys.as_slice()));
        assert_eq!(store.try_get(NodeId(5), PropertyId::NormalForce), None);
        assert_eq!(store.try_get(NodeId(6), PropertyId::RollSpeed), None);
        assert_eq!(store.curve_count(), 1);
    }

    #[test]
    fn setting_empty_removes_the_curve() {
        let mut store = KeyframeStore::new();
        store.set(NodeId(1), PropertyId::Friction, &curve(&[(0.0, 0.02)]));
        store.set(NodeId(1), PropertyId::Friction, &[]);

        assert_eq!(store.try_get(NodeId(1), PropertyId::Friction), None);
        assert_eq!(store.curve_count(), 0);
    }

    #[test]
    fn replacement_orphans_the_old_span() {
        let mut store = KeyframeStore::new();
        store.set(NodeId(1), PropertyId::RollSpeed, &curve(&[(0.0, 1.0), (1.0, 2.0)]));
        let replacement = curve(&[(0.0, 9.0)]);
        store.set(NodeId(1), PropertyId::RollSpeed, &replacement);

        assert_eq!(
            store.try_get(NodeId(1), PropertyId::RollSpeed),
            Some(replacement.as_slice())
        );
        // Old span still occupies the backing vector until compaction.
        assert_eq!(store.keyframe_count(), 3);
    }

    #[test]
    fn remove_node_leaves_other_nodes_alone() {
        let mut store = KeyframeStore::new();
        store.set(NodeId(1), PropertyId::RollSpeed, &curve(&[(0.0, 1.0)]));
        store.set(NodeId(1), PropertyId::NormalForce, &curve(&[(0.0, 1.0)]));
        store.set(NodeId(2), PropertyId::RollSpeed, &curve(&[(0.0, 3.0)]));

        store.remove_node(NodeId(1));

        assert_eq!(store.try_get(NodeId(1), PropertyId::RollSpeed), None);
        assert_eq!(store.try_get(NodeId(1), PropertyId::NormalForce), None);
        assert!(store.try_get(NodeId(2), PropertyId::RollSpeed).is_some());
        assert_eq!(store.curve_count(), 1);
    }

    #[test]
    fn compact_drops_orphans_and_keeps_live_curves() {
        let mut store = KeyframeStore::new();
        let roll = curve(&[(0.0, 1.0), (1.0, 2.0)]);
        store.set(NodeId(1), PropertyId::RollSpeed, &curve(&[(0.0, -1.0)]));
        store.set(NodeId(1), PropertyId::RollSpeed, &roll);
        let lateral = curve(&[(0.0, 0.0), (0.5, 1.5), (1.0, 0.0)]);
        store.set(NodeId(2), PropertyId::LateralForce, &lateral);
        store.set(NodeId(3), PropertyId::Friction, &curve(&[(0.0, 0.02)]));
        store.remove(NodeId(3), PropertyId::Friction);

        let before = store.keyframe_count();
        store.compact();

        assert!(store.keyframe_count() < before);
        assert_eq!(store.keyframe_count(), 5);
        assert_eq!(store.try_get(NodeId(1), PropertyId::RollSpeed), Some(roll.as_slice()));
        assert_eq!(
            store.try_get(NodeId(2), PropertyId::LateralForce),
            Some(lateral.as_slice())
        );
    }

    #[test]
    fn clear_resets_everything() {
        let mut store = KeyframeStore::new();
        store.set(NodeId(1), PropertyId::YawSpeed, &curve(&[(0.0, 1.0)]));
        store.clear();
        assert_eq!(store.curve_count(), 0);
        assert_eq!(store.keyframe_count(), 0);
    }

    #[test]
    fn keys_roundtrip_for_all_properties() {
        for property in PropertyId::ALL {
            let key = KeyframeStore::make_key(NodeId(0xDEAD), property);
            assert_eq!(KeyframeStore::unpack_key(key), (NodeId(0xDEAD), Some(property)));
        }
        let (node, property) = KeyframeStore::unpack_key((7 << 8) | 0xFE);
        assert_eq!(node, NodeId(7));
        assert_eq!(property, None);
    }

    #[test]
    fn curves_iterator_reports_every_live_curve() {
        let mut store = KeyframeStore::new();
        store.set(NodeId(1), PropertyId::RollSpeed, &curve(&[(0.0, 1.0)]));
        store.set(NodeId(2), PropertyId::PitchSpeed, &curve(&[(0.0, 2.0), (1.0, 3.0)]));

        let collected: Vec<_> = store
            .curves()
            .map(|(node, property, keys)| (node, property, keys.len()))
            .collect();
        assert_eq!(
            collected,
            vec![
                (NodeId(1), PropertyId::RollSpeed, 1),
                (NodeId(2), PropertyId::PitchSpeed, 2),
            ]
        );
    }
}
