// SPDX-License-Identifier: MIT OR Apache-2.0
//! Track document model.
//!
//! A [`Document`] composes three stores that share node identity: the
//! topology [`Graph`](trackweave_graph::Graph) from `trackweave_graph`,
//! a packed [`KeyframeStore`] of animation curves, and [`Overrides`] maps
//! of literal input values. Composite operations keep the three in sync;
//! everything serializes losslessly with serde.

pub mod document;
pub mod keyframe;
pub mod overrides;
pub mod store;

pub use document::{Document, OverrideError, OverrideValue};
pub use keyframe::{HandleKind, InterpolationMode, Keyframe, DEFAULT_WEIGHT};
pub use overrides::{input_key, meta, unpack_input_key, Overrides};
pub use store::{CurveRange, KeyframeStore};
