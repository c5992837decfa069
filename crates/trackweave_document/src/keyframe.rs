// SPDX-License-Identifier: MIT OR Apache-2.0
//! Keyframe value type.

use serde::{Deserialize, Serialize};

/// Default bezier handle weight for new keyframes
pub const DEFAULT_WEIGHT: f32 = 0.36;

/// How a curve segment interpolates toward/away from a keyframe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InterpolationMode {
    /// Hold the previous value until the next keyframe
    Constant,
    /// Straight line between keyframes
    Linear,
    /// Cubic bezier with per-side tangents and weights
    #[default]
    Bezier,
}

/// How the two tangent handles of a keyframe relate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HandleKind {
    /// Handles move independently
    Free,
    /// Handles stay collinear
    #[default]
    Aligned,
}

/// One sample on an animation curve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    /// Position on the curve's time axis
    pub time: f32,
    /// Sampled value
    pub value: f32,
    /// Interpolation of the segment arriving at this keyframe
    pub in_interpolation: InterpolationMode,
    /// Interpolation of the segment leaving this keyframe
    pub out_interpolation: InterpolationMode,
    /// Tangent handle coupling
    pub handle: HandleKind,
    /// Incoming tangent slope
    pub in_tangent: f32,
    /// Outgoing tangent slope
    pub out_tangent: f32,
    /// Incoming bezier weight
    pub in_weight: f32,
    /// Outgoing bezier weight
    pub out_weight: f32,
}

impl Keyframe {
    /// Keyframe at `(time, value)` with default bezier handles
    pub fn new(time: f32, value: f32) -> Self {
        Self {
            time,
            value,
            in_interpolation: InterpolationMode::default(),
            out_interpolation: InterpolationMode::default(),
            handle: HandleKind::default(),
            in_tangent: 0.0,
            out_tangent: 0.0,
            in_weight: DEFAULT_WEIGHT,
            out_weight: DEFAULT_WEIGHT,
        }
    }

    /// Same keyframe with both segment interpolations replaced
    pub fn with_interpolation(mut self, mode: InterpolationMode) -> Self {
        self.in_interpolation = mode;
        self.out_interpolation = mode;
        self
    }

    /// Same keyframe with free tangent slopes
    pub fn with_tangents(mut self, in_tangent: f32, out_tangent: f32) -> Self {
        self.handle = HandleKind::Free;
        self.in_tangent = in_tangent;
        self.out_tangent = out_tangent;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_keyframe_defaults() {
        let key = Keyframe::new(2.0, 5.5);
        assert_eq!(key.time, 2.0);
        assert_eq!(key.value, 5.5);
        assert_eq!(key.in_interpolation, InterpolationMode::Bezier);
        assert_eq!(key.out_interpolation, InterpolationMode::Bezier);
        assert_eq!(key.handle, HandleKind::Aligned);
        assert_eq!(key.in_weight, DEFAULT_WEIGHT);
        assert_eq!(key.out_weight, DEFAULT_WEIGHT);
    }

    #[test]
    fn builders_replace_fields() {
        let key = Keyframe::new(0.0, 1.0)
            .with_interpolation(InterpolationMode::Linear)
            .with_tangents(0.5, -0.5);
        assert_eq!(key.in_interpolation, InterpolationMode::Linear);
        assert_eq!(key.out_interpolation, InterpolationMode::Linear);
        assert_eq!(key.handle, HandleKind::Free);
        assert_eq!(key.in_tangent, 0.5);
        assert_eq!(key.out_tangent, -0.5);
    }
}
