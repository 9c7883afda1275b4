//! Visual state of a single animated card.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// The animatable properties of one rendered element.
///
/// Offsets are in CSS pixels, rotations in degrees.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, JsonSchema,
)]
#[serde(default)]
pub struct VisualState {
    /// Opacity in [0, 1].
    pub opacity: f32,
    /// Horizontal offset.
    pub x: f32,
    /// Vertical offset.
    pub y: f32,
    /// Uniform scale factor.
    pub scale: f32,
    /// Rotation about the horizontal axis.
    pub rotate_x: f32,
    /// Rotation about the vertical axis.
    pub rotate_y: f32,
}

impl VisualState {
    /// Fully visible, untransformed.
    pub const REST: Self = Self {
        opacity: 1.0,
        x: 0.0,
        y: 0.0,
        scale: 1.0,
        rotate_x: 0.0,
        rotate_y: 0.0,
    };

    /// Hidden with the given vertical offset; every other property at rest.
    #[must_use]
    pub const fn hidden_at(y: f32) -> Self {
        Self {
            opacity: 0.0,
            y,
            ..Self::REST
        }
    }

    /// Builder: set the horizontal offset.
    #[must_use]
    pub fn with_x(mut self, x: f32) -> Self {
        self.x = x;
        self
    }

    /// Builder: set the scale factor.
    #[must_use]
    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    /// Builder: set the rotation about the horizontal axis.
    #[must_use]
    pub fn with_rotate_x(mut self, degrees: f32) -> Self {
        self.rotate_x = degrees;
        self
    }

    /// Builder: set the rotation about the vertical axis.
    #[must_use]
    pub fn with_rotate_y(mut self, degrees: f32) -> Self {
        self.rotate_y = degrees;
        self
    }

    /// Linear interpolation between two states.
    ///
    /// `t` is not clamped so overshooting curves (back.out) carry through.
    #[must_use]
    pub fn lerp(&self, other: &Self, t: f32) -> Self {
        Self {
            opacity: lerp(t, self.opacity, other.opacity).clamp(0.0, 1.0),
            x: lerp(t, self.x, other.x),
            y: lerp(t, self.y, other.y),
            scale: lerp(t, self.scale, other.scale),
            rotate_x: lerp(t, self.rotate_x, other.rotate_x),
            rotate_y: lerp(t, self.rotate_y, other.rotate_y),
        }
    }

    /// Inline CSS declarations for this state.
    #[must_use]
    pub fn to_css(&self) -> String {
        format!(
            "opacity: {:.3}; transform: translate({:.2}px, {:.2}px) \
             scale({:.4}) rotateX({:.2}deg) rotateY({:.2}deg);",
            self.opacity,
            self.x,
            self.y,
            self.scale,
            self.rotate_x,
            self.rotate_y,
        )
    }
}

impl Default for VisualState {
    fn default() -> Self {
        Self::REST
    }
}

#[inline]
fn lerp(t: f32, start: f32, end: f32) -> f32 {
    start.mul_add(1.0 - t, end * t)
}
