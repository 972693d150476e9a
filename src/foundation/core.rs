use serde::{Deserialize, Serialize};

/// A generated attractor point in renderer precision.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point3 {
    /// Horizontal coordinate.
    pub x: f32,
    /// Vertical coordinate.
    pub y: f32,
    /// Depth coordinate; `0` when the attractor has no z channel.
    pub z: f32,
}

impl Point3 {
    /// Create a point from its three coordinates.
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// The coordinates widened back to `f64`, in `x, y, z` order.
    pub fn to_f64(self) -> [f64; 3] {
        [f64::from(self.x), f64::from(self.y), f64::from(self.z)]
    }

    /// `true` when every coordinate is finite.
    pub fn is_finite(self) -> bool {
        self.is_finite_xy() && self.z.is_finite()
    }

    /// `true` when the plane coordinates are finite, whatever `z` holds.
    pub fn is_finite_xy(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Straight-alpha color with channels nominally in `[0, 1]`.
///
/// Channel expressions are not clamped, so values outside the unit range (or non-finite
/// values) are passed through for the renderer to handle.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    /// Red channel.
    pub r: f32,
    /// Green channel.
    pub g: f32,
    /// Blue channel.
    pub b: f32,
    /// Alpha channel.
    pub a: f32,
}

impl Rgba {
    /// Create a color from its channels.
    pub fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }
}

/// Axis-aligned bounding box over `x, y, z`.
///
/// The empty box uses `f64::MAX` for every minimum and `f64::MIN` for every maximum, so the
/// first included point always widens both ends.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Per-axis minimum.
    pub min: [f64; 3],
    /// Per-axis maximum.
    pub max: [f64; 3],
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::empty()
    }
}

impl BoundingBox {
    /// The empty-set sentinel.
    pub fn empty() -> Self {
        Self {
            min: [f64::MAX; 3],
            max: [f64::MIN; 3],
        }
    }

    /// `true` while no coordinate on any axis has widened the box.
    pub fn is_empty(&self) -> bool {
        (0..3).all(|axis| self.is_axis_empty(axis))
    }

    /// `true` while no coordinate on `axis` has widened the box.
    ///
    /// An axis whose values were all NaN stays empty even though other axes are not.
    pub fn is_axis_empty(&self, axis: usize) -> bool {
        self.min[axis] > self.max[axis]
    }

    /// Widen the box to include `p`.
    ///
    /// NaN coordinates never compare, so they leave the box untouched; infinities widen it.
    pub fn include(&mut self, p: [f64; 3]) {
        for (axis, v) in p.into_iter().enumerate() {
            if v < self.min[axis] {
                self.min[axis] = v;
            }
            if v > self.max[axis] {
                self.max[axis] = v;
            }
        }
    }

    /// Inclusive containment test on every axis.
    pub fn contains(&self, p: [f64; 3]) -> bool {
        (0..3).all(|axis| self.min[axis] <= p[axis] && p[axis] <= self.max[axis])
    }

    /// Extent along `axis` (`0 = x`, `1 = y`, `2 = z`); zero for an empty axis.
    pub fn extent(&self, axis: usize) -> f64 {
        if self.is_axis_empty(axis) {
            return 0.0;
        }
        self.max[axis] - self.min[axis]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
