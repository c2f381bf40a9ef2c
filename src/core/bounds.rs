//! Axis-aligned 3D bounding box.
//!
//! [`Bounds3D`] represents a rectangular box in 3D space, used for:
//! - Object extent tracking (derived from an object's point cloud)
//! - Volumetric overlap between objects (scene graph edge weighting)
//!
//! # Usage
//!
//! ```rust
//! use drishya_map::core::{Bounds3D, Point3D};
//!
//! let mut bounds = Bounds3D::empty();
//! bounds.expand_to_include(Point3D::new(1.0, 1.0, 0.0));
//! bounds.expand_to_include(Point3D::new(-2.0, 3.0, 1.0));
//! assert_eq!(bounds.min, Point3D::new(-2.0, 1.0, 0.0));
//! assert!(bounds.volume() > 0.0);
//! ```

use serde::{Deserialize, Serialize};

use super::point::Point3D;

/// Axis-aligned 3D bounding box.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Bounds3D {
    /// Minimum corner (smallest x, y, z values).
    pub min: Point3D,
    /// Maximum corner (largest x, y, z values).
    pub max: Point3D,
}

impl Bounds3D {
    /// Create a new bounding box from min and max corners.
    #[inline]
    pub const fn new(min: Point3D, max: Point3D) -> Self {
        Self { min, max }
    }

    /// Create an empty (invalid) bounding box.
    ///
    /// The empty bounds has min > max, so it will expand to fit any point.
    #[inline]
    pub fn empty() -> Self {
        Self {
            min: Point3D::new(f32::INFINITY, f32::INFINITY, f32::INFINITY),
            max: Point3D::new(f32::NEG_INFINITY, f32::NEG_INFINITY, f32::NEG_INFINITY),
        }
    }

    /// Check if the bounds are empty (invalid).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    /// Expand bounds to include a point.
    #[inline]
    pub fn expand_to_include(&mut self, point: Point3D) {
        self.min = self.min.min(&point);
        self.max = self.max.max(&point);
    }

    /// Check if a point lies inside the bounds (inclusive).
    #[inline]
    pub fn contains(&self, point: Point3D) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
            && point.z >= self.min.z
            && point.z <= self.max.z
    }

    /// Volume of the box in cubic meters.
    ///
    /// Empty bounds have zero volume.
    #[inline]
    pub fn volume(&self) -> f32 {
        if self.is_empty() {
            return 0.0;
        }
        let d = self.max - self.min;
        d.x * d.y * d.z
    }

    /// Volume of the intersection with another box.
    ///
    /// Returns 0.0 when the boxes do not overlap or either is empty.
    pub fn intersection_volume(&self, other: &Bounds3D) -> f32 {
        if self.is_empty() || other.is_empty() {
            return 0.0;
        }
        let min = self.min.max(&other.min);
        let max = self.max.min(&other.max);
        let dx = (max.x - min.x).max(0.0);
        let dy = (max.y - min.y).max(0.0);
        let dz = (max.z - min.z).max(0.0);
        dx * dy * dz
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_expands() {
        let mut b = Bounds3D::empty();
        assert!(b.is_empty());
        assert_eq!(b.volume(), 0.0);

        b.expand_to_include(Point3D::new(1.0, 2.0, 3.0));
        assert!(!b.is_empty());
        assert_eq!(b.min, b.max);
        assert_eq!(b.volume(), 0.0);

        b.expand_to_include(Point3D::new(0.0, 0.0, 0.0));
        assert!((b.volume() - 6.0).abs() < 1e-6);
    }

    #[test]
    fn test_contains() {
        let b = Bounds3D::new(Point3D::ZERO, Point3D::new(1.0, 1.0, 1.0));
        assert!(b.contains(Point3D::new(0.5, 0.5, 0.5)));
        assert!(b.contains(Point3D::new(1.0, 1.0, 1.0)));
        assert!(!b.contains(Point3D::new(1.1, 0.5, 0.5)));
    }

    #[test]
    fn test_intersection_volume() {
        let a = Bounds3D::new(Point3D::ZERO, Point3D::new(2.0, 2.0, 2.0));
        let b = Bounds3D::new(Point3D::new(1.0, 1.0, 1.0), Point3D::new(3.0, 3.0, 3.0));
        assert!((a.intersection_volume(&b) - 1.0).abs() < 1e-6);
        assert!((b.intersection_volume(&a) - 1.0).abs() < 1e-6);

        let far = Bounds3D::new(Point3D::new(5.0, 5.0, 5.0), Point3D::new(6.0, 6.0, 6.0));
        assert_eq!(a.intersection_volume(&far), 0.0);
        assert_eq!(a.intersection_volume(&Bounds3D::empty()), 0.0);
    }
}
