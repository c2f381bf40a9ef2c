//! 3D point type used throughout the mapping pipeline.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Sub};

/// A point in 3D world space (meters, f32).
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Point3D {
    /// X coordinate in meters.
    pub x: f32,
    /// Y coordinate in meters.
    pub y: f32,
    /// Z coordinate in meters.
    pub z: f32,
}

impl Point3D {
    /// Create a new point.
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Origin point.
    pub const ZERO: Point3D = Point3D {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    /// Euclidean distance to another point.
    #[inline]
    pub fn distance(&self, other: &Point3D) -> f32 {
        self.distance_squared(other).sqrt()
    }

    /// Squared distance (faster, avoids sqrt).
    #[inline]
    pub fn distance_squared(&self, other: &Point3D) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        dx * dx + dy * dy + dz * dz
    }

    /// Component-wise minimum of two points.
    #[inline]
    pub fn min(&self, other: &Point3D) -> Point3D {
        Point3D::new(
            self.x.min(other.x),
            self.y.min(other.y),
            self.z.min(other.z),
        )
    }

    /// Component-wise maximum of two points.
    #[inline]
    pub fn max(&self, other: &Point3D) -> Point3D {
        Point3D::new(
            self.x.max(other.x),
            self.y.max(other.y),
            self.z.max(other.z),
        )
    }

    /// Coordinates as a fixed array, for k-d tree queries.
    #[inline]
    pub fn to_array(&self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }
}

impl Add for Point3D {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Point3D::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl Sub for Point3D {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Point3D::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl Mul<f32> for Point3D {
    type Output = Self;

    #[inline]
    fn mul(self, scalar: f32) -> Self {
        Point3D::new(self.x * scalar, self.y * scalar, self.z * scalar)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance() {
        let a = Point3D::new(0.0, 0.0, 0.0);
        let b = Point3D::new(1.0, 2.0, 2.0);
        assert!((a.distance(&b) - 3.0).abs() < 1e-6);
        assert!((a.distance_squared(&b) - 9.0).abs() < 1e-6);
    }

    #[test]
    fn test_min_max() {
        let a = Point3D::new(1.0, 5.0, -2.0);
        let b = Point3D::new(3.0, 2.0, 0.0);
        assert_eq!(a.min(&b), Point3D::new(1.0, 2.0, -2.0));
        assert_eq!(a.max(&b), Point3D::new(3.0, 5.0, 0.0));
    }

    #[test]
    fn test_arithmetic() {
        let a = Point3D::new(1.0, 2.0, 3.0);
        let b = Point3D::new(0.5, 0.5, 0.5);
        assert_eq!(a + b, Point3D::new(1.5, 2.5, 3.5));
        assert_eq!(a - b, Point3D::new(0.5, 1.5, 2.5));
        assert_eq!(a * 2.0, Point3D::new(2.0, 4.0, 6.0));
    }
}
