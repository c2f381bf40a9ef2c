//! 3D point cloud with SoA (Struct of Arrays) layout.
//!
//! The SoA layout keeps coordinate arrays contiguous, which is
//! cache-friendly for the sequential passes the pipeline performs
//! (transforms, bounds computation, k-d tree construction).

use serde::{Deserialize, Serialize};

use super::bounds::Bounds3D;
use super::point::Point3D;

/// Cartesian 3D point cloud with SoA layout.
///
/// All coordinates are in meters, world frame unless documented otherwise.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct PointCloud3D {
    /// X coordinates in meters.
    pub xs: Vec<f32>,
    /// Y coordinates in meters.
    pub ys: Vec<f32>,
    /// Z coordinates in meters.
    pub zs: Vec<f32>,
}

impl PointCloud3D {
    /// Create a new empty point cloud.
    pub fn new() -> Self {
        Self {
            xs: Vec::new(),
            ys: Vec::new(),
            zs: Vec::new(),
        }
    }

    /// Create a point cloud with capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            xs: Vec::with_capacity(capacity),
            ys: Vec::with_capacity(capacity),
            zs: Vec::with_capacity(capacity),
        }
    }

    /// Create from a slice of Point3D.
    pub fn from_points(points: &[Point3D]) -> Self {
        let mut cloud = Self::with_capacity(points.len());
        for p in points {
            cloud.push_point(*p);
        }
        cloud
    }

    /// Add a point to the cloud.
    #[inline]
    pub fn push(&mut self, x: f32, y: f32, z: f32) {
        self.xs.push(x);
        self.ys.push(y);
        self.zs.push(z);
    }

    /// Add a Point3D to the cloud.
    #[inline]
    pub fn push_point(&mut self, point: Point3D) {
        self.push(point.x, point.y, point.z);
    }

    /// Number of points in the cloud.
    #[inline]
    pub fn len(&self) -> usize {
        self.xs.len()
    }

    /// Check if the cloud is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    /// Get a point by index.
    #[inline]
    pub fn get(&self, index: usize) -> Option<Point3D> {
        if index < self.len() {
            Some(Point3D::new(self.xs[index], self.ys[index], self.zs[index]))
        } else {
            None
        }
    }

    /// Iterate over points.
    pub fn iter(&self) -> impl Iterator<Item = Point3D> + '_ {
        self.xs
            .iter()
            .zip(self.ys.iter())
            .zip(self.zs.iter())
            .map(|((&x, &y), &z)| Point3D::new(x, y, z))
    }

    /// Append all points of another cloud.
    pub fn extend(&mut self, other: &PointCloud3D) {
        self.xs.extend_from_slice(&other.xs);
        self.ys.extend_from_slice(&other.ys);
        self.zs.extend_from_slice(&other.zs);
    }

    /// Keep only the points at the given indices, in the given order.
    pub fn select(&self, indices: &[usize]) -> PointCloud3D {
        let mut cloud = PointCloud3D::with_capacity(indices.len());
        for &i in indices {
            cloud.push(self.xs[i], self.ys[i], self.zs[i]);
        }
        cloud
    }

    /// Centroid of the cloud, or None if empty.
    pub fn centroid(&self) -> Option<Point3D> {
        if self.is_empty() {
            return None;
        }
        let n = self.len() as f32;
        let sx: f32 = self.xs.iter().sum();
        let sy: f32 = self.ys.iter().sum();
        let sz: f32 = self.zs.iter().sum();
        Some(Point3D::new(sx / n, sy / n, sz / n))
    }

    /// Axis-aligned bounding box of the cloud.
    ///
    /// Returns [`Bounds3D::empty`] for an empty cloud.
    pub fn bounds(&self) -> Bounds3D {
        let mut bounds = Bounds3D::empty();
        for p in self.iter() {
            bounds.expand_to_include(p);
        }
        bounds
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_get() {
        let mut cloud = PointCloud3D::new();
        assert!(cloud.is_empty());
        cloud.push(1.0, 2.0, 3.0);
        cloud.push_point(Point3D::new(4.0, 5.0, 6.0));
        assert_eq!(cloud.len(), 2);
        assert_eq!(cloud.get(1), Some(Point3D::new(4.0, 5.0, 6.0)));
        assert_eq!(cloud.get(2), None);
    }

    #[test]
    fn test_extend_and_select() {
        let mut a = PointCloud3D::from_points(&[Point3D::new(0.0, 0.0, 0.0)]);
        let b = PointCloud3D::from_points(&[
            Point3D::new(1.0, 0.0, 0.0),
            Point3D::new(2.0, 0.0, 0.0),
        ]);
        a.extend(&b);
        assert_eq!(a.len(), 3);

        let picked = a.select(&[2, 0]);
        assert_eq!(picked.get(0), Some(Point3D::new(2.0, 0.0, 0.0)));
        assert_eq!(picked.get(1), Some(Point3D::new(0.0, 0.0, 0.0)));
    }

    #[test]
    fn test_centroid() {
        let cloud = PointCloud3D::from_points(&[
            Point3D::new(0.0, 0.0, 0.0),
            Point3D::new(2.0, 4.0, 6.0),
        ]);
        let c = cloud.centroid().unwrap();
        assert!((c.x - 1.0).abs() < 1e-6);
        assert!((c.y - 2.0).abs() < 1e-6);
        assert!((c.z - 3.0).abs() < 1e-6);

        assert!(PointCloud3D::new().centroid().is_none());
    }

    #[test]
    fn test_bounds() {
        let cloud = PointCloud3D::from_points(&[
            Point3D::new(-1.0, 2.0, 0.5),
            Point3D::new(3.0, -2.0, 1.5),
        ]);
        let b = cloud.bounds();
        assert_eq!(b.min, Point3D::new(-1.0, -2.0, 0.5));
        assert_eq!(b.max, Point3D::new(3.0, 2.0, 1.5));

        assert!(PointCloud3D::new().bounds().is_empty());
    }
}
