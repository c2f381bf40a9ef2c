//! Camera model types: pinhole intrinsics and rigid camera-to-world transform.

use serde::{Deserialize, Serialize};

use super::cloud::PointCloud3D;
use super::point::Point3D;

/// Pinhole camera intrinsics.
///
/// Extracted from the upper-left of a 3x3 K matrix:
///
/// ```text
///     | fx  0   cx |
/// K = | 0   fy  cy |
///     | 0   0   1  |
/// ```
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct CameraIntrinsics {
    /// Focal length in pixels, x axis.
    pub fx: f32,
    /// Focal length in pixels, y axis.
    pub fy: f32,
    /// Principal point x (pixels).
    pub cx: f32,
    /// Principal point y (pixels).
    pub cy: f32,
}

impl CameraIntrinsics {
    /// Create intrinsics from explicit parameters.
    pub const fn new(fx: f32, fy: f32, cx: f32, cy: f32) -> Self {
        Self { fx, fy, cx, cy }
    }

    /// Create intrinsics from a row-major 3x3 K matrix.
    pub fn from_matrix(k: &[[f32; 3]; 3]) -> Self {
        Self {
            fx: k[0][0],
            fy: k[1][1],
            cx: k[0][2],
            cy: k[1][2],
        }
    }
}

/// Rigid 3D transform stored as a row-major 4x4 homogeneous matrix.
///
/// Used for the per-frame camera-to-world pose supplied by the caller.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transform3D {
    /// Row-major homogeneous matrix.
    pub matrix: [[f32; 4]; 4],
}

impl Transform3D {
    /// Identity transform.
    pub fn identity() -> Self {
        let mut m = [[0.0; 4]; 4];
        for (i, row) in m.iter_mut().enumerate() {
            row[i] = 1.0;
        }
        Self { matrix: m }
    }

    /// Create from a row-major 4x4 matrix.
    pub const fn from_matrix(matrix: [[f32; 4]; 4]) -> Self {
        Self { matrix }
    }

    /// Pure translation transform.
    pub fn from_translation(x: f32, y: f32, z: f32) -> Self {
        let mut t = Self::identity();
        t.matrix[0][3] = x;
        t.matrix[1][3] = y;
        t.matrix[2][3] = z;
        t
    }

    /// Apply the transform to a single point.
    #[inline]
    pub fn apply(&self, p: Point3D) -> Point3D {
        let m = &self.matrix;
        Point3D::new(
            m[0][0] * p.x + m[0][1] * p.y + m[0][2] * p.z + m[0][3],
            m[1][0] * p.x + m[1][1] * p.y + m[1][2] * p.z + m[1][3],
            m[2][0] * p.x + m[2][1] * p.y + m[2][2] * p.z + m[2][3],
        )
    }

    /// Apply the transform to a whole cloud.
    pub fn apply_cloud(&self, cloud: &PointCloud3D) -> PointCloud3D {
        let mut out = PointCloud3D::with_capacity(cloud.len());
        for p in cloud.iter() {
            out.push_point(self.apply(p));
        }
        out
    }
}

impl Default for Transform3D {
    fn default() -> Self {
        Self::identity()
    }
}
