//! Depth backprojection of masked pixels into a 3D point cloud.

use crate::core::{CameraIntrinsics, DepthImage, Mask, PointCloud3D};

/// Backproject the masked pixels of a depth image into camera-frame 3D points.
///
/// Standard pinhole model: for pixel (u, v) with depth z,
///
/// ```text
/// x = (u - cx) * z / fx
/// y = (v - cy) * z / fy
/// ```
///
/// Pixels with non-positive or non-finite depth are skipped. The resulting
/// cloud is in the camera frame; apply the frame's camera-to-world transform
/// to lift it into the map frame.
pub fn backproject(depth: &DepthImage, intrinsics: &CameraIntrinsics, mask: &Mask) -> PointCloud3D {
    let mut cloud = PointCloud3D::with_capacity(mask.count());
    for (u, v) in mask.iter_set() {
        let z = depth.get(u, v);
        if !z.is_finite() || z <= 0.0 {
            continue;
        }
        let x = (u as f32 - intrinsics.cx) * z / intrinsics.fx;
        let y = (v as f32 - intrinsics.cy) * z / intrinsics.fy;
        cloud.push(x, y, z);
    }
    cloud
}
