//! Owned image buffer types for the RGB-D frame input.
//!
//! These are deliberately minimal: the crate never interprets pixel content
//! itself. RGB images pass through to the segmenter, embedder, and captioner;
//! depth images are read only during backprojection; masks are boolean
//! bitmaps produced by the segmenter.

use std::sync::Arc;

use super::camera::{CameraIntrinsics, Transform3D};

/// An owned RGB image (8-bit, row-major, 3 bytes per pixel).
#[derive(Clone, Debug)]
pub struct RgbImage {
    /// Width in pixels.
    pub width: usize,
    /// Height in pixels.
    pub height: usize,
    /// Pixel data, `height * width * 3` bytes.
    pub data: Vec<u8>,
}

impl RgbImage {
    /// Create an image from raw data.
    ///
    /// Returns None if the buffer size does not match the dimensions.
    pub fn new(width: usize, height: usize, data: Vec<u8>) -> Option<Self> {
        if data.len() != width * height * 3 {
            return None;
        }
        Some(Self {
            width,
            height,
            data,
        })
    }

    /// Create a black image of the given size.
    pub fn zeros(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0; width * height * 3],
        }
    }
}

/// An owned depth image (f32 meters, row-major).
///
/// Non-positive or non-finite values mark invalid depth readings.
#[derive(Clone, Debug)]
pub struct DepthImage {
    /// Width in pixels.
    pub width: usize,
    /// Height in pixels.
    pub height: usize,
    /// Depth values in meters, `height * width` entries.
    pub data: Vec<f32>,
}

impl DepthImage {
    /// Create a depth image from raw data.
    ///
    /// Returns None if the buffer size does not match the dimensions.
    pub fn new(width: usize, height: usize, data: Vec<f32>) -> Option<Self> {
        if data.len() != width * height {
            return None;
        }
        Some(Self {
            width,
            height,
            data,
        })
    }

    /// Depth at pixel (x, y).
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> f32 {
        self.data[y * self.width + x]
    }
}

/// A binary instance mask over an image.
#[derive(Clone, Debug)]
pub struct Mask {
    /// Width in pixels.
    pub width: usize,
    /// Height in pixels.
    pub height: usize,
    /// Per-pixel membership, `height * width` entries.
    pub data: Vec<bool>,
}

impl Mask {
    /// Create a mask from raw data.
    ///
    /// Returns None if the buffer size does not match the dimensions.
    pub fn new(width: usize, height: usize, data: Vec<bool>) -> Option<Self> {
        if data.len() != width * height {
            return None;
        }
        Some(Self {
            width,
            height,
            data,
        })
    }

    /// Create an all-false mask.
    pub fn zeros(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![false; width * height],
        }
    }

    /// Set the pixel at (x, y).
    #[inline]
    pub fn set(&mut self, x: usize, y: usize) {
        self.data[y * self.width + x] = true;
    }

    /// Number of set pixels.
    pub fn count(&self) -> usize {
        self.data.iter().filter(|&&v| v).count()
    }

    /// Iterate over (x, y) coordinates of set pixels, row-major order.
    pub fn iter_set(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let width = self.width;
        self.data
            .iter()
            .enumerate()
            .filter(|(_, &v)| v)
            .map(move |(i, _)| (i % width, i / width))
    }
}

/// One RGB-D input frame with its camera parameters.
///
/// Frames are consumed in arrival order; the stream is not restartable.
#[derive(Clone, Debug)]
pub struct Frame {
    /// Color image.
    pub rgb: Arc<RgbImage>,
    /// Registered depth image (same resolution as `rgb`).
    pub depth: DepthImage,
    /// Pinhole intrinsics of the depth/color camera.
    pub intrinsics: CameraIntrinsics,
    /// Camera-to-world rigid transform for this frame.
    pub camera_to_world: Transform3D,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimension_validation() {
        assert!(RgbImage::new(2, 2, vec![0; 12]).is_some());
        assert!(RgbImage::new(2, 2, vec![0; 11]).is_none());
        assert!(DepthImage::new(3, 2, vec![0.0; 6]).is_some());
        assert!(DepthImage::new(3, 2, vec![0.0; 5]).is_none());
        assert!(Mask::new(2, 2, vec![false; 4]).is_some());
        assert!(Mask::new(2, 2, vec![false; 3]).is_none());
    }

    #[test]
    fn test_mask_iter_set() {
        let mut mask = Mask::zeros(3, 2);
        mask.set(1, 0);
        mask.set(2, 1);
        let set: Vec<_> = mask.iter_set().collect();
        assert_eq!(set, vec![(1, 0), (2, 1)]);
        assert_eq!(mask.count(), 2);
    }

    #[test]
    fn test_depth_get() {
        let depth = DepthImage::new(2, 2, vec![0.0, 1.0, 2.0, 3.0]).unwrap();
        assert_eq!(depth.get(1, 0), 1.0);
        assert_eq!(depth.get(0, 1), 2.0);
    }
}
