//! Core types for the drishya-map object-centric mapping library.
//!
//! This module provides the fundamental types used throughout the library:
//! - [`Point3D`], [`PointCloud3D`], [`Bounds3D`]: geometry
//! - [`Embedding`]: semantic feature vectors
//! - [`CameraIntrinsics`], [`Transform3D`]: camera model
//! - [`RgbImage`], [`DepthImage`], [`Mask`], [`Frame`]: frame input
//! - [`Detection`], [`ObjectNode`], [`ObjectMap`]: the object map

mod bounds;
mod camera;
mod cloud;
mod embedding;
mod image;
mod object;
mod point;

pub use bounds::Bounds3D;
pub use camera::{CameraIntrinsics, Transform3D};
pub use cloud::PointCloud3D;
pub use embedding::Embedding;
pub use image::{DepthImage, Frame, Mask, RgbImage};
pub use object::{Detection, ObjectMap, ObjectNode};
pub use point::Point3D;
