//! Stateless geometric utilities: backprojection and outlier rejection.
//!
//! Rigid transforms live on [`crate::core::Transform3D`]; this module holds
//! the pure functions that lift a masked depth image into a world-frame
//! point cloud and clean it up.

mod backproject;
mod dbscan;

pub use backproject::backproject;
pub use dbscan::{DbscanConfig, DbscanFilter};
