//! Semantic scene graph construction over the finalized object map.
//!
//! Runs once, after the frame loop has stabilized the map and every object
//! has been captioned:
//!
//! 1. Axis-aligned bounding box per object (from its point cloud)
//! 2. Pairwise volumetric IoU over all object pairs (O(N^2))
//! 3. Maximum-IoU spanning tree via union-find — exactly N-1 edges,
//!    unconditionally connected (zero-IoU pairs are valid fallback edges)
//! 4. One relation-reasoner call per selected edge
//!
//! The spanning tree bounds the number of relation-reasoner calls
//! (each one is a model inference) while keeping every object transitively
//! linked.

mod disjoint_set;
mod scene_graph;
mod spanning;

pub use disjoint_set::DisjointSet;
pub use scene_graph::{
    bounding_boxes, build_edges, iou_3d, Edge, GraphConfig, SceneGraph, SceneObject,
};
pub use spanning::{spanning_edges, WeightedPair};
