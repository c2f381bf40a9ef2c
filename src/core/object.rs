//! The object map: detections, persistent object nodes, and their container.
//!
//! [`ObjectMap`] is the shared state of the frame loop. It is owned by the
//! pipeline and passed by exclusive reference through association and fusion;
//! nodes are only ever appended or merged into, never deleted or split.

use std::sync::Arc;

use super::bounds::Bounds3D;
use super::cloud::PointCloud3D;
use super::embedding::Embedding;
use super::image::RgbImage;

/// One segmented, embedded, geometrically-lifted observation from a single
/// frame. Ephemeral: consumed by fusion and discarded.
#[derive(Clone, Debug)]
pub struct Detection {
    /// Denoised world-frame point cloud of the masked region.
    pub points: PointCloud3D,
    /// Unit-norm semantic embedding of the masked region.
    pub feature: Embedding,
    /// Source views, kept for the captioning post-pass.
    pub views: Vec<Arc<RgbImage>>,
}

/// A persistent map entry representing one physical object, fused from one
/// or more detections across frames.
///
/// Invariants:
/// - `count` equals the number of detections ever fused into this node.
/// - `points` is the outlier filter applied to the union of all contributing
///   detections' points (each fusion re-filters the accumulated set).
#[derive(Clone, Debug)]
pub struct ObjectNode {
    /// Accumulated, denoised point cloud in world frame.
    pub points: PointCloud3D,
    /// Running mean of fused detection embeddings (not renormalized).
    pub feature: Embedding,
    /// Number of detections fused into this node (>= 1).
    pub count: usize,
    /// Accumulated source views for captioning.
    pub views: Vec<Arc<RgbImage>>,
    /// Natural-language caption, assigned in the post-pass.
    pub caption: Option<String>,
}

impl ObjectNode {
    /// Seed a new node from its first detection.
    pub fn from_detection(det: Detection) -> Self {
        Self {
            points: det.points,
            feature: det.feature,
            count: 1,
            views: det.views,
            caption: None,
        }
    }

    /// Axis-aligned bounding box of the node's points.
    ///
    /// Derived on demand, never stored.
    pub fn bounds(&self) -> Bounds3D {
        self.points.bounds()
    }
}

/// The persistent object-centric map.
///
/// Append/merge-only: indices are stable for the lifetime of the map, so the
/// scene graph can refer to objects by index.
#[derive(Clone, Debug, Default)]
pub struct ObjectMap {
    nodes: Vec<ObjectNode>,
}

impl ObjectMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Number of objects in the map.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the map has no objects.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Get an object by index.
    pub fn get(&self, index: usize) -> Option<&ObjectNode> {
        self.nodes.get(index)
    }

    /// Get a mutable object by index.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut ObjectNode> {
        self.nodes.get_mut(index)
    }

    /// Append a new node and return its index.
    pub fn push(&mut self, node: ObjectNode) -> usize {
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    /// Iterate over nodes in stable index order.
    pub fn iter(&self) -> impl Iterator<Item = &ObjectNode> {
        self.nodes.iter()
    }

    /// Iterate mutably over nodes in stable index order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut ObjectNode> {
        self.nodes.iter_mut()
    }

    /// Consume the map, yielding the node list.
    pub fn into_nodes(self) -> Vec<ObjectNode> {
        self.nodes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Point3D;

    fn detection(points: &[Point3D]) -> Detection {
        Detection {
            points: PointCloud3D::from_points(points),
            feature: Embedding::new(vec![1.0, 0.0]),
            views: Vec::new(),
        }
    }

    #[test]
    fn test_node_from_detection() {
        let node = ObjectNode::from_detection(detection(&[Point3D::new(1.0, 2.0, 3.0)]));
        assert_eq!(node.count, 1);
        assert!(node.caption.is_none());
        assert_eq!(node.bounds().min, Point3D::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_map_indices_stable() {
        let mut map = ObjectMap::new();
        assert!(map.is_empty());
        let a = map.push(ObjectNode::from_detection(detection(&[Point3D::ZERO])));
        let b = map.push(ObjectNode::from_detection(detection(&[Point3D::new(
            1.0, 0.0, 0.0,
        )])));
        assert_eq!((a, b), (0, 1));
        assert_eq!(map.len(), 2);
        assert!(map.get(1).is_some());
        assert!(map.get(2).is_none());
    }
}
