//! Scene graph assembly: IoU weighting, edge selection, relation reasoning.

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::core::{Bounds3D, Embedding, ObjectMap, PointCloud3D};
use crate::traits::Captioner;

use super::spanning::{spanning_edges, WeightedPair};

/// Configuration for scene graph construction.
#[derive(Clone, Debug)]
pub struct GraphConfig {
    /// Additive epsilon in the IoU denominator, guarding degenerate boxes.
    /// Default: 1e-6
    pub iou_epsilon: f32,

    /// Extra attempts per relation-reasoner call after the first failure.
    /// When all attempts fail the edge keeps an empty relation string.
    /// Default: 1
    pub relation_retries: usize,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            iou_epsilon: 1e-6,
            relation_retries: 1,
        }
    }
}

impl GraphConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter for the IoU epsilon.
    pub fn with_iou_epsilon(mut self, epsilon: f32) -> Self {
        self.iou_epsilon = epsilon;
        self
    }

    /// Builder-style setter for relation retries.
    pub fn with_relation_retries(mut self, retries: usize) -> Self {
        self.relation_retries = retries;
        self
    }
}

/// Volumetric IoU of two axis-aligned boxes.
///
/// Symmetric; the epsilon keeps the division defined when both boxes are
/// degenerate (zero volume), in which case the result is 0.
pub fn iou_3d(a: &Bounds3D, b: &Bounds3D, epsilon: f32) -> f32 {
    let intersection = a.intersection_volume(b);
    let union = a.volume() + b.volume() - intersection;
    intersection / (union + epsilon)
}

/// A relational edge between two objects in the final graph.
///
/// Topologically undirected (selected as an unordered pair), but the
/// relation string is directional: it describes object `i` relative to
/// object `j`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Edge {
    /// First object index.
    pub i: usize,
    /// Second object index.
    pub j: usize,
    /// Directional natural-language relation ("A is on B").
    pub relation: String,
}

/// One object in the final scene graph output.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SceneObject {
    /// Accumulated, denoised world-frame points.
    pub points: PointCloud3D,
    /// Fused semantic feature.
    pub feature: Embedding,
    /// Number of detections fused into the object.
    pub count: usize,
    /// Summarized object caption.
    pub caption: String,
}

/// The system's final output: captioned objects plus a spanning set of
/// labeled relational edges.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SceneGraph {
    /// Object list; edge endpoints index into it.
    pub objects: Vec<SceneObject>,
    /// Spanning-tree edge list (`objects.len() - 1` entries when non-empty).
    pub edges: Vec<Edge>,
}

/// Bounding boxes of every object in the map, in index order.
pub fn bounding_boxes(map: &ObjectMap) -> Vec<Bounds3D> {
    map.iter().map(|node| node.bounds()).collect()
}

/// Build the relational edge set over the finalized, captioned map.
///
/// Selects a maximum-IoU spanning tree (bounding the number of expensive
/// reasoner calls to N-1) and queries the relation reasoner once per
/// selected edge. Reasoner failures are retried per `config.relation_retries`
/// and then degrade to an empty relation string; the graph build itself
/// never fails.
pub fn build_edges<C: Captioner>(
    map: &ObjectMap,
    reasoner: &mut C,
    config: &GraphConfig,
) -> Vec<Edge> {
    let n = map.len();
    let boxes = bounding_boxes(map);

    let mut pairs = Vec::with_capacity(n.saturating_sub(1) * n / 2);
    for i in 0..n {
        for j in (i + 1)..n {
            pairs.push(WeightedPair {
                i,
                j,
                weight: iou_3d(&boxes[i], &boxes[j], config.iou_epsilon),
            });
        }
    }

    let selected = spanning_edges(n, &pairs);
    info!(
        "scene graph: {} objects, {} spanning edges selected",
        n,
        selected.len()
    );

    selected
        .into_iter()
        .map(|(i, j)| {
            let cap_i = caption_of(map, i);
            let cap_j = caption_of(map, j);
            let relation = relate_with_retry(reasoner, cap_i, cap_j, config.relation_retries);
            Edge { i, j, relation }
        })
        .collect()
}

fn caption_of(map: &ObjectMap, idx: usize) -> &str {
    let caption = map.get(idx).and_then(|node| node.caption.as_deref());
    if caption.is_none() {
        warn!("object {idx} has no caption; relation reasoning gets an empty description");
    }
    caption.unwrap_or("")
}

fn relate_with_retry<C: Captioner>(
    reasoner: &mut C,
    cap_a: &str,
    cap_b: &str,
    retries: usize,
) -> String {
    for attempt in 0..=retries {
        match reasoner.relate(cap_a, cap_b) {
            Ok(relation) => return relation,
            Err(e) => {
                warn!("relation reasoning attempt {} failed: {e}", attempt + 1);
            }
        }
    }
    String::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ObjectNode, Point3D, RgbImage};
    use crate::error::{DrishyaError, Result};

    fn bounds(min: [f32; 3], max: [f32; 3]) -> Bounds3D {
        Bounds3D::new(
            Point3D::new(min[0], min[1], min[2]),
            Point3D::new(max[0], max[1], max[2]),
        )
    }

    #[test]
    fn test_iou_symmetric() {
        let a = bounds([0.0; 3], [2.0; 3]);
        let b = bounds([1.0; 3], [3.0; 3]);
        let eps = 1e-6;
        let ab = iou_3d(&a, &b, eps);
        let ba = iou_3d(&b, &a, eps);
        assert_eq!(ab, ba);
        // Intersection 1, union 15.
        assert!((ab - 1.0 / 15.0).abs() < 1e-4);
    }

    #[test]
    fn test_iou_degenerate_never_panics() {
        let degenerate = bounds([1.0; 3], [1.0; 3]);
        let v = iou_3d(&degenerate, &degenerate, 1e-6);
        assert_eq!(v, 0.0);

        let empty = Bounds3D::empty();
        assert_eq!(iou_3d(&empty, &degenerate, 1e-6), 0.0);
    }

    #[test]
    fn test_iou_identical_boxes_near_one() {
        let a = bounds([0.0; 3], [1.0; 3]);
        assert!((iou_3d(&a, &a, 1e-6) - 1.0).abs() < 1e-4);
    }

    /// Captioner that answers relations deterministically, optionally
    /// failing the first `fail_first` calls.
    struct MockReasoner {
        fail_first: usize,
        calls: usize,
    }

    impl Captioner for MockReasoner {
        fn caption(&mut self, _image: &RgbImage) -> Result<String> {
            Ok("object".to_string())
        }

        fn summarize(&mut self, captions: &[String]) -> Result<String> {
            Ok(captions.join("; "))
        }

        fn relate(&mut self, a: &str, b: &str) -> Result<String> {
            self.calls += 1;
            if self.calls <= self.fail_first {
                return Err(DrishyaError::Relation("model offline".into()));
            }
            Ok(format!("{a} is next to {b}"))
        }
    }

    fn captioned_map(centers: &[f32]) -> ObjectMap {
        let mut map = ObjectMap::new();
        for (k, &c) in centers.iter().enumerate() {
            let points = PointCloud3D::from_points(&[
                Point3D::new(c, 0.0, 0.0),
                Point3D::new(c + 1.0, 1.0, 1.0),
            ]);
            map.push(ObjectNode {
                points,
                feature: Embedding::new(vec![1.0, 0.0]),
                count: 1,
                views: Vec::new(),
                caption: Some(format!("object {k}")),
            });
        }
        map
    }

    #[test]
    fn test_build_edges_spanning_tree() {
        // Three mutually overlapping boxes -> 2 edges, no cycle.
        let map = captioned_map(&[0.0, 0.5, 0.9]);
        let mut reasoner = MockReasoner {
            fail_first: 0,
            calls: 0,
        };
        let edges = build_edges(&map, &mut reasoner, &GraphConfig::default());
        assert_eq!(edges.len(), 2);
        assert_eq!(reasoner.calls, 2);
        assert!(edges.iter().all(|e| !e.relation.is_empty()));
        assert!(edges.iter().all(|e| e.i < e.j));
    }

    #[test]
    fn test_build_edges_single_object() {
        let map = captioned_map(&[0.0]);
        let mut reasoner = MockReasoner {
            fail_first: 0,
            calls: 0,
        };
        let edges = build_edges(&map, &mut reasoner, &GraphConfig::default());
        assert!(edges.is_empty());
        assert_eq!(reasoner.calls, 0);
    }

    #[test]
    fn test_relation_failure_degrades_after_retry() {
        let map = captioned_map(&[0.0, 0.5]);
        // First call fails, the retry succeeds.
        let mut reasoner = MockReasoner {
            fail_first: 1,
            calls: 0,
        };
        let edges = build_edges(&map, &mut reasoner, &GraphConfig::default());
        assert_eq!(edges.len(), 1);
        assert!(!edges[0].relation.is_empty());

        // Both attempts fail: empty relation, build still completes.
        let mut reasoner = MockReasoner {
            fail_first: 10,
            calls: 0,
        };
        let edges = build_edges(&map, &mut reasoner, &GraphConfig::default());
        assert_eq!(edges.len(), 1);
        assert!(edges[0].relation.is_empty());
    }
}
