//! Greedy detection-to-object association.
//!
//! For each detection, every existing object is scored with the combined
//! similarity `phi_geo + phi_sem` (range [0, 2]). The best-scoring object
//! wins if its score reaches `delta_sim`; otherwise the detection is marked
//! unmatched and fusion will create a new object for it.
//!
//! Properties the rest of the crate relies on:
//!
//! - Deterministic: objects are scanned in stable index order and ties go
//!   to the first-encountered object.
//! - Per-detection independence within a frame: two detections may both
//!   match the same object (the fusion fold resolves this sequentially),
//!   and several may each go unmatched.
//! - No detection-to-detection matching inside a frame.

use log::debug;

use crate::core::{Detection, ObjectMap};
use crate::similarity::{geometric_similarity, semantic_similarity, DEFAULT_DISTANCE_THRESHOLD};

/// Configuration for detection-to-object association.
#[derive(Clone, Debug)]
pub struct AssociationConfig {
    /// Minimum combined similarity (geometric + semantic) required to match
    /// a detection to an existing object. Combined scores range over [0, 2].
    /// Default: 1.1
    pub delta_sim: f32,

    /// Nearest-neighbor distance threshold for geometric similarity (meters).
    /// Default: 0.025m
    pub distance_threshold: f32,
}

impl Default for AssociationConfig {
    fn default() -> Self {
        Self {
            delta_sim: 1.1,
            distance_threshold: DEFAULT_DISTANCE_THRESHOLD,
        }
    }
}

impl AssociationConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter for the match threshold.
    pub fn with_delta_sim(mut self, delta: f32) -> Self {
        self.delta_sim = delta;
        self
    }

    /// Builder-style setter for the geometric distance threshold.
    pub fn with_distance_threshold(mut self, meters: f32) -> Self {
        self.distance_threshold = meters;
        self
    }
}

/// Associate each detection with an existing object, or None for a new one.
///
/// The result has one entry per detection, in detection order:
/// `Some(object_index)` when the best combined score reaches
/// `config.delta_sim`, `None` otherwise.
pub fn associate(
    detections: &[Detection],
    map: &ObjectMap,
    config: &AssociationConfig,
) -> Vec<Option<usize>> {
    let mut assignments = Vec::with_capacity(detections.len());

    for (det_idx, det) in detections.iter().enumerate() {
        let mut best: Option<usize> = None;
        let mut best_sim = 0.0f32;

        for (obj_idx, obj) in map.iter().enumerate() {
            let geo = geometric_similarity(&det.points, &obj.points, config.distance_threshold);
            let sem = semantic_similarity(&det.feature, &obj.feature);
            let sim = geo + sem;
            // Strict greater keeps the first-encountered object on ties.
            if sim > best_sim {
                best = Some(obj_idx);
                best_sim = sim;
            }
        }

        let matched = if best_sim >= config.delta_sim {
            best
        } else {
            None
        };
        debug!(
            "detection {}: best object {:?} score {:.3} -> {}",
            det_idx,
            best,
            best_sim,
            match matched {
                Some(i) => format!("matched {i}"),
                None => "new object".to_string(),
            }
        );
        assignments.push(matched);
    }

    assignments
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Embedding, ObjectNode, PointCloud3D};

    fn cluster(offset: f32) -> PointCloud3D {
        let mut cloud = PointCloud3D::new();
        for i in 0..10 {
            cloud.push(offset + i as f32 * 0.01, 0.0, 0.0);
        }
        cloud
    }

    fn detection(points: PointCloud3D, feature: Vec<f32>) -> Detection {
        Detection {
            points,
            feature: Embedding::new(feature),
            views: Vec::new(),
        }
    }

    fn map_with(dets: Vec<Detection>) -> ObjectMap {
        let mut map = ObjectMap::new();
        for d in dets {
            map.push(ObjectNode::from_detection(d));
        }
        map
    }

    #[test]
    fn test_empty_map_all_unmatched() {
        let dets = vec![detection(cluster(0.0), vec![1.0, 0.0])];
        let assignments = associate(&dets, &ObjectMap::new(), &AssociationConfig::default());
        assert_eq!(assignments, vec![None]);
    }

    #[test]
    fn test_identical_detection_matches() {
        // Identical points and feature: score 1.0 + 1.0 = 2.0 >= 1.1.
        let map = map_with(vec![detection(cluster(0.0), vec![1.0, 0.0])]);
        let dets = vec![detection(cluster(0.0), vec![1.0, 0.0])];
        let assignments = associate(&dets, &map, &AssociationConfig::default());
        assert_eq!(assignments, vec![Some(0)]);
    }

    #[test]
    fn test_below_threshold_goes_unmatched() {
        // Same feature (sem = 1.0) but distant geometry (geo = 0.0):
        // combined 1.0 < 1.1.
        let map = map_with(vec![detection(cluster(0.0), vec![1.0, 0.0])]);
        let dets = vec![detection(cluster(50.0), vec![1.0, 0.0])];
        let assignments = associate(&dets, &map, &AssociationConfig::default());
        assert_eq!(assignments, vec![None]);
    }

    #[test]
    fn test_tie_goes_to_first_object() {
        // Two identical objects; the detection scores 2.0 against both.
        let map = map_with(vec![
            detection(cluster(0.0), vec![1.0, 0.0]),
            detection(cluster(0.0), vec![1.0, 0.0]),
        ]);
        let dets = vec![detection(cluster(0.0), vec![1.0, 0.0])];
        let assignments = associate(&dets, &map, &AssociationConfig::default());
        assert_eq!(assignments, vec![Some(0)]);
    }

    #[test]
    fn test_deterministic() {
        let map = map_with(vec![
            detection(cluster(0.0), vec![1.0, 0.0]),
            detection(cluster(5.0), vec![0.0, 1.0]),
        ]);
        let dets = vec![
            detection(cluster(0.0), vec![1.0, 0.0]),
            detection(cluster(5.0), vec![0.0, 1.0]),
        ];
        let config = AssociationConfig::default();
        let first = associate(&dets, &map, &config);
        let second = associate(&dets, &map, &config);
        assert_eq!(first, second);
        assert_eq!(first, vec![Some(0), Some(1)]);
    }

    #[test]
    fn test_two_detections_may_share_one_object() {
        let map = map_with(vec![detection(cluster(0.0), vec![1.0, 0.0])]);
        let dets = vec![
            detection(cluster(0.0), vec![1.0, 0.0]),
            detection(cluster(0.0), vec![1.0, 0.0]),
        ];
        let assignments = associate(&dets, &map, &AssociationConfig::default());
        assert_eq!(assignments, vec![Some(0), Some(0)]);
    }

    #[test]
    fn test_empty_detection_never_matches() {
        // Empty points and zero feature: geo 0, sem 0 by convention.
        let map = map_with(vec![detection(cluster(0.0), vec![1.0, 0.0])]);
        let dets = vec![detection(PointCloud3D::new(), vec![0.0, 0.0])];
        let assignments = associate(&dets, &map, &AssociationConfig::default());
        assert_eq!(assignments, vec![None]);
    }
}
