//! Geometric and semantic similarity between detections and object nodes.
//!
//! Association scores a detection against every existing object with the
//! sum of two terms, each in [0, 1]:
//!
//! - [`geometric_similarity`]: point-overlap ratio under a distance
//!   threshold (k-d tree nearest neighbor)
//! - [`semantic_similarity`]: rescaled cosine between embeddings

use kiddo::{KdTree, SquaredEuclidean};

use crate::core::{Embedding, PointCloud3D};

/// Default nearest-neighbor distance threshold (meters).
pub const DEFAULT_DISTANCE_THRESHOLD: f32 = 0.025;

/// Fraction of points in `detection` whose nearest neighbor in `object`
/// lies within `threshold`.
///
/// The measure is asymmetric; the convention throughout the crate is
/// detection → object (how much of the new observation is explained by the
/// existing object). Returns 0.0 when either cloud is empty — an explicit
/// policy, not an error.
pub fn geometric_similarity(
    detection: &PointCloud3D,
    object: &PointCloud3D,
    threshold: f32,
) -> f32 {
    if detection.is_empty() || object.is_empty() {
        return 0.0;
    }

    let mut tree: KdTree<f32, 3> = KdTree::new();
    for (i, p) in object.iter().enumerate() {
        tree.add(&p.to_array(), i as u64);
    }

    let threshold_sq = threshold * threshold;
    let mut within = 0usize;
    for p in detection.iter() {
        let nearest = tree.nearest_one::<SquaredEuclidean>(&p.to_array());
        if nearest.distance < threshold_sq {
            within += 1;
        }
    }
    within as f32 / detection.len() as f32
}

/// Cosine similarity between two embeddings, rescaled from [-1, 1] to [0, 1].
///
/// Object features are running means and may have norm below 1.0; the
/// cosine is computed on directions, so the drift in magnitude does not
/// skew the score. A zero-magnitude vector on either side yields 0.0 by
/// convention (no direction to compare).
pub fn semantic_similarity(a: &Embedding, b: &Embedding) -> f32 {
    let na = a.norm();
    let nb = b.norm();
    if na <= f32::EPSILON || nb <= f32::EPSILON {
        return 0.0;
    }
    let cos = a.dot(b) / (na * nb);
    (cos + 1.0) / 2.0
}
