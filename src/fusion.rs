//! Fusion of associated detections into the object map.
//!
//! Fusion is a sequential fold over the frame's assignment list, in
//! assignment order. Each step either appends a new node (unmatched
//! detection) or merges into an existing one. Because the fold mutates the
//! map in place, a later detection in the same frame that matched the same
//! object observes the already-updated state (count, feature, points) — an
//! intentional ordering-dependent property, so this must never become a
//! parallel map.

use log::debug;

use crate::core::{Detection, ObjectMap, ObjectNode};
use crate::geometry::DbscanFilter;

/// Configuration for detection fusion.
#[derive(Clone, Debug, Default)]
pub struct FusionConfig {
    /// Renormalize the fused feature to unit length after each running-mean
    /// update.
    ///
    /// The running mean of unit vectors has norm below 1.0, so fused
    /// features drift in magnitude over time. Cosine-based similarity is
    /// unaffected; renormalizing is offered for consumers that read raw
    /// feature vectors. Default: false (keep the plain running mean).
    pub renormalize_fused: bool,
}

impl FusionConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter for feature renormalization.
    pub fn with_renormalize_fused(mut self, enable: bool) -> Self {
        self.renormalize_fused = enable;
        self
    }
}

/// Counters describing what one fusion pass did to the map.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FuseReport {
    /// Number of new object nodes appended.
    pub objects_created: usize,
    /// Number of merge updates applied to existing nodes.
    pub objects_merged: usize,
}

/// Fold the frame's detections into the map according to the assignments.
///
/// `assignments` must have one entry per detection, as produced by
/// [`crate::association::associate`]. An empty detection list leaves the
/// map untouched.
pub fn fuse(
    map: &mut ObjectMap,
    detections: Vec<Detection>,
    assignments: &[Option<usize>],
    filter: &DbscanFilter,
    config: &FusionConfig,
) -> FuseReport {
    debug_assert_eq!(detections.len(), assignments.len());

    let mut report = FuseReport::default();

    for (det, &assignment) in detections.into_iter().zip(assignments.iter()) {
        match assignment {
            None => {
                let idx = map.push(ObjectNode::from_detection(det));
                debug!("created object {} ({} points)", idx, map.get(idx).map_or(0, |n| n.points.len()));
                report.objects_created += 1;
            }
            Some(obj_idx) => {
                let node = map
                    .get_mut(obj_idx)
                    .unwrap_or_else(|| panic!("assignment to unknown object {obj_idx}"));

                let mut feature = node.feature.running_mean(&det.feature, node.count);
                if config.renormalize_fused {
                    feature = feature.normalized();
                }
                node.feature = feature;
                node.count += 1;

                // Full re-filter of the accumulated set: stale points from
                // early detections can drop out as the cluster sharpens.
                node.points.extend(&det.points);
                node.points = filter.filter(&node.points);

                node.views.extend(det.views);

                debug!(
                    "merged into object {} (count {}, {} points)",
                    obj_idx,
                    node.count,
                    node.points.len()
                );
                report.objects_merged += 1;
            }
        }
    }

    report
}
