//! YAML configuration sections and their conversions to engine configs.

use serde::{Deserialize, Serialize};

use crate::association::AssociationConfig;
use crate::fusion::FusionConfig;
use crate::geometry::DbscanConfig;
use crate::graph::GraphConfig;
use crate::pipeline::PipelineConfig;

fn default_delta_sim() -> f32 {
    1.1
}

fn default_distance_threshold() -> f32 {
    0.025
}

fn default_eps() -> f32 {
    0.03
}

fn default_min_points() -> usize {
    20
}

fn default_iou_epsilon() -> f32 {
    1e-6
}

fn default_relation_retries() -> usize {
    1
}

fn default_max_caption_views() -> usize {
    10
}

/// Association settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AssociationSection {
    /// Minimum combined similarity to match a detection to an object.
    #[serde(default = "default_delta_sim")]
    pub delta_sim: f32,

    /// Nearest-neighbor distance threshold (meters).
    #[serde(default = "default_distance_threshold")]
    pub distance_threshold: f32,
}

impl Default for AssociationSection {
    fn default() -> Self {
        Self {
            delta_sim: default_delta_sim(),
            distance_threshold: default_distance_threshold(),
        }
    }
}

impl AssociationSection {
    /// Convert to the association engine config.
    pub fn to_association_config(&self) -> AssociationConfig {
        AssociationConfig::new()
            .with_delta_sim(self.delta_sim)
            .with_distance_threshold(self.distance_threshold)
    }
}

/// Outlier filter settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FilterSection {
    /// DBSCAN neighborhood radius (meters).
    #[serde(default = "default_eps")]
    pub eps: f32,

    /// DBSCAN minimum neighborhood size.
    #[serde(default = "default_min_points")]
    pub min_points: usize,
}

impl Default for FilterSection {
    fn default() -> Self {
        Self {
            eps: default_eps(),
            min_points: default_min_points(),
        }
    }
}

impl FilterSection {
    /// Convert to the DBSCAN filter config.
    pub fn to_dbscan_config(&self) -> DbscanConfig {
        DbscanConfig::new()
            .with_eps(self.eps)
            .with_min_points(self.min_points)
    }
}

/// Fusion settings.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct FusionSection {
    /// Renormalize fused features to unit length after each update.
    #[serde(default)]
    pub renormalize_fused: bool,
}

impl FusionSection {
    /// Convert to the fusion engine config.
    pub fn to_fusion_config(&self) -> FusionConfig {
        FusionConfig::new().with_renormalize_fused(self.renormalize_fused)
    }
}

/// Scene graph settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GraphSection {
    /// Additive epsilon in the IoU denominator.
    #[serde(default = "default_iou_epsilon")]
    pub iou_epsilon: f32,

    /// Extra relation-reasoner attempts after a failure.
    #[serde(default = "default_relation_retries")]
    pub relation_retries: usize,
}

impl Default for GraphSection {
    fn default() -> Self {
        Self {
            iou_epsilon: default_iou_epsilon(),
            relation_retries: default_relation_retries(),
        }
    }
}

impl GraphSection {
    /// Convert to the graph engine config.
    pub fn to_graph_config(&self) -> GraphConfig {
        GraphConfig::new()
            .with_iou_epsilon(self.iou_epsilon)
            .with_relation_retries(self.relation_retries)
    }
}

/// Frame pipeline settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PipelineSection {
    /// Maximum number of stored views captioned per object.
    #[serde(default = "default_max_caption_views")]
    pub max_caption_views: usize,

    /// Minimum mask pixel count for a detection to be lifted at all.
    /// 0 keeps every mask, including ones that produce empty point clouds.
    #[serde(default)]
    pub min_mask_points: usize,
}

impl Default for PipelineSection {
    fn default() -> Self {
        Self {
            max_caption_views: default_max_caption_views(),
            min_mask_points: 0,
        }
    }
}

impl PipelineSection {
    /// Convert to the pipeline config.
    pub fn to_pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            max_caption_views: self.max_caption_views,
            min_mask_points: self.min_mask_points,
        }
    }
}
