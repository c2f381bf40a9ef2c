//! The frame-synchronous mapping pipeline.
//!
//! Drives the per-frame loop (segment -> embed -> backproject -> denoise ->
//! associate -> fuse) over an exclusively owned [`ObjectMap`], then the
//! post-pass (caption -> build graph). Strictly sequential: frames in
//! arrival order, detections in list order, fusion as an in-order fold.
//!
//! External model failures are fatal for the current frame and propagate to
//! the caller; a silently dropped detection would break the map's count and
//! point-provenance invariants. The only degradable stage is per-edge
//! relation reasoning during graph construction.

use std::sync::Arc;
use std::time::Instant;

use log::{info, warn};

use crate::association::{associate, AssociationConfig};
use crate::config::DrishyaConfig;
use crate::core::{Detection, Frame, ObjectMap};
use crate::error::{DrishyaError, Result};
use crate::fusion::{fuse, FusionConfig};
use crate::geometry::{backproject, DbscanFilter};
use crate::graph::{build_edges, GraphConfig, SceneGraph, SceneObject};
use crate::traits::{Captioner, Embedder, Segmenter};

/// Configuration for the frame pipeline itself.
#[derive(Clone, Debug)]
pub struct PipelineConfig {
    /// Maximum number of stored views captioned per object in the
    /// captioning post-pass.
    /// Default: 10
    pub max_caption_views: usize,

    /// Minimum mask pixel count for a detection to be lifted. Masks below
    /// this are skipped before embedding. 0 keeps every mask.
    /// Default: 0
    pub min_mask_points: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_caption_views: 10,
            min_mask_points: 0,
        }
    }
}

/// Timing breakdown for a single frame (all times in microseconds).
#[derive(Clone, Copy, Debug, Default)]
pub struct TimingBreakdown {
    /// Time spent in the segmenter (µs).
    pub segmentation_us: u64,
    /// Time spent in the embedder, summed over masks (µs).
    pub embedding_us: u64,
    /// Time spent backprojecting, transforming, and denoising (µs).
    pub lifting_us: u64,
    /// Time spent on association (µs).
    pub association_us: u64,
    /// Time spent on fusion, including re-filtering (µs).
    pub fusion_us: u64,
    /// Total frame time (µs).
    pub total_us: u64,
}

/// Result of processing one frame.
#[derive(Clone, Copy, Debug, Default)]
pub struct FrameResult {
    /// Number of detections lifted from this frame.
    pub detections: usize,
    /// Number of new objects created.
    pub objects_created: usize,
    /// Number of merges into existing objects.
    pub objects_merged: usize,
    /// Total objects in the map after this frame.
    pub map_size: usize,
    /// Timing breakdown for this frame.
    pub timing: TimingBreakdown,
}

/// The object-centric mapping pipeline.
///
/// Owns the object map and the three external perception models. Feed
/// frames with [`process_frame`](Self::process_frame), then call
/// [`finalize`](Self::finalize) once to caption the map and build the
/// scene graph.
pub struct MappingPipeline<S, E, C> {
    segmenter: S,
    embedder: E,
    captioner: C,
    map: ObjectMap,
    association: AssociationConfig,
    fusion: FusionConfig,
    filter: DbscanFilter,
    graph: GraphConfig,
    config: PipelineConfig,
}

impl<S: Segmenter, E: Embedder, C: Captioner> MappingPipeline<S, E, C> {
    /// Create a pipeline from a full configuration.
    pub fn new(segmenter: S, embedder: E, captioner: C, config: &DrishyaConfig) -> Self {
        Self {
            segmenter,
            embedder,
            captioner,
            map: ObjectMap::new(),
            association: config.association.to_association_config(),
            fusion: config.fusion.to_fusion_config(),
            filter: DbscanFilter::new(config.filter.to_dbscan_config()),
            graph: config.graph.to_graph_config(),
            config: config.pipeline.to_pipeline_config(),
        }
    }

    /// The current object map.
    pub fn map(&self) -> &ObjectMap {
        &self.map
    }

    /// Process one RGB-D frame, updating the object map.
    pub fn process_frame(&mut self, frame: Frame) -> Result<FrameResult> {
        let start = Instant::now();
        self.validate(&frame)?;
        let mut timing = TimingBreakdown::default();

        let seg_start = Instant::now();
        let masks = self.segmenter.segment(&frame.rgb)?;
        timing.segmentation_us = seg_start.elapsed().as_micros() as u64;
        if masks.is_empty() {
            warn!("segmenter returned no masks for this frame");
        }

        let mut detections = Vec::with_capacity(masks.len());
        for mask in &masks {
            if mask.width != frame.rgb.width || mask.height != frame.rgb.height {
                return Err(DrishyaError::InvalidFrame(format!(
                    "mask {}x{} does not match image {}x{}",
                    mask.width, mask.height, frame.rgb.width, frame.rgb.height
                )));
            }
            if mask.count() < self.config.min_mask_points {
                continue;
            }

            let embed_start = Instant::now();
            let feature = self.embedder.embed(&frame.rgb, mask)?;
            timing.embedding_us += embed_start.elapsed().as_micros() as u64;

            let lift_start = Instant::now();
            let camera_points = backproject(&frame.depth, &frame.intrinsics, mask);
            let world_points = frame.camera_to_world.apply_cloud(&camera_points);
            let points = self.filter.filter(&world_points);
            timing.lifting_us += lift_start.elapsed().as_micros() as u64;

            detections.push(Detection {
                points,
                feature,
                views: vec![Arc::clone(&frame.rgb)],
            });
        }

        let assoc_start = Instant::now();
        let assignments = associate(&detections, &self.map, &self.association);
        timing.association_us = assoc_start.elapsed().as_micros() as u64;

        let fusion_start = Instant::now();
        let detection_count = detections.len();
        let report = fuse(
            &mut self.map,
            detections,
            &assignments,
            &self.filter,
            &self.fusion,
        );
        timing.fusion_us = fusion_start.elapsed().as_micros() as u64;
        timing.total_us = start.elapsed().as_micros() as u64;

        info!(
            "frame: {} detections, {} created, {} merged, map size {}",
            detection_count,
            report.objects_created,
            report.objects_merged,
            self.map.len()
        );

        Ok(FrameResult {
            detections: detection_count,
            objects_created: report.objects_created,
            objects_merged: report.objects_merged,
            map_size: self.map.len(),
            timing,
        })
    }

    /// Caption every object and build the final scene graph.
    ///
    /// Captioning failures are fatal: relation reasoning requires every
    /// node to carry a caption. Relation failures degrade per edge inside
    /// the graph build.
    pub fn finalize(&mut self) -> Result<SceneGraph> {
        self.caption_objects()?;

        let edges = build_edges(&self.map, &mut self.captioner, &self.graph);

        let objects = self
            .map
            .iter()
            .map(|node| SceneObject {
                points: node.points.clone(),
                feature: node.feature.clone(),
                count: node.count,
                caption: node.caption.clone().unwrap_or_default(),
            })
            .collect();

        Ok(SceneGraph { objects, edges })
    }

    fn caption_objects(&mut self) -> Result<()> {
        let max_views = self.config.max_caption_views;
        // Split borrows: nodes mutate while the captioner runs.
        let Self {
            map, captioner, ..
        } = self;

        for (idx, node) in map.iter_mut().enumerate() {
            if node.caption.is_some() {
                continue;
            }
            let mut captions = Vec::with_capacity(max_views.min(node.views.len()));
            for view in node.views.iter().take(max_views) {
                captions.push(captioner.caption(view)?);
            }
            let summary = captioner.summarize(&captions)?;
            info!("object {idx}: captioned from {} views", captions.len());
            node.caption = Some(summary);
        }
        Ok(())
    }

    fn validate(&self, frame: &Frame) -> Result<()> {
        if frame.depth.width != frame.rgb.width || frame.depth.height != frame.rgb.height {
            return Err(DrishyaError::InvalidFrame(format!(
                "depth {}x{} does not match rgb {}x{}",
                frame.depth.width, frame.depth.height, frame.rgb.width, frame.rgb.height
            )));
        }
        Ok(())
    }
}

/// Run the whole pipeline over a finite frame stream and return the final
/// scene graph.
///
/// Convenience wrapper over [`MappingPipeline::process_frame`] and
/// [`MappingPipeline::finalize`].
pub fn run_mapping<S, E, C, I>(
    segmenter: S,
    embedder: E,
    captioner: C,
    config: &DrishyaConfig,
    frames: I,
) -> Result<SceneGraph>
where
    S: Segmenter,
    E: Embedder,
    C: Captioner,
    I: IntoIterator<Item = Frame>,
{
    let mut pipeline = MappingPipeline::new(segmenter, embedder, captioner, config);
    for frame in frames {
        pipeline.process_frame(frame)?;
    }
    pipeline.finalize()
}
