//! # Drishya-Map: Object-Centric 3D Mapping and Scene Graphs
//!
//! An incremental mapping library that builds a persistent 3D object map
//! and a semantic scene graph from a stream of RGB-D frames. Perception
//! (segmentation, embedding, captioning) is delegated to caller-supplied
//! models behind traits; the library owns the online data-association,
//! fusion, and graph-construction engines.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use drishya_map::{DrishyaConfig, MappingPipeline};
//!
//! let config = DrishyaConfig::load_default()?;
//! let mut pipeline = MappingPipeline::new(segmenter, embedder, captioner, &config);
//!
//! for frame in frames {
//!     let result = pipeline.process_frame(frame)?;
//!     println!("map size: {}", result.map_size);
//! }
//!
//! let graph = pipeline.finalize()?;
//! println!("{} objects, {} edges", graph.objects.len(), graph.edges.len());
//! ```
//!
//! ## Architecture
//!
//! The library is organized into modules:
//!
//! - [`core`]: Fundamental types (Point3D, PointCloud3D, ObjectMap, etc.)
//! - [`geometry`]: Backprojection and density-based outlier rejection
//! - [`similarity`]: Geometric and semantic similarity functions
//! - [`association`]: Greedy detection-to-object association
//! - [`fusion`]: Merging detections into the object map
//! - [`graph`]: IoU-weighted spanning tree and relation labeling
//! - [`pipeline`]: The frame loop and captioning post-pass
//! - [`config`]: YAML configuration
//! - [`traits`]: Interfaces to external perception models
//!
//! ## Data Flow
//!
//! ```text
//!                    ┌──────────────────┐
//!                    │   RGB-D Frame    │
//!                    │ (rgb, depth, K,  │
//!                    │  camera pose)    │
//!                    └────────┬─────────┘
//!                             │ segment() / embed()
//!                             ▼
//!                    ┌──────────────────┐
//!                    │    Detections    │
//!                    │ (points, feature,│
//!                    │  views)          │
//!                    └────────┬─────────┘
//!                             │ phi_geo + phi_sem
//!                             ▼
//!                    ┌──────────────────┐
//!                    │   Association    │──► unmatched ──┐
//!                    └────────┬─────────┘                │
//!                             │ matched                  │
//!                             ▼                          ▼
//!                    ┌──────────────────┐       ┌────────────────┐
//!                    │      Fusion      │       │   New object   │
//!                    │ (mean feature,   │       │   (count = 1)  │
//!                    │  re-filter pts)  │       └───────┬────────┘
//!                    └────────┬─────────┘               │
//!                             └───────────┬─────────────┘
//!                                         ▼
//!                                ┌────────────────┐
//!                                │   ObjectMap    │
//!                                └───────┬────────┘
//!                   caption() /          │ after final frame
//!                   summarize()          ▼
//!                                ┌────────────────┐
//!                                │  Scene Graph   │──► IoU spanning tree
//!                                │  (post-pass)   │──► relate() per edge
//!                                └────────────────┘
//! ```
//!
//! ## Concurrency Model
//!
//! The engine is single-threaded and frame-synchronous. Fusion is an
//! in-order fold over each frame's assignments: a later detection matching
//! the same object observes the already-updated node. Any parallel
//! embedding/backprojection a caller adds must still hand detections to
//! association and fusion serialized, in detection order.

pub mod association;
pub mod config;
pub mod core;
pub mod error;
pub mod fusion;
pub mod geometry;
pub mod graph;
pub mod pipeline;
pub mod similarity;
pub mod traits;

// Re-export main types at crate root
pub use association::{associate, AssociationConfig};
pub use config::DrishyaConfig;
pub use error::{DrishyaError, Result};
pub use fusion::{fuse, FuseReport, FusionConfig};
pub use graph::{build_edges, Edge, GraphConfig, SceneGraph, SceneObject};
pub use pipeline::{run_mapping, FrameResult, MappingPipeline, PipelineConfig};
pub use traits::{Captioner, Embedder, Segmenter};
