//! Interfaces to the external perception models.
//!
//! The pipeline treats segmentation, embedding, and captioning as opaque
//! collaborators supplied by the caller. Implementations typically wrap
//! model inference (SAM-style mask generators, CLIP-style encoders,
//! vision-language captioners), but any implementation satisfying the
//! contracts below works — the integration tests use in-memory mocks.
//!
//! All methods are fallible; errors propagate as [`DrishyaError`] and are
//! fatal for the current frame or pass. Silently dropping a detection would
//! corrupt map invariants, so the pipeline never swallows these errors.

use crate::core::{Embedding, Mask, RgbImage};
use crate::error::Result;

/// Class-agnostic instance segmentation.
pub trait Segmenter {
    /// Produce one binary mask per candidate object instance in the image.
    ///
    /// Masks must match the image dimensions. An empty list is a valid
    /// result (nothing detected in this frame).
    fn segment(&mut self, image: &RgbImage) -> Result<Vec<Mask>>;
}

/// Semantic feature extraction for a masked image region.
pub trait Embedder {
    /// Compute a fixed-length, L2-normalized embedding of the masked region.
    ///
    /// The dimensionality must be consistent across all calls in a run.
    fn embed(&mut self, image: &RgbImage, mask: &Mask) -> Result<Embedding>;
}

/// Natural-language captioning and relation reasoning.
pub trait Captioner {
    /// Describe the central object of an image view.
    fn caption(&mut self, image: &RgbImage) -> Result<String>;

    /// Merge up to ten view-level captions into one object description.
    fn summarize(&mut self, captions: &[String]) -> Result<String>;

    /// Describe the spatial relation between two captioned objects.
    ///
    /// The result is directional ("A is on B"), so argument order matters.
    fn relate(&mut self, caption_a: &str, caption_b: &str) -> Result<String>;
}
