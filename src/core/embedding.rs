//! Semantic embedding vector.
//!
//! Embedders produce unit-norm vectors; fused object features are running
//! means of those vectors and are not renormalized by default, so consumers
//! must tolerate norms below 1.0 (see [`crate::similarity::semantic_similarity`]).

use serde::{Deserialize, Serialize};

/// A fixed-length semantic feature vector.
///
/// The dimensionality is set by the embedder and must be consistent across
/// all detections in a run; arithmetic between mismatched lengths panics.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Embedding(pub Vec<f32>);

impl Embedding {
    /// Create an embedding from raw components.
    pub fn new(values: Vec<f32>) -> Self {
        Self(values)
    }

    /// Create a zero embedding of the given dimensionality.
    pub fn zeros(dim: usize) -> Self {
        Self(vec![0.0; dim])
    }

    /// Dimensionality of the vector.
    #[inline]
    pub fn dim(&self) -> usize {
        self.0.len()
    }

    /// Dot product with another embedding.
    pub fn dot(&self, other: &Embedding) -> f32 {
        assert_eq!(self.dim(), other.dim(), "embedding dimension mismatch");
        self.0.iter().zip(other.0.iter()).map(|(a, b)| a * b).sum()
    }

    /// L2 norm.
    pub fn norm(&self) -> f32 {
        self.dot(self).sqrt()
    }

    /// Unit-norm copy of this embedding.
    ///
    /// A zero vector is returned unchanged (no direction to preserve).
    pub fn normalized(&self) -> Embedding {
        let n = self.norm();
        if n <= f32::EPSILON {
            return self.clone();
        }
        Embedding(self.0.iter().map(|v| v / n).collect())
    }

    /// Running-mean update: `(count * self + other) / (count + 1)`.
    ///
    /// Used by fusion to fold one more detection feature into an object
    /// feature that already averages `count` detections.
    pub fn running_mean(&self, other: &Embedding, count: usize) -> Embedding {
        assert_eq!(self.dim(), other.dim(), "embedding dimension mismatch");
        let c = count as f32;
        Embedding(
            self.0
                .iter()
                .zip(other.0.iter())
                .map(|(a, b)| (c * a + b) / (c + 1.0))
                .collect(),
        )
    }
}
