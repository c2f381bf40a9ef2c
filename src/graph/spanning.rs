//! Maximum-weight spanning tree over the complete object graph.

use super::disjoint_set::DisjointSet;

/// A candidate edge between two objects with its IoU weight.
#[derive(Clone, Copy, Debug)]
pub struct WeightedPair {
    /// Lower object index.
    pub i: usize,
    /// Higher object index.
    pub j: usize,
    /// Volumetric IoU of the two objects' bounding boxes.
    pub weight: f32,
}

/// Select a maximum-weight spanning tree over `n` nodes.
///
/// `pairs` must cover every unordered node pair. Pairs are processed in
/// descending weight order (ties broken by index order, so the selection is
/// deterministic); an edge is kept only when it connects two components.
/// Zero-weight pairs are valid low-priority candidates, which makes the
/// result a single spanning tree with exactly `n - 1` edges for `n >= 1`.
pub fn spanning_edges(n: usize, pairs: &[WeightedPair]) -> Vec<(usize, usize)> {
    if n <= 1 {
        return Vec::new();
    }

    let mut sorted: Vec<&WeightedPair> = pairs.iter().collect();
    // Stable sort keeps index order among equal weights.
    sorted.sort_by(|a, b| b.weight.partial_cmp(&a.weight).unwrap_or(std::cmp::Ordering::Equal));

    let mut ds = DisjointSet::new(n);
    let mut edges = Vec::with_capacity(n - 1);

    for pair in sorted {
        if ds.union(pair.i, pair.j) {
            edges.push((pair.i, pair.j));
            if edges.len() == n - 1 {
                break;
            }
        }
    }

    edges
}
