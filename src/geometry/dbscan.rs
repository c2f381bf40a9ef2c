//! Density-based outlier rejection for object point clouds.
//!
//! Detections lifted from noisy depth carry stray points (depth bleed at
//! mask borders, sensor speckle). DBSCAN clustering groups the dense body
//! of the object and drops sparse outliers; only the largest cluster is
//! kept.
//!
//! # Never-return-empty policy
//!
//! If clustering marks every point as noise, the input is returned
//! unchanged. An empty cloud must never propagate out of the filter, since
//! downstream bounding-box computation assumes at least the original
//! points survive.

use kiddo::{KdTree, SquaredEuclidean};

use crate::core::PointCloud3D;

/// Configuration for the DBSCAN outlier filter.
#[derive(Clone, Debug)]
pub struct DbscanConfig {
    /// Neighborhood radius (meters).
    /// Default: 0.03m
    pub eps: f32,

    /// Minimum neighborhood size (including the point itself) for a point
    /// to be a cluster core.
    /// Default: 20
    pub min_points: usize,
}

impl Default for DbscanConfig {
    fn default() -> Self {
        Self {
            eps: 0.03,
            min_points: 20,
        }
    }
}

impl DbscanConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter for the neighborhood radius.
    pub fn with_eps(mut self, meters: f32) -> Self {
        self.eps = meters;
        self
    }

    /// Builder-style setter for the minimum neighborhood size.
    pub fn with_min_points(mut self, count: usize) -> Self {
        self.min_points = count;
        self
    }
}

/// Density-based outlier filter.
#[derive(Clone, Debug, Default)]
pub struct DbscanFilter {
    config: DbscanConfig,
}

const UNVISITED: i32 = -2;
const NOISE: i32 = -1;

impl DbscanFilter {
    /// Create a new filter with the given configuration.
    pub fn new(config: DbscanConfig) -> Self {
        Self { config }
    }

    /// Get the current configuration.
    pub fn config(&self) -> &DbscanConfig {
        &self.config
    }

    /// Cluster the cloud and keep the largest cluster.
    ///
    /// Returns the input unchanged when no cluster survives (all points
    /// noise, or fewer points than `min_points`).
    pub fn filter(&self, cloud: &PointCloud3D) -> PointCloud3D {
        if cloud.len() < self.config.min_points {
            return cloud.clone();
        }

        let labels = self.cluster(cloud);

        // Cluster sizes; labels are 0..n_clusters.
        let n_clusters = labels.iter().copied().max().map_or(0, |m| (m + 1).max(0)) as usize;
        if n_clusters == 0 {
            return cloud.clone();
        }
        let mut sizes = vec![0usize; n_clusters];
        for &l in &labels {
            if l >= 0 {
                sizes[l as usize] += 1;
            }
        }
        let largest = sizes
            .iter()
            .enumerate()
            .max_by_key(|(_, &s)| s)
            .map(|(i, _)| i as i32)
            .unwrap_or(0);

        let indices: Vec<usize> = labels
            .iter()
            .enumerate()
            .filter(|(_, &l)| l == largest)
            .map(|(i, _)| i)
            .collect();
        cloud.select(&indices)
    }

    /// Run DBSCAN, returning a cluster label per point (NOISE = -1).
    fn cluster(&self, cloud: &PointCloud3D) -> Vec<i32> {
        let n = cloud.len();
        let eps_sq = self.config.eps * self.config.eps;

        let mut tree: KdTree<f32, 3> = KdTree::new();
        for (i, p) in cloud.iter().enumerate() {
            tree.add(&p.to_array(), i as u64);
        }

        let neighborhood = |i: usize| -> Vec<usize> {
            let p = cloud.get(i).unwrap();
            tree.within_unsorted::<SquaredEuclidean>(&p.to_array(), eps_sq)
                .into_iter()
                .map(|nn| nn.item as usize)
                .collect()
        };

        let mut labels = vec![UNVISITED; n];
        let mut cluster_id = -1;

        for i in 0..n {
            if labels[i] != UNVISITED {
                continue;
            }
            let neighbors = neighborhood(i);
            if neighbors.len() < self.config.min_points {
                labels[i] = NOISE;
                continue;
            }

            cluster_id += 1;
            labels[i] = cluster_id;

            // Expand the cluster breadth-first.
            let mut queue: Vec<usize> = neighbors;
            while let Some(j) = queue.pop() {
                if labels[j] == NOISE {
                    labels[j] = cluster_id; // border point
                }
                if labels[j] != UNVISITED {
                    continue;
                }
                labels[j] = cluster_id;
                let next = neighborhood(j);
                if next.len() >= self.config.min_points {
                    queue.extend(next);
                }
            }
        }

        labels
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Point3D;

    /// Dense axis-aligned blob of `count` points spaced well inside `eps`.
    fn blob(center: Point3D, count: usize, spacing: f32) -> Vec<Point3D> {
        (0..count)
            .map(|i| Point3D::new(center.x + i as f32 * spacing, center.y, center.z))
            .collect()
    }

    #[test]
    fn test_keeps_largest_cluster_drops_outlier() {
        let config = DbscanConfig::new().with_eps(0.05).with_min_points(3);
        let filter = DbscanFilter::new(config);

        let mut points = blob(Point3D::ZERO, 10, 0.01);
        points.push(Point3D::new(5.0, 5.0, 5.0)); // lone outlier

        let out = filter.filter(&PointCloud3D::from_points(&points));
        assert_eq!(out.len(), 10);
        assert!(out.iter().all(|p| p.x < 1.0));
    }

    #[test]
    fn test_two_clusters_keeps_bigger() {
        let config = DbscanConfig::new().with_eps(0.05).with_min_points(3);
        let filter = DbscanFilter::new(config);

        let mut points = blob(Point3D::ZERO, 8, 0.01);
        points.extend(blob(Point3D::new(10.0, 0.0, 0.0), 4, 0.01));

        let out = filter.filter(&PointCloud3D::from_points(&points));
        assert_eq!(out.len(), 8);
    }

    #[test]
    fn test_all_noise_returns_input() {
        let config = DbscanConfig::new().with_eps(0.01).with_min_points(3);
        let filter = DbscanFilter::new(config);

        // Three points far apart: every neighborhood is just the point itself.
        let points = vec![
            Point3D::ZERO,
            Point3D::new(1.0, 0.0, 0.0),
            Point3D::new(2.0, 0.0, 0.0),
        ];
        let out = filter.filter(&PointCloud3D::from_points(&points));
        assert_eq!(out.len(), 3);
    }

    #[test]
    fn test_small_input_passes_through() {
        let filter = DbscanFilter::new(DbscanConfig::default());
        let points = vec![Point3D::ZERO];
        let out = filter.filter(&PointCloud3D::from_points(&points));
        assert_eq!(out.len(), 1);

        let empty = filter.filter(&PointCloud3D::new());
        assert!(empty.is_empty());
    }
}
