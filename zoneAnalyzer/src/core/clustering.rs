// K-means partitioning of accepted zones into development areas
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::debug;

use crate::config::scan_config::ClusteringConfig;
use crate::data::poi::GridPoint;
use crate::models::zone::{Cluster, Zone};

#[derive(Debug, Clone, PartialEq)]
pub struct KMeansResult {
    /// Cluster index per input point
    pub labels: Vec<usize>,
    pub centroids: Vec<[f64; 2]>,
    pub iterations: usize,
    pub converged: bool,
}

fn squared_distance(a: &[f64; 2], b: &[f64; 2]) -> f64 {
    (a[0] - b[0]).powi(2) + (a[1] - b[1]).powi(2)
}

fn nearest_centroid(point: &[f64; 2], centroids: &[[f64; 2]]) -> usize {
    let mut best_cluster = 0;
    let mut best_dist = f64::INFINITY;
    for (j, centroid) in centroids.iter().enumerate() {
        let dist = squared_distance(point, centroid);
        if dist < best_dist {
            best_dist = dist;
            best_cluster = j;
        }
    }
    best_cluster
}

/// Lloyd's k-means with seeded initialization.
///
/// `k` is capped at the number of points and the starting centroids are
/// distinct points drawn without replacement. A cluster that loses all its
/// points keeps its previous centroid. Runs at most `max_iterations` rounds.
pub fn kmeans(points: &[[f64; 2]], requested_k: usize, config: &ClusteringConfig) -> KMeansResult {
    let k = requested_k.min(points.len());
    if k == 0 {
        return KMeansResult { labels: Vec::new(), centroids: Vec::new(), iterations: 0, converged: true };
    }

    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut centroids: Vec<[f64; 2]> = rand::seq::index::sample(&mut rng, points.len(), k)
        .into_iter()
        .map(|i| points[i])
        .collect();

    let mut labels = vec![0usize; points.len()];
    let mut iterations = 0;
    let mut converged = false;

    for _ in 0..config.max_iterations {
        iterations += 1;

        for (label, point) in labels.iter_mut().zip(points) {
            *label = nearest_centroid(point, &centroids);
        }

        let mut sums = vec![[0.0, 0.0]; k];
        let mut counts = vec![0usize; k];
        for (&label, point) in labels.iter().zip(points) {
            sums[label][0] += point[0];
            sums[label][1] += point[1];
            counts[label] += 1;
        }

        let mut max_shift: f64 = 0.0;
        for j in 0..k {
            if counts[j] == 0 {
                debug!("k-means cluster {} is empty; keeping its previous centroid", j);
                continue;
            }
            let updated = [sums[j][0] / counts[j] as f64, sums[j][1] / counts[j] as f64];
            max_shift = max_shift.max(squared_distance(&updated, &centroids[j]).sqrt());
            centroids[j] = updated;
        }

        if max_shift < config.tolerance {
            converged = true;
            break;
        }
    }

    KMeansResult { labels, centroids, iterations, converged }
}

/// Labels every zone with a cluster and summarizes each non-empty cluster.
///
/// Clustering runs on (longitude, latitude). Summaries are ordered by
/// cluster id and their centroid is the mean of the member coordinates.
pub fn cluster_zones(zones: &mut [Zone], config: &ClusteringConfig) -> Vec<Cluster> {
    if zones.is_empty() {
        return Vec::new();
    }

    let coords: Vec<[f64; 2]> = zones
        .iter()
        .map(|zone| [zone.point.longitude, zone.point.latitude])
        .collect();

    let result = kmeans(&coords, config.n_clusters, config);
    debug!(
        "k-means finished after {} iterations (converged: {})",
        result.iterations, result.converged
    );

    for (zone, &label) in zones.iter_mut().zip(&result.labels) {
        zone.cluster_id = Some(label);
    }

    (0..result.centroids.len())
        .filter_map(|cluster_id| {
            let members: Vec<&Zone> = zones
                .iter()
                .filter(|zone| zone.cluster_id == Some(cluster_id))
                .collect();
            if members.is_empty() {
                return None;
            }

            let n = members.len() as f64;
            let mean = |f: fn(&Zone) -> f64| members.iter().map(|z| f(z)).sum::<f64>() / n;

            Some(Cluster {
                cluster_id,
                member_count: members.len(),
                centroid: GridPoint::new(mean(|z| z.point.latitude), mean(|z| z.point.longitude)),
                mean_composite_score: mean(|z| z.scores.composite_score),
                mean_wind_speed: mean(|z| z.wind_speed_mps),
                mean_grid_distance: mean(|z| z.grid_distance_km),
            })
        })
        .collect()
}
