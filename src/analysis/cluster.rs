//! K-means clustering over TF-IDF document vectors.
//!
//! Plain Lloyd iterations with seeded random initialization: centroids
//! start at k distinct documents, assignments use squared Euclidean
//! distance, and a cluster that empties out is reseeded to a random
//! document. Iteration stops when assignments stabilize.

use crate::analysis::topics::TfidfMatrix;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

/// Fitted clustering: per-document assignments and final centroids.
#[derive(Debug, Clone, PartialEq)]
pub struct KMeansResult {
    pub assignments: Vec<usize>,
    pub centroids: Vec<Vec<f64>>,
}

/// One output row of `analyze clusters` (assignment part).
#[derive(Debug, Clone, Serialize)]
pub struct ClusterAssignmentRow {
    pub title: String,
    pub language: String,
    pub cluster: usize,
}

/// One output row of `analyze clusters` (per-cluster term part).
#[derive(Debug, Clone, Serialize)]
pub struct ClusterTermRow {
    pub cluster: usize,
    pub rank: usize,
    pub term: String,
    pub weight: f64,
}

fn squared_distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum()
}

/// Run k-means over the rows, `k` clamped to the row count.
pub fn kmeans(rows: &[Vec<f64>], k: usize, max_iterations: usize, seed: u64) -> KMeansResult {
    let n = rows.len();
    if n == 0 || k == 0 {
        return KMeansResult {
            assignments: Vec::new(),
            centroids: Vec::new(),
        };
    }
    let k = k.min(n);
    let dims = rows[0].len();

    let mut rng = StdRng::seed_from_u64(seed);
    let mut centroids: Vec<Vec<f64>> = rand::seq::index::sample(&mut rng, n, k)
        .into_iter()
        .map(|i| rows[i].clone())
        .collect();
    let mut assignments = vec![usize::MAX; n];

    for _ in 0..max_iterations {
        let mut changed = false;
        for (i, row) in rows.iter().enumerate() {
            let nearest = centroids
                .iter()
                .enumerate()
                .map(|(c, centroid)| (c, squared_distance(row, centroid)))
                .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap())
                .map(|(c, _)| c)
                .unwrap_or(0);
            if assignments[i] != nearest {
                assignments[i] = nearest;
                changed = true;
            }
        }
        if !changed {
            break;
        }

        let mut sums = vec![vec![0.0f64; dims]; k];
        let mut counts = vec![0usize; k];
        for (row, &cluster) in rows.iter().zip(&assignments) {
            counts[cluster] += 1;
            for (sum, value) in sums[cluster].iter_mut().zip(row) {
                *sum += value;
            }
        }
        for (cluster, (sum, &count)) in sums.iter().zip(&counts).enumerate() {
            if count == 0 {
                centroids[cluster] = rows[rng.random_range(0..n)].clone();
            } else {
                centroids[cluster] = sum.iter().map(|v| v / count as f64).collect();
            }
        }
    }

    KMeansResult {
        assignments,
        centroids,
    }
}

/// Heaviest mean-TF-IDF terms per cluster.
pub fn top_terms_per_cluster(
    matrix: &TfidfMatrix,
    assignments: &[usize],
    clusters: usize,
    limit: usize,
) -> Vec<Vec<(String, f64)>> {
    let dims = matrix.terms.len();
    let mut sums = vec![vec![0.0f64; dims]; clusters];
    let mut counts = vec![0usize; clusters];

    for (row, &cluster) in matrix.rows.iter().zip(assignments) {
        counts[cluster] += 1;
        for (sum, value) in sums[cluster].iter_mut().zip(row) {
            *sum += value;
        }
    }

    sums.iter()
        .zip(&counts)
        .map(|(sum, &count)| {
            if count == 0 {
                return Vec::new();
            }
            let mut terms: Vec<(String, f64)> = matrix
                .terms
                .iter()
                .zip(sum)
                .map(|(term, value)| (term.clone(), value / count as f64))
                .collect();
            terms.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap().then_with(|| a.0.cmp(&b.0)));
            terms.truncate(limit);
            terms
        })
        .collect()
}
