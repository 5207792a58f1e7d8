use std::collections::BTreeMap;
use std::path::Path;

use image::imageops::FilterType;
use image::DynamicImage;
use kmeans_colors::get_kmeans_hamerly;
use palette::Lab;
use rand::seq::index;
use rand::Rng;

use crate::cli::ClusterMethod;
use crate::color::Color;
use crate::error::SchemeError;

/// Number of colors every extraction yields.
pub const PALETTE_SIZE: usize = 16;

pub const MAX_DIM: u32 = 256;
pub const CONVERGE: f64 = 1.0;
const MAX_ITER: usize = 500;
const HAMERLY_MAX_ITER: usize = 20;

/// One distinct pixel color and the number of pixels carrying it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelSample {
    pub color: Color,
    pub weight: u32,
}

/// A cluster center in continuous RGB space.
pub type Center = [f64; 3];

/// A converged cluster with the total sample weight assigned to it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cluster {
    pub center: Center,
    pub weight: u64,
}

impl Cluster {
    pub fn color(&self) -> Color {
        let [r, g, b] = self.center.map(|c| c.round().clamp(0.0, 255.0) as u8);
        Color::new(r, g, b)
    }
}

/// Open and decode an image file.
pub fn load_image(path: &Path) -> Result<DynamicImage, SchemeError> {
    image::open(path).map_err(|source| SchemeError::DecodeUnavailable {
        path: path.to_path_buf(),
        source,
    })
}

/// Resize to fit within `max_dim` x `max_dim` (preserving aspect ratio) and
/// count the occurrences of each exact color.
///
/// Samples come back ordered by color so that seeded runs are reproducible.
pub fn pixel_samples(img: &DynamicImage, max_dim: u32) -> Vec<PixelSample> {
    let rgb_img = if img.width() > max_dim || img.height() > max_dim {
        img.resize(max_dim, max_dim, FilterType::Lanczos3).to_rgb8()
    } else {
        img.to_rgb8()
    };

    let mut counts: BTreeMap<Color, u32> = BTreeMap::new();
    for p in rgb_img.pixels() {
        *counts.entry(Color::new(p[0], p[1], p[2])).or_insert(0) += 1;
    }

    counts
        .into_iter()
        .map(|(color, weight)| PixelSample { color, weight })
        .collect()
}

fn to_center(color: Color) -> Center {
    color.channels().map(f64::from)
}

fn center_distance_sq(a: &Center, b: &Center) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum()
}

/// Index of the center nearest to `color`. Ties go to the lowest index.
pub fn nearest_center(color: Color, centers: &[Center]) -> usize {
    let point = to_center(color);
    let mut best = 0;
    let mut best_dist = f64::INFINITY;
    for (i, center) in centers.iter().enumerate() {
        let dist = center_distance_sq(&point, center);
        if dist < best_dist {
            best = i;
            best_dist = dist;
        }
    }
    best
}

/// Cluster index for every sample, in sample order.
pub fn assign_samples(samples: &[PixelSample], centers: &[Center]) -> Vec<usize> {
    samples
        .iter()
        .map(|s| nearest_center(s.color, centers))
        .collect()
}

/// Weight-averaged centers for the given assignment, plus the total weight
/// of each cluster.
///
/// A cluster that received no samples keeps its previous center.
pub fn recompute_centers(
    samples: &[PixelSample],
    assignments: &[usize],
    previous: &[Center],
) -> (Vec<Center>, Vec<u64>) {
    let mut sums = vec![[0.0f64; 3]; previous.len()];
    let mut weights = vec![0u64; previous.len()];

    for (sample, &idx) in samples.iter().zip(assignments) {
        let w = sample.weight as f64;
        for (acc, c) in sums[idx].iter_mut().zip(to_center(sample.color)) {
            *acc += c * w;
        }
        weights[idx] += sample.weight as u64;
    }

    let centers = sums
        .iter()
        .zip(&weights)
        .zip(previous)
        .map(|((sum, &weight), prev)| {
            if weight == 0 {
                *prev
            } else {
                sum.map(|s| s / weight as f64)
            }
        })
        .collect();

    (centers, weights)
}

/// Largest distance any center moved between two snapshots.
pub fn max_displacement(old: &[Center], new: &[Center]) -> f64 {
    old.iter()
        .zip(new)
        .map(|(a, b)| center_distance_sq(a, b).sqrt())
        .fold(0.0, f64::max)
}

/// Frequency-weighted k-means over RGB samples.
///
/// `k` is capped at the number of distinct samples. Initial centers are `k`
/// samples drawn without replacement from `rng`. Iterates until no center
/// moves further than `threshold`.
pub fn kmeans<R: Rng + ?Sized>(
    samples: &[PixelSample],
    k: usize,
    threshold: f64,
    rng: &mut R,
) -> Vec<Cluster> {
    let k = k.min(samples.len());
    if k == 0 {
        return Vec::new();
    }

    let mut centers: Vec<Center> = index::sample(rng, samples.len(), k)
        .into_vec()
        .into_iter()
        .map(|i| to_center(samples[i].color))
        .collect();
    let mut weights;
    let mut iteration = 0;

    loop {
        iteration += 1;
        let assignments = assign_samples(samples, &centers);
        let (next, next_weights) = recompute_centers(samples, &assignments, &centers);
        let diff = max_displacement(&centers, &next);
        centers = next;
        weights = next_weights;

        tracing::debug!(iteration, diff, "k-means pass");

        if diff <= threshold {
            break;
        }
        if iteration >= MAX_ITER {
            tracing::warn!(iteration, diff, "k-means stopped before converging");
            break;
        }
    }

    centers
        .into_iter()
        .zip(weights)
        .map(|(center, weight)| Cluster { center, weight })
        .collect()
}

/// Unweighted Hamerly k-means in CIELAB, seeded from `rng`.
///
/// `threshold` is handed to `kmeans_colors` as its convergence bound, so it is
/// measured in CIELAB units rather than RGB.
fn hamerly_clusters<R: Rng + ?Sized>(
    samples: &[PixelSample],
    k: usize,
    threshold: f64,
    rng: &mut R,
) -> Vec<Cluster> {
    let k = k.min(samples.len());
    if k == 0 {
        return Vec::new();
    }

    let pixels: Vec<Lab> = samples
        .iter()
        .flat_map(|s| std::iter::repeat(s.color.to_lab()).take(s.weight as usize))
        .collect();
    let seed: u64 = rng.gen();
    let result = get_kmeans_hamerly(
        k,
        HAMERLY_MAX_ITER,
        threshold as f32,
        false,
        &pixels,
        seed,
    );

    let mut counts = vec![0u64; result.centroids.len()];
    for &idx in &result.indices {
        counts[idx as usize] += 1;
    }

    result
        .centroids
        .iter()
        .zip(counts)
        .filter(|(_, count)| *count > 0)
        .map(|(lab, weight)| Cluster {
            center: to_center(Color::from_lab(*lab)),
            weight,
        })
        .collect()
}

/// Cluster the samples and return exactly [`PALETTE_SIZE`] colors.
///
/// Clusters are ordered by weight (heaviest first, ties by cluster index).
/// When the image has fewer distinct colors than the palette size, the
/// ordered clusters are repeated cyclically to fill it.
pub fn extract_palette<R: Rng + ?Sized>(
    samples: &[PixelSample],
    method: ClusterMethod,
    threshold: f64,
    rng: &mut R,
) -> Result<Vec<Color>, SchemeError> {
    let mut clusters = match method {
        ClusterMethod::Weighted => kmeans(samples, PALETTE_SIZE, threshold, rng),
        ClusterMethod::Hamerly => hamerly_clusters(samples, PALETTE_SIZE, threshold, rng),
    };
    if clusters.is_empty() {
        return Err(SchemeError::EmptyImage);
    }

    clusters.sort_by(|a, b| b.weight.cmp(&a.weight));
    tracing::debug!(clusters = clusters.len(), "extracted clusters");

    Ok(clusters
        .iter()
        .cycle()
        .take(PALETTE_SIZE)
        .map(Cluster::color)
        .collect())
}
