//! Color statistics and dominant colors

use image::RgbImage;

use super::{FeatureError, Result};
use crate::config::FeatureConfig;
use crate::domain::{ColorFeatures, Signal};

/// Sampling stride for clustering; statistics use every pixel.
const CLUSTER_STRIDE: usize = 4;

/// Per-channel mean and standard deviation plus dominant colors.
pub fn extract(image: &RgbImage, config: &FeatureConfig) -> Result<ColorFeatures> {
    let n = (image.width() as usize) * (image.height() as usize);
    if n == 0 {
        return Err(FeatureError::new(Signal::Color, "empty image"));
    }

    let mut sum = [0.0f64; 3];
    let mut sum_sq = [0.0f64; 3];
    for pixel in image.pixels() {
        for c in 0..3 {
            let v = pixel[c] as f64;
            sum[c] += v;
            sum_sq[c] += v * v;
        }
    }

    let mean = sum.map(|s| s / n as f64);
    let mut std = [0.0f64; 3];
    for c in 0..3 {
        std[c] = (sum_sq[c] / n as f64 - mean[c] * mean[c]).max(0.0).sqrt();
    }

    let samples: Vec<[f64; 3]> = image
        .pixels()
        .step_by(CLUSTER_STRIDE)
        .map(|p| [p[0] as f64, p[1] as f64, p[2] as f64])
        .collect();

    let dominant_colors = dominant_colors(
        &samples,
        config.kmeans_clusters,
        config.kmeans_max_iterations,
        config.kmeans_epsilon,
    );

    Ok(ColorFeatures {
        mean,
        std,
        dominant_colors,
    })
}

/// K-means over RGB samples, largest cluster first.
///
/// Seeding is deterministic: the median-luminance sample first, then the
/// sample farthest from every chosen seed.
/// Stops after `max_iterations` or once no centroid moves by `epsilon` or more.
pub fn dominant_colors(
    samples: &[[f64; 3]],
    k: usize,
    max_iterations: usize,
    epsilon: f64,
) -> Vec<[u8; 3]> {
    if samples.is_empty() || k == 0 {
        return Vec::new();
    }

    let mut centroids = seed_centroids(samples, k);
    let mut assignments = vec![0usize; samples.len()];

    for _ in 0..max_iterations {
        for (slot, sample) in assignments.iter_mut().zip(samples) {
            *slot = nearest(&centroids, sample);
        }

        let mut sums = vec![[0.0f64; 3]; centroids.len()];
        let mut counts = vec![0usize; centroids.len()];
        for (&cluster, sample) in assignments.iter().zip(samples) {
            counts[cluster] += 1;
            for c in 0..3 {
                sums[cluster][c] += sample[c];
            }
        }

        let mut movement = 0.0f64;
        for (i, centroid) in centroids.iter_mut().enumerate() {
            // Empty clusters keep their previous centroid
            if counts[i] == 0 {
                continue;
            }
            let updated = sums[i].map(|s| s / counts[i] as f64);
            movement = movement.max(distance_sq(centroid, &updated).sqrt());
            *centroid = updated;
        }

        if movement < epsilon {
            break;
        }
    }

    let mut counts = vec![0usize; centroids.len()];
    for sample in samples {
        counts[nearest(&centroids, sample)] += 1;
    }

    let mut ranked: Vec<(usize, [f64; 3])> = counts.into_iter().zip(centroids).collect();
    ranked.sort_by(|a, b| b.0.cmp(&a.0));

    ranked
        .into_iter()
        .map(|(_, c)| c.map(|v| v.round().clamp(0.0, 255.0) as u8))
        .collect()
}

fn seed_centroids(samples: &[[f64; 3]], k: usize) -> Vec<[f64; 3]> {
    let luma = |p: &[f64; 3]| 0.299 * p[0] + 0.587 * p[1] + 0.114 * p[2];
    let mut order: Vec<usize> = (0..samples.len()).collect();
    order.sort_by(|&a, &b| luma(&samples[a]).total_cmp(&luma(&samples[b])).then(a.cmp(&b)));

    let mut centroids = vec![samples[order[samples.len() / 2]]];
    let mut closest: Vec<f64> = samples
        .iter()
        .map(|s| distance_sq(s, &centroids[0]))
        .collect();

    while centroids.len() < k {
        let mut far = 0;
        for (i, d) in closest.iter().enumerate() {
            if *d > closest[far] {
                far = i;
            }
        }
        let seed = samples[far];
        for (d, s) in closest.iter_mut().zip(samples) {
            *d = d.min(distance_sq(s, &seed));
        }
        centroids.push(seed);
    }

    centroids
}

fn nearest(centroids: &[[f64; 3]], sample: &[f64; 3]) -> usize {
    let mut best = 0;
    let mut best_distance = f64::INFINITY;
    for (i, centroid) in centroids.iter().enumerate() {
        let d = distance_sq(centroid, sample);
        if d < best_distance {
            best = i;
            best_distance = d;
        }
    }
    best
}

fn distance_sq(a: &[f64; 3], b: &[f64; 3]) -> f64 {
    (0..3).map(|c| (a[c] - b[c]).powi(2)).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use image::Rgb;

    #[test]
    fn test_uniform_statistics() {
        let image = RgbImage::from_pixel(32, 32, Rgb([10, 100, 200]));
        let features = extract(&image, &FeatureConfig::default()).unwrap();
        assert_relative_eq!(features.mean[0], 10.0);
        assert_relative_eq!(features.mean[2], 200.0);
        assert_relative_eq!(features.std[1], 0.0);
        assert_eq!(features.dominant_colors[0], [10, 100, 200]);
    }

    #[test]
    fn test_two_tone_std() {
        let image = RgbImage::from_fn(32, 32, |x, _| {
            if x < 16 {
                Rgb([0, 0, 0])
            } else {
                Rgb([200, 200, 200])
            }
        });
        let features = extract(&image, &FeatureConfig::default()).unwrap();
        assert_relative_eq!(features.mean[0], 100.0);
        assert_relative_eq!(features.std[0], 100.0, epsilon = 1e-9);
    }

    #[test]
    fn test_dominant_colors_find_clusters() {
        let mut samples = vec![[250.0, 10.0, 10.0]; 60];
        samples.extend(vec![[10.0, 10.0, 250.0]; 30]);
        samples.extend(vec![[10.0, 250.0, 10.0]; 10]);

        let colors = dominant_colors(&samples, 3, 10, 1.0);
        assert_eq!(colors.len(), 3);
        assert_eq!(colors[0], [250, 10, 10]);
        assert_eq!(colors[1], [10, 10, 250]);
        assert_eq!(colors[2], [10, 250, 10]);
    }

    #[test]
    fn test_dominant_colors_deterministic() {
        let samples: Vec<[f64; 3]> = (0..500)
            .map(|i| [(i * 7 % 256) as f64, (i * 13 % 256) as f64, (i * 29 % 256) as f64])
            .collect();
        assert_eq!(
            dominant_colors(&samples, 3, 10, 1.0),
            dominant_colors(&samples, 3, 10, 1.0)
        );
    }

    #[test]
    fn test_empty_image_fails() {
        let image = RgbImage::new(0, 0);
        let err = extract(&image, &FeatureConfig::default()).unwrap_err();
        assert_eq!(err.signal, Signal::Color);
    }
}
