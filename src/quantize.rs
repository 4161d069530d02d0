//! Dominant colors by k-means clustering in RGB space.

use std::path::Path;
use image::{imageops::FilterType, DynamicImage, ImageError, ImageReader};
use rand::{rngs::StdRng, Rng, SeedableRng};
use rgb::{RGB, RGB8};
use serde::{Deserialize, Serialize};
use tracing::debug;
use crate::{RGBColor, Result, TokenError};

/// One cluster of similar pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorCluster {
    /// Centroid rounded to integer channels.
    pub rgb: [u8; 3],
    /// `#rrggbb` of [`Self::rgb`].
    pub hex: String,
    /// Share of the clustered samples, in \[0, 100\], 2 decimals.
    pub percentage: f64,
    /// [`RGBColor::brightness`] of the centroid, 2 decimals.
    pub brightness: f64,
    pub is_grayscale: bool,
}

fn round2(x: f64) -> f64 { (x * 100.).round() / 100. }

impl ColorCluster {
    /// Build a cluster from its (unrounded) centroid.  Brightness uses
    /// the exact centroid; the grayscale test uses the rounded channels,
    /// so that it agrees with any later test on `hex`.
    pub fn from_centroid(c: RGB<f64>, percentage: f64) -> ColorCluster {
        let rounded = RGB8::from_rgb(RGB { r: c.r.round(), g: c.g.round(),
                                           b: c.b.round() });
        ColorCluster {
            rgb: [rounded.r, rounded.g, rounded.b],
            hex: rounded.to_hex(),
            percentage: round2(percentage),
            brightness: round2(c.brightness()),
            is_grayscale: rounded.is_grayscale(),
        }
    }

    pub fn to_rgb8(&self) -> RGB8 {
        RGB8::new(self.rgb[0], self.rgb[1], self.rgb[2])
    }
}

/// Parameters of [`quantize`] and [`crate::extract_image_colors`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuantizeOptions {
    /// Number of clusters K.
    pub colors: usize,
    /// Fraction of the pixels fed to k-means, in (0, 1].
    pub sample_fraction: f64,
    /// Images whose longer side exceeds this are downscaled first.
    pub max_dimension: u32,
    pub seed: u64,
    /// Number of k-means initializations; the lowest inertia wins.
    pub n_init: usize,
    pub max_iter: usize,
    /// Convergence threshold, relative to the mean channel variance.
    pub tolerance: f64,
}

impl Default for QuantizeOptions {
    fn default() -> Self {
        Self {
            colors: 16,
            sample_fraction: 0.1,
            max_dimension: 800,
            seed: 42,
            n_init: 10,
            max_iter: 300,
            tolerance: 1e-4,
        }
    }
}

impl QuantizeOptions {
    /// Same options with `colors` clusters.
    pub fn with_colors(mut self, colors: usize) -> Self {
        self.colors = colors;
        self
    }

    pub fn with_sample_fraction(mut self, f: f64) -> Self {
        self.sample_fraction = f;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.colors == 0 {
            return Err(TokenError::invalid_parameter("colors", self.colors))
        }
        // Also rejects NaN.
        if !(self.sample_fraction > 0. && self.sample_fraction <= 1.) {
            return Err(TokenError::invalid_parameter("sample_fraction",
                                                     self.sample_fraction))
        }
        if self.max_dimension == 0 {
            return Err(TokenError::invalid_parameter("max_dimension",
                                                     self.max_dimension))
        }
        if self.n_init == 0 {
            return Err(TokenError::invalid_parameter("n_init", self.n_init))
        }
        Ok(())
    }
}

/// Pure black and pure white are usually backgrounds.
#[inline]
fn is_background(c: &RGB8) -> bool {
    (c.r, c.g, c.b) == (0, 0, 0) || (c.r, c.g, c.b) == (255, 255, 255)
}

/// Size of a `w`×`h` image once its longer side is capped at `max`.
pub fn scaled_dimensions(w: u32, h: u32, max: u32) -> (u32, u32) {
    if w <= max && h <= max { return (w, h) }
    let ratio = (max as f64 / w as f64).min(max as f64 / h as f64);
    (((w as f64 * ratio) as u32).max(1), ((h as f64 * ratio) as u32).max(1))
}

fn decode(path: &Path) -> Result<DynamicImage> {
    let io = |e| TokenError::ImageDecode { source: ImageError::IoError(e) };
    ImageReader::open(path).map_err(io)?
        .with_guessed_format().map_err(io)?
        .decode()
        .map_err(|source| TokenError::ImageDecode { source })
}

/// Decode the image at `path`, downscale it so that its longer side is
/// at most `max_dimension` and return its pixels in row-major order.
pub fn load_samples(path: &Path, max_dimension: u32) -> Result<Vec<RGB8>> {
    if !path.exists() {
        return Err(TokenError::FileNotFound { path: path.to_path_buf() })
    }
    let mut img = decode(path)?;
    let (w, h) = (img.width(), img.height());
    let (nw, nh) = scaled_dimensions(w, h, max_dimension.max(1));
    if (nw, nh) != (w, h) {
        debug!(w, h, nw, nh, "downscaling image");
        img = img.resize_exact(nw, nh, FilterType::Lanczos3);
    }
    Ok(img.to_rgb8().pixels().map(|p| RGB8::new(p[0], p[1], p[2])).collect())
}

/// Cluster `samples` into exactly `opts.colors` colors, most frequent
/// first.
///
/// Pure black and white samples are dropped, then at most
/// `opts.sample_fraction` of the rest (but never fewer than
/// `opts.colors`) is drawn at random.  Same samples and options always
/// give the same clusters.
pub fn quantize(samples: &[RGB8], opts: &QuantizeOptions)
                -> Result<Vec<ColorCluster>> {
    opts.validate()?;
    let kept: Vec<RGB8> = samples.iter().copied()
        .filter(|c| !is_background(c)).collect();
    if kept.is_empty() { return Err(TokenError::EmptySamples) }
    if kept.len() < opts.colors {
        return Err(TokenError::InsufficientSamples {
            found: kept.len(), requested: opts.colors })
    }
    let mut rng = StdRng::seed_from_u64(opts.seed);
    let points = subsample(&kept, opts.sample_fraction, opts.colors, &mut rng);
    debug!(samples = samples.len(), kept = kept.len(), clustered = points.len(),
           k = opts.colors, "clustering");
    let fit = kmeans(&points, opts.colors, opts, &mut rng)
        .ok_or_else(|| TokenError::Clustering {
            message: "no initialization reached a finite inertia".into() })?;
    let mut counts = vec![0usize; opts.colors];
    for &l in &fit.labels { counts[l] += 1 }
    let total = points.len() as f64;
    let mut clusters: Vec<_> = fit.centroids.iter().zip(&counts)
        .map(|(c, &n)| {
            let c = RGB { r: c[0], g: c[1], b: c[2] };
            ColorCluster::from_centroid(c, n as f64 / total * 100.) })
        .collect();
    clusters.sort_by(|a, b| b.percentage.total_cmp(&a.percentage));
    Ok(clusters)
}

fn subsample(kept: &[RGB8], fraction: f64, k: usize, rng: &mut StdRng)
             -> Vec<[f64; 3]> {
    let len = kept.len();
    let wanted = ((len as f64 * fraction) as usize).max(k).min(len);
    let point = |c: &RGB8| [c.r as f64, c.g as f64, c.b as f64];
    if wanted == len {
        kept.iter().map(point).collect()
    } else {
        rand::seq::index::sample(rng, len, wanted).into_iter()
            .map(|i| point(&kept[i])).collect()
    }
}


struct Fit {
    centroids: Vec<[f64; 3]>,
    labels: Vec<usize>,
    inertia: f64, // sum of squared distances to the assigned centroid
}

#[inline]
fn dist2(p: &[f64; 3], q: &[f64; 3]) -> f64 {
    let (dr, dg, db) = (p[0] - q[0], p[1] - q[1], p[2] - q[2]);
    dr * dr + dg * dg + db * db
}

/// Mean over the channels of their variance.
fn mean_variance(points: &[[f64; 3]]) -> f64 {
    let n = points.len() as f64;
    let mut v = 0.;
    for c in 0 .. 3 {
        let mean = points.iter().map(|p| p[c]).sum::<f64>() / n;
        v += points.iter().map(|p| (p[c] - mean).powi(2)).sum::<f64>() / n;
    }
    v / 3.
}

/// Best of `opts.n_init` runs.  `points.len() >= k >= 1`.
fn kmeans(points: &[[f64; 3]], k: usize, opts: &QuantizeOptions,
          rng: &mut StdRng) -> Option<Fit> {
    let tol = opts.tolerance * mean_variance(points);
    let mut best: Option<Fit> = None;
    for run in 0 .. opts.n_init {
        let fit = lloyd(points, seed_centroids(points, k, rng),
                        opts.max_iter, tol);
        debug!(run, inertia = fit.inertia, "k-means run");
        if !fit.inertia.is_finite() { continue }
        if best.as_ref().map_or(true, |b| fit.inertia < b.inertia) {
            best = Some(fit)
        }
    }
    best
}

/// k-means++ seeding: each new centroid is a sample drawn with
/// probability proportional to its squared distance to the nearest
/// centroid chosen so far.
fn seed_centroids(points: &[[f64; 3]], k: usize, rng: &mut StdRng)
                  -> Vec<[f64; 3]> {
    let mut centroids = Vec::with_capacity(k);
    centroids.push(points[rng.random_range(0 .. points.len())]);
    let mut d2: Vec<f64> = points.iter()
        .map(|p| dist2(p, &centroids[0])).collect();
    while centroids.len() < k {
        let total: f64 = d2.iter().sum();
        let i = if total > 0. {
            let mut target = rng.random::<f64>() * total;
            let mut chosen = d2.len() - 1;
            for (i, &d) in d2.iter().enumerate() {
                if target < d { chosen = i; break }
                target -= d;
            }
            chosen
        } else {
            // All remaining samples coincide with a centroid.
            rng.random_range(0 .. points.len())
        };
        let c = points[i];
        for (d, p) in d2.iter_mut().zip(points) { *d = d.min(dist2(p, &c)) }
        centroids.push(c);
    }
    centroids
}

/// Assign every point to its nearest centroid (lowest index on ties)
/// and return the inertia.
fn assign(points: &[[f64; 3]], centroids: &[[f64; 3]], labels: &mut [usize])
          -> f64 {
    let mut inertia = 0.;
    for (p, l) in points.iter().zip(labels.iter_mut()) {
        let mut best = f64::INFINITY;
        for (j, c) in centroids.iter().enumerate() {
            let d = dist2(p, c);
            if d < best { best = d; *l = j }
        }
        inertia += best;
    }
    inertia
}

fn lloyd(points: &[[f64; 3]], mut centroids: Vec<[f64; 3]>,
         max_iter: usize, tol: f64) -> Fit {
    let k = centroids.len();
    let mut labels = vec![0; points.len()];
    for _ in 0 .. max_iter.max(1) {
        assign(points, &centroids, &mut labels);
        let mut sums = vec![[0.; 3]; k];
        let mut counts = vec![0usize; k];
        for (p, &l) in points.iter().zip(&labels) {
            for c in 0 .. 3 { sums[l][c] += p[c] }
            counts[l] += 1;
        }
        let mut shift = 0.;
        for j in 0 .. k {
            // An empty cluster keeps its centroid.
            if counts[j] == 0 { continue }
            let n = counts[j] as f64;
            let m = [sums[j][0] / n, sums[j][1] / n, sums[j][2] / n];
            shift += dist2(&m, &centroids[j]);
            centroids[j] = m;
        }
        if shift <= tol { break }
    }
    let inertia = assign(points, &centroids, &mut labels);
    Fit { centroids, labels, inertia }
}
