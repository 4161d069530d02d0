//! Design token extraction and normalization.
//!
//! - [`quantize()`] clusters pixel samples into dominant [`ColorCluster`]s,
//! - [`categorize`] splits them into primary, grayscale and accents,
//! - [`generate_color_scale`] expands a base color into a [`ColorScale`],
//! - [`Normalizer`] turns raw CSS values into canonical token families,
//! - [`DocumentBuilder`] assembles the final [`TokenDocument`].
//!
//! [`extract_image_colors`] chains the first three steps for an image
//! file and returns a [`ColorReport`]; [`normalize_design_tokens`] does
//! the same for a [`RawExtraction`] document.

use std::path::Path;
use rgb::{RGB, RGB8};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

pub mod error;
pub mod config;
pub mod quantize;
pub mod classify;
pub mod scale;
pub mod normalize;
pub mod assemble;
mod tokens;

pub use crate::error::{ErrorPayload, Response, Result, TokenError};
pub use crate::config::{EngineConfig, NormalizeOptions};
pub use crate::quantize::{quantize, load_samples, ColorCluster, QuantizeOptions};
pub use crate::classify::{categorize, primary_scale, CategorizedPalette};
pub use crate::scale::{generate_color_scale, ColorScale, STEPS};
pub use crate::normalize::{normalize_design_tokens, px_to_rem, Normalizer,
                           RawExtraction, RawStyleValue, RawTypography};
pub use crate::assemble::DocumentBuilder;
pub use crate::tokens::ty::{ColorTokens, TokenDocument, TokenMap,
                            Transitions, Typography};

/// Channels must differ by less than this for a color to count as gray.
pub const GRAYSCALE_THRESHOLD: f64 = 15.;

/// Specifies the methods a RGB color encoding must provide.
pub trait RGBColor: Sized {
    /// Return the red, green and blue components of the color (in
    /// \[0, 255\]).
    fn to_rgb(&self) -> RGB<f64>;

    /// Create a color from its RGB components (in \[0, 255\]).  Values
    /// outside that range are clamped, fractional parts truncated.
    fn from_rgb(rgb: RGB<f64>) -> Self;

    /// Perceived brightness, 0.299 R + 0.587 G + 0.114 B, in \[0, 255\].
    ///
    /// # Example
    ///
    /// ```
    /// use rgb::RGB8;
    /// use design_tokens::RGBColor;
    /// let b = RGB8::new(255, 0, 0).brightness();
    /// assert!((b - 76.245).abs() < 1e-9);
    /// ```
    fn brightness(&self) -> f64 {
        let RGB { r, g, b } = self.to_rgb();
        0.299 * r + 0.587 * g + 0.114 * b
    }

    /// Whether all three pairwise channel differences are below
    /// [`GRAYSCALE_THRESHOLD`].
    fn is_grayscale(&self) -> bool {
        let RGB { r, g, b } = self.to_rgb();
        (r - g).abs() < GRAYSCALE_THRESHOLD
            && (g - b).abs() < GRAYSCALE_THRESHOLD
            && (r - b).abs() < GRAYSCALE_THRESHOLD
    }

    /// Convert the color to grayscale.
    fn to_gray(&self) -> Self {
        let x = self.brightness();
        Self::from_rgb(RGB { r: x, g: x, b: x })
    }

    /// CSS hexadecimal notation `#rrggbb` (lowercase).
    fn to_hex(&self) -> String {
        let RGB { r, g, b } = self.to_rgb();
        format!("#{:02x}{:02x}{:02x}", channel(r), channel(g), channel(b))
    }
}

/// Truncate a channel value to `u8`, saturating at both ends.
#[inline]
fn channel(x: f64) -> u8 { x.clamp(0., 255.) as u8 }

impl RGBColor for RGB<f64> {
    #[inline]
    fn to_rgb(&self) -> RGB<f64> { *self }

    #[inline]
    fn from_rgb(c: RGB<f64>) -> Self { c }
}

impl RGBColor for RGB8 {
    #[inline]
    fn to_rgb(&self) -> RGB<f64> {
        RGB { r: self.r as f64, g: self.g as f64, b: self.b as f64 }
    }

    #[inline]
    fn from_rgb(c: RGB<f64>) -> Self {
        RGB8 { r: channel(c.r), g: channel(c.g), b: channel(c.b) }
    }
}

/// Parse `#rgb`, `#rrggbb` or `#rrggbbaa` (alpha dropped).  The leading
/// `#` is optional.
pub fn parse_hex(s: &str) -> Option<RGB8> {
    let h = s.trim().trim_start_matches('#');
    if !h.is_ascii() { return None }
    let byte = |i: usize| u8::from_str_radix(&h[i .. i + 2], 16).ok();
    match h.len() {
        3 => {
            let mut c = [0u8; 3];
            for (i, d) in h.chars().enumerate() {
                let d = d.to_digit(16)? as u8;
                c[i] = d * 16 + d;
            }
            Some(RGB8::new(c[0], c[1], c[2]))
        }
        6 | 8 => Some(RGB8::new(byte(0)?, byte(2)?, byte(4)?)),
        _ => None,
    }
}

/// Parse a color as reported by computed styles: hexadecimal or
/// `rgb(r, g, b)` / `rgba(r, g, b, a)` with integer channels.
pub fn parse_css_color(s: &str) -> Option<RGB8> {
    let s = s.trim();
    if s.starts_with('#') { return parse_hex(s) }
    let caps = normalize::RGB_FUNCTION.captures(s)?;
    let ch = |i: usize| caps[i].parse::<u8>().ok();
    Some(RGB8::new(ch(1)?, ch(2)?, ch(3)?))
}


/// Dominant colors of an image, as produced by [`extract_image_colors`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorReport {
    /// Number of clusters requested.
    pub total_colors: usize,
    /// All clusters, most frequent first.
    pub all_colors: Vec<ColorCluster>,
    pub categorized: CategorizedPalette,
    /// Absent when the image has no chromatic color.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_scales: Option<ColorScales>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorScales {
    pub primary: ColorScale,
}

impl ColorReport {
    /// Classify `clusters` and derive the primary scale.
    pub fn from_clusters(total_colors: usize, clusters: Vec<ColorCluster>)
                         -> ColorReport {
        let categorized = categorize(&clusters);
        let color_scales = match primary_scale(&categorized) {
            Ok(primary) => Some(ColorScales { primary }),
            Err(e) => {
                warn!(error = %e, "no primary color scale");
                None
            }
        };
        ColorReport { total_colors, all_colors: clusters, categorized,
                      color_scales }
    }
}

/// Extract the dominant colors of the image at `path`.
///
/// The image is downscaled, its pure black and white pixels dropped,
/// the rest subsampled and clustered according to `opts`.
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use design_tokens::{extract_image_colors, QuantizeOptions};
/// let report = extract_image_colors(Path::new("shot.png"),
///                                   &QuantizeOptions::default())?;
/// println!("{}", report.all_colors[0].hex);
/// # Ok::<(), design_tokens::TokenError>(())
/// ```
pub fn extract_image_colors(path: &Path, opts: &QuantizeOptions)
                            -> Result<ColorReport> {
    let samples = load_samples(path, opts.max_dimension)?;
    let clusters = quantize(&samples, opts)?;
    info!(path = %path.display(), clusters = clusters.len(),
          "extracted image colors");
    Ok(ColorReport::from_clusters(opts.colors, clusters))
}
