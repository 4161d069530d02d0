//! Split clusters into a primary color, grays and accents.

use serde::{Deserialize, Serialize};
use crate::{ColorCluster, ColorScale, Result, TokenError};

/// A chromatic cluster above this share is a primary candidate.
pub const PRIMARY_MIN_PERCENTAGE: f64 = 5.;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorizedPalette {
    pub primary: Option<ColorCluster>,
    /// Darkest first.
    pub grayscale: Vec<ColorCluster>,
    /// Chromatic clusters other than the primary, in input order.
    pub accents: Vec<ColorCluster>,
}

/// Categorize `clusters` (expected most frequent first).
///
/// The primary is the first chromatic cluster covering more than
/// [`PRIMARY_MIN_PERCENTAGE`] percent, or the first chromatic one if
/// none does.  It is removed from the accents by position, so a
/// duplicate of the primary stays an accent.
pub fn categorize(clusters: &[ColorCluster]) -> CategorizedPalette {
    let (gray, chromatic): (Vec<&ColorCluster>, Vec<&ColorCluster>) =
        clusters.iter().partition(|c| c.is_grayscale);
    let mut grayscale: Vec<ColorCluster> = gray.into_iter().cloned().collect();
    grayscale.sort_by(|a, b| a.brightness.total_cmp(&b.brightness));
    let primary_idx = chromatic.iter()
        .position(|c| c.percentage > PRIMARY_MIN_PERCENTAGE)
        .or(if chromatic.is_empty() { None } else { Some(0) });
    let primary = primary_idx.map(|i| chromatic[i].clone());
    let accents = chromatic.iter().enumerate()
        .filter(|&(i, _)| Some(i) != primary_idx)
        .map(|(_, &c)| c.clone())
        .collect();
    CategorizedPalette { primary, grayscale, accents }
}

/// The scale of the palette's primary color.
pub fn primary_scale(palette: &CategorizedPalette) -> Result<ColorScale> {
    match &palette.primary {
        Some(p) => crate::generate_color_scale(&p.hex),
        None => Err(TokenError::NoChromaticColors),
    }
}
