//! Tint/shade ramps from a single base color.
//!
//! Channels are scaled linearly in RGB, without going through a
//! perceptual color space: lighter steps multiply by
//! `1 + (500 - step) / 500 × 0.7` (saturating at 255), darker steps by
//! `1 - (step - 500) / 450 × 0.8`.  Results are truncated to integers.

use std::collections::BTreeMap;
use rgb::{RGB, RGB8};
use serde::{Deserialize, Serialize};
use crate::{parse_hex, RGBColor, Result, TokenError};

/// The steps of a [`ColorScale`], lightest first.
pub const STEPS: [u16; 11] = [50, 100, 200, 300, 400, 500,
                              600, 700, 800, 900, 950];

/// Step → `#rrggbb`, ordered by step.  Step 500 is the base color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColorScale {
    steps: BTreeMap<u16, String>,
}

fn factor(step: u16) -> f64 {
    let step = step as f64;
    if step < 500. { 1. + ((500. - step) / 500.) * 0.7 }
    else { 1. - ((step - 500.) / 450.) * 0.8 }
}

impl ColorScale {
    /// Ramp around `base`; step 500 is `base` in hexadecimal.
    pub fn generate(base: RGB8) -> ColorScale {
        let c = base.to_rgb();
        let steps = STEPS.iter().map(|&step| {
            let hex = if step == 500 { base.to_hex() } else {
                let f = factor(step);
                RGB8::from_rgb(RGB { r: c.r * f, g: c.g * f, b: c.b * f })
                    .to_hex()
            };
            (step, hex)
        }).collect();
        ColorScale { steps }
    }

    /// Hex string at `step`, if it is one of [`STEPS`].
    pub fn get(&self, step: u16) -> Option<&str> {
        self.steps.get(&step).map(String::as_str)
    }

    /// The base color, as given.
    pub fn base(&self) -> &str { self.get(500).unwrap_or_default() }

    /// Iterate over `(step, hex)`, lightest first.
    pub fn iter(&self) -> impl Iterator<Item = (u16, &str)> + '_ {
        self.steps.iter().map(|(&s, h)| (s, h.as_str()))
    }

    pub fn len(&self) -> usize { self.steps.len() }

    pub fn is_empty(&self) -> bool { self.steps.is_empty() }
}

/// Generate the 50–950 scale of `base_hex`, stored unchanged at step 500.
///
/// # Example
///
/// ```
/// use design_tokens::generate_color_scale;
/// let s = generate_color_scale("#3b82f6")?;
/// assert_eq!(s.get(500), Some("#3b82f6"));
/// assert_eq!(s.get(950), Some("#0b1931"));
/// # Ok::<(), design_tokens::TokenError>(())
/// ```
pub fn generate_color_scale(base_hex: &str) -> Result<ColorScale> {
    let base = parse_hex(base_hex)
        .ok_or_else(|| TokenError::InvalidColor { value: base_hex.into() })?;
    let mut scale = ColorScale::generate(base);
    scale.steps.insert(500, base_hex.to_string());
    Ok(scale)
}
