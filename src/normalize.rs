//! Raw CSS values → canonical token families.
//!
//! Only two families are derived from the extracted values: the primary
//! color (first chromatic color) and spacing (snapped to a rem ladder).
//! Font families are picked from the extracted stacks when they look
//! like sans, serif or monospace fonts.  Everything else, including the
//! neutral ramp, is a fixed table; extracted values for those families
//! are accepted and ignored.

use std::{fs, io, path::Path};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use crate::tokens::{self, DEFAULT_PRIMARY_SCALE, NEUTRAL_SCALE,
                    SEMANTIC_COLORS, SPACING_BASELINE, SPACING_LADDER};
use crate::{generate_color_scale, parse_css_color, CategorizedPalette,
            ColorTokens, DocumentBuilder, NormalizeOptions, RGBColor, Result,
            TokenDocument, TokenError, TokenMap, Typography};

lazy_static! {
    static ref PX: Regex = Regex::new(r"^([\d.]+)px").unwrap();
    pub(crate) static ref RGB_FUNCTION: Regex =
        Regex::new(r"^rgba?\((\d+),\s*(\d+),\s*(\d+)(?:,\s*[\d.]+)?\)")
        .unwrap();
}

/// Convert a pixel length (`"24px"`) to rem at `base` pixels per rem.
/// Anything else is returned unchanged.
///
/// ```
/// use design_tokens::px_to_rem;
/// assert_eq!(px_to_rem("32px", 16.), "2rem");
/// assert_eq!(px_to_rem("12px", 16.), "0.75rem");
/// assert_eq!(px_to_rem("auto", 16.), "auto");
/// ```
pub fn px_to_rem(value: &str, base: f64) -> String {
    PX.captures(value)
        .and_then(|caps| caps[1].parse::<f64>().ok())
        .map(|px| format!("{}rem", px / base))
        .unwrap_or_else(|| value.to_string())
}

/// Nearest ladder value, the smaller one on ties.
fn snap(rem: f64) -> f64 {
    let mut best = SPACING_LADDER[0];
    for &x in &SPACING_LADDER[1 ..] {
        if (x - rem).abs() < (best - rem).abs() { best = x }
    }
    best
}


/// Typography values as sampled from computed styles.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawTypography {
    pub font_families: Vec<String>,
    pub font_sizes: Vec<String>,
    pub font_weights: Vec<String>,
    pub line_heights: Vec<String>,
}

/// Values extracted from a page.  Every key is optional and unknown keys
/// are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawExtraction {
    /// Hexadecimal or `rgb()` colors.
    pub colors: Vec<String>,
    pub typography: RawTypography,
    /// CSS lengths.
    pub spacing: Vec<String>,
    pub border_radius: Vec<String>,
    pub shadows: Vec<String>,
}

/// One computed-style read: a CSS property and its value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawStyleValue {
    pub property: String,
    pub value: String,
}

impl RawStyleValue {
    pub fn new(property: impl Into<String>, value: impl Into<String>) -> Self {
        Self { property: property.into(), value: value.into() }
    }
}

#[derive(Clone, Copy)]
enum Bucket { Color, FontFamily, FontSize, FontWeight, LineHeight, Spacing,
              Radius, Shadow }

/// Family of a CSS property and the value meaning "unset" for it.
fn bucket(property: &str) -> Option<(Bucket, &'static [&'static str])> {
    use Bucket::*;
    const NO_COLOR: &[&str] = &["transparent", "rgba(0, 0, 0, 0)"];
    const NO_LENGTH: &[&str] = &["0px", "auto"];
    let p = property.trim().to_ascii_lowercase();
    let b = match p.as_str() {
        "color" | "background-color" | "border-color" | "outline-color"
            | "fill" | "stroke" => (Color, NO_COLOR),
        "font-family" => (FontFamily, &[][..]),
        "font-size" => (FontSize, &[][..]),
        "font-weight" => (FontWeight, &[][..]),
        "line-height" => (LineHeight, &["normal"][..]),
        "gap" | "row-gap" | "column-gap" => (Spacing, NO_LENGTH),
        "border-radius" => (Radius, &["0px"][..]),
        "box-shadow" => (Shadow, &["none"][..]),
        p if p.starts_with("border-") && p.ends_with("-color") =>
            (Color, NO_COLOR),
        p if p.starts_with("border-") && p.ends_with("-radius") =>
            (Radius, &["0px"][..]),
        p if p.starts_with("padding-") || p.starts_with("margin-") =>
            (Spacing, NO_LENGTH),
        _ => return None,
    };
    Some(b)
}

fn push_unique(v: &mut Vec<String>, s: String) {
    if !v.contains(&s) { v.push(s) }
}

impl RawExtraction {
    /// Parse the JSON document produced by a style sampler.
    pub fn from_json(json: &str) -> Result<RawExtraction> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse the JSON document at `path`.
    pub fn from_file(path: &Path) -> Result<RawExtraction> {
        let json = fs::read_to_string(path).map_err(|source| {
            let path = path.to_path_buf();
            match source.kind() {
                io::ErrorKind::NotFound => TokenError::FileNotFound { path },
                _ => TokenError::Io { path, source },
            }
        })?;
        RawExtraction::from_json(&json)
    }

    /// Group computed-style reads by token family.
    ///
    /// Empty values and those meaning "unset" (`transparent`, `0px`,
    /// `auto`, `none`…) are skipped, duplicates removed.  Colors are
    /// converted to hexadecimal when possible; colors, spacing and
    /// radii are sorted.
    pub fn from_style_values<'a, I>(values: I) -> RawExtraction
    where I: IntoIterator<Item = &'a RawStyleValue> {
        let mut raw = RawExtraction::default();
        for RawStyleValue { property, value } in values {
            let value = value.trim();
            let Some((b, unset)) = bucket(property) else { continue };
            if value.is_empty() || unset.contains(&value) { continue }
            let value = value.to_string();
            match b {
                Bucket::Color => {
                    let v = parse_css_color(&value)
                        .map_or(value, |c| c.to_hex());
                    push_unique(&mut raw.colors, v)
                }
                Bucket::FontFamily =>
                    push_unique(&mut raw.typography.font_families, value),
                Bucket::FontSize =>
                    push_unique(&mut raw.typography.font_sizes, value),
                Bucket::FontWeight =>
                    push_unique(&mut raw.typography.font_weights, value),
                Bucket::LineHeight =>
                    push_unique(&mut raw.typography.line_heights, value),
                Bucket::Spacing => push_unique(&mut raw.spacing, value),
                Bucket::Radius => push_unique(&mut raw.border_radius, value),
                Bucket::Shadow => push_unique(&mut raw.shadows, value),
            }
        }
        raw.colors.sort();
        raw.spacing.sort();
        raw.border_radius.sort();
        raw
    }
}


/// Normalizes each token family.
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    opts: NormalizeOptions,
}

impl Normalizer {
    pub fn new(opts: NormalizeOptions) -> Result<Normalizer> {
        opts.validate()?;
        Ok(Normalizer { opts })
    }

    pub fn options(&self) -> &NormalizeOptions { &self.opts }

    /// Normalize every family and assemble the document.
    pub fn normalize(&self, raw: &RawExtraction) -> Result<TokenDocument> {
        let doc = DocumentBuilder::new()
            .colors(self.colors(&raw.colors)?)
            .typography(self.typography(&raw.typography))
            .spacing(self.spacing(&raw.spacing))
            .border_radius(self.border_radius(&raw.border_radius))
            .shadows(self.shadows(&raw.shadows))
            .build();
        info!(colors = raw.colors.len(), spacing = doc.spacing.len(),
              "normalized design tokens");
        Ok(doc)
    }

    /// Primary scale from the first chromatic color of `values`, fixed
    /// semantic and neutral tables.
    pub fn colors(&self, values: &[String]) -> Result<ColorTokens> {
        let mut base: Option<String> = None;
        let mut grays = 0;
        for v in values {
            match parse_css_color(v) {
                None => warn!(value = %v, "skipping unrecognized color"),
                Some(c) if c.is_grayscale() => grays += 1,
                Some(c) => if base.is_none() {
                    let v = v.trim();
                    base = Some(if v.starts_with('#') { v.to_string() }
                                else { c.to_hex() });
                }
            }
        }
        // Extracted grays do not feed the neutral ramp.
        debug!(grays, "discarding extracted neutral colors");
        self.color_tokens(base.as_deref())
    }

    /// Same as [`Self::colors`] for an image palette.  The palette's
    /// primary is used as is; its grays and accents are not looked at.
    pub fn colors_from_palette(&self, palette: &CategorizedPalette)
                               -> Result<ColorTokens> {
        debug!(grays = palette.grayscale.len(),
               accents = palette.accents.len(),
               "primary taken from the palette");
        self.color_tokens(palette.primary.as_ref().map(|c| c.hex.as_str()))
    }

    fn color_tokens(&self, base: Option<&str>) -> Result<ColorTokens> {
        let primary = match base {
            Some(hex) => generate_color_scale(hex)?,
            None if self.opts.default_primary == tokens::DEFAULT_PRIMARY =>
                DEFAULT_PRIMARY_SCALE.clone(),
            None => generate_color_scale(&self.opts.default_primary)?,
        };
        Ok(ColorTokens { primary,
                         semantic: SEMANTIC_COLORS.clone(),
                         neutral: NEUTRAL_SCALE.clone() })
    }

    /// Fixed sizes, weights and line heights; font families picked from
    /// `raw` when recognizable.
    pub fn typography(&self, raw: &RawTypography) -> Typography {
        let mut t = tokens::TYPOGRAPHY.clone();
        let (mut sans, mut serif, mut mono) = (None, None, None);
        for family in &raw.font_families {
            let f = family.to_lowercase();
            let has = |words: &[&str]| words.iter().any(|w| f.contains(w));
            if sans.is_none() && has(&["sans", "helvetica", "arial", "inter"]) {
                sans = Some(family)
            }
            if serif.is_none() && f.contains("serif") && !f.contains("sans") {
                serif = Some(family)
            }
            if mono.is_none() && has(&["mono", "courier", "code", "console"]) {
                mono = Some(family)
            }
        }
        for (slot, found) in [("sans", sans), ("serif", serif), ("mono", mono)] {
            if let Some(f) = found {
                t.font_families.insert(slot.to_string(), f.clone());
            }
        }
        debug!(sizes = raw.font_sizes.len(), weights = raw.font_weights.len(),
               line_heights = raw.line_heights.len(),
               "typography scales are fixed");
        t
    }

    /// Extracted lengths snapped to the rem ladder, merged with the
    /// baseline scale and sorted.
    pub fn spacing(&self, values: &[String]) -> TokenMap {
        let mut rems: Vec<f64> = values.iter()
            .filter_map(|v| {
                let rem = px_to_rem(v.trim(), self.opts.rem_base);
                rem.strip_suffix("rem")?.trim().parse::<f64>().ok() })
            .filter(|x| x.is_finite())
            .collect();
        rems.sort_by(f64::total_cmp);
        rems.dedup();
        let mut scale = SPACING_BASELINE.to_vec();
        for rem in rems {
            let s = snap(rem);
            if !scale.contains(&s) {
                debug!(rem, snapped = s, "new spacing step");
                scale.push(s)
            }
        }
        scale.sort_by(f64::total_cmp);
        scale.into_iter().map(|x| {
            if x == 0. { ("0".to_string(), "0".to_string()) }
            else { (x.to_string(), format!("{}rem", x)) }
        }).collect()
    }

    pub fn border_radius(&self, values: &[String]) -> TokenMap {
        debug!(ignored = values.len(), "border radius scale is fixed");
        tokens::BORDER_RADII.clone()
    }

    pub fn shadows(&self, values: &[String]) -> TokenMap {
        debug!(ignored = values.len(), "shadow scale is fixed");
        tokens::SHADOW_SCALE.clone()
    }
}

/// Normalize `raw` with the default options.
pub fn normalize_design_tokens(raw: &RawExtraction) -> Result<TokenDocument> {
    Normalizer::default().normalize(raw)
}


#[cfg(test)]
mod tests {
    use super::*;

    fn strings(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn px_conversion() {
        assert_eq!(px_to_rem("32px", 16.), "2rem");
        assert_eq!(px_to_rem("13px", 16.), "0.8125rem");
        assert_eq!(px_to_rem("10px", 10.), "1rem");
        assert_eq!(px_to_rem("1.5rem", 16.), "1.5rem");
        assert_eq!(px_to_rem("50%", 16.), "50%");
        assert_eq!(px_to_rem("-8px", 16.), "-8px");
    }

    #[test]
    fn snapping() {
        assert_eq!(snap(0.3), 0.25);
        // Halfway between 0.25 and 0.375.
        assert_eq!(snap(0.3125), 0.25);
        assert_eq!(snap(13.), 12.);
        assert_eq!(snap(15.), 14.);
        assert_eq!(snap(100.), 24.);
        assert_eq!(snap(-1.), 0.);
    }

    #[test]
    fn baseline_spacing() {
        let s = Normalizer::default().spacing(&[]);
        let keys: Vec<&str> = s.keys().map(String::as_str).collect();
        assert_eq!(keys, ["0", "0.125", "0.25", "0.5", "0.75", "1", "1.5",
                          "2", "3", "4"]);
        assert_eq!(s["0"], "0");
        assert_eq!(s["0.125"], "0.125rem");
        assert_eq!(s["1"], "1rem");
    }

    #[test]
    fn extracted_spacing() {
        let s = Normalizer::default().spacing(
            &strings(&["6px", "20px", "20px", "auto", "1.75rem", "200px", "x"]));
        // 6px = 0.375rem, 20px = 1.25rem, 200px = 12.5rem → 12
        for (k, v) in [("0.375", "0.375rem"), ("1.25", "1.25rem"),
                       ("1.75", "1.75rem"), ("12", "12rem")] {
            assert_eq!(s.get(k).map(String::as_str), Some(v));
        }
        assert_eq!(s.len(), 14);
        let keys: Vec<f64> = s.keys().map(|k| k.parse().unwrap()).collect();
        assert!(keys.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn primary_from_first_chromatic() {
        let c = Normalizer::default()
            .colors(&strings(&["#ffffff", "#333333", "not a color",
                               "rgb(255, 0, 0)", "#00ff00"]))
            .unwrap();
        assert_eq!(c.primary.get(500), Some("#ff0000"));
        assert_eq!(c.neutral["white"], "#ffffff");
        assert_eq!(c.neutral.len(), 13);
        assert_eq!(c.semantic["error"], "#ef4444");
    }

    #[test]
    fn default_primary() {
        let c = Normalizer::default().colors(&strings(&["#777777"])).unwrap();
        assert_eq!(c.primary.get(500), Some("#3b82f6"));
        let n = Normalizer::new(NormalizeOptions {
            default_primary: "#0d9488".into(), ..Default::default() }).unwrap();
        assert_eq!(n.colors(&[]).unwrap().primary.base(), "#0d9488");
    }

    #[test]
    fn palette_primary_only() {
        use crate::{categorize, quantize, QuantizeOptions};
        use rgb::RGB8;
        let opts = QuantizeOptions::default().with_colors(1)
            .with_sample_fraction(1.);
        let n = Normalizer::default();

        let mut samples = vec![RGB8::new(100, 114, 100); 3];
        samples.extend(vec![RGB8::new(101, 116, 101); 2]);
        let palette = categorize(&quantize(&samples, &opts).unwrap());
        let primary = palette.primary.as_ref().map(|c| c.hex.as_str());
        assert_eq!(n.colors_from_palette(&palette).unwrap().primary.get(500),
                   primary);

        let samples = vec![RGB8::new(100, 112, 100); 4];
        let palette = categorize(&quantize(&samples, &opts).unwrap());
        assert!(palette.primary.is_none());
        assert_eq!(palette.grayscale.len(), 1);
        assert_eq!(n.colors_from_palette(&palette).unwrap().primary.base(),
                   "#3b82f6");
    }

    #[test]
    fn font_families() {
        let t = Normalizer::default().typography(&RawTypography {
            font_families: strings(&["Georgia, serif", "\"Open Sans\", sans-serif",
                                     "Roboto", "Fira Code, monospace"]),
            ..Default::default() });
        assert_eq!(t.font_families["sans"], "\"Open Sans\", sans-serif");
        assert_eq!(t.font_families["serif"], "Georgia, serif");
        assert_eq!(t.font_families["mono"], "Fira Code, monospace");
        assert_eq!(t.font_sizes["base"], "1rem");
    }

    #[test]
    fn style_values() {
        let values = [
            RawStyleValue::new("color", "rgb(16, 185, 129)"),
            RawStyleValue::new("background-color", "rgba(0, 0, 0, 0)"),
            RawStyleValue::new("border-top-color", "#10b981"),
            RawStyleValue::new("color", "rgb(3, 7, 18)"),
            RawStyleValue::new("padding-top", "8px"),
            RawStyleValue::new("margin-left", "auto"),
            RawStyleValue::new("gap", "16px"),
            RawStyleValue::new("line-height", "normal"),
            RawStyleValue::new("font-family", "Inter, sans-serif"),
            RawStyleValue::new("border-bottom-left-radius", "4px"),
            RawStyleValue::new("box-shadow", "none"),
            RawStyleValue::new("cursor", "pointer"),
        ];
        let raw = RawExtraction::from_style_values(&values);
        assert_eq!(raw.colors, strings(&["#030712", "#10b981"]));
        assert_eq!(raw.spacing, strings(&["16px", "8px"]));
        assert_eq!(raw.border_radius, strings(&["4px"]));
        assert!(raw.shadows.is_empty());
        assert!(raw.typography.line_heights.is_empty());
        assert_eq!(raw.typography.font_families.len(), 1);
    }

    #[test]
    fn unreadable_files() {
        let r = RawExtraction::from_file(Path::new("no/such/extraction.json"));
        assert!(matches!(r, Err(TokenError::FileNotFound { .. })));
        let r = RawExtraction::from_file(&std::env::temp_dir());
        assert!(matches!(r, Err(TokenError::Io { .. })), "{:?}", r);
        let path = std::env::temp_dir()
            .join(format!("design-tokens-{}-latin1.json", std::process::id()));
        fs::write(&path, b"{\"colors\": [\"\xe9\"]}").unwrap();
        let r = RawExtraction::from_file(&path);
        fs::remove_file(&path).ok();
        let e = r.unwrap_err();
        assert!(matches!(e, TokenError::Io { .. }));
        assert!(e.suggestion().is_some());
    }

    #[test]
    fn json_input_ignores_unknown_keys() {
        let raw = RawExtraction::from_json(
            r##"{"url": "https://example.com", "colors": ["#ff0000"],
                 "borderRadius": ["4px"], "viewport": {"width": 1280}}"##)
            .unwrap();
        assert_eq!(raw.colors, strings(&["#ff0000"]));
        assert_eq!(raw.border_radius, strings(&["4px"]));
        assert!(raw.spacing.is_empty());
    }
}
