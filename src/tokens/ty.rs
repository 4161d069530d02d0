use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use crate::ColorScale;

/// Token name → CSS value, in insertion order.
pub type TokenMap = IndexMap<String, String>;

/// The normalized design system.  Fields serialize in the order
/// `colors, typography, spacing, borderRadius, shadows, breakpoints,
/// transitions, zIndex`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenDocument {
    pub colors: ColorTokens,
    pub typography: Typography,
    pub spacing: TokenMap,
    pub border_radius: TokenMap,
    pub shadows: TokenMap,
    pub breakpoints: TokenMap,
    pub transitions: Transitions,
    pub z_index: TokenMap,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorTokens {
    pub primary: ColorScale,
    /// success, warning, error, info.
    pub semantic: TokenMap,
    /// white, 50 … 950, black.
    pub neutral: TokenMap,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Typography {
    /// sans, serif, mono.
    pub font_families: TokenMap,
    pub font_sizes: TokenMap,
    pub font_weights: TokenMap,
    pub line_heights: TokenMap,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transitions {
    pub duration: TokenMap,
    pub easing: TokenMap,
}
