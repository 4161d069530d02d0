//! Composition of the token families into a [`TokenDocument`].

use crate::tokens::{self, DEFAULT_PRIMARY_SCALE, NEUTRAL_SCALE,
                    SEMANTIC_COLORS};
use crate::{ColorScale, ColorTokens, Normalizer, Result, TokenDocument,
            TokenMap, Transitions, Typography};

/// Set the families of a [`TokenDocument`]; those left unset get their
/// reference table.
///
/// ```
/// use design_tokens::{generate_color_scale, DocumentBuilder};
/// let doc = DocumentBuilder::new()
///     .primary(generate_color_scale("#e11d48")?)
///     .build();
/// assert_eq!(doc.colors.primary.base(), "#e11d48");
/// assert_eq!(doc.breakpoints["md"], "768px");
/// # Ok::<(), design_tokens::TokenError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct DocumentBuilder {
    colors: Option<ColorTokens>,
    typography: Option<Typography>,
    spacing: Option<TokenMap>,
    border_radius: Option<TokenMap>,
    shadows: Option<TokenMap>,
    breakpoints: Option<TokenMap>,
    transitions: Option<Transitions>,
    z_index: Option<TokenMap>,
}

impl DocumentBuilder {
    pub fn new() -> Self { Self::default() }

    pub fn colors(mut self, colors: ColorTokens) -> Self {
        self.colors = Some(colors);
        self
    }

    /// Use `scale` as primary color with the default semantic and
    /// neutral colors.
    pub fn primary(self, scale: ColorScale) -> Self {
        self.colors(ColorTokens { primary: scale,
                                  semantic: SEMANTIC_COLORS.clone(),
                                  neutral: NEUTRAL_SCALE.clone() })
    }

    pub fn typography(mut self, typography: Typography) -> Self {
        self.typography = Some(typography);
        self
    }

    pub fn spacing(mut self, spacing: TokenMap) -> Self {
        self.spacing = Some(spacing);
        self
    }

    pub fn border_radius(mut self, radii: TokenMap) -> Self {
        self.border_radius = Some(radii);
        self
    }

    pub fn shadows(mut self, shadows: TokenMap) -> Self {
        self.shadows = Some(shadows);
        self
    }

    pub fn breakpoints(mut self, breakpoints: TokenMap) -> Self {
        self.breakpoints = Some(breakpoints);
        self
    }

    pub fn transitions(mut self, transitions: Transitions) -> Self {
        self.transitions = Some(transitions);
        self
    }

    pub fn z_index(mut self, z_index: TokenMap) -> Self {
        self.z_index = Some(z_index);
        self
    }

    pub fn build(self) -> TokenDocument {
        TokenDocument {
            colors: self.colors.unwrap_or_else(|| ColorTokens {
                primary: DEFAULT_PRIMARY_SCALE.clone(),
                semantic: SEMANTIC_COLORS.clone(),
                neutral: NEUTRAL_SCALE.clone() }),
            typography: self.typography
                .unwrap_or_else(|| tokens::TYPOGRAPHY.clone()),
            spacing: self.spacing
                .unwrap_or_else(|| Normalizer::default().spacing(&[])),
            border_radius: self.border_radius
                .unwrap_or_else(|| tokens::BORDER_RADII.clone()),
            shadows: self.shadows
                .unwrap_or_else(|| tokens::SHADOW_SCALE.clone()),
            breakpoints: self.breakpoints
                .unwrap_or_else(|| tokens::BREAKPOINT_SCALE.clone()),
            transitions: self.transitions
                .unwrap_or_else(|| tokens::TRANSITIONS.clone()),
            z_index: self.z_index
                .unwrap_or_else(|| tokens::Z_INDEX_SCALE.clone()),
        }
    }
}

impl Default for TokenDocument {
    /// The document every family falls back to.
    fn default() -> Self { DocumentBuilder::new().build() }
}

impl TokenDocument {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// A TypeScript module exporting the tokens and a few derived types.
    pub fn to_typescript(&self) -> Result<String> {
        Ok(format!("// Design Tokens\n\
                    // Auto-generated from design system extraction\n\
                    \n\
                    export const tokens = {};\n\
                    \n\
                    export type ColorScale = typeof tokens.colors.primary;\n\
                    export type SpacingValue = keyof typeof tokens.spacing;\n\
                    export type FontSize = keyof typeof tokens.typography.fontSizes;\n",
                   self.to_json()?))
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::{normalize_design_tokens, RawExtraction};

    #[test]
    fn family_order() {
        let json = serde_json::to_string(&TokenDocument::default()).unwrap();
        let pos = |k: &str| json.find(&format!("\"{}\":", k)).unwrap();
        let keys = ["colors", "typography", "spacing", "borderRadius",
                    "shadows", "breakpoints", "transitions", "zIndex"];
        assert!(keys.windows(2).all(|w| pos(w[0]) < pos(w[1])));
    }

    #[test]
    fn empty_extraction_gives_defaults() {
        let doc = normalize_design_tokens(&RawExtraction::default()).unwrap();
        assert_eq!(doc, TokenDocument::default());
        assert_eq!(doc.colors.primary.base(), "#3b82f6");
        assert_eq!(doc.transitions.easing["inOut"],
                   "cubic-bezier(0.4, 0, 0.2, 1)");
        assert_eq!(doc.z_index["auto"], "auto");
    }

    #[test]
    fn overrides() {
        let mut bp = TokenMap::new();
        bp.insert("tablet".into(), "900px".into());
        let doc = DocumentBuilder::new().breakpoints(bp).build();
        assert_eq!(doc.breakpoints.len(), 1);
        assert_eq!(doc.shadows["none"], "0 0 #0000");
    }

    #[test]
    fn typescript() {
        let ts = TokenDocument::default().to_typescript().unwrap();
        assert!(ts.starts_with("// Design Tokens\n"));
        assert!(ts.contains("export const tokens = {\n"));
        assert!(ts.contains("\"fontSizes\""));
        assert!(ts.ends_with("keyof typeof tokens.typography.fontSizes;\n"));
    }
}
