//! Reference tables the normalized token families fall back to.

use lazy_static::lazy_static;
use rgb::RGB8;
use crate::ColorScale;

pub(crate) mod ty;
use ty::{TokenMap, Transitions, Typography};

/// Primary color used when no chromatic color was extracted.
pub(crate) const DEFAULT_PRIMARY: &str = "#3b82f6";

/// Rem values spacing snaps to, increasing.
pub(crate) const SPACING_LADDER: [f64; 31] = [
    0., 0.125, 0.25, 0.375, 0.5, 0.625, 0.75, 0.875, 1., 1.25, 1.5, 1.75, 2.,
    2.25, 2.5, 2.75, 3., 3.5, 4., 5., 6., 7., 8., 9., 10., 11., 12., 14., 16.,
    20., 24.];

/// Rem values always present in the spacing scale.
pub(crate) const SPACING_BASELINE: [f64; 10] = [
    0., 0.125, 0.25, 0.5, 0.75, 1., 1.5, 2., 3., 4.];

const SEMANTIC: [(&str, &str); 4] = [
    ("success", "#10b981"),
    ("warning", "#f59e0b"),
    ("error", "#ef4444"),
    ("info", "#3b82f6"),
];

const NEUTRAL: [(&str, &str); 13] = [
    ("white", "#ffffff"),
    ("50", "#fafafa"),
    ("100", "#f5f5f5"),
    ("200", "#e5e5e5"),
    ("300", "#d4d4d4"),
    ("400", "#a3a3a3"),
    ("500", "#737373"),
    ("600", "#525252"),
    ("700", "#404040"),
    ("800", "#262626"),
    ("900", "#171717"),
    ("950", "#0a0a0a"),
    ("black", "#000000"),
];

pub(crate) const SANS: &str =
    "'Inter', -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif";
pub(crate) const SERIF: &str = "'Merriweather', Georgia, serif";
pub(crate) const MONO: &str = "'JetBrains Mono', 'Courier New', monospace";

const FONT_SIZES: [(&str, &str); 13] = [
    ("xs", "0.75rem"),    // 12px
    ("sm", "0.875rem"),   // 14px
    ("base", "1rem"),     // 16px
    ("lg", "1.125rem"),
    ("xl", "1.25rem"),
    ("2xl", "1.5rem"),
    ("3xl", "1.875rem"),
    ("4xl", "2.25rem"),
    ("5xl", "3rem"),
    ("6xl", "3.75rem"),
    ("7xl", "4.5rem"),
    ("8xl", "6rem"),
    ("9xl", "8rem"),      // 128px
];

const FONT_WEIGHTS: [(&str, &str); 9] = [
    ("thin", "100"),
    ("extralight", "200"),
    ("light", "300"),
    ("normal", "400"),
    ("medium", "500"),
    ("semibold", "600"),
    ("bold", "700"),
    ("extrabold", "800"),
    ("black", "900"),
];

const LINE_HEIGHTS: [(&str, &str); 6] = [
    ("none", "1"),
    ("tight", "1.25"),
    ("snug", "1.375"),
    ("normal", "1.5"),
    ("relaxed", "1.625"),
    ("loose", "2"),
];

const BORDER_RADIUS: [(&str, &str); 9] = [
    ("none", "0"),
    ("sm", "0.125rem"),
    ("base", "0.25rem"),
    ("md", "0.375rem"),
    ("lg", "0.5rem"),
    ("xl", "0.75rem"),
    ("2xl", "1rem"),
    ("3xl", "1.5rem"),
    ("full", "9999px"),
];

const SHADOWS: [(&str, &str); 8] = [
    ("sm", "0 1px 2px 0 rgb(0 0 0 / 0.05)"),
    ("base", "0 1px 3px 0 rgb(0 0 0 / 0.1), 0 1px 2px -1px rgb(0 0 0 / 0.1)"),
    ("md", "0 4px 6px -1px rgb(0 0 0 / 0.1), 0 2px 4px -2px rgb(0 0 0 / 0.1)"),
    ("lg", "0 10px 15px -3px rgb(0 0 0 / 0.1), 0 4px 6px -4px rgb(0 0 0 / 0.1)"),
    ("xl", "0 20px 25px -5px rgb(0 0 0 / 0.1), 0 8px 10px -6px rgb(0 0 0 / 0.1)"),
    ("2xl", "0 25px 50px -12px rgb(0 0 0 / 0.25)"),
    ("inner", "inset 0 2px 4px 0 rgb(0 0 0 / 0.05)"),
    ("none", "0 0 #0000"),
];

const BREAKPOINTS: [(&str, &str); 5] = [
    ("sm", "640px"),
    ("md", "768px"),
    ("lg", "1024px"),
    ("xl", "1280px"),
    ("2xl", "1536px"),
];

const DURATION: [(&str, &str); 3] = [
    ("fast", "150ms"),
    ("base", "300ms"),
    ("slow", "500ms"),
];

const EASING: [(&str, &str); 4] = [
    ("linear", "linear"),
    ("in", "cubic-bezier(0.4, 0, 1, 1)"),
    ("out", "cubic-bezier(0, 0, 0.2, 1)"),
    ("inOut", "cubic-bezier(0.4, 0, 0.2, 1)"),
];

const Z_INDEX: [(&str, &str); 7] = [
    ("0", "0"),
    ("10", "10"),
    ("20", "20"),
    ("30", "30"),
    ("40", "40"),
    ("50", "50"),
    ("auto", "auto"),
];

fn table(entries: &[(&str, &str)]) -> TokenMap {
    entries.iter().map(|&(k, v)| (k.to_string(), v.to_string())).collect()
}

lazy_static! {
    pub(crate) static ref DEFAULT_PRIMARY_SCALE: ColorScale =
        ColorScale::generate(RGB8::new(0x3b, 0x82, 0xf6));
    pub(crate) static ref SEMANTIC_COLORS: TokenMap = table(&SEMANTIC);
    pub(crate) static ref NEUTRAL_SCALE: TokenMap = table(&NEUTRAL);
    pub(crate) static ref TYPOGRAPHY: Typography = Typography {
        font_families: table(&[("sans", SANS), ("serif", SERIF),
                               ("mono", MONO)]),
        font_sizes: table(&FONT_SIZES),
        font_weights: table(&FONT_WEIGHTS),
        line_heights: table(&LINE_HEIGHTS),
    };
    pub(crate) static ref BORDER_RADII: TokenMap = table(&BORDER_RADIUS);
    pub(crate) static ref SHADOW_SCALE: TokenMap = table(&SHADOWS);
    pub(crate) static ref BREAKPOINT_SCALE: TokenMap = table(&BREAKPOINTS);
    pub(crate) static ref TRANSITIONS: Transitions = Transitions {
        duration: table(&DURATION),
        easing: table(&EASING),
    };
    pub(crate) static ref Z_INDEX_SCALE: TokenMap = table(&Z_INDEX);
}
