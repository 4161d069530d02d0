//! Property-based tests for the color and spacing rules.

use proptest::prelude::*;
use rgb::RGB8;
use design_tokens::{generate_color_scale, px_to_rem, parse_hex, Normalizer,
                    RGBColor, STEPS};

fn hex_strategy() -> impl Strategy<Value = String> {
    any::<[u8; 3]>().prop_map(|[r, g, b]| RGB8::new(r, g, b).to_hex())
}

const LADDER: [f64; 31] = [
    0., 0.125, 0.25, 0.375, 0.5, 0.625, 0.75, 0.875, 1., 1.25, 1.5, 1.75, 2.,
    2.25, 2.5, 2.75, 3., 3.5, 4., 5., 6., 7., 8., 9., 10., 11., 12., 14., 16.,
    20., 24.];

proptest! {
    #[test]
    fn scale_keeps_base_and_darkens(hex in hex_strategy()) {
        let scale = generate_color_scale(&hex).unwrap();
        prop_assert_eq!(scale.get(500), Some(hex.as_str()));
        let brightness: Vec<f64> = STEPS.iter()
            .map(|&s| parse_hex(scale.get(s).unwrap()).unwrap().brightness())
            .collect();
        for w in brightness.windows(2) {
            prop_assert!(w[0] >= w[1], "{:?}", brightness);
        }
    }

    #[test]
    fn grayscale_is_symmetric(r: u8, g: u8, b: u8) {
        let gray = RGB8::new(r, g, b).is_grayscale();
        for c in [RGB8::new(g, r, b), RGB8::new(b, g, r), RGB8::new(r, b, g)] {
            prop_assert_eq!(c.is_grayscale(), gray);
        }
    }

    #[test]
    fn whole_pixels_divide_by_base(px in 0u32 .. 2000) {
        let rem = px_to_rem(&format!("{}px", px), 16.);
        let value: f64 = rem.strip_suffix("rem").unwrap().parse().unwrap();
        prop_assert_eq!(value, px as f64 / 16.);
    }

    #[test]
    fn spacing_stays_on_ladder(px in prop::collection::vec(0u32 .. 1000, 0 .. 20)) {
        let values: Vec<String> = px.iter().map(|p| format!("{}px", p)).collect();
        let scale = Normalizer::default().spacing(&values);
        prop_assert!(scale.len() >= 10);
        for key in scale.keys() {
            let k: f64 = key.parse().unwrap();
            prop_assert!(LADDER.contains(&k), "{} not on the ladder", key);
        }
    }
}
