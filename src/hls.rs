//! Hue, lightness and saturation decomposition of sRGB colors.

use crate::color::{Component, Components};
use crate::math::{almost_zero, normalize_hue};

munsell_macros::gen_model! {
    /// A color in the HLS notation of the sRGB color space.
    pub struct Hls {
        /// Hue in degrees, [0..360). Achromatic colors have hue 0.
        hue: Component,
        /// Lightness in [0..1].
        lightness: Component,
        /// Saturation in [0..1].
        saturation: Component,
    }
}

impl Hls {
    /// Decompose normalized sRGB components.
    /// <https://drafts.csswg.org/css-color-4/#rgb-to-hsl>
    pub fn from_rgb(rgb: Components) -> Self {
        let Components(red, green, blue) = rgb;

        let max = red.max(green).max(blue);
        let min = red.min(green).min(blue);
        let delta = max - min;

        let hue = if almost_zero(delta) {
            0.0
        } else {
            60.0 * if max == red {
                (green - blue) / delta + if green < blue { 6.0 } else { 0.0 }
            } else if max == green {
                (blue - red) / delta + 2.0
            } else {
                (red - green) / delta + 4.0
            }
        };

        let lightness = (min + max) / 2.0;

        let saturation =
            if almost_zero(delta) || almost_zero(lightness) || almost_zero(1.0 - lightness) {
                0.0
            } else {
                (max - lightness) / lightness.min(1.0 - lightness)
            };

        Self::new(normalize_hue(hue), lightness, saturation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert_component_eq;

    #[test]
    fn primaries() {
        let red = Hls::from_rgb(Components(1.0, 0.0, 0.0));
        assert_component_eq!(red.hue, 0.0);
        assert_component_eq!(red.lightness, 0.5);
        assert_component_eq!(red.saturation, 1.0);

        let blue = Hls::from_rgb(Components(0.0, 0.0, 1.0));
        assert_component_eq!(blue.hue, 240.0);

        let magenta = Hls::from_rgb(Components(1.0, 0.0, 0.5));
        assert_component_eq!(magenta.hue, 330.0);
    }

    #[test]
    fn chocolate() {
        let hls = Hls::from_rgb(Components(0.823529, 0.411765, 0.117647));
        approx::assert_abs_diff_eq!(hls.hue, 25.0, epsilon = 1.0e-3);
        approx::assert_abs_diff_eq!(hls.lightness, 0.470588, epsilon = 1.0e-5);
        approx::assert_abs_diff_eq!(hls.saturation, 0.75, epsilon = 1.0e-4);
    }

    #[test]
    fn grays_have_no_hue_or_saturation() {
        let gray = Hls::from_rgb(Components(0.4, 0.4, 0.4));
        assert_eq!(gray.hue, 0.0);
        assert_eq!(gray.saturation, 0.0);
        assert_component_eq!(gray.lightness, 0.4);

        let white = Hls::from_rgb(Components(1.0, 1.0, 1.0));
        assert_eq!(white.saturation, 0.0);
    }
}
