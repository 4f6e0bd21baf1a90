//! Munsell notation for table indices, and the standard table bundled with
//! the crate.
//!
//! The standard table is derived from the notation itself: each cell's
//! Munsell value sets CIE lightness through the ASTM D1535 polynomial, its
//! chroma sets CIE chroma, and its hue is placed on the CIE hue circle
//! between the principal hues. Cells whose sRGB encoding leaves [0..1] by
//! more than [`GAMUT_TOLERANCE`] have no realizable color and stay absent.

use crate::color::{Component, Components};
use crate::math::{lerp, normalize_hue, transform, transform_3x3, Transform};
use crate::table::{MunsellTable, CHROMAS, HUES, VALUES};

/// Hue families in table order, starting at red.
pub(crate) const FAMILIES: [&str; 10] = ["R", "YR", "Y", "GY", "G", "BG", "B", "PB", "P", "RP"];

/// Approximate CIE-Lab hue angle (degrees) of the principal hue (5R, 5YR,
/// ...) of each family.
const PRINCIPAL_ANGLES: [Component; 10] = [
    24.0, 58.0, 88.0, 115.0, 160.0, 195.0, 230.0, 275.0, 315.0, 350.0,
];

/// CIE chroma per step of Munsell chroma.
const CHROMA_SCALE: Component = 4.5;

/// How far a stored channel may overshoot [0..1] before the cell counts as
/// out of gamut.
pub const GAMUT_TOLERANCE: Component = 0.02;

#[allow(clippy::excessive_precision)]
const D65_WHITE_POINT: Components = Components(0.9504559270516716, 1.0, 1.0890577507598784);

/// Normalized chroma of chroma index `k`.
pub fn chroma_map(k: Component) -> Component {
    k / 26.0
}

/// Normalized lightness of value index `j`. The first five levels are the
/// dark values 0.0 to 0.8 in steps of 0.2; after that one level per value.
pub fn lightness_map(j: Component) -> Component {
    if j < 5.0 {
        j * 0.02
    } else {
        (j - 4.0) / 10.0
    }
}

/// Munsell value (0..10) of value index `j`.
pub fn munsell_value(j: Component) -> Component {
    lightness_map(j) * 10.0
}

/// Munsell chroma of chroma index `k`.
pub fn munsell_chroma(k: Component) -> Component {
    k * 2.0
}

/// Split a (possibly fractional) hue index into a step in (0..10] and its
/// hue family. A step of 0 is written as 10 of the previous family.
pub fn hue_step(i: Component) -> (Component, &'static str) {
    let total = ((i + 1.0) * 2.5).rem_euclid(100.0);
    let family = (total / 10.0).floor() as usize;
    let step = total - family as Component * 10.0;

    if step > 0.0 {
        (step, FAMILIES[family % FAMILIES.len()])
    } else {
        (10.0, FAMILIES[(family + FAMILIES.len() - 1) % FAMILIES.len()])
    }
}

/// Munsell hue name of hue index `i`, e.g. `2.5R` or `10PB`.
pub fn hue_name(i: usize) -> String {
    let (step, family) = hue_step((i % HUES) as Component);
    format!("{step}{family}")
}

/// CIE-Lab hue angle for a (possibly fractional) hue index.
pub(crate) fn hue_angle(i: Component) -> Component {
    // Principal hues sit at index 1, 5, 9, ...
    let position = (i - 1.0).rem_euclid(HUES as Component) / 4.0;
    let family = position.floor() as usize % FAMILIES.len();
    let next = (family + 1) % FAMILIES.len();

    let from = PRINCIPAL_ANGLES[family];
    let mut to = PRINCIPAL_ANGLES[next];
    if to < from {
        to += 360.0;
    }

    normalize_hue(lerp(from, to, position.fract()))
}

/// Relative luminance (0..1) of a Munsell value, ASTM D1535.
fn luminance(value: Component) -> Component {
    let v = value;
    let y = 1.1914 * v - 0.22533 * v.powi(2) + 0.23352 * v.powi(3) - 0.020484 * v.powi(4)
        + 0.00081939 * v.powi(5);
    (y / 100.0).max(0.0)
}

fn lab_lightness(y: Component) -> Component {
    const KAPPA: Component = 24389.0 / 27.0;
    const EPSILON: Component = 216.0 / 24389.0;

    if y > EPSILON {
        116.0 * y.cbrt() - 16.0
    } else {
        KAPPA * y
    }
}

/// Convert CIE-Lch (D65 reference white) to gamma encoded sRGB.
fn lch_to_srgb(lightness: Component, chroma: Component, hue: Component) -> Components {
    const KAPPA: Component = 24389.0 / 27.0;
    const EPSILON: Component = 216.0 / 24389.0;

    #[rustfmt::skip]
    #[allow(clippy::excessive_precision)]
    const FROM_XYZ: Transform = transform_3x3(
         3.2409699419045213, -0.9692436362808798,  0.05563007969699361,
        -1.5373831775700935,  1.8759675015077206, -0.20397695888897657,
        -0.4986107602930033,  0.04155505740717561, 1.0569715142428786,
    );

    let hue = hue.to_radians();
    let a = chroma * hue.cos();
    let b = chroma * hue.sin();

    let f1 = (lightness + 16.0) / 116.0;
    let f0 = f1 + a / 500.0;
    let f2 = f1 - b / 200.0;

    let inverse = |f: Component| {
        let cubed = f * f * f;
        if cubed > EPSILON {
            cubed
        } else {
            (116.0 * f - 16.0) / KAPPA
        }
    };

    let y = if lightness > KAPPA * EPSILON {
        f1 * f1 * f1
    } else {
        lightness / KAPPA
    };

    let xyz = Components(
        inverse(f0) * D65_WHITE_POINT.0,
        y * D65_WHITE_POINT.1,
        inverse(f2) * D65_WHITE_POINT.2,
    );

    transform(&FROM_XYZ, xyz).map(|value| {
        let abs = value.abs();
        if abs > 0.0031308 {
            value.signum() * (1.055 * abs.powf(1.0 / 2.4) - 0.055)
        } else {
            12.92 * value
        }
    })
}

/// The sRGB color of a Munsell lattice point, or `None` when it lies outside
/// the sRGB gamut. Colors within the tolerance are clamped into [0..1].
fn lattice_color(hue: usize, value: usize, chroma: usize) -> Option<Components> {
    let lightness = lab_lightness(luminance(munsell_value(value as Component)));
    let cie_chroma = munsell_chroma(chroma as Component) * CHROMA_SCALE;

    let rgb = lch_to_srgb(lightness, cie_chroma, hue_angle(hue as Component));

    let in_gamut = |c: Component| (-GAMUT_TOLERANCE..=1.0 + GAMUT_TOLERANCE).contains(&c);
    (in_gamut(rgb.0) && in_gamut(rgb.1) && in_gamut(rgb.2))
        .then(|| rgb.map(|c| c.clamp(0.0, 1.0)))
}

/// Build the standard 40 x 15 x 26 table.
pub(crate) fn build_standard_table() -> MunsellTable {
    MunsellTable::tabulate(HUES, VALUES, CHROMAS, lattice_color)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert_component_eq;
    use crate::validity::{is_valid_color, to_display_rgb};

    #[test]
    fn axis_maps() {
        assert_component_eq!(chroma_map(13.0), 0.5);
        assert_component_eq!(lightness_map(0.0), 0.0);
        assert_component_eq!(lightness_map(4.0), 0.08);
        assert_component_eq!(lightness_map(5.0), 0.1);
        assert_component_eq!(lightness_map(14.0), 1.0);
        assert_component_eq!(munsell_value(9.0), 5.0);
        assert_component_eq!(munsell_chroma(7.0), 14.0);
    }

    #[test]
    fn hue_names() {
        assert_eq!(hue_name(0), "2.5R");
        assert_eq!(hue_name(1), "5R");
        assert_eq!(hue_name(3), "10R");
        assert_eq!(hue_name(4), "2.5YR");
        assert_eq!(hue_name(30), "7.5PB");
        assert_eq!(hue_name(39), "10RP");
        assert_eq!(hue_name(41), "5R");
    }

    #[test]
    fn hue_steps_roll_over_into_the_next_family() {
        assert_eq!(hue_step(1.0), (5.0, "R"));
        assert_eq!(hue_step(3.0), (10.0, "R"));
        assert_eq!(hue_step(3.5), (1.25, "YR"));
        assert_eq!(hue_step(39.0), (10.0, "RP"));
        assert_eq!(hue_step(39.5), (1.25, "R"));

        let (step, family) = hue_step(-1.0e-7);
        approx::assert_abs_diff_eq!(step, 2.5, epsilon = 1.0e-5);
        assert_eq!(family, "R");
    }

    #[test]
    fn standard_cells_are_displayable() {
        let table = MunsellTable::standard();
        for hue in 0..table.hues() {
            for value in 0..table.values() {
                for chroma in 0..table.chromas() {
                    let Some(sample) = table.get(hue, value, chroma) else {
                        continue;
                    };
                    if !sample.is_chartable() {
                        continue;
                    }

                    let components = sample.components;
                    assert!(
                        is_valid_color(&components),
                        "({hue}, {value}, {chroma}) {components:?}"
                    );
                    assert_eq!(
                        table.interpolate(hue as Component, value as Component, chroma as Component),
                        to_display_rgb(&components),
                        "({hue}, {value}, {chroma})"
                    );
                }
            }
        }
    }

    #[test]
    fn principal_hues_land_on_their_angles() {
        assert_component_eq!(hue_angle(1.0), 24.0);
        assert_component_eq!(hue_angle(9.0), 88.0);
        assert_component_eq!(hue_angle(3.0), 41.0);
        // Between 5RP (350) and 5R (24 + 360).
        assert_component_eq!(hue_angle(39.0), 7.0);
        assert_component_eq!(hue_angle(0.0), 15.5);
    }

    #[test]
    fn value_scale_spans_black_to_white() {
        assert_component_eq!(luminance(0.0), 0.0);
        approx::assert_abs_diff_eq!(luminance(10.0), 1.0, epsilon = 1.0e-3);
        approx::assert_abs_diff_eq!(lab_lightness(luminance(5.0)), 51.0, epsilon = 1.0);
    }

    #[test]
    fn neutral_axis_is_gray() {
        let white = lattice_color(0, 14, 0).unwrap();
        approx::assert_abs_diff_eq!(white.0, 1.0, epsilon = 0.01);
        approx::assert_abs_diff_eq!(white.1, 1.0, epsilon = 0.01);
        approx::assert_abs_diff_eq!(white.2, 1.0, epsilon = 0.01);

        let gray = lattice_color(17, 9, 0).unwrap();
        approx::assert_abs_diff_eq!(gray.0, gray.1, epsilon = 1.0e-3);
        approx::assert_abs_diff_eq!(gray.1, gray.2, epsilon = 1.0e-3);

        let black = lattice_color(5, 0, 0).unwrap();
        approx::assert_abs_diff_eq!(black.0, 0.0, epsilon = 1.0e-4);
        approx::assert_abs_diff_eq!(black.2, 0.0, epsilon = 1.0e-4);
    }

    #[test]
    fn high_chroma_leaves_the_gamut() {
        assert!(lattice_color(1, 9, 2).is_some());
        assert!(lattice_color(1, 9, 25).is_none());
        assert!(lattice_color(1, 0, 3).is_none());
    }

    #[test]
    fn red_hue_is_reddish() {
        let red = lattice_color(1, 9, 4).unwrap();
        assert!(red.0 > red.1 && red.0 > red.2);
    }
}
