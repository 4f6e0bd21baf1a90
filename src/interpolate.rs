//! Trilinear interpolation over the lookup table.

use crate::color::{Component, Rgb8};
use crate::table::MunsellTable;

/// Weighted contribution of one corner channel. A zero weight or a missing
/// value contributes nothing.
fn weighted(weight: Component, value: Option<Component>) -> Component {
    match value {
        Some(value) if weight != 0.0 => weight * value,
        _ => 0.0,
    }
}

fn to_8bit(value: Component) -> u8 {
    (value * 255.0).round_ties_even().clamp(0.0, 255.0) as u8
}

impl MunsellTable {
    /// Estimate the color at fractional table coordinates.
    ///
    /// `hue` wraps around the hue axis. If the cell containing the point is
    /// outside the table or has no color, black is returned without
    /// blending.
    ///
    /// Corners with a missing channel contribute nothing to that channel, so
    /// the result is darkened next to gamut gaps rather than renormalized.
    pub fn interpolate(&self, hue: Component, value: Component, chroma: Component) -> Rgb8 {
        assert!(
            hue.is_finite() && value.is_finite() && chroma.is_finite(),
            "non-finite munsell coordinates ({hue}, {value}, {chroma})"
        );

        let hue = hue.rem_euclid(self.hues() as Component);

        let i0 = self.wrap_hue(hue.floor() as i64);
        let i1 = (i0 + 1) % self.hues();
        let j0 = value.floor() as i64;
        let k0 = chroma.floor() as i64;

        match self.get_signed(i0, j0, k0) {
            Some(base) if base.is_chartable() => {}
            _ => return Rgb8::BLACK,
        }

        let a1 = hue - hue.floor();
        let b1 = value - j0 as Component;
        let c1 = chroma - k0 as Component;

        let corners = [
            (i0, 1.0 - a1, j0, 1.0 - b1, k0, 1.0 - c1),
            (i1, a1, j0, 1.0 - b1, k0, 1.0 - c1),
            (i0, 1.0 - a1, j0 + 1, b1, k0, 1.0 - c1),
            (i1, a1, j0 + 1, b1, k0, 1.0 - c1),
            (i0, 1.0 - a1, j0, 1.0 - b1, k0 + 1, c1),
            (i1, a1, j0, 1.0 - b1, k0 + 1, c1),
            (i0, 1.0 - a1, j0 + 1, b1, k0 + 1, c1),
            (i1, a1, j0 + 1, b1, k0 + 1, c1),
        ];

        let channel = |t: usize| {
            corners
                .iter()
                .map(|&(i, a, j, b, k, c)| {
                    let sample = self.get_signed(i, j, k);
                    weighted(a * b * c, sample.and_then(|s| s.channel(t)))
                })
                .sum::<Component>()
        };

        Rgb8(to_8bit(channel(0)), to_8bit(channel(1)), to_8bit(channel(2)))
    }
}

/// Estimate the color at fractional coordinates of the standard table.
pub fn interpolate(hue: Component, value: Component, chroma: Component) -> Rgb8 {
    MunsellTable::standard().interpolate(hue, value, chroma)
}
