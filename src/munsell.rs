//! A point in the Munsell lookup table's index space.

use std::fmt;

use crate::color::{Component, Rgb8};
use crate::renotation::{hue_step, munsell_chroma, munsell_value};
use crate::table::MunsellTable;

munsell_macros::gen_model! {
    /// Fractional table coordinates. `hue` wraps around the hue axis,
    /// `value` and `chroma` do not.
    pub struct Munsell {
        /// Hue index, 4 steps per hue family.
        hue: Component,
        /// Value (lightness) index.
        value: Component,
        /// Chroma index.
        chroma: Component,
    }
}

impl Munsell {
    /// Interpolate the color of this point in `table`.
    pub fn to_rgb8(&self, table: &MunsellTable) -> Rgb8 {
        table.interpolate(self.hue, self.value, self.chroma)
    }
}

/// Formats in Munsell notation, e.g. `5.0R 5.0/14.0`.
impl fmt::Display for Munsell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (step, family) = hue_step(self.hue);

        write!(
            f,
            "{:.1}{} {:.1}/{:.1}",
            step,
            family,
            munsell_value(self.value),
            munsell_chroma(self.chroma)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Components;

    #[test]
    fn notation() {
        assert_eq!(Munsell::new(1.0, 9.0, 7.0).to_string(), "5.0R 5.0/14.0");
        assert_eq!(Munsell::new(31.0, 2.0, 1.5).to_string(), "10.0PB 0.4/3.0");
        assert_eq!(Munsell::new(40.0, 14.0, 0.0).to_string(), "2.5R 10.0/0.0");
        assert_eq!(Munsell::new(4.2, 5.0, 0.0).to_string(), "3.0YR 1.0/0.0");
    }

    #[test]
    fn notation_steps_stay_within_a_family() {
        assert_eq!(Munsell::new(3.5, 9.0, 2.0).to_string(), "1.2YR 5.0/4.0");
        assert_eq!(Munsell::new(39.5, 9.0, 2.0).to_string(), "1.2R 5.0/4.0");
        assert_eq!(Munsell::new(3.0, 9.0, 2.0).to_string(), "10.0R 5.0/4.0");
        assert_eq!(Munsell::new(-1.0e-7, 9.0, 2.0).to_string(), "2.5R 5.0/4.0");
    }

    #[test]
    fn components_round_trip() {
        let point = Munsell::from(Components(3.0, 4.0, 5.0));
        assert_eq!(point.hue, 3.0);
        assert_eq!(point.to_components(), Components(3.0, 4.0, 5.0));
    }
}
