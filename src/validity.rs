//! Predicates deciding whether a table sample or a computed color can be
//! used at all.
//!
//! The lookup table only encodes Munsell coordinates that have a real,
//! displayable color. Everything else has to be recognized and excluded
//! rather than silently producing a wrong color.

use crate::color::{Component, Components, Flags, Rgb8};

/// True if all three components are present numbers.
pub fn is_chartable(components: &Components) -> bool {
    !components.0.is_nan() && !components.1.is_nan() && !components.2.is_nan()
}

/// Like [`is_chartable`], also honoring the missing component `flags`.
pub fn is_chartable_with_flags(components: &Components, flags: Flags) -> bool {
    flags.is_empty() && is_chartable(components)
}

/// Round each channel to the nearest 8-bit step, halves to even.
///
/// Returns `None` when any rounded channel falls outside [0..255] or is not
/// a number.
fn round_to_8bit(components: &Components) -> Option<[i32; 3]> {
    let rounded = components.map(|c| (c * 255.0).round_ties_even());
    let in_range = |c: Component| (0.0..=255.0).contains(&c);

    if in_range(rounded.0) && in_range(rounded.1) && in_range(rounded.2) {
        Some([rounded.0 as i32, rounded.1 as i32, rounded.2 as i32])
    } else {
        None
    }
}

/// Convert normalized components to 8-bit display channels.
///
/// If any channel rounds to a value outside [0..255] the whole color is
/// rejected and black is returned. Channels are never clamped.
pub fn to_display_rgb(components: &Components) -> Rgb8 {
    match round_to_8bit(components) {
        Some([r, g, b]) => Rgb8(r as u8, g as u8, b as u8),
        None => Rgb8::BLACK,
    }
}

/// True if [`to_display_rgb`] would not reject these components.
pub fn is_valid_color(components: &Components) -> bool {
    round_to_8bit(components).is_some()
}
