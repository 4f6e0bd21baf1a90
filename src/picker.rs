//! The pieces a picker front end needs around the table: reading the host's
//! active colors, choosing slice coordinates for them, and handing grids to
//! a renderer.

use crate::color::{Component, Components, Rgb8};
use crate::hls::Hls;
use crate::math::lerp;
use crate::slice::Slice;
use crate::table::MunsellTable;

/// Number of swatches in the foreground to background transition.
pub const TRANSITION_STEPS: usize = 10;

/// Number of swatches in the quick preview grid, laid out in rows of 5.
pub const QUICK_GRID_LEN: usize = 10;

/// The host application's active colors, polled on demand.
pub trait ColorSource {
    /// Current foreground color, normalized sRGB.
    fn foreground(&self) -> Components;

    /// Current background color, normalized sRGB.
    fn background(&self) -> Components;
}

/// Something that can present a grid of swatches.
pub trait SwatchRenderer {
    /// The renderer's error type.
    type Error;

    /// Present `slice` as a grid, one row per slice row.
    fn render(&mut self, slice: &Slice) -> Result<(), Self::Error>;
}

/// Table coordinates for the three slices through a color.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SliceParams {
    /// Hue index for the fixed hue slice.
    pub hue: Component,
    /// Value index for the fixed value slice.
    pub value: usize,
    /// Chroma index for the fixed chroma slice.
    pub chroma: Component,
}

impl SliceParams {
    /// Pick slice coordinates in `table` from the HLS decomposition of
    /// `color`.
    pub fn for_color(table: &MunsellTable, color: Components) -> Self {
        let hls = Hls::from_rgb(color);

        let hue = (hls.hue / 360.0 * table.hues() as Component) % table.hues() as Component;

        // Inverse of the table's lightness steps: 0.02 per level below 0.1,
        // then 0.1 per level.
        let lightness = hls.lightness.clamp(0.0, 1.0);
        let value = if lightness < 0.1 {
            (lightness / 0.02).round()
        } else {
            (lightness * 10.0).round() + 4.0
        };
        let max_value = table.values().saturating_sub(1).max(1);
        let value = (value as usize).clamp(1, max_value);

        let chromas = table.chromas() as Component;
        let max_chroma = table.chromas().saturating_sub(1) as Component;
        let chroma = (hls.saturation * chromas).clamp(0.0, max_chroma);

        Self { hue, value, chroma }
    }
}

/// Blend from `foreground` to `background` in `steps` swatches, both ends
/// included. Channels are blended on the 8-bit scale and truncated.
pub fn transition_swatches(foreground: Rgb8, background: Rgb8, steps: usize) -> Vec<Rgb8> {
    if steps < 2 {
        return std::iter::repeat(foreground).take(steps).collect();
    }

    (0..steps)
        .map(|i| {
            let t = i as Component / (steps - 1) as Component;
            let mix = |a: u8, b: u8| lerp(a as Component, b as Component, t).trunc() as u8;
            Rgb8(
                mix(foreground.0, background.0),
                mix(foreground.1, background.1),
                mix(foreground.2, background.2),
            )
        })
        .collect()
}

/// A small preview of dark Munsell colors, steered by the luma of
/// `foreground`: five hues across two chroma levels.
pub fn quick_grid(table: &MunsellTable, foreground: Rgb8) -> Vec<Rgb8> {
    let luma = foreground.luma() / 255.0;

    (0..QUICK_GRID_LEN)
        .map(|n| {
            let hue = (n % 5) as Component / 5.0 * 39.0;
            let value = (0.1 + luma * 0.9).clamp(0.0, 1.0);
            let chroma = (0.5 + (n / 5) as Component * 1.5).clamp(0.0, 1.0);
            table.interpolate(hue, value, chroma)
        })
        .collect()
}

/// Everything a picker shows for one poll of the host colors.
#[derive(Clone, Debug, PartialEq)]
pub struct PickerState {
    /// Foreground as reported by the host, truncated to 8 bits.
    pub foreground: Rgb8,
    /// Background as reported by the host, truncated to 8 bits.
    pub background: Rgb8,
    /// Coordinates the slices were taken at.
    pub params: SliceParams,
    /// Foreground to background blend.
    pub transitions: Vec<Rgb8>,
    /// Quick Munsell preview.
    pub quick: Vec<Rgb8>,
    /// Slice through the foreground's hue.
    pub hue_slice: Slice,
    /// Slice through the foreground's value.
    pub value_slice: Slice,
    /// Slice through the foreground's chroma.
    pub chroma_slice: Slice,
}

impl PickerState {
    /// Poll `source` and compute every grid for its colors.
    pub fn poll(table: &MunsellTable, source: &impl ColorSource) -> Self {
        let foreground_components = source.foreground();
        let foreground = Rgb8::from_normalized_truncated(foreground_components);
        let background = Rgb8::from_normalized_truncated(source.background());

        let params = SliceParams::for_color(table, foreground_components);
        tracing::debug!(
            foreground = %foreground.to_hex(),
            background = %background.to_hex(),
            ?params,
            "polled picker colors"
        );

        Self {
            foreground,
            background,
            params,
            transitions: transition_swatches(foreground, background, TRANSITION_STEPS),
            quick: quick_grid(table, foreground),
            hue_slice: table.fixed_hue_slice(params.hue),
            value_slice: table.fixed_value_slice(params.value),
            chroma_slice: table.fixed_chroma_slice(params.chroma),
        }
    }

    /// Hand the three slices to `renderer`, hue first.
    pub fn render<R: SwatchRenderer>(&self, renderer: &mut R) -> Result<(), R::Error> {
        renderer.render(&self.hue_slice)?;
        renderer.render(&self.value_slice)?;
        renderer.render(&self.chroma_slice)
    }
}
