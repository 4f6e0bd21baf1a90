//! Planes through the Munsell solid with one coordinate held fixed, used to
//! fill picker grids.
//!
//! Each generator scans outward along the inner axis and treats the first
//! unusable color as the end of the gamut in that direction. The fixed
//! chroma scan is the exception: it steps over hues with no color and only
//! stops at colors that are present but unusable.

use crate::color::{Component, Components, Rgb8};
use crate::munsell::Munsell;
use crate::table::MunsellTable;
use crate::validity::{is_chartable, is_valid_color};

/// Colors whose channel sum is at or below this are too dark to pick.
pub const MIN_BRIGHTNESS: u16 = 30;

/// Which coordinate a [`Slice`] holds fixed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Fixed {
    /// Fixed hue index; rows are values, columns are chromas.
    Hue(Component),
    /// Fixed value index; rows are hues, columns are chromas.
    Value(usize),
    /// Fixed chroma index; rows are values, columns are hues.
    Chroma(Component),
}

/// One swatch of a slice.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SliceCell {
    /// Where in the table the swatch was taken.
    pub munsell: Munsell,
    /// The interpolated color.
    pub rgb: Rgb8,
}

impl SliceCell {
    /// The swatch color in [0..1].
    pub fn color(&self) -> Components {
        self.rgb.to_normalized()
    }
}

/// A row of swatches along the inner axis.
#[derive(Clone, Debug, PartialEq)]
pub struct SliceRow {
    /// Index on the outer axis.
    pub index: usize,
    /// Swatches in scan order. May be empty.
    pub cells: Vec<SliceCell>,
}

/// A two dimensional grid of usable colors.
#[derive(Clone, Debug, PartialEq)]
pub struct Slice {
    /// The coordinate held fixed.
    pub fixed: Fixed,
    /// Rows in outer axis order. Rows can have different lengths.
    pub rows: Vec<SliceRow>,
}

impl Slice {
    /// The swatch colors as a ragged matrix of normalized triples.
    pub fn to_matrix(&self) -> Vec<Vec<Components>> {
        self.rows
            .iter()
            .map(|row| row.cells.iter().map(SliceCell::color).collect())
            .collect()
    }

    /// Total number of swatches.
    pub fn len(&self) -> usize {
        self.rows.iter().map(|row| row.cells.len()).sum()
    }

    /// True if the slice holds no swatches at all.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// True if a color is present and not black.
fn is_present(rgb: Rgb8) -> bool {
    is_chartable(&rgb.to_normalized()) && !rgb.is_black()
}

/// True if a present color can be displayed and is bright enough to pick.
fn is_pickable(rgb: Rgb8) -> bool {
    is_valid_color(&rgb.to_normalized()) && rgb.brightness() > MIN_BRIGHTNESS
}

impl MunsellTable {
    /// Scan chromas from zero at the given point, stopping at the first
    /// color that is missing or unusable.
    fn scan_chromas(&self, hue: Component, value: usize) -> Vec<SliceCell> {
        let mut cells = vec![];
        for chroma in 0..self.chromas() {
            let munsell = Munsell::new(hue, value as Component, chroma as Component);
            let rgb = munsell.to_rgb8(self);
            if !is_present(rgb) || !is_pickable(rgb) {
                break;
            }
            cells.push(SliceCell { munsell, rgb });
        }
        cells
    }

    /// Values against chromas for a fixed hue. Rows with no usable color are
    /// left out.
    pub fn fixed_hue_slice(&self, hue: Component) -> Slice {
        let rows: Vec<_> = (1..self.values())
            .filter_map(|value| {
                let cells = self.scan_chromas(hue, value);
                (!cells.is_empty()).then_some(SliceRow { index: value, cells })
            })
            .collect();

        tracing::trace!(hue, rows = rows.len(), "generated fixed hue slice");
        Slice {
            fixed: Fixed::Hue(hue),
            rows,
        }
    }

    /// Hues against chromas for a fixed value. Every hue gets a row, even
    /// an empty one.
    pub fn fixed_value_slice(&self, value: usize) -> Slice {
        let rows: Vec<_> = (0..self.hues())
            .map(|hue| SliceRow {
                index: hue,
                cells: self.scan_chromas(hue as Component, value),
            })
            .collect();

        tracing::trace!(value, rows = rows.len(), "generated fixed value slice");
        Slice {
            fixed: Fixed::Value(value),
            rows,
        }
    }

    /// Values against hues for a fixed chroma. Hues with no color are
    /// skipped; a present but unusable color ends the row. Every value gets
    /// a row, even an empty one.
    pub fn fixed_chroma_slice(&self, chroma: Component) -> Slice {
        let rows: Vec<_> = (1..self.values())
            .map(|value| {
                let mut cells = vec![];
                for hue in 0..self.hues() {
                    let munsell = Munsell::new(hue as Component, value as Component, chroma);
                    let rgb = munsell.to_rgb8(self);
                    if !is_present(rgb) {
                        continue;
                    }
                    if !is_pickable(rgb) {
                        break;
                    }
                    cells.push(SliceCell { munsell, rgb });
                }
                SliceRow {
                    index: value,
                    cells,
                }
            })
            .collect();

        tracing::trace!(chroma, rows = rows.len(), "generated fixed chroma slice");
        Slice {
            fixed: Fixed::Chroma(chroma),
            rows,
        }
    }
}

/// [`MunsellTable::fixed_hue_slice`] on the standard table.
pub fn fixed_hue_slice(hue: Component) -> Slice {
    MunsellTable::standard().fixed_hue_slice(hue)
}

/// [`MunsellTable::fixed_value_slice`] on the standard table.
pub fn fixed_value_slice(value: usize) -> Slice {
    MunsellTable::standard().fixed_value_slice(value)
}

/// [`MunsellTable::fixed_chroma_slice`] on the standard table.
pub fn fixed_chroma_slice(chroma: Component) -> Slice {
    MunsellTable::standard().fixed_chroma_slice(chroma)
}
