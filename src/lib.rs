//! munsell provides a Munsell color lookup table, trilinear interpolation
//! over it and the slice generators a color picker needs to lay out grids
//! of displayable colors.

#![deny(missing_docs)]

pub mod color;
mod error;
pub mod hls;
pub mod interpolate;
mod math;
pub mod munsell;
pub mod picker;
pub mod renotation;
pub mod slice;
pub mod table;
pub mod validity;

#[cfg(test)]
mod test;

pub use color::{Component, Components, Flags, Rgb8};
pub use error::Error;
pub use hls::Hls;
pub use interpolate::interpolate;
pub use munsell::Munsell;
pub use picker::{ColorSource, PickerState, SliceParams, SwatchRenderer};
pub use slice::{
    fixed_chroma_slice, fixed_hue_slice, fixed_value_slice, Fixed, Slice, SliceCell, SliceRow,
};
pub use table::{MunsellTable, Sample};
pub use validity::{is_chartable, is_valid_color, to_display_rgb};
