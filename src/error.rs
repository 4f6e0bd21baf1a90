//! Errors for the fallible edges of the crate: loading lookup tables and
//! parsing colors. Gamut gaps are never errors.

use thiserror::Error;

/// Errors that can occur while loading tables or parsing colors.
#[derive(Debug, Error)]
pub enum Error {
    /// The table document is not valid JSON for the nested layout.
    #[error("invalid table document: {0}")]
    Json(#[from] serde_json::Error),

    /// The table document could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The table has an empty or oversized axis.
    #[error("invalid table shape {hues}x{values}x{chromas}")]
    Shape {
        /// Number of hue steps.
        hues: usize,
        /// Number of value levels.
        values: usize,
        /// Number of chroma levels.
        chromas: usize,
    },

    /// A cell did not hold exactly three channels.
    #[error("cell [{hue}][{value}][{chroma}] has {len} channels, expected 3")]
    Channel {
        /// Hue index of the cell.
        hue: usize,
        /// Value index of the cell.
        value: usize,
        /// Chroma index of the cell.
        chroma: usize,
        /// Number of channels found.
        len: usize,
    },

    /// A hex color string was malformed.
    #[error("invalid hex color: {0:?}")]
    Hex(String),
}
