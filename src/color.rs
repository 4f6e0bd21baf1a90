//! The basic color values passed around the crate: normalized [`Components`]
//! and 8-bit display colors ([`Rgb8`]).

use bitflags::bitflags;

use crate::Error;

#[cfg(not(feature = "f64"))]
/// A 32-bit floating point value that all components are stored as.
pub type Component = f32;

#[cfg(feature = "f64")]
/// A 64-bit floating point value that all components are stored as.
pub type Component = f64;

/// Represent the three components that describe any color.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Components(pub Component, pub Component, pub Component);

impl Components {
    /// Return new components with each component mapped with the given
    /// function.
    pub fn map(&self, f: impl Fn(Component) -> Component) -> Self {
        Self(f(self.0), f(self.1), f(self.2))
    }

    /// Return the component at `channel` (0, 1 or 2).
    pub fn channel(&self, channel: usize) -> Component {
        match channel {
            0 => self.0,
            1 => self.1,
            2 => self.2,
            _ => panic!("channel {channel} out of range"),
        }
    }

    /// Return the components as an array.
    pub fn to_array(&self) -> [Component; 3] {
        [self.0, self.1, self.2]
    }
}

bitflags! {
    /// Flags to mark missing components of a sample.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct Flags : u8 {
        /// Set when the first component is missing.
        const C0_IS_NONE = 1 << 0;
        /// Set when the second component is missing.
        const C1_IS_NONE = 1 << 1;
        /// Set when the third component is missing.
        const C2_IS_NONE = 1 << 2;
    }
}

impl Flags {
    /// The flag marking `channel` as missing.
    pub fn for_channel(channel: usize) -> Self {
        match channel {
            0 => Flags::C0_IS_NONE,
            1 => Flags::C1_IS_NONE,
            2 => Flags::C2_IS_NONE,
            _ => panic!("channel {channel} out of range"),
        }
    }
}

/// A color with 8-bit red, green and blue channels, ready for display.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgb8(pub u8, pub u8, pub u8);

impl Rgb8 {
    /// Pure black, also the result of every rejected lookup.
    pub const BLACK: Rgb8 = Rgb8(0, 0, 0);

    /// True when all channels are zero.
    pub fn is_black(&self) -> bool {
        *self == Self::BLACK
    }

    /// Sum of the three 8-bit channels.
    pub fn brightness(&self) -> u16 {
        self.0 as u16 + self.1 as u16 + self.2 as u16
    }

    /// Perceptual luma (ITU-R BT.601 weights) on the 8-bit scale.
    pub fn luma(&self) -> Component {
        0.299 * self.0 as Component + 0.587 * self.1 as Component + 0.114 * self.2 as Component
    }

    /// A text color that stays readable on top of this color.
    pub fn contrast_text(&self) -> Rgb8 {
        if self.luma() < 128.0 {
            Rgb8(255, 255, 255)
        } else {
            Rgb8::BLACK
        }
    }

    /// Scale the channels down to [0..1].
    pub fn to_normalized(&self) -> Components {
        Components(
            self.0 as Component / 255.0,
            self.1 as Component / 255.0,
            self.2 as Component / 255.0,
        )
    }

    /// Truncate normalized components to 8 bits, the way host applications
    /// report their active colors.
    pub fn from_normalized_truncated(components: Components) -> Self {
        let c = components.map(|v| (v * 255.0).clamp(0.0, 255.0).trunc());
        Rgb8(c.0 as u8, c.1 as u8, c.2 as u8)
    }

    /// Format as `#RRGGBB`.
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }

    /// Parse a `#RRGGBB` (or `RRGGBB`) string.
    pub fn from_hex(hex: &str) -> Result<Self, Error> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.is_ascii() {
            return Err(Error::Hex(hex.to_string()));
        }

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16).map_err(|_| Error::Hex(hex.to_string()))
        };

        Ok(Rgb8(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}
