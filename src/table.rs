//! The Munsell lookup table: sRGB samples addressed by discrete hue, value
//! and chroma indices.
//!
//! Only the hue axis wraps. Value and chroma lookups past either end of
//! their axis simply find no sample.

use std::io::Read;
use std::sync::OnceLock;

use crate::color::{Component, Components, Flags};
use crate::validity::is_chartable_with_flags;
use crate::{renotation, Error};

/// Number of hue steps in the standard table (2.5 hue steps around the
/// circle).
pub const HUES: usize = 40;
/// Number of value levels in the standard table.
pub const VALUES: usize = 15;
/// Number of chroma levels in the standard table.
pub const CHROMAS: usize = 26;

/// A single cell of the table.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sample {
    /// Normalized sRGB components. Missing components hold 0.0.
    pub components: Components,
    /// Marks the missing components.
    pub flags: Flags,
}

impl Sample {
    /// A cell with no realizable color.
    pub const ABSENT: Sample = Sample {
        components: Components(0.0, 0.0, 0.0),
        flags: Flags::all(),
    };

    /// Create a sample from per-channel optional values.
    pub fn new(c0: Option<Component>, c1: Option<Component>, c2: Option<Component>) -> Self {
        let mut flags = Flags::empty();
        let mut value = |c: Option<Component>, channel: usize| match c {
            Some(c) => c,
            None => {
                flags |= Flags::for_channel(channel);
                0.0
            }
        };

        let components = Components(value(c0, 0), value(c1, 1), value(c2, 2));

        Self { components, flags }
    }

    /// The value of `channel`, or `None` if it is missing or not a number.
    pub fn channel(&self, channel: usize) -> Option<Component> {
        if self.flags.contains(Flags::for_channel(channel)) {
            return None;
        }
        let value = self.components.channel(channel);
        if value.is_nan() {
            None
        } else {
            Some(value)
        }
    }

    /// True if every channel holds a number.
    pub fn is_chartable(&self) -> bool {
        is_chartable_with_flags(&self.components, self.flags)
    }
}

impl From<Option<Components>> for Sample {
    fn from(value: Option<Components>) -> Self {
        match value {
            Some(Components(c0, c1, c2)) => Sample::new(Some(c0), Some(c1), Some(c2)),
            None => Sample::ABSENT,
        }
    }
}

/// Nested `[hue][value][chroma] -> [r, g, b] | null` layout of table
/// documents. Individual channels may also be `null`.
type Document = Vec<Vec<Vec<Option<Vec<Option<Component>>>>>>;

/// An immutable three dimensional table of sRGB samples.
#[derive(Clone, Debug)]
pub struct MunsellTable {
    hues: usize,
    values: usize,
    chromas: usize,
    samples: Vec<Sample>,
}

static STANDARD: OnceLock<MunsellTable> = OnceLock::new();

impl MunsellTable {
    /// The table bundled with the crate, built on first use.
    pub fn standard() -> &'static MunsellTable {
        STANDARD.get_or_init(|| {
            let table = renotation::build_standard_table();
            tracing::debug!(
                chartable = table.chartable_count(),
                "built standard munsell table"
            );
            table
        })
    }

    /// Build a table by evaluating `f` for every cell. `None` marks a cell
    /// with no realizable color.
    pub fn from_fn(
        hues: usize,
        values: usize,
        chromas: usize,
        f: impl FnMut(usize, usize, usize) -> Option<Components>,
    ) -> Result<Self, Error> {
        Self::checked_len(hues, values, chromas)?;
        Ok(Self::tabulate(hues, values, chromas, f))
    }

    /// [`MunsellTable::from_fn`] for shapes known to be valid.
    pub(crate) fn tabulate(
        hues: usize,
        values: usize,
        chromas: usize,
        mut f: impl FnMut(usize, usize, usize) -> Option<Components>,
    ) -> Self {
        let mut samples = Vec::with_capacity(hues * values * chromas);
        for hue in 0..hues {
            for value in 0..values {
                for chroma in 0..chromas {
                    samples.push(Sample::from(f(hue, value, chroma)));
                }
            }
        }

        Self {
            hues,
            values,
            chromas,
            samples,
        }
    }

    /// Load a table from a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, Error> {
        let document: Document = serde_json::from_str(json)?;
        Self::from_document(document)
    }

    /// Load a table from a reader producing a JSON document. Read failures
    /// and invalid UTF-8 are reported as [`Error::Io`].
    pub fn from_json_reader(mut reader: impl Read) -> Result<Self, Error> {
        let mut json = String::new();
        reader.read_to_string(&mut json)?;
        Self::from_json_str(&json)
    }

    fn from_document(document: Document) -> Result<Self, Error> {
        let hues = document.len();
        let values = document.iter().map(Vec::len).max().unwrap_or(0);
        let chromas = document
            .iter()
            .flatten()
            .map(Vec::len)
            .max()
            .unwrap_or(0);
        let len = Self::checked_len(hues, values, chromas)?;

        // Ragged rows are padded with absent cells.
        let mut samples = vec![Sample::ABSENT; len];
        for (hue, planes) in document.into_iter().enumerate() {
            for (value, row) in planes.into_iter().enumerate() {
                for (chroma, cell) in row.into_iter().enumerate() {
                    let Some(channels) = cell else {
                        continue;
                    };
                    if channels.len() != 3 {
                        return Err(Error::Channel {
                            hue,
                            value,
                            chroma,
                            len: channels.len(),
                        });
                    }
                    samples[(hue * values + value) * chromas + chroma] =
                        Sample::new(channels[0], channels[1], channels[2]);
                }
            }
        }

        let table = Self {
            hues,
            values,
            chromas,
            samples,
        };
        tracing::debug!(
            hues,
            values,
            chromas,
            chartable = table.chartable_count(),
            "loaded munsell table"
        );
        Ok(table)
    }

    /// Serialize into the nested JSON layout accepted by
    /// [`MunsellTable::from_json_str`].
    pub fn to_json_string(&self) -> Result<String, Error> {
        let document: Document = (0..self.hues)
            .map(|hue| {
                (0..self.values)
                    .map(|value| {
                        (0..self.chromas)
                            .map(|chroma| {
                                let sample = &self.samples[self.offset(hue, value, chroma)];
                                if sample.flags == Flags::all() {
                                    None
                                } else {
                                    Some((0..3).map(|c| sample.channel(c)).collect())
                                }
                            })
                            .collect()
                    })
                    .collect()
            })
            .collect();

        Ok(serde_json::to_string(&document)?)
    }

    fn checked_len(hues: usize, values: usize, chromas: usize) -> Result<usize, Error> {
        hues.checked_mul(values)
            .and_then(|n| n.checked_mul(chromas))
            .filter(|&n| n > 0)
            .ok_or(Error::Shape {
                hues,
                values,
                chromas,
            })
    }

    #[inline]
    fn offset(&self, hue: usize, value: usize, chroma: usize) -> usize {
        (hue * self.values + value) * self.chromas + chroma
    }

    /// Number of hue steps. The hue axis wraps around after the last one.
    pub fn hues(&self) -> usize {
        self.hues
    }

    /// Number of value levels.
    pub fn values(&self) -> usize {
        self.values
    }

    /// Number of chroma levels.
    pub fn chromas(&self) -> usize {
        self.chromas
    }

    /// Wrap any integer hue index onto the hue axis.
    pub fn wrap_hue(&self, hue: i64) -> usize {
        hue.rem_euclid(self.hues as i64) as usize
    }

    /// Return the sample at the given indices, or `None` if any index lies
    /// outside the table. Hue indices are not wrapped here.
    #[inline]
    pub fn get(&self, hue: usize, value: usize, chroma: usize) -> Option<&Sample> {
        if hue < self.hues && value < self.values && chroma < self.chromas {
            Some(&self.samples[self.offset(hue, value, chroma)])
        } else {
            None
        }
    }

    /// Like [`MunsellTable::get`], but with signed indices so that lookups
    /// below zero find nothing.
    pub(crate) fn get_signed(&self, hue: usize, value: i64, chroma: i64) -> Option<&Sample> {
        let value = usize::try_from(value).ok()?;
        let chroma = usize::try_from(chroma).ok()?;
        self.get(hue, value, chroma)
    }

    /// True if the cell addressed by truncating the coordinates holds a
    /// chartable sample. The hue wraps.
    pub fn entry_exists(&self, hue: Component, value: Component, chroma: Component) -> bool {
        if !(hue.is_finite() && value.is_finite() && chroma.is_finite()) {
            return false;
        }
        let hue = self.wrap_hue(hue.trunc() as i64);
        self.get_signed(hue, value.trunc() as i64, chroma.trunc() as i64)
            .is_some_and(Sample::is_chartable)
    }

    /// Number of chartable cells.
    pub fn chartable_count(&self) -> usize {
        self.samples.iter().filter(|s| s.is_chartable()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toy() -> MunsellTable {
        MunsellTable::from_fn(4, 3, 2, |h, v, c| {
            if v == 0 && c == 1 {
                None
            } else {
                Some(Components(
                    h as Component / 4.0,
                    v as Component / 3.0,
                    c as Component / 2.0,
                ))
            }
        })
        .unwrap()
    }

    #[test]
    fn lookups_are_bounds_checked() {
        let table = toy();
        assert_eq!(
            table.get(1, 2, 1).map(|s| s.components),
            Some(Components(0.25, 2.0 / 3.0, 0.5))
        );
        assert!(table.get(4, 0, 0).is_none());
        assert!(table.get(0, 3, 0).is_none());
        assert!(table.get(0, 0, 2).is_none());
        assert!(table.get_signed(0, -1, 0).is_none());
        assert!(!table.get(0, 0, 1).unwrap().is_chartable());
    }

    #[test]
    fn only_hue_wraps() {
        let table = toy();
        assert_eq!(table.wrap_hue(4), 0);
        assert_eq!(table.wrap_hue(-1), 3);
        assert!(table.entry_exists(5.7, 1.0, 1.0));
        assert!(table.entry_exists(-0.5, 2.9, 0.0));
        assert!(!table.entry_exists(0.0, 3.0, 0.0));
        assert!(!table.entry_exists(0.0, 0.0, 1.0));
        assert!(!table.entry_exists(0.0, Component::NAN, 0.0));
    }

    #[test]
    fn missing_channels() {
        let sample = Sample::new(Some(0.5), None, Some(Component::NAN));
        assert_eq!(sample.channel(0), Some(0.5));
        assert_eq!(sample.channel(1), None);
        assert_eq!(sample.channel(2), None);
        assert!(!sample.is_chartable());
        assert!(Sample::from(Some(Components(0.1, 0.2, 0.3))).is_chartable());
        assert!(!Sample::from(None).is_chartable());
    }

    #[test]
    fn json_documents_may_be_ragged() {
        let json = r#"[
            [[[0.1, 0.2, 0.3], null], [[0.4, 0.5, 0.6]]],
            [[[0.7, null, 0.9]]]
        ]"#;
        let table = MunsellTable::from_json_str(json).unwrap();
        assert_eq!((table.hues(), table.values(), table.chromas()), (2, 2, 2));
        assert!(table.get(0, 0, 0).unwrap().is_chartable());
        assert!(!table.get(0, 0, 1).unwrap().is_chartable());
        assert!(table.get(0, 1, 0).unwrap().is_chartable());
        assert!(!table.get(0, 1, 1).unwrap().is_chartable());
        assert!(!table.get(1, 0, 0).unwrap().is_chartable());
        assert!(!table.get(1, 1, 1).unwrap().is_chartable());
        assert_eq!(table.chartable_count(), 2);
    }

    #[test]
    fn json_errors() {
        assert!(matches!(
            MunsellTable::from_json_str("[[[[0.1, 0.2]]]]"),
            Err(Error::Channel { len: 2, .. })
        ));
        assert!(matches!(
            MunsellTable::from_json_str("[]"),
            Err(Error::Shape { .. })
        ));
        assert!(matches!(
            MunsellTable::from_json_str("{"),
            Err(Error::Json(_))
        ));
    }

    #[test]
    fn reader_failures_are_io_errors() {
        let bytes: &[u8] = &[b'[', 0xff, 0xfe, b']'];
        assert!(matches!(
            MunsellTable::from_json_reader(bytes),
            Err(Error::Io(_))
        ));

        let json: &[u8] = b"[[[[0.1, 0.2, 0.3]]]]";
        let table = MunsellTable::from_json_reader(json).unwrap();
        assert_eq!(table.chartable_count(), 1);
    }

    #[test]
    fn json_round_trip_keeps_gaps() {
        let table = toy();
        let reloaded = MunsellTable::from_json_str(&table.to_json_string().unwrap()).unwrap();
        assert_eq!(reloaded.chartable_count(), table.chartable_count());
        assert_eq!(reloaded.get(3, 1, 1), table.get(3, 1, 1));
        assert!(!reloaded.get(2, 0, 1).unwrap().is_chartable());
    }

    #[test]
    fn standard_table_shape() {
        let table = MunsellTable::standard();
        assert_eq!(
            (table.hues(), table.values(), table.chromas()),
            (HUES, VALUES, CHROMAS)
        );
        assert!(table.chartable_count() > 0);
        assert!(table.chartable_count() < HUES * VALUES * CHROMAS);
    }
}
