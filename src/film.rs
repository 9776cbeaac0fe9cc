use std::cmp::Ordering;
use std::fmt;

/// A single on-disk year is stored as `year - 1900` in one byte, so the
/// representable range is 1900..=2155.
const YEAR_EPOCH: u16 = 1900;

/// A (title, year) pair. Two films are equal iff both fields match; order
/// is lexicographic on title, then numeric on year.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Film {
    pub title: String,
    pub year: u16,
}

impl Film {
    pub fn new(title: impl Into<String>, year: u16) -> Self {
        Self {
            title: title.into(),
            year,
        }
    }

    /// Decodes the single stored byte (`year - 1900`) into a calendar year.
    pub fn year_from_byte(byte: u8) -> u16 {
        YEAR_EPOCH + byte as u16
    }

    /// Encodes a calendar year back into the on-disk byte. Panics if the
    /// year is outside the representable range; this is only used by
    /// tests building fixture files.
    pub fn year_to_byte(year: u16) -> u8 {
        let delta = year - YEAR_EPOCH;
        assert!(delta <= 255, "year {year} out of range");
        delta as u8
    }
}

impl Ord for Film {
    fn cmp(&self, other: &Self) -> Ordering {
        self.title.cmp(&other.title).then(self.year.cmp(&other.year))
    }
}

impl PartialOrd for Film {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Film {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\" ({})", self.title, self.year)
    }
}
