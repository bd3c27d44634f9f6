//! Half-open ranges of neighbor counts.

use crate::error::Error;
use std::{
    convert::TryFrom,
    fmt::{self, Display, Formatter},
    str::FromStr,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A half-open interval `[lower, upper)` of neighbor counts.
///
/// `None` on either side means there is no limit on that side.
///
/// Written as `lower..upper`, where either bound may be omitted.
/// A single number `n` is short for `n..n+1`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "String", into = "String")
)]
pub struct NeighborRange {
    /// Inclusive lower bound.
    pub lower: Option<u32>,
    /// Exclusive upper bound.
    pub upper: Option<u32>,
}

impl NeighborRange {
    /// The range containing every count.
    pub const FULL: Self = NeighborRange::new(None, None);

    /// The range containing no count.
    pub const EMPTY: Self = NeighborRange::new(Some(0), Some(0));

    pub const fn new(lower: Option<u32>, upper: Option<u32>) -> Self {
        NeighborRange { lower, upper }
    }

    /// `[lower, upper)` with both bounds given.
    pub const fn bounded(lower: u32, upper: u32) -> Self {
        NeighborRange::new(Some(lower), Some(upper))
    }

    #[inline]
    pub fn contains(&self, count: u32) -> bool {
        self.lower.map_or(true, |lower| lower <= count)
            && self.upper.map_or(true, |upper| count < upper)
    }

    pub fn is_empty(&self) -> bool {
        match (self.lower, self.upper) {
            (_, Some(0)) => true,
            (Some(lower), Some(upper)) => lower >= upper,
            _ => false,
        }
    }

    /// Rejects a range whose lower bound lies above its upper bound.
    ///
    /// `n..n` is accepted; it is just empty.
    pub fn validate(&self) -> Result<(), Error> {
        match (self.lower, self.upper) {
            (Some(lower), Some(upper)) if lower > upper => Err(Error::InvalidRange(self.to_string())),
            _ => Ok(()),
        }
    }

    /// The range containing exactly the given counts, if they are contiguous.
    ///
    /// An empty slice gives [`NeighborRange::EMPTY`].
    pub(crate) fn from_counts(counts: &[u8]) -> Option<Self> {
        let lower = match counts.iter().min() {
            Some(&lower) => lower as u32,
            None => return Some(NeighborRange::EMPTY),
        };
        let upper = counts.iter().max().map_or(lower, |&upper| upper as u32) + 1;
        if (lower..upper).all(|n| counts.contains(&(n as u8))) {
            Some(NeighborRange::bounded(lower, upper))
        } else {
            None
        }
    }
}

impl Display for NeighborRange {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        if let Some(lower) = self.lower {
            write!(f, "{}", lower)?;
        }
        f.write_str("..")?;
        if let Some(upper) = self.upper {
            write!(f, "{}", upper)?;
        }
        Ok(())
    }
}

impl FromStr for NeighborRange {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidRange(s.to_owned());
        let bound = |b: &str| -> Result<Option<u32>, Error> {
            let b = b.trim();
            if b.is_empty() {
                Ok(None)
            } else {
                b.parse().map(Some).map_err(|_| invalid())
            }
        };

        let range = match s.trim().split_once("..") {
            Some((lower, upper)) => NeighborRange::new(bound(lower)?, bound(upper)?),
            None => {
                let n = bound(s)?.ok_or_else(invalid)?;
                NeighborRange::bounded(n, n.checked_add(1).ok_or_else(invalid)?)
            }
        };
        range.validate().map_err(|_| invalid())?;
        Ok(range)
    }
}

impl TryFrom<String> for NeighborRange {
    type Error = Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<NeighborRange> for String {
    fn from(range: NeighborRange) -> Self {
        range.to_string()
    }
}
