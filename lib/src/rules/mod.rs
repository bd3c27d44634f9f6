//! Totalistic Life-like rules with contiguous birth and survival counts.
//!
//! For the notations of rule strings, please see
//! [this article on LifeWiki](https://conwaylife.com/wiki/Rulestring).

mod range;

use crate::error::Error;
use ca_rules::ParseLife;
use std::{
    fmt::{self, Display, Formatter},
    str::FromStr,
};

pub use range::NeighborRange;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A cellular automaton rule.
///
/// A living cell survives if its number of living neighbors lies in
/// `survival`; a dead cell becomes alive if the number lies in `birth`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rule {
    /// Neighbor counts for which a living cell stays alive.
    pub survival: NeighborRange,
    /// Neighbor counts for which a dead cell becomes alive.
    pub birth: NeighborRange,
}

/// Conway's Game of Life, `B3/S23`.
impl Default for Rule {
    fn default() -> Self {
        Rule {
            survival: NeighborRange::bounded(2, 4),
            birth: NeighborRange::bounded(3, 4),
        }
    }
}

impl Rule {
    pub const fn new(survival: NeighborRange, birth: NeighborRange) -> Self {
        Rule { survival, birth }
    }

    /// Whether a cell is alive in the next generation.
    #[inline]
    pub fn decide(&self, alive: bool, count: u32) -> bool {
        if alive {
            self.survival.contains(count)
        } else {
            self.birth.contains(count)
        }
    }

    /// Rejects malformed ranges, and rules where a dead cell with no
    /// living neighbor becomes alive.
    pub fn validate(&self) -> Result<(), Error> {
        self.survival.validate()?;
        self.birth.validate()?;
        if self.birth.contains(0) {
            return Err(Error::B0Error);
        }
        Ok(())
    }
}

/// Birth and survival counts, as `ca-rules` parses them.
struct BsCounts {
    b: Vec<u8>,
    s: Vec<u8>,
}

impl ParseLife for BsCounts {
    fn from_bs(b: Vec<u8>, s: Vec<u8>) -> Self {
        BsCounts { b, s }
    }
}

impl FromStr for Rule {
    type Err = Error;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let BsCounts { b, s } = BsCounts::parse_rule(input)?;
        let non_contiguous = || Error::NonContiguousRule(input.to_owned());
        let birth = NeighborRange::from_counts(&b).ok_or_else(non_contiguous)?;
        let survival = NeighborRange::from_counts(&s).ok_or_else(non_contiguous)?;
        Ok(Rule::new(survival, birth))
    }
}

/// Displays the rule as a rule string, e.g. `B3/S23`.
impl Display for Rule {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str("B")?;
        for n in (0..=8).filter(|&n| self.birth.contains(n)) {
            write!(f, "{}", n)?;
        }
        f.write_str("/S")?;
        for n in (0..=8).filter(|&n| self.survival.contains(n)) {
            write!(f, "{}", n)?;
        }
        Ok(())
    }
}
