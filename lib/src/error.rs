//! All kinds of errors in this crate.

use ca_rules::ParseRuleError;
use displaydoc::Display;
use thiserror::Error;

/// All kinds of errors in this crate.
///
/// The simulation itself never fails; every variant is a rejected input
/// at the configuration boundary.
#[derive(Clone, Debug, PartialEq, Display, Error)]
pub enum Error {
    /// invalid configuration: {name} should be a positive integer, got {value}.
    InvalidDimension {
        /// Name of the option.
        name: &'static str,
        /// The rejected value.
        value: i64,
    },
    /// invalid configuration: {name} should be at most 65536, got {value}.
    ViewTooLarge {
        /// Name of the option.
        name: &'static str,
        /// The rejected value.
        value: i64,
    },
    /// invalid configuration: density {0} out of [0,1].
    DensityOutOfRange(f64),
    /// invalid configuration: {name} is not a valid number: {value:?}.
    InvalidNumber {
        /// Name of the option.
        name: String,
        /// The rejected value.
        value: String,
    },
    /// invalid configuration: malformed neighbor range {0:?}.
    InvalidRange(String),
    /// Invalid rule: {0:?}.
    ParseRuleError(#[from] ParseRuleError),
    /// Rule {0} can not be written as a survival range and a birth range.
    NonContiguousRule(String),
    /// B0 rules are not supported: they would fill the whole unbounded grid.
    B0Error,
}
