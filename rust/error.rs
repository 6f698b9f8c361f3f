//! Error type shared by every fallible operation in the crate.

use thiserror::Error;

/// Convenience alias for results returned by this crate.
pub type PeriodResult<T> = Result<T, PeriodError>;

/// Errors raised by the frequency engine, period indexes and the series algebra.
///
/// Every variant is local and synchronous. Nothing in the crate retries internally and no
/// partially built result is returned alongside an error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PeriodError {
    /// The frequency code is not part of the catalog.
    #[error("unknown frequency code '{code}': expected one of {expected}")]
    UnknownFrequency {
        /// The code as supplied by the caller.
        code: String,
        /// Comma separated list of accepted codes.
        expected: String,
    },

    /// Two frequencies have no coarser/finer relation (e.g. weekly vs business).
    #[error("frequencies '{left}' and '{right}' cannot be compared")]
    IncomparableFrequency { left: String, right: String },

    /// An operation mixed periods of different frequency.
    #[error("periods of frequency '{left}' and '{right}' cannot be combined")]
    IncompatibleFrequency { left: String, right: String },

    /// A multi-series operation was given inputs of different frequency.
    #[error("all series must share one frequency, found {found:?}")]
    MismatchedFrequency { found: Vec<String> },

    /// The frequency has no fixed number of periods per year.
    #[error("frequency '{freq}' has no defined periodicity")]
    UndefinedPeriodicity { freq: String },

    /// A constructor was missing the argument needed to disambiguate it.
    #[error("ambiguous construction: {0}")]
    AmbiguousConstruction(String),

    /// An ordering-dependent operation was attempted on an unordered index.
    #[error("index is not monotonic: {0}")]
    NotMonotonic(String),

    /// The aggregation or disaggregation method is not recognised.
    #[error("invalid aggregator '{0}': expected one of sum, mean, min, max, first, last")]
    InvalidAggregator(String),

    /// The extender cannot be interpreted with the requested extender type.
    #[error("invalid extender type '{extender_type}': {reason}")]
    InvalidExtenderType {
        extender_type: String,
        reason: String,
    },

    /// Invalid input argument.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A string could not be read as a date or period literal.
    #[error("cannot parse '{0}' as a date or period")]
    InvalidPeriodString(String),

    /// A label lookup resolved outside of the index.
    #[error("key not found: {0}")]
    KeyNotFound(String),

    /// A positional lookup fell outside of the index.
    #[error("position {position} is out of bounds for an index of length {len}")]
    OutOfBounds { position: i64, len: usize },

    /// An ordinal cannot be represented as a calendar date.
    #[error("ordinal {ordinal} of frequency '{freq}' is outside the supported date range")]
    OutOfRange { ordinal: i64, freq: String },

    /// Index and values have different lengths.
    #[error("index has length {index} but values have length {values}")]
    LengthMismatch { index: usize, values: usize },

    /// The external seasonal adjustment program failed or produced unreadable output.
    #[error("seasonal adjustment failed: {0}")]
    SeasonalAdjustment(String),

    /// Filesystem or process error raised while talking to an external program.
    #[error("io error: {0}")]
    Io(String),

    /// A value could not be encoded or decoded.
    #[error("serialization failed: {0}")]
    Serialization(String),
}

impl From<std::io::Error> for PeriodError {
    fn from(e: std::io::Error) -> Self {
        PeriodError::Io(e.to_string())
    }
}
