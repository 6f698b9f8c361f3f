use chrono::NaiveDate;
use std::ops::Range;

use crate::period::Period;

/// A bound accepted by range construction of a [`PeriodIndex`](crate::index::PeriodIndex).
#[derive(Debug, Clone, PartialEq)]
pub enum PeriodBound {
    /// A period, converted to the index frequency when it differs.
    Period(Period),
    /// A calendar date.
    Date(NaiveDate),
    /// A date or period literal, e.g. `"2007Q1"`.
    Str(String),
    /// An ordinal of the index frequency.
    Ordinal(i64),
}

/// A key for positional or label based lookup.
#[derive(Debug, Clone, PartialEq)]
pub enum IndexKey {
    /// Position in the index; negative values count from the end.
    Position(i64),
    Period(Period),
    Date(NaiveDate),
    Str(String),
}

/// A label bound accepted by [`PeriodIndex::slice_locs`](crate::index::PeriodIndex::slice_locs).
#[derive(Debug, Clone, PartialEq)]
pub enum SliceBound {
    Period(Period),
    Date(NaiveDate),
    Str(String),
}

/// Result of a label lookup: a single position, or a contiguous range of positions when a
/// literal is coarser than the index.
#[derive(Debug, Clone, PartialEq)]
pub enum KeyLocation {
    Position(usize),
    Range(Range<usize>),
}

macro_rules! impl_key_from {
    ($t:ty) => {
        impl From<Period> for $t {
            fn from(value: Period) -> Self {
                <$t>::Period(value)
            }
        }

        impl From<NaiveDate> for $t {
            fn from(value: NaiveDate) -> Self {
                <$t>::Date(value)
            }
        }

        impl From<&str> for $t {
            fn from(value: &str) -> Self {
                <$t>::Str(value.to_string())
            }
        }

        impl From<String> for $t {
            fn from(value: String) -> Self {
                <$t>::Str(value)
            }
        }
    };
}

impl_key_from!(PeriodBound);
impl_key_from!(IndexKey);
impl_key_from!(SliceBound);

impl From<i64> for PeriodBound {
    fn from(value: i64) -> Self {
        PeriodBound::Ordinal(value)
    }
}

impl From<i64> for IndexKey {
    fn from(value: i64) -> Self {
        IndexKey::Position(value)
    }
}
