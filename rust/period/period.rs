use chrono::format::{Item, StrftimeItems};
use chrono::prelude::*;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

use crate::enums::Edge;
use crate::error::{PeriodError, PeriodResult};
use crate::frequency::Frequency;
use crate::period::parse::parse_period;

/// A single period of a regular [`Frequency`], identified by its ordinal.
///
/// Periods of the same frequency are ordered by ordinal. Periods of different frequencies are
/// not comparable: `partial_cmp` yields `None` and [`Period::try_cmp`] raises
/// [`PeriodError::IncompatibleFrequency`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Period {
    ordinal: i64,
    freq: Frequency,
}

impl Period {
    /// Create a period from its ordinal.
    pub fn new(ordinal: i64, freq: Frequency) -> Self {
        Period { ordinal, freq }
    }

    /// The period of `freq` containing `date`.
    pub fn from_date(date: &NaiveDate, freq: Frequency) -> Self {
        Period {
            ordinal: freq.to_ordinal(date),
            freq,
        }
    }

    /// Read a date or period literal.
    ///
    /// The literal is read at its own resolution, e.g. `"2007"` is annual and `"2007-01-15"`
    /// daily. With `freq` that period is then converted at its end, so `"2007"` at a monthly
    /// frequency is `2007M12`.
    pub fn try_from_str(s: &str, freq: Option<Frequency>) -> PeriodResult<Self> {
        let (_, period) = parse_period(s)?;
        match freq {
            Some(f) => period.asfreq(f, Edge::End),
            None => Ok(period),
        }
    }

    /// Re-express `other` at `freq`, anchored on the `how` edge of `other`.
    pub fn from_period(other: &Period, freq: Frequency, how: Edge) -> PeriodResult<Self> {
        other.asfreq(freq, how)
    }

    pub fn ordinal(&self) -> i64 {
        self.ordinal
    }

    pub fn freq(&self) -> Frequency {
        self.freq
    }

    /// Convert to `freq`, selecting the target period containing the first (`Start`) or last
    /// (`End`) day of this period.
    pub fn asfreq(&self, freq: Frequency, how: Edge) -> PeriodResult<Period> {
        Ok(Period {
            ordinal: self.freq.asfreq(self.ordinal, &freq, how, true)?,
            freq,
        })
    }

    /// The last calendar day of the period.
    pub fn to_timestamp(&self) -> PeriodResult<NaiveDate> {
        self.freq.period_end(self.ordinal)
    }

    /// The first calendar day of the period.
    pub fn start_time(&self) -> PeriodResult<NaiveDate> {
        self.freq.period_start(self.ordinal)
    }

    /// Canonical label, e.g. `2013Q1` or `2013M01`.
    pub fn format(&self) -> PeriodResult<String> {
        self.freq.format_ordinal(self.ordinal)
    }

    /// Format the last calendar day of the period with a chrono `strftime` pattern.
    pub fn strftime(&self, fmt: &str) -> PeriodResult<String> {
        let items: Vec<Item> = StrftimeItems::new(fmt).collect();
        if items.iter().any(|i| matches!(i, Item::Error)) {
            return Err(PeriodError::InvalidArgument(format!(
                "'{}' is not a valid strftime pattern",
                fmt
            )));
        }
        let end = self.to_timestamp()?;
        Ok(end.format_with_items(items.into_iter()).to_string())
    }

    /// Order two periods of the same frequency.
    pub fn try_cmp(&self, other: &Period) -> PeriodResult<Ordering> {
        self.check_freq(other)?;
        Ok(self.ordinal.cmp(&other.ordinal))
    }

    pub(crate) fn check_freq(&self, other: &Period) -> PeriodResult<()> {
        if self.freq != other.freq {
            return Err(PeriodError::IncompatibleFrequency {
                left: self.freq.code(),
                right: other.freq.code(),
            });
        }
        Ok(())
    }
}

impl PartialOrd for Period {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.try_cmp(other).ok()
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.format() {
            Ok(label) => write!(f, "{}", label),
            Err(_) => write!(f, "{}@{}", self.ordinal, self.freq),
        }
    }
}
