use chrono::prelude::*;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use crate::enums::Edge;
use crate::error::{PeriodError, PeriodResult};
use crate::frequency::calendar::{
    date_from_days, days_from_epoch, month_end, month_index, month_start, weekday_from_days,
    year_month,
};
use crate::frequency::registry::get_frequency_by_code;

/// Day of the month closing the first half of a [`Frequency::TwiceMonthly`] period.
pub const TWICE_MONTHLY_SPLIT_DAY: u32 = 15;

pub(crate) const MONTH_CODES: [&str; 12] = [
    "JAN", "FEB", "MAR", "APR", "MAY", "JUN", "JUL", "AUG", "SEP", "OCT", "NOV", "DEC",
];

pub(crate) const WEEKDAY_CODES: [&str; 7] = ["MON", "TUE", "WED", "THU", "FRI", "SAT", "SUN"];

/// A regular calendar grid onto which dates are mapped as integer ordinals.
///
/// Month based families carry the month that closes their period (the anchor). Semiannual and
/// quarterly anchors are equivalent modulo their span, so `Quarterly(Month::January)` and
/// `Quarterly(Month::October)` describe the same grid; equality and hashing operate on the
/// normalized anchor. Weekly periods close on their anchor weekday.
///
/// Ordinal 0 is the period containing 1970-01-01 for every frequency.
///
/// # Examples
/// ```rust
/// # use regperiod::frequency::{Frequency, ndate};
/// let f = Frequency::try_new("Q-JAN").unwrap();
/// assert_eq!(f.code(), "Q-OCT");
/// let q = f.to_ordinal(&ndate(2013, 1, 15));
/// assert_eq!(f.period_end(q).unwrap(), ndate(2013, 1, 31));
/// ```
#[derive(Debug, Copy, Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Frequency {
    /// Twelve month periods closing at the end of the anchor month.
    Annual(Month),
    /// Six month periods closing at the end of the anchor month.
    SemiAnnual(Month),
    /// Three month periods closing at the end of the anchor month.
    Quarterly(Month),
    /// Two month periods, January-February through November-December.
    BiMonthly,
    Monthly,
    /// Each month split after [`TWICE_MONTHLY_SPLIT_DAY`].
    TwiceMonthly,
    /// Seven day periods closing on the anchor weekday.
    Weekly(Weekday),
    /// Monday to Friday days.
    Business,
    Daily,
}

impl Frequency {
    /// Resolve a frequency code from the catalog, e.g. `"A-JUN"`, `"q"`, `"W-MON"`.
    pub fn try_new(code: &str) -> PeriodResult<Self> {
        get_frequency_by_code(code)
    }

    /// The canonical catalog code.
    pub fn code(&self) -> String {
        match self.normalized() {
            Frequency::Annual(Month::December) => "A".to_string(),
            Frequency::Annual(m) => format!("A-{}", month_code(m)),
            Frequency::SemiAnnual(Month::December) => "SA".to_string(),
            Frequency::SemiAnnual(m) => format!("SA-{}", month_code(m)),
            Frequency::Quarterly(Month::December) => "Q".to_string(),
            Frequency::Quarterly(m) => format!("Q-{}", month_code(m)),
            Frequency::BiMonthly => "BM".to_string(),
            Frequency::Monthly => "M".to_string(),
            Frequency::TwiceMonthly => "TM".to_string(),
            Frequency::Weekly(w) => format!("W-{}", WEEKDAY_CODES[w.num_days_from_monday() as usize]),
            Frequency::Business => "B".to_string(),
            Frequency::Daily => "D".to_string(),
        }
    }

    /// Map the anchor onto its canonical representative.
    ///
    /// Semiannual anchors normalize into July-December, quarterly anchors into
    /// October-December.
    pub fn normalized(&self) -> Frequency {
        match self {
            Frequency::SemiAnnual(m) => {
                Frequency::SemiAnnual(month_from_number((m.number_from_month() - 1) % 6 + 7))
            }
            Frequency::Quarterly(m) => {
                Frequency::Quarterly(month_from_number((m.number_from_month() - 1) % 3 + 10))
            }
            _ => *self,
        }
    }

    /// Number of periods per calendar year, used to annualize rates.
    pub fn periodicity(&self) -> PeriodResult<u32> {
        match self {
            Frequency::Annual(_) => Ok(1),
            Frequency::SemiAnnual(_) => Ok(2),
            Frequency::Quarterly(_) => Ok(4),
            Frequency::BiMonthly => Ok(6),
            Frequency::Monthly => Ok(12),
            Frequency::TwiceMonthly => Ok(24),
            Frequency::Weekly(_) | Frequency::Business | Frequency::Daily => {
                Err(PeriodError::UndefinedPeriodicity { freq: self.code() })
            }
        }
    }

    /// Position in the coarse-to-fine order; lower is coarser.
    fn rank(&self) -> u8 {
        match self {
            Frequency::Annual(_) => 0,
            Frequency::SemiAnnual(_) => 1,
            Frequency::Quarterly(_) => 2,
            Frequency::BiMonthly => 3,
            Frequency::Monthly => 4,
            Frequency::TwiceMonthly => 5,
            Frequency::Weekly(_) => 6,
            Frequency::Business => 7,
            Frequency::Daily => 8,
        }
    }

    fn key(&self) -> (u8, u32) {
        let anchor = match self.normalized() {
            Frequency::Annual(m) | Frequency::SemiAnnual(m) | Frequency::Quarterly(m) => {
                m.number_from_month()
            }
            Frequency::Weekly(w) => w.num_days_from_monday(),
            _ => 0,
        };
        (self.rank(), anchor)
    }

    /// Span in months and the shift aligning month indexes onto period boundaries.
    fn month_grid(&self) -> Option<(i64, i64)> {
        let (span, end_month) = match self.normalized() {
            Frequency::Annual(m) => (12, m.number_from_month()),
            Frequency::SemiAnnual(m) => (6, m.number_from_month()),
            Frequency::Quarterly(m) => (3, m.number_from_month()),
            Frequency::BiMonthly => (2, 2),
            Frequency::Monthly => (1, 12),
            _ => return None,
        };
        Some((span, (-i64::from(end_month)).rem_euclid(span)))
    }

    /// Compare coarseness, returning `Greater` when `self` is the coarser frequency.
    ///
    /// Members of the same family with different anchors, and weekly against business
    /// frequencies, have no defined order.
    pub fn try_cmp(&self, other: &Frequency) -> PeriodResult<Ordering> {
        if self == other {
            return Ok(Ordering::Equal);
        }
        let (a, b) = (self.rank(), other.rank());
        if a == b || (a.min(b) == 6 && a.max(b) == 7) {
            return Err(PeriodError::IncomparableFrequency {
                left: self.code(),
                right: other.code(),
            });
        }
        Ok(b.cmp(&a))
    }

    /// Whether `self` is strictly coarser than `other`; `false` when incomparable.
    pub fn is_coarser_than(&self, other: &Frequency) -> bool {
        matches!(self.try_cmp(other), Ok(Ordering::Greater))
    }

    /// Ordinal of the period containing `date`.
    ///
    /// Business frequencies map Saturdays and Sundays onto the following Monday.
    pub fn to_ordinal(&self, date: &NaiveDate) -> i64 {
        self.ordinal_at(date, Edge::Start)
    }

    /// Ordinal of the period containing `date`, rolling non-business days towards `edge`'s
    /// direction: forward for [`Edge::Start`], backward for [`Edge::End`].
    pub(crate) fn ordinal_at(&self, date: &NaiveDate, edge: Edge) -> i64 {
        match self {
            Frequency::Daily => days_from_epoch(date),
            Frequency::Business => {
                let x = days_from_epoch(date) + 3;
                let (mut weeks, mut dow) = (x.div_euclid(7), x.rem_euclid(7));
                if dow >= 5 {
                    match edge {
                        Edge::Start => {
                            weeks += 1;
                            dow = 0;
                        }
                        Edge::End => dow = 4,
                    }
                }
                weeks * 5 + dow - 3
            }
            Frequency::Weekly(w) => {
                let days = days_from_epoch(date);
                let anchor = i64::from(w.num_days_from_monday());
                let end = days + (anchor - weekday_from_days(days)).rem_euclid(7);
                end.div_euclid(7)
            }
            Frequency::TwiceMonthly => {
                month_index(date) * 2 + i64::from(date.day() > TWICE_MONTHLY_SPLIT_DAY)
            }
            _ => {
                // month based families always have a grid
                let (span, shift) = self.month_grid().unwrap_or((1, 0));
                (month_index(date) + shift).div_euclid(span)
            }
        }
    }

    /// First calendar day of the period with the given ordinal.
    pub fn period_start(&self, ordinal: i64) -> PeriodResult<NaiveDate> {
        let date = match self {
            Frequency::Daily | Frequency::Business => return self.period_end(ordinal),
            Frequency::Weekly(_) => self
                .period_end(ordinal)?
                .checked_sub_days(chrono::Days::new(6)),
            Frequency::TwiceMonthly => {
                let index = ordinal.div_euclid(2);
                match ordinal.rem_euclid(2) {
                    0 => month_start(index),
                    _ => month_start(index)
                        .and_then(|d| d.with_day(TWICE_MONTHLY_SPLIT_DAY + 1)),
                }
            }
            _ => {
                let (span, shift) = self.month_grid().unwrap_or((1, 0));
                ordinal
                    .checked_mul(span)
                    .and_then(|m| m.checked_sub(shift))
                    .and_then(month_start)
            }
        };
        date.ok_or_else(|| self.out_of_range(ordinal))
    }

    /// Last calendar day of the period with the given ordinal.
    pub fn period_end(&self, ordinal: i64) -> PeriodResult<NaiveDate> {
        let date = match self {
            Frequency::Daily => date_from_days(ordinal),
            Frequency::Business => ordinal.checked_add(3).and_then(|y| {
                (y.div_euclid(5))
                    .checked_mul(7)
                    .and_then(|d| d.checked_add(y.rem_euclid(5) - 3))
                    .and_then(date_from_days)
            }),
            Frequency::Weekly(w) => {
                let anchor = i64::from(w.num_days_from_monday());
                ordinal
                    .checked_mul(7)
                    .and_then(|d| d.checked_add((anchor - 3).rem_euclid(7)))
                    .and_then(date_from_days)
            }
            Frequency::TwiceMonthly => {
                let index = ordinal.div_euclid(2);
                match ordinal.rem_euclid(2) {
                    0 => month_start(index).and_then(|d| d.with_day(TWICE_MONTHLY_SPLIT_DAY)),
                    _ => month_end(index),
                }
            }
            _ => {
                let (span, shift) = self.month_grid().unwrap_or((1, 0));
                ordinal
                    .checked_mul(span)
                    .and_then(|m| m.checked_add(span - 1 - shift))
                    .and_then(month_end)
            }
        };
        date.ok_or_else(|| self.out_of_range(ordinal))
    }

    /// Convert an ordinal of this frequency into the corresponding ordinal of `target`.
    ///
    /// The result is the `target` period containing this period's first (`Edge::Start`) or
    /// last (`Edge::End`) calendar day. With `overlap` false a `target` period which spills
    /// outside of this period is replaced by its neighbour when that neighbour lies wholly
    /// inside this period; otherwise the overlapping period is kept.
    ///
    /// # Examples
    /// ```rust
    /// # use regperiod::frequency::{Frequency, ndate};
    /// # use regperiod::enums::Edge;
    /// let a = Frequency::Annual(chrono::Month::December);
    /// let w = Frequency::try_new("W-MON").unwrap();
    /// let o = a.to_ordinal(&ndate(2013, 6, 1));
    /// let end = a.asfreq(o, &w, Edge::End, true).unwrap();
    /// assert_eq!(w.period_end(end).unwrap(), ndate(2014, 1, 6));
    /// let end = a.asfreq(o, &w, Edge::End, false).unwrap();
    /// assert_eq!(w.period_end(end).unwrap(), ndate(2013, 12, 30));
    /// ```
    pub fn asfreq(
        &self,
        ordinal: i64,
        target: &Frequency,
        how: Edge,
        overlap: bool,
    ) -> PeriodResult<i64> {
        if self == target {
            return Ok(ordinal);
        }
        let start = self.period_start(ordinal)?;
        let end = self.period_end(ordinal)?;
        let candidate = match how {
            Edge::Start => target.ordinal_at(&start, Edge::Start),
            Edge::End => target.ordinal_at(&end, Edge::End),
        };
        if overlap {
            return Ok(candidate);
        }

        let contained = |o: i64| -> PeriodResult<bool> {
            Ok(target.period_start(o)? >= start && target.period_end(o)? <= end)
        };
        if contained(candidate)? {
            return Ok(candidate);
        }
        let neighbour = match how {
            Edge::Start => candidate + 1,
            Edge::End => candidate - 1,
        };
        if contained(neighbour)? {
            Ok(neighbour)
        } else {
            Ok(candidate)
        }
    }

    /// Canonical label of the period with the given ordinal, e.g. `2013Q1`.
    pub fn format_ordinal(&self, ordinal: i64) -> PeriodResult<String> {
        let end = self.period_end(ordinal)?;
        let label = match self.normalized() {
            Frequency::Annual(_) => format!("{}", end.year()),
            Frequency::SemiAnnual(m) => {
                let half = offset_in_year(end.month(), m.number_from_month(), 6);
                format!("{}S{}", end.year(), half)
            }
            Frequency::Quarterly(m) => {
                let quarter = offset_in_year(end.month(), m.number_from_month(), 3);
                format!("{}Q{}", end.year(), quarter)
            }
            Frequency::BiMonthly => format!("{}BM{}", end.year(), end.month() / 2),
            Frequency::Monthly => format!("{}M{:02}", end.year(), end.month()),
            Frequency::TwiceMonthly => format!(
                "{}M{:02}T{}",
                end.year(),
                end.month(),
                1 + ordinal.rem_euclid(2)
            ),
            Frequency::Weekly(_) | Frequency::Business | Frequency::Daily => {
                end.format("%Y-%m-%d").to_string()
            }
        };
        Ok(label)
    }

    /// Canonical label of the period containing `date`.
    pub fn format(&self, date: &NaiveDate) -> PeriodResult<String> {
        self.format_ordinal(self.to_ordinal(date))
    }

    fn out_of_range(&self, ordinal: i64) -> PeriodError {
        PeriodError::OutOfRange {
            ordinal,
            freq: self.code(),
        }
    }
}

/// 1-based position of a period closing in `month` within a fiscal year closing in `anchor`.
fn offset_in_year(month: u32, anchor: u32, span: u32) -> u32 {
    let periods = 12 / span;
    let back = (anchor + 12 - month) % 12 / span;
    periods - back
}

fn month_code(month: Month) -> &'static str {
    MONTH_CODES[month.number_from_month() as usize - 1]
}

pub(crate) fn month_from_number(number: u32) -> Month {
    // callers only pass values in [1, 12]
    Month::try_from(u8::try_from(number).unwrap_or(12)).unwrap_or(Month::December)
}

impl PartialEq for Frequency {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Frequency {}

impl Hash for Frequency {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

/// Orders by coarseness: `Annual > Monthly > Daily`. Incomparable pairs yield `None`.
impl PartialOrd for Frequency {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.try_cmp(other).ok()
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Frequency {
    type Err = PeriodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Frequency::try_new(s)
    }
}

impl TryFrom<String> for Frequency {
    type Error = PeriodError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Frequency::try_new(&value)
    }
}

impl From<Frequency> for String {
    fn from(value: Frequency) -> Self {
        value.code()
    }
}
