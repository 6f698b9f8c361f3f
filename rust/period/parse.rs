use chrono::prelude::*;
use chrono::Month as ChronoMonth;
use serde::{Deserialize, Serialize};

use crate::error::{PeriodError, PeriodResult};
use crate::frequency::Frequency;
use crate::period::Period;

/// The precision implied by a date or period literal.
///
/// Ordered from coarse to fine, so that `Resolution::Year < Resolution::Day`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Resolution {
    Year,
    HalfYear,
    Quarter,
    BiMonth,
    Month,
    HalfMonth,
    Day,
}

impl Resolution {
    /// The frequency at which a literal of this resolution is read.
    pub fn frequency(&self) -> Frequency {
        match self {
            Resolution::Year => Frequency::Annual(ChronoMonth::December),
            Resolution::HalfYear => Frequency::SemiAnnual(ChronoMonth::December),
            Resolution::Quarter => Frequency::Quarterly(ChronoMonth::December),
            Resolution::BiMonth => Frequency::BiMonthly,
            Resolution::Month => Frequency::Monthly,
            Resolution::HalfMonth => Frequency::TwiceMonthly,
            Resolution::Day => Frequency::Daily,
        }
    }
}

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];
const DATETIME_FORMATS: [&str; 6] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Read a date or period literal, inferring its resolution.
///
/// The returned [`Period`] is expressed in the frequency of the [`Resolution`]: `"2007"` is an
/// annual period, `"2007-01"` a monthly one, `"2007Q1"` a calendar quarter and a full date a
/// daily period.
///
/// Accepted forms are:
///
/// - years: `2007`
/// - half years, quarters, bimonths: `2007S1`, `2007Q1`, `2007-Q1`, `2007BM3`
/// - months: `2007-01`, `2007/01`, `2007M01`, `Jan 2007`, `January 2007`
/// - half months: `2007M01T2`
/// - days: `2007-01-31`, `2007/01/31`, `20070131`, `1/31/2007` and ISO date-times.
///
/// # Examples
/// ```rust
/// # use regperiod::period::{parse_period, Resolution};
/// let (res, p) = parse_period("2007Q2").unwrap();
/// assert_eq!(res, Resolution::Quarter);
/// assert_eq!(p.to_string(), "2007Q2");
/// ```
pub fn parse_period(s: &str) -> PeriodResult<(Resolution, Period)> {
    let (resolution, date) = parse_literal(s)?;
    let freq = resolution.frequency();
    Ok((resolution, Period::from_date(&date, freq)))
}

/// Resolution and first calendar day of a literal.
pub(crate) fn parse_literal(s: &str) -> PeriodResult<(Resolution, NaiveDate)> {
    let text = s.trim();
    let invalid = || PeriodError::InvalidPeriodString(s.to_string());
    if text.is_empty() {
        return Err(invalid());
    }
    parse_coded(&text.to_uppercase())
        .or_else(|| parse_date(text).map(|d| (Resolution::Day, d)))
        .or_else(|| parse_month_name(text).map(|d| (Resolution::Month, d)))
        .ok_or_else(invalid)
}

fn parse_date(text: &str) -> Option<NaiveDate> {
    if text.len() == 8 && text.bytes().all(|b| b.is_ascii_digit()) {
        return NaiveDate::parse_from_str(text, "%Y%m%d").ok();
    }
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(text, fmt) {
            return Some(d);
        }
    }
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .map(|dt| dt.date())
}

fn parse_month_name(text: &str) -> Option<NaiveDate> {
    // `%b` also accepts full month names
    NaiveDate::parse_from_str(&format!("1 {}", text), "%d %b %Y").ok()
}

/// Year, quarter, half and month literals composed of a four digit year and a coded suffix.
fn parse_coded(upper: &str) -> Option<(Resolution, NaiveDate)> {
    let (year, rest) = split_year(upper)?;
    if rest.is_empty() {
        return Some((Resolution::Year, NaiveDate::from_ymd_opt(year, 1, 1)?));
    }
    let rest = rest
        .strip_prefix('-')
        .or_else(|| rest.strip_prefix('/'))
        .unwrap_or(rest);

    if let Some(q) = rest.strip_prefix('Q') {
        let q = small_number(q, 1, 4)?;
        return Some((Resolution::Quarter, NaiveDate::from_ymd_opt(year, 3 * q - 2, 1)?));
    }
    if let Some(h) = rest.strip_prefix('S') {
        let h = small_number(h, 1, 2)?;
        return Some((Resolution::HalfYear, NaiveDate::from_ymd_opt(year, 6 * h - 5, 1)?));
    }
    if let Some(b) = rest.strip_prefix("BM") {
        let b = small_number(b, 1, 6)?;
        return Some((Resolution::BiMonth, NaiveDate::from_ymd_opt(year, 2 * b - 1, 1)?));
    }
    let rest = rest.strip_prefix('M').unwrap_or(rest);
    if let Some((m, t)) = rest.split_once('T') {
        let m = small_number(m, 1, 12)?;
        let day = match small_number(t, 1, 2)? {
            1 => 1,
            _ => crate::frequency::TWICE_MONTHLY_SPLIT_DAY + 1,
        };
        return Some((Resolution::HalfMonth, NaiveDate::from_ymd_opt(year, m, day)?));
    }
    if rest.len() == 2 {
        let m = small_number(rest, 1, 12)?;
        return Some((Resolution::Month, NaiveDate::from_ymd_opt(year, m, 1)?));
    }
    None
}

fn split_year(text: &str) -> Option<(i32, &str)> {
    if text.len() < 4 || !text.is_char_boundary(4) {
        return None;
    }
    let (year, rest) = text.split_at(4);
    if !year.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some((year.parse().ok()?, rest))
}

fn small_number(text: &str, min: u32, max: u32) -> Option<u32> {
    if text.is_empty() || text.len() > 2 || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let n: u32 = text.parse().ok()?;
    (min..=max).contains(&n).then_some(n)
}
