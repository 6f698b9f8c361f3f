use chrono::prelude::*;

/// Days between 0001-01-01 (day 1 of the common era) and the 1970-01-01 epoch.
const EPOCH_DAYS_FROM_CE: i64 = 719_163;

/// Create a `NaiveDate`.
///
/// Panics if date values are invalid.
pub fn ndate(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("`year`, `month` `day` are invalid.")
}

/// Return an end of month date for given month and year.
pub fn get_eom(year: i32, month: u32) -> Option<NaiveDate> {
    let mut day = 31;
    let mut date = NaiveDate::from_ymd_opt(year, month, day);
    while date.is_none() && day > 28 {
        day -= 1;
        date = NaiveDate::from_ymd_opt(year, month, day);
    }
    date
}

/// Number of calendar days from the 1970-01-01 epoch to `date`.
pub(crate) fn days_from_epoch(date: &NaiveDate) -> i64 {
    i64::from(date.num_days_from_ce()) - EPOCH_DAYS_FROM_CE
}

/// Inverse of [`days_from_epoch`], `None` outside of chrono's representable range.
pub(crate) fn date_from_days(days: i64) -> Option<NaiveDate> {
    days.checked_add(EPOCH_DAYS_FROM_CE)
        .and_then(|d| i32::try_from(d).ok())
        .and_then(NaiveDate::from_num_days_from_ce_opt)
}

/// Weekday index (0=Mon,.., 6=Sun) of a day counted from the epoch, which was a Thursday.
pub(crate) fn weekday_from_days(days: i64) -> i64 {
    (days + 3).rem_euclid(7)
}

/// Months elapsed from January 1970 to the month containing `date`.
pub(crate) fn month_index(date: &NaiveDate) -> i64 {
    (i64::from(date.year()) - 1970) * 12 + i64::from(date.month0())
}

/// Year and month (1-12) of a month index.
pub(crate) fn year_month(index: i64) -> Option<(i32, u32)> {
    let year = i32::try_from(1970 + index.div_euclid(12)).ok()?;
    let month = u32::try_from(index.rem_euclid(12) + 1).ok()?;
    Some((year, month))
}

/// First calendar day of the month with the given month index.
pub(crate) fn month_start(index: i64) -> Option<NaiveDate> {
    let (year, month) = year_month(index)?;
    NaiveDate::from_ymd_opt(year, month, 1)
}

/// Last calendar day of the month with the given month index.
pub(crate) fn month_end(index: i64) -> Option<NaiveDate> {
    let (year, month) = year_month(index)?;
    get_eom(year, month)
}
