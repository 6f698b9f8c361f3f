use ndarray::Array1;
use std::cmp::Ordering;
use std::ops::Range;
use tracing::debug;

use crate::enums::{Aggregation, Edge};
use crate::error::{PeriodError, PeriodResult};
use crate::frequency::Frequency;
use crate::index::{PeriodBound, PeriodIndex};
use crate::series::series::RegularSeries;

/// Convert a series to another frequency.
///
/// When `freq` is coarser the values falling into each target period are aggregated with
/// `how`; when finer each value is spread over the target periods it covers. Without `how`
/// the series' `observed` tag is used. A series already at `freq` is returned unchanged.
///
/// Aggregation ignores `NaN`. Target periods without any finite value are `NaN`.
///
/// | how     | aggregate            | disaggregate                    |
/// |---------|----------------------|---------------------------------|
/// | `sum`   | sum                  | value / number of finer periods |
/// | `mean`  | mean                 | value repeated                  |
/// | `min`   | minimum              | value repeated                  |
/// | `max`   | maximum              | value repeated                  |
/// | `first` | first finite value   | value at the first finer period |
/// | `last`  | last finite value    | value at the last finer period  |
///
/// # Examples
/// ```rust
/// # use regperiod::index::PeriodIndex;
/// # use regperiod::frequency::Frequency;
/// # use regperiod::series::{resample, RegularSeries};
/// # use regperiod::enums::Aggregation;
/// let idx = PeriodIndex::try_range(Some("2007-01".into()), None, Some(6), Some(Frequency::Monthly)).unwrap();
/// let s = RegularSeries::from_vec(idx, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
/// let q = resample(&s, Frequency::try_new("Q").unwrap(), Some(Aggregation::Sum)).unwrap();
/// assert_eq!(q.values().to_vec(), vec![6.0, 15.0]);
/// ```
pub fn resample(
    series: &RegularSeries,
    freq: Frequency,
    how: Option<Aggregation>,
) -> PeriodResult<RegularSeries> {
    let how = how.unwrap_or(series.index().observed());
    match series.freq().try_cmp(&freq)? {
        Ordering::Equal => Ok(series.clone()),
        Ordering::Less => aggregate(series, freq, |group| builtin_aggregate(how, group)),
        Ordering::Greater => disaggregate(series, freq, how),
    }
}

/// Aggregate a series to a coarser frequency with a caller supplied function.
///
/// `aggregator` receives the values, `NaN` included, of the source periods falling into each
/// target period, possibly none.
pub fn resample_with<F>(
    series: &RegularSeries,
    freq: Frequency,
    aggregator: F,
) -> PeriodResult<RegularSeries>
where
    F: Fn(&[f64]) -> f64,
{
    match series.freq().try_cmp(&freq)? {
        Ordering::Equal => Ok(series.clone()),
        Ordering::Less => aggregate(series, freq, aggregator),
        Ordering::Greater => Err(PeriodError::InvalidArgument(format!(
            "custom aggregators cannot convert '{}' to the finer frequency '{}'",
            series.freq(),
            freq
        ))),
    }
}

fn aggregate<F>(series: &RegularSeries, freq: Frequency, aggregator: F) -> PeriodResult<RegularSeries>
where
    F: Fn(&[f64]) -> f64,
{
    let src = series.freq();
    let (first, last) = match (series.first_period(), series.last_period()) {
        (Some(a), Some(b)) => (a, b),
        _ => return Ok(RegularSeries::empty(freq)),
    };
    series.index().require_monotonic("resample")?;

    let target = PeriodIndex::try_range(
        Some(PeriodBound::Period(first.asfreq(freq, Edge::End)?)),
        Some(PeriodBound::Period(last.asfreq(freq, Edge::End)?)),
        None,
        Some(freq),
    )?
    .with_observed(series.index().observed());

    // last source ordinal belonging to each target period
    let boundaries = target.asfreq(src, Edge::End, true)?;
    let ordinals = series.index().ordinals();
    let values = series.values().to_vec();
    let n = target.len();
    let mut start = 0;
    let aggregated: Array1<f64> = boundaries
        .ordinals()
        .iter()
        .enumerate()
        .map(|(k, b)| {
            let end = if k + 1 == n {
                ordinals.len()
            } else {
                ordinals.partition_point(|o| o <= b).max(start)
            };
            let group: Range<usize> = start..end;
            start = end;
            aggregator(&values[group])
        })
        .collect();
    debug!(from = %src, to = %freq, groups = n, len = series.len(), "aggregate");
    RegularSeries::try_new(target, aggregated)
}

fn builtin_aggregate(how: Aggregation, group: &[f64]) -> f64 {
    let mut finite = group.iter().copied().filter(|v| !v.is_nan());
    let first = match finite.next() {
        Some(v) => v,
        None => return f64::NAN,
    };
    match how {
        Aggregation::Sum => finite.fold(first, |a, v| a + v),
        Aggregation::Mean => {
            let (sum, count) = finite.fold((first, 1.0), |(s, c), v| (s + v, c + 1.0));
            sum / count
        }
        Aggregation::Min => finite.fold(first, f64::min),
        Aggregation::Max => finite.fold(first, f64::max),
        Aggregation::First => first,
        Aggregation::Last => finite.last().unwrap_or(first),
    }
}

fn disaggregate(
    series: &RegularSeries,
    freq: Frequency,
    how: Aggregation,
) -> PeriodResult<RegularSeries> {
    let src = series.freq();
    let (first, last) = match (series.first_period(), series.last_period()) {
        (Some(a), Some(b)) => (a, b),
        _ => return Ok(RegularSeries::empty(freq)),
    };
    series.index().require_monotonic("resample")?;

    let lo = first.asfreq(freq, Edge::Start)?.ordinal();
    let hi = last.asfreq(freq, Edge::End)?.ordinal();
    let target = PeriodIndex::try_range(
        Some(PeriodBound::Ordinal(lo)),
        Some(PeriodBound::Ordinal(hi)),
        None,
        Some(freq),
    )?
    .with_observed(series.index().observed());

    let starts = series.index().asfreq(freq, Edge::Start, true)?;
    let ends = series.index().asfreq(freq, Edge::End, true)?;
    let mut values = Array1::<f64>::from_elem(target.len(), f64::NAN);
    let mut prev = lo - 1;
    for ((s, e), v) in starts
        .ordinals()
        .iter()
        .zip(ends.ordinals().iter())
        .zip(series.values().iter())
    {
        let group_lo = (*s).max(prev + 1);
        let group_hi = *e;
        if group_hi < group_lo {
            continue;
        }
        prev = group_hi;
        if v.is_nan() {
            continue;
        }
        let cells = ((group_lo - lo) as usize)..((group_hi - lo) as usize + 1);
        let width = cells.len() as f64;
        match how {
            Aggregation::Sum => values.slice_mut(ndarray::s![cells]).fill(v / width),
            Aggregation::Mean | Aggregation::Min | Aggregation::Max => {
                values.slice_mut(ndarray::s![cells]).fill(*v)
            }
            Aggregation::First => values[cells.start] = *v,
            Aggregation::Last => values[cells.end - 1] = *v,
        }
    }
    debug!(from = %src, to = %freq, ?how, len = target.len(), "disaggregate");
    RegularSeries::try_new(target, values)
}
