use itertools::Itertools;
use ndarray::Array1;
use tracing::debug;

use crate::error::{PeriodError, PeriodResult};
use crate::index::{PeriodBound, PeriodIndex};
use crate::series::series::RegularSeries;

/// Drop leading and trailing non-finite values.
///
/// Returns an empty series when no value is finite.
pub fn trim(series: &RegularSeries) -> RegularSeries {
    let finite: Vec<usize> = series
        .values()
        .iter()
        .positions(|v| v.is_finite())
        .collect();
    match (finite.first(), finite.last()) {
        (Some(first), Some(last)) => series.slice(*first..*last + 1),
        _ => series.slice(0..0),
    }
}

/// Make the series gapless between its first and last period, inserting `NaN` where a period
/// is missing. A full series is returned unchanged.
pub fn fill(series: &RegularSeries) -> PeriodResult<RegularSeries> {
    if series.index().is_full()? {
        return Ok(series.clone());
    }
    let (first, last) = match series.index().span() {
        Some(span) => span,
        None => return Ok(series.clone()),
    };
    debug!(freq = %series.freq(), first, last, len = series.len(), "fill gaps");
    let index = PeriodIndex::try_range(
        Some(PeriodBound::Ordinal(first)),
        Some(PeriodBound::Ordinal(last)),
        None,
        Some(series.freq()),
    )?
    .with_observed(series.index().observed());
    series.reindex(&index)
}

/// Lay series on top of each other.
///
/// The result spans from the earliest first period to the latest last period. Series are
/// applied in order: with `replace` a later series overwrites its whole span, including with
/// `NaN` for periods it lacks, otherwise it only fills cells that are still missing. Returns
/// `None` for an empty list.
///
/// # Examples
/// ```rust
/// # use regperiod::index::PeriodIndex;
/// # use regperiod::frequency::Frequency;
/// # use regperiod::series::{overlay, RegularSeries};
/// let a = RegularSeries::from_vec(PeriodIndex::from_ordinals(vec![0, 1, 2], Frequency::Monthly), vec![1.0, 2.0, 3.0]).unwrap();
/// let b = RegularSeries::from_vec(PeriodIndex::from_ordinals(vec![2, 3], Frequency::Monthly), vec![30.0, 40.0]).unwrap();
/// let s = overlay(&[a.clone(), b.clone()], true).unwrap().unwrap();
/// assert_eq!(s.values().to_vec(), vec![1.0, 2.0, 30.0, 40.0]);
/// let s = overlay(&[a, b], false).unwrap().unwrap();
/// assert_eq!(s.values().to_vec(), vec![1.0, 2.0, 3.0, 40.0]);
/// ```
pub fn overlay(series: &[RegularSeries], replace: bool) -> PeriodResult<Option<RegularSeries>> {
    let refs: Vec<&RegularSeries> = series.iter().collect();
    overlay_refs(&refs, replace)
}

pub(crate) fn overlay_refs(
    series: &[&RegularSeries],
    replace: bool,
) -> PeriodResult<Option<RegularSeries>> {
    let head = match series.first() {
        Some(s) => *s,
        None => return Ok(None),
    };
    let found: Vec<String> = series.iter().map(|s| s.freq().code()).unique().collect();
    if found.len() > 1 {
        return Err(PeriodError::MismatchedFrequency { found });
    }
    for s in series.iter() {
        s.index().require_monotonic("overlay")?;
    }

    let bounds = series
        .iter()
        .filter_map(|s| Some((s.first_period()?.ordinal(), s.last_period()?.ordinal())));
    let (first, last) = match bounds.reduce(|a, b| (a.0.min(b.0), a.1.max(b.1))) {
        Some(span) => span,
        None => return Ok(Some(RegularSeries::empty(head.freq()))),
    };
    debug!(freq = %head.freq(), first, last, n_series = series.len(), replace, "overlay");

    let len = last
        .checked_sub(first)
        .and_then(|d| usize::try_from(d).ok())
        .and_then(|d| d.checked_add(1))
        .ok_or_else(|| PeriodError::OutOfRange {
            ordinal: last,
            freq: head.freq().code(),
        })?;
    let mut values = Array1::<f64>::from_elem(len, f64::NAN);
    for s in series.iter() {
        let (lo, hi) = match (s.first_period(), s.last_period()) {
            (Some(a), Some(b)) => (a.ordinal(), b.ordinal()),
            _ => continue,
        };
        if replace {
            for o in lo..=hi {
                values[(o - first) as usize] = f64::NAN;
            }
        }
        for (o, v) in s.index().ordinals().iter().zip(s.values().iter()) {
            let cell = &mut values[(*o - first) as usize];
            if replace || cell.is_nan() {
                *cell = *v;
            }
        }
    }

    let index = PeriodIndex::try_range(
        Some(PeriodBound::Ordinal(first)),
        Some(PeriodBound::Ordinal(last)),
        None,
        Some(head.freq()),
    )?
    .with_observed(head.index().observed());
    RegularSeries::try_new(index, values).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frequency::Frequency;

    fn series(ordinals: Vec<i64>, values: Vec<f64>) -> RegularSeries {
        RegularSeries::from_vec(PeriodIndex::from_ordinals(ordinals, Frequency::Monthly), values)
            .unwrap()
    }

    fn same(a: &[f64], b: &[f64]) -> bool {
        a.len() == b.len()
            && a
                .iter()
                .zip(b.iter())
                .all(|(x, y)| (x.is_nan() && y.is_nan()) || x == y)
    }

    #[test]
    fn test_trim() {
        let nan = f64::NAN;
        let s = series(vec![0, 1, 2, 3, 4], vec![nan, nan, 1.0, 2.0, nan]);
        let t = trim(&s);
        assert_eq!(vec![1.0, 2.0], t.values().to_vec());
        assert_eq!(vec![2, 3], t.index().ordinals().to_vec());
        let s = series(vec![0, 1], vec![nan, f64::INFINITY]);
        assert!(trim(&s).is_empty());
        let s = series(vec![0, 1, 2], vec![1.0, nan, 3.0]);
        assert_eq!(3, trim(&s).len());
    }

    #[test]
    fn test_fill() {
        let s = series(vec![3, 5, 6], vec![1.0, 2.0, 3.0]);
        let f = fill(&s).unwrap();
        assert_eq!(vec![3, 4, 5, 6], f.index().ordinals().to_vec());
        assert!(same(&[1.0, f64::NAN, 2.0, 3.0], &f.values().to_vec()));
        let full = series(vec![3, 4], vec![1.0, 2.0]);
        assert!(fill(&full).unwrap().index().shares_storage(full.index()));
        let unordered = series(vec![4, 3], vec![1.0, 2.0]);
        assert!(matches!(fill(&unordered), Err(PeriodError::NotMonotonic(_))));
    }

    #[test]
    fn test_overlay_rules() {
        let nan = f64::NAN;
        let a = series(vec![0, 1, 2, 3], vec![1.0, nan, 3.0, 4.0]);
        let b = series(vec![2, 3, 5], vec![30.0, nan, 50.0]);
        let r = overlay(&[a.clone(), b.clone()], true).unwrap().unwrap();
        assert_eq!(vec![0, 1, 2, 3, 4, 5], r.index().ordinals().to_vec());
        assert!(same(&[1.0, nan, 30.0, nan, nan, 50.0], &r.values().to_vec()));
        let r = overlay(&[a.clone(), b.clone()], false).unwrap().unwrap();
        assert!(same(&[1.0, nan, 3.0, 4.0, nan, 50.0], &r.values().to_vec()));
        let r = overlay(&[b, a], true).unwrap().unwrap();
        assert!(same(&[1.0, nan, 3.0, 4.0, nan, 50.0], &r.values().to_vec()));
    }

    #[test]
    fn test_overlay_span_past_the_ordinal_bounds() {
        let a = series(vec![i64::MIN], vec![1.0]);
        let b = series(vec![i64::MAX], vec![2.0]);
        assert!(matches!(
            overlay(&[a, b], true),
            Err(PeriodError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_overlay_edge_cases() {
        assert_eq!(None, overlay(&[], true).unwrap());
        let a = series(vec![0, 1], vec![1.0, 2.0]);
        assert_eq!(a, overlay(&[a.clone()], true).unwrap().unwrap());
        let e = RegularSeries::empty(Frequency::Monthly);
        assert_eq!(a, overlay(&[e.clone(), a.clone()], false).unwrap().unwrap());
        assert!(overlay(&[e], true).unwrap().unwrap().is_empty());
        let q = RegularSeries::from_vec(
            PeriodIndex::from_ordinals(vec![0], Frequency::try_new("Q").unwrap()),
            vec![1.0],
        )
        .unwrap();
        match overlay(&[a, q], true) {
            Err(PeriodError::MismatchedFrequency { found }) => {
                assert_eq!(vec!["M".to_string(), "Q".to_string()], found)
            }
            _ => assert!(false),
        }
    }
}
