use ndarray::Array1;
use tracing::debug;

use crate::enums::{Direction, ExtenderType};
use crate::error::{PeriodError, PeriodResult};
use crate::index::{IndexKey, PeriodBound, PeriodIndex, SliceBound};
use crate::period::Period;
use crate::series::algebra::{fill, overlay_refs, trim};
use crate::series::series::{RegularSeries, SeriesValue};

/// Data used to grow a series beyond its current span.
#[derive(Debug, Clone, PartialEq)]
pub enum Extender {
    /// A series of the same frequency as the input.
    Series(RegularSeries),
    /// Raw values, placed at the input's frequency next to the edge being extended.
    Values(Vec<f64>),
}

impl From<RegularSeries> for Extender {
    fn from(value: RegularSeries) -> Self {
        Extender::Series(value)
    }
}

impl From<Vec<f64>> for Extender {
    fn from(value: Vec<f64>) -> Self {
        Extender::Values(value)
    }
}

/// Extend `input` forward or backward using `extender`.
///
/// The input is trimmed of missing values first. The extender is read according to
/// `extender_type`:
///
/// - `Index`: levels. The extender is rescaled to match the input at its last (forward) or
///   first (backward) period, and the rescaled values beyond that period are appended.
/// - `Pc`: fractional period changes, e.g. 4% as `0.04`, chained into levels.
/// - `Pca`: annualized fractional changes, de-annualized with the extender's periodicity.
///   Requires a series extender.
/// - `Diff`: level differences accumulated from the input's edge value.
///
/// Raw values are placed so that they continue the input: for `Index` they start at the last
/// period going forward and end at the first period going backward, `Pc` changes start one
/// period after the last or end at the first, and `Diff` changes start one period after the
/// last or end one period before the first.
///
/// When the extender does not reach the input's edge the input is returned unchanged.
///
/// # Examples
/// ```rust
/// # use regperiod::index::PeriodIndex;
/// # use regperiod::frequency::Frequency;
/// # use regperiod::series::{extend, RegularSeries};
/// # use regperiod::enums::{Direction, ExtenderType};
/// let idx = PeriodIndex::try_range(Some("2010-01".into()), None, Some(3), Some(Frequency::Monthly)).unwrap();
/// let s = RegularSeries::from_vec(idx, vec![100.0, 101.0, 102.0]).unwrap();
/// let e = extend(&s, &vec![0.01, -0.02].into(), Direction::Forward, ExtenderType::Pc).unwrap();
/// assert_eq!(e.len(), 5);
/// assert!((e.values()[4] - 100.9596).abs() < 1e-9);
/// ```
pub fn extend(
    input: &RegularSeries,
    extender: &Extender,
    direction: Direction,
    extender_type: ExtenderType,
) -> PeriodResult<RegularSeries> {
    let input = trim(input);
    let (first, last) = match (input.first_period(), input.last_period()) {
        (Some(a), Some(b)) => (a, b),
        _ => return Ok(input),
    };

    let ext = match extender {
        Extender::Series(s) => {
            if s.freq() != input.freq() {
                return Err(PeriodError::MismatchedFrequency {
                    found: vec![input.freq().code(), s.freq().code()],
                });
            }
            s.clone()
        }
        Extender::Values(v) => {
            let anchor = match (extender_type, direction) {
                (ExtenderType::Pca, _) => {
                    return Err(PeriodError::InvalidExtenderType {
                        extender_type: extender_type.name().to_string(),
                        reason: "annualized changes require a series extender".to_string(),
                    })
                }
                (ExtenderType::Index, Direction::Forward) => PeriodBound::Period(last),
                (ExtenderType::Index, Direction::Backward) | (ExtenderType::Pc, Direction::Backward) => {
                    PeriodBound::Period(first)
                }
                (ExtenderType::Pc, Direction::Forward) | (ExtenderType::Diff, Direction::Forward) => {
                    PeriodBound::Period(last + 1)
                }
                (ExtenderType::Diff, Direction::Backward) => PeriodBound::Period(first - 1),
            };
            let index = match direction {
                Direction::Forward => {
                    PeriodIndex::try_range(Some(anchor), None, Some(v.len()), None)?
                }
                Direction::Backward => {
                    PeriodIndex::try_range(None, Some(anchor), Some(v.len()), None)?
                }
            };
            RegularSeries::from_vec(index, v.clone())?
        }
    };
    debug!(
        freq = %input.freq(),
        ?direction,
        extender_type = extender_type.name(),
        extender_len = ext.len(),
        "extend"
    );

    match extender_type {
        ExtenderType::Index => extend_with_levels(input, &ext, direction),
        ExtenderType::Pc => {
            let levels = chain_levels(&ext, |r| 1.0 + r)?;
            extend_with_levels(input, &levels, direction)
        }
        ExtenderType::Pca => {
            let periodicity = f64::from(ext.freq().periodicity()?);
            let levels = chain_levels(&ext, |r| (1.0 + r).powf(1.0 / periodicity))?;
            extend_with_levels(input, &levels, direction)
        }
        ExtenderType::Diff => extend_with_differences(input, &ext, first, last, direction),
    }
}

/// Levels starting at 100 one period before the first change, multiplied by `growth` of each
/// change.
fn chain_levels<F: Fn(f64) -> f64>(changes: &RegularSeries, growth: F) -> PeriodResult<RegularSeries> {
    let changes = fill(changes)?;
    let start = match changes.first_period() {
        Some(p) => p - 1,
        None => return Ok(changes),
    };
    let mut levels = Vec::with_capacity(changes.len() + 1);
    let mut level = 100.0;
    levels.push(level);
    for r in changes.values().iter() {
        level *= growth(*r);
        levels.push(level);
    }
    let index = PeriodIndex::try_range(
        Some(PeriodBound::Period(start)),
        None,
        Some(levels.len()),
        None,
    )?;
    RegularSeries::from_vec(index, levels)
}

fn extend_with_levels(
    input: RegularSeries,
    levels: &RegularSeries,
    direction: Direction,
) -> PeriodResult<RegularSeries> {
    let edge = match direction {
        Direction::Forward => input.len() - 1,
        Direction::Backward => 0,
    };
    let (edge_period, edge_value) = match (input.index().get(edge), input.get(edge)) {
        (Some(p), Some(v)) => (p, v),
        _ => return Ok(input),
    };
    let pivot = match levels.get_value(IndexKey::Period(edge_period)) {
        Ok(SeriesValue::Scalar(v)) => v,
        _ => {
            debug!(period = %edge_period, "extender does not cover the input edge");
            return Ok(input);
        }
    };
    let rescaled = levels.scale(edge_value / pivot);
    let tail = match direction {
        Direction::Forward => rescaled.slice_by(Some(SliceBound::Period(edge_period + 1)), None)?,
        Direction::Backward => rescaled.slice_by(None, Some(SliceBound::Period(edge_period - 1)))?,
    };
    let merged = overlay_refs(&[&input, &tail], true)?;
    Ok(merged.unwrap_or(input))
}

fn extend_with_differences(
    input: RegularSeries,
    diffs: &RegularSeries,
    first: Period,
    last: Period,
    direction: Direction,
) -> PeriodResult<RegularSeries> {
    let tail = match direction {
        Direction::Forward => {
            let next = last + 1;
            if !diffs.index().contains(next) {
                debug!(period = %next, "extender does not cover the input edge");
                return Ok(input);
            }
            let steps = diffs.slice_by(Some(SliceBound::Period(next)), None)?;
            let base = input.get(input.len() - 1).unwrap_or(f64::NAN);
            let mut level = base;
            let values: Array1<f64> = steps
                .values()
                .iter()
                .map(|d| {
                    level += d;
                    level
                })
                .collect();
            steps.with_values(values)
        }
        Direction::Backward => {
            let prev = first - 1;
            if !diffs.index().contains(prev) {
                debug!(period = %prev, "extender does not cover the input edge");
                return Ok(input);
            }
            let steps = diffs.slice_by(None, Some(SliceBound::Period(prev)))?;
            let base = input.get(0).unwrap_or(f64::NAN);
            let mut values = vec![f64::NAN; steps.len()];
            let mut level = base;
            for (i, d) in steps.values().iter().enumerate().rev() {
                level -= d;
                values[i] = level;
            }
            steps.with_values(Array1::from_vec(values))
        }
    };
    let merged = overlay_refs(&[&input, &tail], true)?;
    Ok(merged.unwrap_or(input))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frequency::Frequency;

    fn monthly(start: &str, values: Vec<f64>) -> RegularSeries {
        let idx = PeriodIndex::try_range(
            Some(start.into()),
            None,
            Some(values.len()),
            Some(Frequency::Monthly),
        )
        .unwrap();
        RegularSeries::from_vec(idx, values).unwrap()
    }

    fn close(a: &[f64], b: &[f64]) -> bool {
        a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| (x - y).abs() < 1e-9)
    }

    #[test]
    fn test_extend_pc_forward() {
        let s = monthly("2010-01", vec![100.0, 101.0, 102.0]);
        let ext = monthly("2010-04", vec![0.01, -0.02]);
        let r = extend(&s, &ext.into(), Direction::Forward, ExtenderType::Pc).unwrap();
        assert!(close(&[100.0, 101.0, 102.0, 103.02, 100.9596], &r.values().to_vec()));
        assert_eq!("2010M05", r.last_period().unwrap().to_string());
    }

    #[test]
    fn test_extend_pc_backward() {
        let s = monthly("2010-03", vec![102.0, 104.0]);
        let r = extend(
            &s,
            &vec![0.01, 0.02].into(),
            Direction::Backward,
            ExtenderType::Pc,
        )
        .unwrap();
        // changes for Feb and Mar: Jan = 102 / 1.02 / 1.01, Feb = 102 / 1.02
        assert_eq!("2010M01", r.first_period().unwrap().to_string());
        assert!(close(
            &[102.0 / 1.02 / 1.01, 100.0, 102.0, 104.0],
            &r.values().to_vec()
        ));
    }

    #[test]
    fn test_extend_index() {
        let s = monthly("2010-01", vec![10.0, 20.0]);
        let ext = monthly("2009-11", vec![1.0, 2.0, 3.0, 4.0, 5.0]);
        let r = extend(&s, &ext.clone().into(), Direction::Forward, ExtenderType::Index).unwrap();
        assert!(close(&[10.0, 20.0, 25.0], &r.values().to_vec()));
        let r = extend(&s, &ext.into(), Direction::Backward, ExtenderType::Index).unwrap();
        assert!(close(&[10.0 / 3.0, 20.0 / 3.0, 10.0, 20.0], &r.values().to_vec()));
        assert_eq!("2009M11", r.first_period().unwrap().to_string());

        let r = extend(&s, &vec![4.0, 5.0].into(), Direction::Forward, ExtenderType::Index).unwrap();
        assert!(close(&[10.0, 20.0, 25.0], &r.values().to_vec()));
    }

    #[test]
    fn test_extend_pca() {
        let s = monthly("2010-01", vec![100.0]);
        let ext = monthly("2010-02", vec![0.12, 0.12]);
        let r = extend(&s, &ext.into(), Direction::Forward, ExtenderType::Pca).unwrap();
        let g = 1.12_f64.powf(1.0 / 12.0);
        assert!(close(&[100.0, 100.0 * g, 100.0 * g * g], &r.values().to_vec()));
        assert!(matches!(
            extend(&s, &vec![0.1].into(), Direction::Forward, ExtenderType::Pca),
            Err(PeriodError::InvalidExtenderType { .. })
        ));
    }

    #[test]
    fn test_extend_diff() {
        let s = monthly("2010-03", vec![10.0, 12.0]);
        let r = extend(&s, &vec![1.0, 2.0].into(), Direction::Forward, ExtenderType::Diff).unwrap();
        assert!(close(&[10.0, 12.0, 13.0, 15.0], &r.values().to_vec()));
        let r = extend(&s, &vec![1.0, 2.0].into(), Direction::Backward, ExtenderType::Diff).unwrap();
        assert!(close(&[7.0, 8.0, 10.0, 12.0], &r.values().to_vec()));
        assert_eq!("2010M01", r.first_period().unwrap().to_string());
    }

    #[test]
    fn test_extender_not_reaching_edge() {
        let s = monthly("2010-01", vec![1.0, 2.0]);
        let ext = monthly("2011-01", vec![0.1]);
        let r = extend(&s, &ext.clone().into(), Direction::Forward, ExtenderType::Diff).unwrap();
        assert_eq!(s, r);
        let r = extend(&s, &ext.into(), Direction::Forward, ExtenderType::Pc).unwrap();
        assert_eq!(s, r);
    }

    #[test]
    fn test_extend_trims_and_validates() {
        let nan = f64::NAN;
        let s = monthly("2010-01", vec![nan, 1.0, nan]);
        let r = extend(&s, &vec![1.0].into(), Direction::Forward, ExtenderType::Diff).unwrap();
        assert!(close(&[1.0, 2.0], &r.values().to_vec()));
        assert_eq!("2010M02", r.first_period().unwrap().to_string());

        let empty = monthly("2010-01", vec![nan]);
        assert!(extend(&empty, &vec![1.0].into(), Direction::Forward, ExtenderType::Pc)
            .unwrap()
            .is_empty());

        let q = RegularSeries::from_vec(
            PeriodIndex::from_ordinals(vec![160], Frequency::try_new("Q").unwrap()),
            vec![0.01],
        )
        .unwrap();
        let s = monthly("2010-01", vec![1.0]);
        assert!(matches!(
            extend(&s, &q.into(), Direction::Forward, ExtenderType::Pc),
            Err(PeriodError::MismatchedFrequency { .. })
        ));
    }
}
