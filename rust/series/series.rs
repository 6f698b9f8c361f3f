use ndarray::Array1;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::ops::Range;

use crate::error::{PeriodError, PeriodResult};
use crate::frequency::Frequency;
use crate::index::{IndexKey, KeyLocation, PeriodIndex, SliceBound};
use crate::period::Period;

/// Values attached to a [`PeriodIndex`], one `f64` per period. Missing values are `NaN`.
///
/// Operations never mutate a series; they return new ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegularSeries {
    index: PeriodIndex,
    values: Array1<f64>,
}

/// Result of [`RegularSeries::get_value`].
#[derive(Debug, Clone, PartialEq)]
pub enum SeriesValue {
    Scalar(f64),
    Slice(RegularSeries),
}

impl RegularSeries {
    /// Attach `values` to `index`, which must have the same length.
    pub fn try_new(index: PeriodIndex, values: Array1<f64>) -> PeriodResult<Self> {
        if index.len() != values.len() {
            return Err(PeriodError::LengthMismatch {
                index: index.len(),
                values: values.len(),
            });
        }
        Ok(RegularSeries { index, values })
    }

    pub fn from_vec(index: PeriodIndex, values: Vec<f64>) -> PeriodResult<Self> {
        RegularSeries::try_new(index, Array1::from_vec(values))
    }

    /// A series without periods.
    pub fn empty(freq: Frequency) -> Self {
        RegularSeries {
            index: PeriodIndex::from_ordinals(Vec::<i64>::new(), freq),
            values: Array1::from_vec(vec![]),
        }
    }

    pub fn index(&self) -> &PeriodIndex {
        &self.index
    }

    pub fn values(&self) -> &Array1<f64> {
        &self.values
    }

    pub fn freq(&self) -> Frequency {
        self.index.freq()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The value at `position`.
    pub fn get(&self, position: usize) -> Option<f64> {
        self.values.get(position).copied()
    }

    pub fn first_period(&self) -> Option<Period> {
        self.index.first()
    }

    pub fn last_period(&self) -> Option<Period> {
        self.index.last()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Period, f64)> + '_ {
        self.index.iter().zip(self.values.iter().copied())
    }

    /// The periods and values in the positional `range`, clamped to the series length.
    pub fn slice(&self, range: Range<usize>) -> RegularSeries {
        let index = self.index.slice(range.clone());
        let end = range.end.min(self.len());
        let start = range.start.min(end);
        RegularSeries {
            index,
            values: self.values.slice(ndarray::s![start..end]).to_owned(),
        }
    }

    /// Conform the series to `index`, which must share its frequency. Periods absent from the
    /// series are `NaN`.
    pub fn reindex(&self, index: &PeriodIndex) -> PeriodResult<RegularSeries> {
        if index.freq() != self.freq() {
            return Err(PeriodError::MismatchedFrequency {
                found: vec![self.freq().code(), index.freq().code()],
            });
        }
        let mut positions: HashMap<i64, usize> = HashMap::with_capacity(self.len());
        for (i, o) in self.index.ordinals().iter().enumerate() {
            positions.entry(*o).or_insert(i);
        }
        let values: Array1<f64> = index
            .ordinals()
            .iter()
            .map(|o| positions.get(o).map_or(f64::NAN, |i| self.values[*i]))
            .collect();
        Ok(RegularSeries {
            index: index.clone(),
            values,
        })
    }

    /// Look up a value by position, period, date or literal. Literals coarser than the index
    /// return every value they cover.
    pub fn get_value<K: Into<IndexKey>>(&self, key: K) -> PeriodResult<SeriesValue> {
        match self.index.locate(key)? {
            KeyLocation::Position(p) => Ok(SeriesValue::Scalar(self.values[p])),
            KeyLocation::Range(r) => Ok(SeriesValue::Slice(self.slice(r))),
        }
    }

    /// The values between two label bounds, both inclusive.
    pub fn slice_by(
        &self,
        start: Option<SliceBound>,
        end: Option<SliceBound>,
    ) -> PeriodResult<RegularSeries> {
        let (s, e) = self.index.slice_locs(start, end)?;
        Ok(self.slice(s..e))
    }

    /// Shift values `n` positions later, keeping the index. Vacated cells are `NaN`.
    pub fn lag(&self, n: i64) -> RegularSeries {
        let len = self.len() as i64;
        let values: Array1<f64> = (0..len)
            .map(|i| {
                let j = i - n;
                if (0..len).contains(&j) {
                    self.values[j as usize]
                } else {
                    f64::NAN
                }
            })
            .collect();
        self.with_values(values)
    }

    /// Apply `f` to every value.
    pub fn map_values<F: Fn(f64) -> f64>(&self, f: F) -> RegularSeries {
        self.with_values(self.values.mapv(f))
    }

    pub fn scale(&self, factor: f64) -> RegularSeries {
        self.with_values(&self.values * factor)
    }

    /// Same index, other values. Lengths are the caller's responsibility.
    pub(crate) fn with_values(&self, values: Array1<f64>) -> RegularSeries {
        RegularSeries {
            index: self.index.clone(),
            values,
        }
    }
}

impl fmt::Display for RegularSeries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (p, v) in self.iter() {
            writeln!(f, "{:<12}{:>14.6}", p.to_string(), v)?;
        }
        write!(f, "freq: {}, length: {}", self.freq(), self.len())
    }
}
