use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;
use std::sync::Arc;
use tracing::trace;

use crate::enums::{Aggregation, Edge};
use crate::error::{PeriodError, PeriodResult};
use crate::frequency::Frequency;
use crate::index::key::{IndexKey, KeyLocation, PeriodBound, SliceBound};
use crate::period::{parse_literal, Period};

/// An ordered sequence of periods sharing one [`Frequency`].
///
/// Periods are stored as ordinals. Derived indexes which do not change the ordinals, such as
/// `shift(0)` or `asfreq` to the same frequency, share the underlying buffer.
///
/// The `observed` tag records how values attached to the index were observed and is the
/// default aggregation used when a series is resampled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodIndex {
    ordinals: Arc<[i64]>,
    freq: Frequency,
    observed: Aggregation,
}

impl PeriodIndex {
    /// Create an index from ordinals of `freq`, in any order.
    pub fn from_ordinals(ordinals: impl Into<Arc<[i64]>>, freq: Frequency) -> Self {
        PeriodIndex {
            ordinals: ordinals.into(),
            freq,
            observed: Aggregation::default(),
        }
    }

    /// Create an index holding the periods of `freq` containing each date.
    pub fn from_dates(dates: &[NaiveDate], freq: Frequency) -> Self {
        let ordinals: Vec<i64> = dates.iter().map(|d| freq.to_ordinal(d)).collect();
        PeriodIndex::from_ordinals(ordinals, freq)
    }

    /// Create an index from date or period literals, each read at `freq`.
    pub fn from_strings<S: AsRef<str>>(values: &[S], freq: Frequency) -> PeriodResult<Self> {
        let ordinals = values
            .iter()
            .map(|s| Period::try_from_str(s.as_ref(), Some(freq)).map(|p| p.ordinal()))
            .collect::<PeriodResult<Vec<i64>>>()?;
        Ok(PeriodIndex::from_ordinals(ordinals, freq))
    }

    /// Create an index from periods, which must share a frequency.
    pub fn from_periods(periods: &[Period]) -> PeriodResult<Self> {
        let freq = match periods.first() {
            Some(p) => p.freq(),
            None => {
                return Err(PeriodError::AmbiguousConstruction(
                    "cannot infer a frequency from an empty list of periods".to_string(),
                ))
            }
        };
        if periods.iter().any(|p| p.freq() != freq) {
            let mut found: Vec<String> = periods.iter().map(|p| p.freq().code()).collect();
            found.dedup();
            return Err(PeriodError::MismatchedFrequency { found });
        }
        let ordinals: Vec<i64> = periods.iter().map(|p| p.ordinal()).collect();
        Ok(PeriodIndex::from_ordinals(ordinals, freq))
    }

    /// Create a gapless, strictly increasing index.
    ///
    /// Exactly two of `start`, `end` and `periods` must be given. Without `freq` the frequency
    /// is taken from a [`PeriodBound::Period`] bound, otherwise construction is ambiguous.
    /// A start literal or date resolves to the first period it touches and an end bound to the
    /// last, so that `"2007"` to `"2008"` at monthly frequency spans 24 months.
    ///
    /// # Examples
    /// ```rust
    /// # use regperiod::index::PeriodIndex;
    /// # use regperiod::frequency::Frequency;
    /// let idx = PeriodIndex::try_range(
    ///     Some("2007Q1".into()),
    ///     None,
    ///     Some(5),
    ///     Some(Frequency::Monthly),
    /// ).unwrap();
    /// assert_eq!(idx.to_string(), "PeriodIndex([2007M01, 2007M02, 2007M03, 2007M04, 2007M05], freq=M)");
    /// ```
    pub fn try_range(
        start: Option<PeriodBound>,
        end: Option<PeriodBound>,
        periods: Option<usize>,
        freq: Option<Frequency>,
    ) -> PeriodResult<Self> {
        let freq = match freq {
            Some(f) => f,
            None => match (&start, &end) {
                (Some(PeriodBound::Period(p)), _) | (_, Some(PeriodBound::Period(p))) => p.freq(),
                _ => {
                    return Err(PeriodError::AmbiguousConstruction(
                        "`freq` must be given unless `start` or `end` is a Period".to_string(),
                    ))
                }
            },
        };
        let n = periods.map(|n| n as i64);
        let (first, last) = match (start, end, n) {
            (Some(s), Some(e), None) => {
                (resolve_bound(&s, freq, Edge::Start)?, resolve_bound(&e, freq, Edge::End)?)
            }
            (Some(s), None, Some(n)) => {
                let first = resolve_bound(&s, freq, Edge::Start)?;
                let last = first.checked_add(n - 1).ok_or_else(|| out_of_range(first, freq))?;
                (first, last)
            }
            (None, Some(e), Some(n)) => {
                let last = resolve_bound(&e, freq, Edge::End)?;
                let first = last.checked_sub(n - 1).ok_or_else(|| out_of_range(last, freq))?;
                (first, last)
            }
            _ => {
                return Err(PeriodError::InvalidArgument(
                    "exactly two of `start`, `end` and `periods` must be given".to_string(),
                ))
            }
        };
        let ordinals: Vec<i64> = (first..=last).collect();
        Ok(PeriodIndex::from_ordinals(ordinals, freq))
    }

    /// Return the index tagged with a different `observed` aggregation.
    pub fn with_observed(mut self, observed: Aggregation) -> Self {
        self.observed = observed;
        self
    }

    pub fn freq(&self) -> Frequency {
        self.freq
    }

    pub fn observed(&self) -> Aggregation {
        self.observed
    }

    pub fn len(&self) -> usize {
        self.ordinals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordinals.is_empty()
    }

    /// View of the ordinals.
    pub fn ordinals(&self) -> &[i64] {
        &self.ordinals
    }

    /// Copy the ordinals out of the index.
    pub fn into_ordinals(self) -> Vec<i64> {
        self.ordinals.to_vec()
    }

    /// Whether `other` shares this index's ordinal buffer.
    pub fn shares_storage(&self, other: &PeriodIndex) -> bool {
        Arc::ptr_eq(&self.ordinals, &other.ordinals)
    }

    /// The period at `position`.
    pub fn get(&self, position: usize) -> Option<Period> {
        self.ordinals
            .get(position)
            .map(|o| Period::new(*o, self.freq))
    }

    pub fn first(&self) -> Option<Period> {
        self.ordinals.first().map(|o| Period::new(*o, self.freq))
    }

    pub fn last(&self) -> Option<Period> {
        self.ordinals.last().map(|o| Period::new(*o, self.freq))
    }

    pub fn iter(&self) -> impl Iterator<Item = Period> + '_ {
        self.ordinals.iter().map(move |o| Period::new(*o, self.freq))
    }

    /// Convert every period to `freq`. Returns an index sharing storage when `freq` is
    /// unchanged.
    pub fn asfreq(&self, freq: Frequency, how: Edge, overlap: bool) -> PeriodResult<PeriodIndex> {
        if freq == self.freq {
            return Ok(self.clone());
        }
        trace!(from = %self.freq, to = %freq, ?how, overlap, len = self.len(), "index asfreq");
        let ordinals = self
            .ordinals
            .iter()
            .map(|o| self.freq.asfreq(*o, &freq, how, overlap))
            .collect::<PeriodResult<Vec<i64>>>()?;
        Ok(PeriodIndex {
            ordinals: ordinals.into(),
            freq,
            observed: self.observed,
        })
    }

    /// Move every period by `n` periods. Ordinals saturate at the `i64` bounds, which no
    /// frequency can date.
    pub fn shift(&self, n: i64) -> PeriodIndex {
        if n == 0 {
            return self.clone();
        }
        PeriodIndex {
            ordinals: self.ordinals.iter().map(|o| o.saturating_add(n)).collect(),
            freq: self.freq,
            observed: self.observed,
        }
    }

    /// Whether ordinals are non-decreasing.
    pub fn is_monotonic(&self) -> bool {
        self.ordinals.windows(2).all(|w| w[0] <= w[1])
    }

    /// Whether consecutive ordinals differ by exactly one. An empty index is full.
    pub fn is_full(&self) -> PeriodResult<bool> {
        self.require_monotonic("is_full")?;
        Ok(self.ordinals.windows(2).all(|w| w[1] - w[0] == 1))
    }

    /// Smallest and largest ordinal.
    pub fn span(&self) -> Option<(i64, i64)> {
        let min = self.ordinals.iter().min()?;
        let max = self.ordinals.iter().max()?;
        Some((*min, *max))
    }

    /// Whether `key` is a member of the index. Periods must share the index frequency and
    /// integers are never members. Lookup errors count as absence.
    pub fn contains<K: Into<IndexKey>>(&self, key: K) -> bool {
        match key.into() {
            IndexKey::Position(_) => false,
            IndexKey::Period(p) if p.freq() != self.freq => false,
            key => self.get_loc(key).is_ok(),
        }
    }

    /// Position of `key`.
    ///
    /// Integer keys are positions. Dates resolve to the period containing them. Literals are
    /// read at their own resolution and, like periods of another frequency, converted at
    /// their end. With duplicated ordinals the first position is returned.
    pub fn get_loc<K: Into<IndexKey>>(&self, key: K) -> PeriodResult<usize> {
        let key = key.into();
        let ordinal = match &key {
            IndexKey::Position(i) => return self.position(*i),
            IndexKey::Period(p) if p.freq() == self.freq => p.ordinal(),
            IndexKey::Period(p) => p.asfreq(self.freq, Edge::End)?.ordinal(),
            IndexKey::Date(d) => self.freq.to_ordinal(d),
            IndexKey::Str(s) => Period::try_from_str(s, Some(self.freq))?.ordinal(),
        };
        self.search(ordinal)
            .ok_or_else(|| PeriodError::KeyNotFound(format!("{:?}", key)))
    }

    /// Locate `key`, returning a range of positions when `key` is a literal coarser than the
    /// index, e.g. `"2013"` on a monthly index.
    pub fn locate<K: Into<IndexKey>>(&self, key: K) -> PeriodResult<KeyLocation> {
        let key = key.into();
        if let IndexKey::Str(s) = &key {
            let (resolution, _) = parse_literal(s)?;
            if resolution.frequency().is_coarser_than(&self.freq) {
                let bound = SliceBound::Str(s.clone());
                let (start, end) = self.slice_locs(Some(bound.clone()), Some(bound))?;
                if start >= end {
                    return Err(PeriodError::KeyNotFound(s.clone()));
                }
                return Ok(KeyLocation::Range(start..end));
            }
        }
        self.get_loc(key).map(KeyLocation::Position)
    }

    /// Positions `(start, end)` delimiting the periods between two label bounds, inclusive of
    /// both bounds. A literal bound covers every period it touches. Requires a monotonic index.
    pub fn slice_locs(
        &self,
        start: Option<SliceBound>,
        end: Option<SliceBound>,
    ) -> PeriodResult<(usize, usize)> {
        self.require_monotonic("slice_locs")?;
        let start_loc = match start {
            Some(b) => {
                let (lo, _) = self.bound_ordinals(&b)?;
                self.ordinals.partition_point(|o| *o < lo)
            }
            None => 0,
        };
        let end_loc = match end {
            Some(b) => {
                let (_, hi) = self.bound_ordinals(&b)?;
                self.ordinals.partition_point(|o| *o <= hi)
            }
            None => self.len(),
        };
        Ok((start_loc, end_loc.max(start_loc)))
    }

    /// Index of the periods at the given positions.
    pub fn take(&self, positions: &[usize]) -> PeriodResult<PeriodIndex> {
        let ordinals = positions
            .iter()
            .map(|p| {
                self.ordinals
                    .get(*p)
                    .copied()
                    .ok_or(PeriodError::OutOfBounds {
                        position: *p as i64,
                        len: self.len(),
                    })
            })
            .collect::<PeriodResult<Vec<i64>>>()?;
        Ok(PeriodIndex {
            ordinals: ordinals.into(),
            freq: self.freq,
            observed: self.observed,
        })
    }

    /// Index of the periods in the positional `range`, clamped to the index length.
    pub fn slice(&self, range: Range<usize>) -> PeriodIndex {
        let end = range.end.min(self.len());
        let start = range.start.min(end);
        PeriodIndex {
            ordinals: self.ordinals[start..end].into(),
            freq: self.freq,
            observed: self.observed,
        }
    }

    /// The last calendar day of every period.
    pub fn to_dates(&self) -> PeriodResult<Vec<NaiveDate>> {
        self.ordinals
            .iter()
            .map(|o| self.freq.period_end(*o))
            .collect()
    }

    /// Canonical labels of every period.
    pub fn format(&self) -> PeriodResult<Vec<String>> {
        self.ordinals
            .iter()
            .map(|o| self.freq.format_ordinal(*o))
            .collect()
    }

    pub(crate) fn require_monotonic(&self, operation: &str) -> PeriodResult<()> {
        if self.is_monotonic() {
            Ok(())
        } else {
            Err(PeriodError::NotMonotonic(format!(
                "`{}` requires ordered periods",
                operation
            )))
        }
    }

    fn position(&self, i: i64) -> PeriodResult<usize> {
        let len = self.len() as i64;
        let p = if i < 0 { len + i } else { i };
        if p < 0 || p >= len {
            return Err(PeriodError::OutOfBounds {
                position: i,
                len: self.len(),
            });
        }
        Ok(p as usize)
    }

    fn search(&self, ordinal: i64) -> Option<usize> {
        if self.is_monotonic() {
            let p = self.ordinals.partition_point(|o| *o < ordinal);
            (self.ordinals.get(p) == Some(&ordinal)).then_some(p)
        } else {
            self.ordinals.iter().position(|o| *o == ordinal)
        }
    }

    /// First and last ordinals of this index's frequency covered by a label bound. Unlike
    /// key lookup, both edges of a coarser literal are kept.
    fn bound_ordinals(&self, bound: &SliceBound) -> PeriodResult<(i64, i64)> {
        let period = match bound {
            SliceBound::Period(p) => *p,
            SliceBound::Date(d) => {
                return Ok((
                    self.freq.ordinal_at(d, Edge::Start),
                    self.freq.ordinal_at(d, Edge::End),
                ))
            }
            SliceBound::Str(s) => {
                let (resolution, date) = parse_literal(s)?;
                Period::from_date(&date, resolution.frequency())
            }
        };
        if period.freq() == self.freq {
            return Ok((period.ordinal(), period.ordinal()));
        }
        Ok((
            period.asfreq(self.freq, Edge::Start)?.ordinal(),
            period.asfreq(self.freq, Edge::End)?.ordinal(),
        ))
    }
}

fn out_of_range(ordinal: i64, freq: Frequency) -> PeriodError {
    PeriodError::OutOfRange {
        ordinal,
        freq: freq.code(),
    }
}

// Range bounds convert at `how`: the start edge for `start`, the end edge for `end`.
fn resolve_bound(bound: &PeriodBound, freq: Frequency, how: Edge) -> PeriodResult<i64> {
    match bound {
        PeriodBound::Ordinal(o) => Ok(*o),
        PeriodBound::Date(d) => Ok(freq.ordinal_at(d, how)),
        PeriodBound::Period(p) if p.freq() == freq => Ok(p.ordinal()),
        PeriodBound::Period(p) => Ok(p.asfreq(freq, how)?.ordinal()),
        PeriodBound::Str(s) => {
            let (resolution, date) = parse_literal(s)?;
            Ok(Period::from_date(&date, resolution.frequency())
                .asfreq(freq, how)?
                .ordinal())
        }
    }
}

impl fmt::Display for PeriodIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let labels: Vec<String> = self.iter().map(|p| p.to_string()).collect();
        write!(f, "PeriodIndex([{}], freq={})", labels.join(", "), self.freq)
    }
}
