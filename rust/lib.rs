//! This is the documentation for regperiod
//!
//! Calendar-aware regular periods for economic time series. Dates are mapped onto integer
//! ordinals of a [`Frequency`](frequency::Frequency) (annual, semiannual, quarterly,
//! bimonthly, monthly, twice-monthly, weekly, business daily and daily), collected into a
//! [`PeriodIndex`](index::PeriodIndex), and paired with values in a
//! [`RegularSeries`](series::RegularSeries).
//!
//! The series algebra converts between frequencies ([`resample`](series::resample)), splices
//! series together ([`overlay`](series::overlay), [`extend`](series::extend)) and tidies them
//! ([`trim`](series::trim), [`fill`](series::fill)).
//!
//! ```rust
//! use regperiod::{Aggregation, Frequency, PeriodIndex, RegularSeries};
//!
//! let m = Frequency::try_new("M").unwrap();
//! let idx = PeriodIndex::try_range(Some("2007-01".into()), None, Some(12), Some(m)).unwrap();
//! let s = RegularSeries::from_vec(idx, (1..=12).map(f64::from).collect()).unwrap();
//! let q = regperiod::series::resample(&s, Frequency::try_new("Q").unwrap(), Some(Aggregation::Sum)).unwrap();
//! assert_eq!(q.values().to_vec(), vec![6.0, 15.0, 24.0, 33.0]);
//! ```

#[cfg(test)]
mod tests;

pub mod error;
pub use crate::error::{PeriodError, PeriodResult};

pub mod enums;
pub use crate::enums::{Aggregation, Direction, Edge, ExtenderType};

pub mod frequency;
pub use crate::frequency::Frequency;

pub mod period;
pub use crate::period::Period;

pub mod index;
pub use crate::index::PeriodIndex;

pub mod series;
pub use crate::series::RegularSeries;

pub mod seasonal;

pub mod persist;
