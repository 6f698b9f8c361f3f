//! Regular series and the algebra combining them.
//!
//! A [`RegularSeries`] pairs a [`PeriodIndex`](crate::index::PeriodIndex) with one `f64` per
//! period. The functions in this module never mutate their inputs.

mod algebra;
mod extend;
mod resample;
#[allow(clippy::module_inception)]
mod series;
pub mod transforms;

pub use crate::series::algebra::{fill, overlay, trim};
pub use crate::series::extend::{extend, Extender};
pub use crate::series::resample::{resample, resample_with};
pub use crate::series::series::{RegularSeries, SeriesValue};
