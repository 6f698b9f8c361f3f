//! Frequency-tagged sequences of periods with label based lookup.

#[allow(clippy::module_inception)]
mod index;
mod key;
mod ops;

pub use crate::index::index::PeriodIndex;
pub use crate::index::key::{IndexKey, KeyLocation, PeriodBound, SliceBound};
