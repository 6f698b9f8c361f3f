//! Regular calendar frequencies and the ordinal arithmetic that maps dates onto them.
//!
//! A [`Frequency`] partitions the calendar into consecutive periods. Each period is identified
//! by a signed integer ordinal, so that periods of one frequency can be stored, shifted and
//! compared as plain integers. Conversions between frequencies go through the calendar dates
//! bounding a period.

mod calendar;
#[allow(clippy::module_inception)]
mod frequency;
mod registry;

pub use crate::frequency::calendar::{get_eom, ndate};
pub use crate::frequency::frequency::{Frequency, TWICE_MONTHLY_SPLIT_DAY};
pub use crate::frequency::registry::{catalog, codes, get_frequency_by_code};
