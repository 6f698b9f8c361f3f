//! Single periods of a regular frequency and the literals that describe them.

mod ops;
mod parse;
#[allow(clippy::module_inception)]
mod period;

pub use crate::period::parse::{parse_period, Resolution};
pub(crate) use crate::period::parse::parse_literal;
pub use crate::period::period::Period;
