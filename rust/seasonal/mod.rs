//! Seasonal adjustment through the external X-13ARIMA-SEATS program.

mod config;
mod x13;

pub use crate::seasonal::config::{X13Config, X13_PATH_VAR, X13_SCRATCH_VAR};
pub use crate::seasonal::x13::x13;
