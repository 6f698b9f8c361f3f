//! Enumerated parameters shared across the crate.

mod parameters;

pub use crate::enums::parameters::{Aggregation, Direction, Edge, ExtenderType};
