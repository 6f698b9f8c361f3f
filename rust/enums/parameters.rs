use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::PeriodError;

/// Which edge of a period's calendar interval anchors a frequency conversion.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Edge {
    /// The first calendar day of the interval.
    Start,
    /// The last calendar day of the interval.
    End,
}

impl FromStr for Edge {
    type Err = PeriodError;

    /// Accepts `S`, `START`, `BEGIN` and `E`, `END`, `FINISH` in any case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "S" | "START" | "BEGIN" => Ok(Edge::Start),
            "E" | "END" | "FINISH" => Ok(Edge::End),
            _ => Err(PeriodError::InvalidArgument(format!(
                "`how` must be one of 'S' or 'E', got '{}'",
                s
            ))),
        }
    }
}

/// Method used to combine values when a series changes frequency.
///
/// The same names drive aggregation (many finer cells into one coarser cell) and
/// disaggregation (one coarser cell spread over its finer cells).
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Aggregation {
    Sum,
    #[default]
    Mean,
    Min,
    Max,
    /// First finite value in the group.
    First,
    /// Last finite value in the group.
    Last,
}

impl Aggregation {
    pub fn name(&self) -> &'static str {
        match self {
            Aggregation::Sum => "sum",
            Aggregation::Mean => "mean",
            Aggregation::Min => "min",
            Aggregation::Max => "max",
            Aggregation::First => "first",
            Aggregation::Last => "last",
        }
    }
}

impl fmt::Display for Aggregation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Aggregation {
    type Err = PeriodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sum" => Ok(Aggregation::Sum),
            "mean" => Ok(Aggregation::Mean),
            "min" => Ok(Aggregation::Min),
            "max" => Ok(Aggregation::Max),
            "first" => Ok(Aggregation::First),
            "last" => Ok(Aggregation::Last),
            _ => Err(PeriodError::InvalidAggregator(s.to_string())),
        }
    }
}

/// Direction in which [`extend`](crate::series::extend) grows a series.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Forward,
    Backward,
}

impl FromStr for Direction {
    type Err = PeriodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "forward" => Ok(Direction::Forward),
            "backward" => Ok(Direction::Backward),
            _ => Err(PeriodError::InvalidArgument(format!(
                "direction must be 'forward' or 'backward', got '{}'",
                s
            ))),
        }
    }
}

/// How the values of an extender series are interpreted.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtenderType {
    /// Levels whose relative movement is grafted onto the input.
    Index,
    /// Fractional period-over-period changes, e.g. 4% = 0.04.
    Pc,
    /// Annualized fractional changes, de-annualized by the periodicity.
    Pca,
    /// Level differences.
    Diff,
}

impl ExtenderType {
    pub fn name(&self) -> &'static str {
        match self {
            ExtenderType::Index => "index",
            ExtenderType::Pc => "pc",
            ExtenderType::Pca => "pca",
            ExtenderType::Diff => "diff",
        }
    }
}

impl FromStr for ExtenderType {
    type Err = PeriodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "index" => Ok(ExtenderType::Index),
            "pc" => Ok(ExtenderType::Pc),
            "pca" => Ok(ExtenderType::Pca),
            "diff" => Ok(ExtenderType::Diff),
            _ => Err(PeriodError::InvalidArgument(format!(
                "extender_type must be 'index', 'pc', 'pca', or 'diff', got '{}'",
                s
            ))),
        }
    }
}
