//! Allows serialization and deserialization to JSON and to a compact binary form, with the
//! ``serde`` crate.

use bincode::config::standard;
use bincode::serde::{decode_from_slice, encode_to_vec};
use serde::{Deserialize, Serialize};
use serde_json;

use crate::error::{PeriodError, PeriodResult};
use crate::frequency::Frequency;
use crate::index::PeriodIndex;
use crate::period::Period;
use crate::seasonal::X13Config;
use crate::series::RegularSeries;

/// Handles the `to` and `from` JSON conversion.
pub trait JSON: Serialize + for<'de> Deserialize<'de> {
    /// Return a JSON string representing the object.
    fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Create an object from a JSON string representation.
    fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

/// Handles the `to` and `from` binary conversion.
///
/// Unlike JSON the binary form carries non-finite floats, so it is the format used for
/// series holding `NaN`.
pub trait Binary: Serialize + for<'de> Deserialize<'de> {
    fn to_bytes(&self) -> PeriodResult<Vec<u8>> {
        encode_to_vec(self, standard()).map_err(|e| PeriodError::Serialization(e.to_string()))
    }

    fn from_bytes(bytes: &[u8]) -> PeriodResult<Self> {
        decode_from_slice(bytes, standard())
            .map(|(value, _)| value)
            .map_err(|e| PeriodError::Serialization(e.to_string()))
    }
}

impl JSON for Frequency {}
impl JSON for Period {}
impl JSON for PeriodIndex {}
impl JSON for X13Config {}

impl Binary for PeriodIndex {}
impl Binary for RegularSeries {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enums::Aggregation;

    #[test]
    fn test_frequency_json() {
        let f = Frequency::try_new("w-fri").unwrap();
        assert_eq!(r#""W-FRI""#, f.to_json().unwrap());
        assert_eq!(f, Frequency::from_json(r#""w-fri""#).unwrap());
        assert!(Frequency::from_json(r#""Z""#).is_err());
    }

    #[test]
    fn test_period_and_index_json() {
        let p = Period::try_from_str("2013Q2", None).unwrap();
        assert_eq!(p, Period::from_json(&p.to_json().unwrap()).unwrap());
        let idx = PeriodIndex::from_ordinals(vec![3, 1, 2], Frequency::Daily)
            .with_observed(Aggregation::Last);
        assert_eq!(idx, PeriodIndex::from_json(&idx.to_json().unwrap()).unwrap());
    }

    #[test]
    fn test_series_binary_keeps_nan() {
        let idx = PeriodIndex::from_ordinals(vec![516, 517, 518], Frequency::Monthly);
        let s = RegularSeries::from_vec(idx, vec![1.0, f64::NAN, 3.0]).unwrap();
        let back = RegularSeries::from_bytes(&s.to_bytes().unwrap()).unwrap();
        assert_eq!(s.index(), back.index());
        assert_eq!(1.0, back.values()[0]);
        assert!(back.values()[1].is_nan());
        assert_eq!(3.0, back.values()[2]);
        assert!(RegularSeries::from_bytes(&[0xff, 0x01]).is_err());
    }
}
