use proptest::prelude::*;

use crate::enums::{Aggregation, Edge};
use crate::frequency::{catalog, Frequency};
use crate::index::PeriodIndex;
use crate::period::Period;
use crate::series::{overlay, resample, RegularSeries};

fn any_frequency() -> impl Strategy<Value = Frequency> {
    let all = catalog();
    (0..all.len()).prop_map(move |i| all[i])
}

fn quarterly(start: i64, values: Vec<f64>) -> RegularSeries {
    let n = values.len() as i64;
    let idx = PeriodIndex::from_ordinals(
        (start..start + n).collect::<Vec<i64>>(),
        Frequency::try_new("Q").unwrap(),
    );
    RegularSeries::from_vec(idx, values).unwrap()
}

proptest! {
    #[test]
    fn ordinal_survives_its_own_dates(freq in any_frequency(), ordinal in -3000_i64..3000) {
        let start = freq.period_start(ordinal).unwrap();
        let end = freq.period_end(ordinal).unwrap();
        prop_assert!(start <= end);
        prop_assert_eq!(ordinal, freq.to_ordinal(&start));
        prop_assert_eq!(ordinal, freq.to_ordinal(&end));
        if freq != Frequency::Business {
            prop_assert_eq!(end.succ_opt().unwrap(), freq.period_start(ordinal + 1).unwrap());
        }
    }

    #[test]
    fn shifting_forth_and_back(freq in any_frequency(), ordinal in -3000_i64..3000, k in -500_i64..500) {
        let p = Period::new(ordinal, freq);
        prop_assert_eq!(p, p + k - k);
        prop_assert_eq!(k, ((p + k) - p).unwrap());
    }

    #[test]
    fn coarse_period_recovered_from_finer(
        coarse in any_frequency(),
        fine in any_frequency(),
        ordinal in -3000_i64..3000,
    ) {
        prop_assume!(coarse.is_coarser_than(&fine));
        let p = Period::new(ordinal, coarse);
        let down = p.asfreq(fine, Edge::Start).unwrap();
        prop_assert_eq!(p, down.asfreq(coarse, Edge::End).unwrap());
        prop_assert_eq!(down, down.asfreq(fine, Edge::End).unwrap());
    }

    #[test]
    fn edge_aggregations_undo_disaggregation(
        start in -400_i64..400,
        values in prop::collection::vec(-1e6_f64..1e6, 1..12),
    ) {
        let q = quarterly(start, values.clone());
        for how in [Aggregation::First, Aggregation::Last] {
            let monthly = resample(&q, Frequency::Monthly, Some(how)).unwrap();
            prop_assert_eq!(3 * values.len(), monthly.len());
            let back = resample(&monthly, q.freq(), Some(how)).unwrap();
            prop_assert_eq!(&q, &back);
        }
    }

    #[test]
    fn overlay_of_one_series_is_identity(
        start in -400_i64..400,
        values in prop::collection::vec(-1e6_f64..1e6, 1..24),
        replace in any::<bool>(),
    ) {
        let q = quarterly(start, values);
        prop_assert_eq!(Some(q.clone()), overlay(&[q], replace).unwrap());
    }
}
