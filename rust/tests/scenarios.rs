use crate::enums::{Aggregation, Direction, Edge, ExtenderType};
use crate::frequency::{ndate, Frequency};
use crate::index::{IndexKey, PeriodBound, PeriodIndex, SliceBound};
use crate::period::Period;
use crate::series::{extend, fill, overlay, resample, trim, RegularSeries, SeriesValue};

fn is_close(a: &f64, b: &f64, abs_tol: Option<f64>) -> bool {
    // NaN compares equal to NaN here
    (a.is_nan() && b.is_nan()) || (a - b).abs() < abs_tol.unwrap_or(1e-8)
}

fn all_close(a: &[f64], b: &[f64]) -> bool {
    a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| is_close(x, y, None))
}

fn monthly(start: &str, values: Vec<f64>) -> RegularSeries {
    let idx = PeriodIndex::try_range(
        Some(PeriodBound::from(start)),
        None,
        Some(values.len()),
        Some(Frequency::Monthly),
    )
    .unwrap();
    RegularSeries::from_vec(idx, values).unwrap()
}

#[test]
fn index_from_annual_dates() {
    let dates = vec![ndate(2007, 12, 31), ndate(2008, 12, 31), ndate(2009, 12, 31)];
    let idx = PeriodIndex::from_dates(&dates, Frequency::try_new("A").unwrap());
    assert_eq!(vec!["2007", "2008", "2009"], idx.format().unwrap());
}

#[test]
fn daily_range_between_periods() {
    let start = Period::from_date(&ndate(2007, 1, 1), Frequency::Daily);
    let end = start + 9;
    let idx = PeriodIndex::try_range(Some(start.into()), Some(end.into()), None, None).unwrap();
    assert_eq!(10, idx.len());
    assert_eq!(Frequency::Daily, idx.freq());
    assert_eq!(Some(end), idx.last());
}

#[test]
fn quarter_strings_bound_a_monthly_range() {
    let idx = PeriodIndex::try_range(
        Some("2007Q1".into()),
        Some("2008Q2".into()),
        None,
        Some(Frequency::Monthly),
    )
    .unwrap();
    assert_eq!(18, idx.len());
    assert_eq!("2007M01", idx.first().unwrap().to_string());
    assert_eq!("2008M06", idx.last().unwrap().to_string());
}

#[test]
fn series_access_by_key() {
    let s = monthly("2007-01", (0..24).map(f64::from).collect());
    assert_eq!(SeriesValue::Scalar(0.0), s.get_value(0_i64).unwrap());
    assert_eq!(SeriesValue::Scalar(23.0), s.get_value(-1_i64).unwrap());
    assert_eq!(SeriesValue::Scalar(0.0), s.get_value(ndate(2007, 1, 31)).unwrap());
    assert_eq!(SeriesValue::Scalar(0.0), s.get_value(ndate(2007, 1, 1)).unwrap());
    assert_eq!(SeriesValue::Scalar(0.0), s.get_value("2007-01").unwrap());
    match s.get_value(IndexKey::from("2007Q1")).unwrap() {
        SeriesValue::Slice(q) => assert_eq!(vec![0.0, 1.0, 2.0], q.values().to_vec()),
        _ => assert!(false),
    }
    let part = s
        .slice_by(Some(SliceBound::from("2007Q1")), Some(SliceBound::from("2008Q2")))
        .unwrap();
    assert_eq!(18, part.len());
    let part = s
        .slice_by(Some(ndate(2007, 1, 31).into()), Some(ndate(2007, 6, 30).into()))
        .unwrap();
    assert_eq!(vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0], part.values().to_vec());
}

#[test]
fn monthly_to_quarterly() {
    let s = monthly("2007-01", (0..24).map(f64::from).collect());
    let q = Frequency::try_new("Q").unwrap();
    let options: Vec<(Aggregation, Vec<f64>)> = vec![
        (Aggregation::Sum, vec![3.0, 12.0, 21.0, 30.0, 39.0, 48.0, 57.0, 66.0]),
        (Aggregation::Mean, vec![1.0, 4.0, 7.0, 10.0, 13.0, 16.0, 19.0, 22.0]),
        (Aggregation::Min, vec![0.0, 3.0, 6.0, 9.0, 12.0, 15.0, 18.0, 21.0]),
        (Aggregation::Max, vec![2.0, 5.0, 8.0, 11.0, 14.0, 17.0, 20.0, 23.0]),
        (Aggregation::First, vec![0.0, 3.0, 6.0, 9.0, 12.0, 15.0, 18.0, 21.0]),
        (Aggregation::Last, vec![2.0, 5.0, 8.0, 11.0, 14.0, 17.0, 20.0, 23.0]),
    ];
    for option in options {
        let result = resample(&s, q, Some(option.0)).unwrap();
        assert_eq!(option.1, result.values().to_vec());
        assert_eq!("2007Q1", result.first_period().unwrap().to_string());
    }
}

#[test]
fn monthly_to_daily_and_back() {
    let s = monthly("2007-01", vec![31.0, 28.0, 62.0]);
    let daily = resample(&s, Frequency::Daily, Some(Aggregation::Sum)).unwrap();
    assert_eq!(31 + 28 + 31, daily.len());
    assert!(daily.values().iter().take(59).all(|v| is_close(v, &1.0, None)));
    assert!(daily.values().iter().skip(59).all(|v| is_close(v, &2.0, None)));
    let back = resample(&daily, Frequency::Monthly, Some(Aggregation::Sum)).unwrap();
    assert!(all_close(&[31.0, 28.0, 62.0], &back.values().to_vec()));

    let daily = resample(&s, Frequency::Daily, Some(Aggregation::Last)).unwrap();
    assert!(daily.values()[29].is_nan());
    assert_eq!(31.0, daily.values()[30]);
}

#[test]
fn overlay_splices() {
    let s1 = monthly("2000-01", vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    let s2 = monthly("2000-04", vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    let options: Vec<(bool, Vec<f64>)> = vec![
        (true, vec![1.0, 2.0, 3.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0]),
        (false, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 4.0, 5.0, 6.0]),
    ];
    for option in options {
        let result = overlay(&[s1.clone(), s2.clone()], option.0).unwrap().unwrap();
        assert_eq!(option.1, result.values().to_vec());
        assert_eq!("2000M09", result.last_period().unwrap().to_string());
    }
}

#[test]
fn extend_with_index_series() {
    let s1 = monthly("2000-01", (1..=12).map(f64::from).collect());
    let s2 = monthly("2000-09", (1..=12).map(f64::from).collect());
    let s3 = monthly("1999-03", (1..=12).map(f64::from).collect());

    let forward = extend(&s1, &s2.into(), Direction::Forward, ExtenderType::Index).unwrap();
    assert_eq!(20, forward.len());
    assert_eq!(12.0, forward.values()[11]);
    assert_eq!(15.0, forward.values()[12]);
    assert_eq!(36.0, forward.values()[19]);

    let backward = extend(&s1, &s3.into(), Direction::Backward, ExtenderType::Index).unwrap();
    assert_eq!(22, backward.len());
    assert_eq!("1999M03", backward.first_period().unwrap().to_string());
    assert!(is_close(&backward.values()[0], &(1.0 / 11.0), None));
    assert_eq!(1.0, backward.values()[10]);
}

#[test]
fn extend_with_percent_changes() {
    let s = monthly("2010-01", vec![100.0, 101.0, 102.0]);
    // raw changes are fractions, not percentages
    let e = extend(&s, &vec![0.01, -0.02].into(), Direction::Forward, ExtenderType::Pc).unwrap();
    assert!(all_close(&[100.0, 101.0, 102.0, 103.02, 100.9596], &e.values().to_vec()));
}

#[test]
fn extend_with_differences() {
    let s1 = monthly("2000-01", (1..=12).map(f64::from).collect());
    let s2 = monthly(
        "2000-09",
        vec![0.2, 1.1, -0.3, 3.2, 0.5, 0.5, 0.1, -1.1, 0.4, -0.7, 0.1, 0.5],
    );
    let e = extend(&s1, &s2.into(), Direction::Forward, ExtenderType::Diff).unwrap();
    assert_eq!(20, e.len());
    assert!(all_close(
        &[12.5, 13.0, 13.1, 12.0, 12.4, 11.7, 11.8, 12.3],
        &e.values().to_vec()[12..]
    ));
}

#[test]
fn trim_then_fill() {
    let nan = f64::NAN;
    let s = monthly("1990-01", vec![nan, 1.2, nan, 4.5, 2.6, nan]);
    let trimmed = trim(&s);
    assert_eq!(4, trimmed.len());
    assert_eq!("1990M02", trimmed.first_period().unwrap().to_string());
    assert_eq!("1990M05", trimmed.last_period().unwrap().to_string());

    let sparse = trimmed.reindex(&trimmed.index().take(&[0, 3]).unwrap()).unwrap();
    assert_eq!(false, sparse.index().is_full().unwrap());
    let filled = fill(&sparse).unwrap();
    assert_eq!(true, filled.index().is_full().unwrap());
    assert!(all_close(&[1.2, nan, nan, 2.6], &filled.values().to_vec()));
}

#[test]
fn quarter_conversions() {
    let q = Period::try_from_str("2007Q3", None).unwrap();
    let options: Vec<(&str, Edge, &str)> = vec![
        ("M", Edge::Start, "2007M07"),
        ("M", Edge::End, "2007M09"),
        ("A", Edge::End, "2007"),
        ("D", Edge::Start, "2007-07-01"),
        ("D", Edge::End, "2007-09-30"),
    ];
    for option in options {
        let f = Frequency::try_new(option.0).unwrap();
        assert_eq!(option.2, q.asfreq(f, option.1).unwrap().to_string());
    }
}
