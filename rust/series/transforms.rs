//! Differences and growth rates.
//!
//! Lags are positional: `n` counts observations, not periods, so gaps in a series are not
//! skipped over. Annualized and year-on-year variants use the frequency's periodicity and
//! fail with [`PeriodError::UndefinedPeriodicity`] for daily, business and weekly series.
//! Percent outputs are multiplied by 100.

use crate::error::{PeriodError, PeriodResult};
use crate::series::series::RegularSeries;

fn periodicity(series: &RegularSeries) -> PeriodResult<f64> {
    Ok(f64::from(series.freq().periodicity()?))
}

fn years(series: &RegularSeries, n: i64) -> PeriodResult<i64> {
    Ok(n * i64::from(series.freq().periodicity()?))
}

fn nonzero(n: i64) -> PeriodResult<f64> {
    if n == 0 {
        return Err(PeriodError::InvalidArgument(
            "the lag `n` must not be zero".to_string(),
        ));
    }
    Ok(n as f64)
}

fn diff(series: &RegularSeries, n: i64) -> RegularSeries {
    series.with_values(series.values() - series.lag(n).values())
}

fn log_diff(series: &RegularSeries, n: i64) -> RegularSeries {
    let lagged = series.lag(n);
    series.with_values(series.values().mapv(f64::ln) - lagged.values().mapv(f64::ln))
}

fn ratio(series: &RegularSeries, n: i64) -> RegularSeries {
    series.with_values(series.values() / series.lag(n).values())
}

/// Difference over `n` periods.
pub fn d(series: &RegularSeries, n: i64) -> RegularSeries {
    diff(series, n)
}

/// Difference over `n` periods, annualized.
pub fn da(series: &RegularSeries, n: i64) -> PeriodResult<RegularSeries> {
    Ok(diff(series, n).scale(periodicity(series)?))
}

/// Difference over `n` years.
pub fn dy(series: &RegularSeries, n: i64) -> PeriodResult<RegularSeries> {
    Ok(diff(series, years(series, n)?))
}

/// Difference over `n` years, per year.
pub fn dya(series: &RegularSeries, n: i64) -> PeriodResult<RegularSeries> {
    let n_f = nonzero(n)?;
    Ok(diff(series, years(series, n)?).scale(1.0 / n_f))
}

/// Log difference over `n` periods, in percent.
pub fn logd(series: &RegularSeries, n: i64) -> RegularSeries {
    log_diff(series, n).scale(100.0)
}

/// Log difference over `n` periods, annualized, in percent.
pub fn logda(series: &RegularSeries, n: i64) -> PeriodResult<RegularSeries> {
    Ok(log_diff(series, n).scale(periodicity(series)? * 100.0))
}

/// Log difference over `n` years, in percent.
pub fn logdy(series: &RegularSeries, n: i64) -> PeriodResult<RegularSeries> {
    Ok(log_diff(series, years(series, n)?).scale(100.0))
}

/// Log difference over `n` years, per year, in percent.
pub fn logdya(series: &RegularSeries, n: i64) -> PeriodResult<RegularSeries> {
    let n_f = nonzero(n)?;
    Ok(log_diff(series, years(series, n)?).scale(100.0 / n_f))
}

/// Percent change over `n` periods.
pub fn pc(series: &RegularSeries, n: i64) -> RegularSeries {
    ratio(series, n).map_values(|r| (r - 1.0) * 100.0)
}

/// Percent change over `n` periods, compounded to an annual rate.
pub fn pca(series: &RegularSeries, n: i64) -> PeriodResult<RegularSeries> {
    let exponent = periodicity(series)? / nonzero(n)?;
    Ok(ratio(series, n).map_values(|r| (r.powf(exponent) - 1.0) * 100.0))
}

/// Percent change over `n` years.
pub fn pcy(series: &RegularSeries, n: i64) -> PeriodResult<RegularSeries> {
    Ok(ratio(series, years(series, n)?).map_values(|r| (r - 1.0) * 100.0))
}

/// Percent change over `n` years, as an average annual rate.
pub fn pcya(series: &RegularSeries, n: i64) -> PeriodResult<RegularSeries> {
    let exponent = 1.0 / nonzero(n)?;
    Ok(ratio(series, years(series, n)?).map_values(|r| (r.powf(exponent) - 1.0) * 100.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frequency::Frequency;
    use crate::index::PeriodIndex;

    fn series(freq: &str, values: Vec<f64>) -> RegularSeries {
        let idx = PeriodIndex::try_range(
            Some("2010-01-01".into()),
            None,
            Some(values.len()),
            Some(Frequency::try_new(freq).unwrap()),
        )
        .unwrap();
        RegularSeries::from_vec(idx, values).unwrap()
    }

    fn close(a: &[f64], b: &[f64]) -> bool {
        a.len() == b.len()
            && a
                .iter()
                .zip(b.iter())
                .all(|(x, y)| (x.is_nan() && y.is_nan()) || (x - y).abs() < 1e-9)
    }

    #[test]
    fn test_differences() {
        let nan = f64::NAN;
        let s = series("Q", vec![100.0, 102.0, 105.0, 104.0, 110.0]);
        assert!(close(&[nan, 2.0, 3.0, -1.0, 6.0], &d(&s, 1).values().to_vec()));
        assert!(close(&[nan, nan, 5.0, 2.0, 5.0], &d(&s, 2).values().to_vec()));
        assert!(close(&[nan, 8.0, 12.0, -4.0, 24.0], &da(&s, 1).unwrap().values().to_vec()));
        assert!(close(&[nan, nan, nan, nan, 10.0], &dy(&s, 1).unwrap().values().to_vec()));
        assert!(close(&[nan; 5], &dya(&s, 2).unwrap().values().to_vec()));
    }

    #[test]
    fn test_percent_changes() {
        let nan = f64::NAN;
        let s = series("Q", vec![100.0, 110.0, 121.0, 133.1, 146.41]);
        assert!(close(&[nan, 10.0, 10.0, 10.0, 10.0], &pc(&s, 1).values().to_vec()));
        let annual = (1.1_f64.powi(4) - 1.0) * 100.0;
        assert!(close(
            &[nan, annual, annual, annual, annual],
            &pca(&s, 1).unwrap().values().to_vec()
        ));
        assert!(close(&[nan, nan, nan, nan, 46.41], &pcy(&s, 1).unwrap().values().to_vec()));
        assert!(close(&[nan, nan, nan, nan, 46.41], &pcya(&s, 1).unwrap().values().to_vec()));
    }

    #[test]
    fn test_log_differences() {
        let e = std::f64::consts::E;
        let s = series("A", vec![1.0, e, e * e]);
        assert!(close(&[f64::NAN, 100.0, 100.0], &logd(&s, 1).values().to_vec()));
        assert!(close(&[f64::NAN, 100.0, 100.0], &logda(&s, 1).unwrap().values().to_vec()));
        assert!(close(&[f64::NAN, f64::NAN, 200.0], &logdy(&s, 2).unwrap().values().to_vec()));
        assert!(close(&[f64::NAN, f64::NAN, 100.0], &logdya(&s, 2).unwrap().values().to_vec()));
    }

    #[test]
    fn test_undefined_periodicity() {
        let s = series("D", vec![1.0, 2.0]);
        assert!(close(&[f64::NAN, 1.0], &d(&s, 1).values().to_vec()));
        assert!(matches!(
            pca(&s, 1),
            Err(PeriodError::UndefinedPeriodicity { .. })
        ));
        assert!(matches!(dy(&s, 1), Err(PeriodError::UndefinedPeriodicity { .. })));
        let q = series("Q", vec![1.0, 2.0]);
        assert!(matches!(pcya(&q, 0), Err(PeriodError::InvalidArgument(_))));
    }
}
