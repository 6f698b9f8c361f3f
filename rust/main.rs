use regperiod::enums::{Aggregation, Direction, ExtenderType};
use regperiod::index::{IndexKey, PeriodBound};
use regperiod::series::{extend, fill, overlay, resample, transforms, trim, RegularSeries};
use regperiod::{Frequency, Period, PeriodError, PeriodIndex};
use tracing::info;

fn monthly(start: &str, values: Vec<f64>) -> Result<RegularSeries, PeriodError> {
    let idx = PeriodIndex::try_range(
        Some(PeriodBound::from(start)),
        None,
        Some(values.len()),
        Some(Frequency::Monthly),
    )?;
    RegularSeries::from_vec(idx, values)
}

fn main() -> Result<(), PeriodError> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // periods and ranges
    let q = Period::try_from_str("2007Q3", None)?;
    let (start_date, end_date) = (q.start_time()?, q.to_timestamp()?);
    info!(period = %q, start = %start_date, end = %end_date, "parsed");
    let start = Period::try_from_str("2007-01-01", Some(Frequency::Daily))?;
    let days = PeriodIndex::try_range(Some(start.into()), Some((start + 9).into()), None, None)?;
    println!("{}", days);

    // frequency conversion
    let s = monthly("2007-01", (0..24).map(f64::from).collect())?;
    for how in [Aggregation::Sum, Aggregation::Mean, Aggregation::Last] {
        println!("{}: {:?}", how.name(), resample(&s, Frequency::try_new("Q")?, Some(how))?.values().to_vec());
    }
    let daily = resample(&s, Frequency::Daily, Some(Aggregation::Sum))?;
    info!(length = daily.len(), "disaggregated to daily");

    // access by key
    let first_quarter = s.get_value(IndexKey::from("2007Q1"))?;
    println!("2007Q1 -> {:?}", first_quarter);

    // splicing
    let s1 = monthly("2000-01", vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0])?;
    let s2 = monthly("2000-04", vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0])?;
    if let Some(spliced) = overlay(&[s1.clone(), s2.clone()], true)? {
        println!("{}", spliced);
    }
    if let Some(spliced) = overlay(&[s1, s2], false)? {
        println!("{}", spliced);
    }

    let base = monthly("2000-01", (1..=12).map(f64::from).collect())?;
    let growth = monthly(
        "2000-09",
        vec![0.2, 1.1, -0.3, 3.2, 0.5, 0.5, 0.1, -1.1, 0.4, -0.7, 0.1, 0.5],
    )?;
    for kind in [ExtenderType::Pc, ExtenderType::Pca, ExtenderType::Diff] {
        let extended = extend(&base, &growth.clone().into(), Direction::Forward, kind)?;
        println!("{}: {:?}", kind.name(), extended.values().to_vec());
    }

    // tidying and transforms
    let gappy = monthly("1990-01", vec![f64::NAN, 1.2, f64::NAN, 4.5, 2.6, f64::NAN])?;
    let trimmed = trim(&gappy);
    let sparse = trimmed.reindex(&PeriodIndex::from_ordinals(
        vec![trimmed.index().ordinals()[0], trimmed.index().ordinals()[2]],
        Frequency::Monthly,
    ))?;
    println!("{}", fill(&sparse)?);
    println!("{}", transforms::pca(&base, 1)?);

    Ok(())
}
