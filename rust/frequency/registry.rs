use chrono::{Month, Weekday};
use indexmap::IndexMap;
use std::sync::LazyLock;

use crate::error::{PeriodError, PeriodResult};
use crate::frequency::frequency::{month_from_number, Frequency, MONTH_CODES};

// Catalog of accepted codes. Canonical codes are inserted first, in coarse-to-fine order, and
// aliases after them so that `catalog()` can stop at the first alias.
static FREQUENCIES: LazyLock<(IndexMap<String, Frequency>, usize)> = LazyLock::new(|| {
    let mut m: IndexMap<String, Frequency> = IndexMap::new();
    let mut canonical = |f: Frequency| {
        m.insert(f.code(), f);
    };

    canonical(Frequency::Annual(Month::December));
    for n in 1..12 {
        canonical(Frequency::Annual(month_from_number(n)));
    }
    canonical(Frequency::SemiAnnual(Month::December));
    for n in 7..12 {
        canonical(Frequency::SemiAnnual(month_from_number(n)));
    }
    canonical(Frequency::Quarterly(Month::December));
    for n in 10..12 {
        canonical(Frequency::Quarterly(month_from_number(n)));
    }
    canonical(Frequency::BiMonthly);
    canonical(Frequency::Monthly);
    canonical(Frequency::TwiceMonthly);
    for w in [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
        Weekday::Sun,
    ] {
        canonical(Frequency::Weekly(w));
    }
    canonical(Frequency::Business);
    canonical(Frequency::Daily);
    let n_canonical = m.len();

    // aliases
    m.insert("A-DEC".to_string(), Frequency::Annual(Month::December));
    for (i, code) in MONTH_CODES.iter().enumerate() {
        let month = month_from_number(i as u32 + 1);
        m.entry(format!("SA-{}", code))
            .or_insert(Frequency::SemiAnnual(month).normalized());
        m.entry(format!("Q-{}", code))
            .or_insert(Frequency::Quarterly(month).normalized());
    }
    m.insert("W".to_string(), Frequency::Weekly(Weekday::Sun));
    (m, n_canonical)
});

/// Return the [`Frequency`] registered under `code`.
///
/// Codes are matched after trimming whitespace and ignoring case. Aliases such as `Q-JAN` or
/// `A-DEC` resolve to their canonical frequency.
pub fn get_frequency_by_code(code: &str) -> PeriodResult<Frequency> {
    let key = code.trim().to_uppercase();
    match FREQUENCIES.0.get(&key) {
        Some(f) => Ok(*f),
        None => Err(PeriodError::UnknownFrequency {
            code: code.to_string(),
            expected: catalog()
                .iter()
                .map(|f| f.code())
                .collect::<Vec<_>>()
                .join(", "),
        }),
    }
}

/// Every distinct frequency, ordered from coarsest to finest.
pub fn catalog() -> Vec<Frequency> {
    FREQUENCIES.0.values().take(FREQUENCIES.1).copied().collect()
}

/// Every accepted code, canonical codes first followed by aliases.
pub fn codes() -> Vec<String> {
    FREQUENCIES.0.keys().cloned().collect()
}
