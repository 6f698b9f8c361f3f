use auto_ops::impl_op_ex;

use crate::error::{PeriodError, PeriodResult};
use crate::period::Period;

// Add and subtract whole periods. Ordinals saturate at the i64 bounds, which no frequency
// can date, so an overflowed period fails with `OutOfRange` once converted.
impl_op_ex!(+|a: &Period, b: &i64| -> Period {
    Period::new(a.ordinal().saturating_add(*b), a.freq())
});
impl_op_ex!(-|a: &Period, b: &i64| -> Period {
    Period::new(a.ordinal().saturating_sub(*b), a.freq())
});

// Number of periods between two periods of the same frequency
impl_op_ex!(-|a: &Period, b: &Period| -> PeriodResult<i64> {
    a.check_freq(b)?;
    a.ordinal()
        .checked_sub(b.ordinal())
        .ok_or_else(|| PeriodError::OutOfRange {
            ordinal: a.ordinal(),
            freq: a.freq().code(),
        })
});
