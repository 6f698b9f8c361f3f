use auto_ops::impl_op_ex;

use crate::index::PeriodIndex;

// Integer offsets move every period of the index
impl_op_ex!(+|a: &PeriodIndex, b: &i64| -> PeriodIndex { a.shift(*b) });
impl_op_ex!(-|a: &PeriodIndex, b: &i64| -> PeriodIndex { a.shift(-*b) });

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frequency::Frequency;

    #[test]
    fn test_offsets() {
        let idx = PeriodIndex::from_ordinals(vec![10, 11, 12], Frequency::Daily);
        assert_eq!(vec![12, 13, 14], (&idx + 2).into_ordinals());
        assert_eq!(vec![9, 10, 11], (&idx - 1).into_ordinals());
        assert!((&idx + 0).shares_storage(&idx));
        assert_eq!(idx, (idx.clone() + 5) - 5);
    }
}
