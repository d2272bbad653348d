use rust_decimal::Decimal;

/// Percent change of `current` against `base`.
///
/// A zero base has no meaningful ratio: nothing against nothing is `None`,
/// anything against nothing is reported as a flat 100% increase. Also `None`
/// if the ratio overflows `Decimal`.
pub fn percent_change(current: Decimal, base: Decimal) -> Option<Decimal> {
    if base.is_zero() {
        return if current.is_zero() {
            None
        } else {
            Some(Decimal::ONE_HUNDRED)
        };
    }

    current
        .checked_div(base)
        .and_then(|ratio| ratio.checked_sub(Decimal::ONE))
        .and_then(|growth| growth.checked_mul(Decimal::ONE_HUNDRED))
}
