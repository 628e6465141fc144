//! Shared helpers for monetary arithmetic.

use rust_decimal::Decimal;

/// Rounds a monetary value to whole agorot (two decimal places) using
/// half-up rounding, the standard financial convention: values at exactly
/// 0.005 round away from zero.
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}

/// Clips a value at zero. Caps, headroom, and tax after credits never go
/// negative.
pub fn non_negative(value: Decimal) -> Decimal {
    value.max(Decimal::ZERO)
}
