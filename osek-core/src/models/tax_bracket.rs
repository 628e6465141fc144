use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single marginal bracket in a progressive schedule.
///
/// `max_income` of `None` marks the unbounded top bracket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    pub min_income: Decimal,
    pub max_income: Option<Decimal>,
    pub rate: Decimal,
}

impl TaxBracket {
    /// Portion of `income` that falls inside this bracket, zero when the
    /// income does not reach it.
    pub fn span_of(&self, income: Decimal) -> Decimal {
        let upper = match self.max_income {
            Some(max) => income.min(max),
            None => income,
        };
        (upper - self.min_income).max(Decimal::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn bracket(min: Decimal, max: Option<Decimal>) -> TaxBracket {
        TaxBracket {
            min_income: min,
            max_income: max,
            rate: dec!(0.10),
        }
    }

    #[test]
    fn span_of_income_below_bracket_is_zero() {
        let b = bracket(dec!(10000), Some(dec!(20000)));

        assert_eq!(b.span_of(dec!(5000)), dec!(0));
    }

    #[test]
    fn span_of_income_inside_bracket_is_partial() {
        let b = bracket(dec!(10000), Some(dec!(20000)));

        assert_eq!(b.span_of(dec!(15000)), dec!(5000));
    }

    #[test]
    fn span_of_income_above_bracket_is_full_width() {
        let b = bracket(dec!(10000), Some(dec!(20000)));

        assert_eq!(b.span_of(dec!(50000)), dec!(10000));
    }

    #[test]
    fn span_of_unbounded_bracket_has_no_ceiling() {
        let b = bracket(dec!(10000), None);

        assert_eq!(b.span_of(dec!(1000000)), dec!(990000));
    }
}
