use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Computed annual liability for a single income figure.
///
/// A pure value object: the calculator produces it, rendering collaborators
/// consume it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Liability {
    /// The annual income the liability was computed for.
    pub annual_income: Decimal,
    /// Income tax after credit points; never negative.
    pub income_tax: Decimal,
    /// Bracket-schedule tax plus surtax, before credit points.
    pub gross_income_tax: Decimal,
    /// Surtax portion of the gross figure.
    pub surtax: Decimal,
    /// Credit-point value actually used; credits cannot push the tax below
    /// zero, so this may be less than the points' full value.
    pub credit_applied: Decimal,
    /// National Insurance due on the same income.
    pub national_insurance: Decimal,
    /// Income remaining after income tax and National Insurance.
    pub net: Decimal,
    /// Marginal income-tax rate at this income, surtax included.
    pub marginal_rate: Decimal,
}

impl Liability {
    /// Income tax plus National Insurance.
    pub fn total_burden(&self) -> Decimal {
        self.income_tax + self.national_insurance
    }

    /// Combined burden as a share of income; zero for non-positive income.
    pub fn effective_rate(&self) -> Decimal {
        if self.annual_income <= Decimal::ZERO {
            Decimal::ZERO
        } else {
            self.total_burden() / self.annual_income
        }
    }
}
