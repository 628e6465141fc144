//! Progressive bracket schedules and the liability they imply.
//!
//! A schedule is an ordered run of marginal brackets covering `[0, ∞)` with
//! no gaps or overlaps and non-decreasing rates. Construction is the only
//! validation boundary: a [`BracketSchedule`] that exists is well-formed, so
//! [`tax_at`](BracketSchedule::tax_at) never re-checks the invariants.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use osek_core::{BracketSchedule, TaxBracket};
//!
//! let schedule = BracketSchedule::new(vec![
//!     TaxBracket {
//!         min_income: dec!(0),
//!         max_income: Some(dec!(10000)),
//!         rate: dec!(0.10),
//!     },
//!     TaxBracket {
//!         min_income: dec!(10000),
//!         max_income: None,
//!         rate: dec!(0.20),
//!     },
//! ])
//! .unwrap();
//!
//! // 10000 × 10% + 5000 × 20%
//! assert_eq!(schedule.tax_at(dec!(15000)), dec!(2000));
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;
use crate::models::TaxBracket;

/// A validated progressive schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<TaxBracket>", into = "Vec<TaxBracket>")]
pub struct BracketSchedule {
    brackets: Vec<TaxBracket>,
}

impl BracketSchedule {
    /// Builds a schedule, rejecting any malformation.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError`] if the brackets are empty, do not
    /// start at zero, leave a gap or overlap, carry a rate outside `[0, 1]`
    /// or below the preceding bracket's rate, or fail to end in an unbounded
    /// bracket.
    pub fn new(brackets: Vec<TaxBracket>) -> Result<Self, ConfigurationError> {
        let Some(first) = brackets.first() else {
            return Err(ConfigurationError::EmptySchedule);
        };
        if first.min_income != Decimal::ZERO {
            return Err(ConfigurationError::FirstBracketNotZero(first.min_income));
        }

        let mut expected_min = Decimal::ZERO;
        let mut prev_rate: Option<Decimal> = None;
        let last_index = brackets.len() - 1;

        for (i, bracket) in brackets.iter().enumerate() {
            if bracket.rate < Decimal::ZERO || bracket.rate > Decimal::ONE {
                return Err(ConfigurationError::RateOutOfRange(bracket.rate));
            }
            if bracket.min_income != expected_min {
                return Err(ConfigurationError::Discontinuity {
                    expected: expected_min,
                    found: bracket.min_income,
                });
            }
            if let Some(prev) = prev_rate {
                if bracket.rate < prev {
                    return Err(ConfigurationError::DecreasingRate {
                        prev,
                        next: bracket.rate,
                    });
                }
            }
            match bracket.max_income {
                Some(max) => {
                    if max <= bracket.min_income {
                        return Err(ConfigurationError::EmptyBracket(bracket.min_income));
                    }
                    if i == last_index {
                        return Err(ConfigurationError::BoundedTail);
                    }
                    expected_min = max;
                }
                None => {
                    if i != last_index {
                        return Err(ConfigurationError::UnboundedInterior(bracket.min_income));
                    }
                }
            }
            prev_rate = Some(bracket.rate);
        }

        Ok(Self { brackets })
    }

    /// The marginal brackets in ascending order.
    pub fn brackets(&self) -> &[TaxBracket] {
        &self.brackets
    }

    /// Cumulative liability for `income` under this schedule.
    ///
    /// Sums `rate × (min(income, upper) − lower)` over every bracket the
    /// income reaches. Continuous at bracket boundaries, monotonic in
    /// `income`, and zero for non-positive income.
    pub fn tax_at(&self, income: Decimal) -> Decimal {
        if income <= Decimal::ZERO {
            return Decimal::ZERO;
        }

        self.brackets
            .iter()
            .take_while(|b| income > b.min_income)
            .map(|b| b.span_of(income) * b.rate)
            .sum()
    }

    /// Marginal rate applying to the last unit of `income`; zero when no
    /// income is taxed.
    pub fn marginal_rate_at(&self, income: Decimal) -> Decimal {
        self.brackets
            .iter()
            .take_while(|b| income > b.min_income)
            .last()
            .map(|b| b.rate)
            .unwrap_or(Decimal::ZERO)
    }
}

impl TryFrom<Vec<TaxBracket>> for BracketSchedule {
    type Error = ConfigurationError;

    fn try_from(brackets: Vec<TaxBracket>) -> Result<Self, Self::Error> {
        Self::new(brackets)
    }
}

impl From<BracketSchedule> for Vec<TaxBracket> {
    fn from(schedule: BracketSchedule) -> Self {
        schedule.brackets
    }
}
