use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;

/// Statutory deduction limits for one tax year.
///
/// Each category allows deducting up to `rate × annual income`, never more
/// than the absolute cap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionLimits {
    /// Deductible pension contribution as a share of annual income.
    pub pension_rate: Decimal,
    /// Absolute ceiling on deductible pension contributions.
    pub pension_cap: Decimal,
    /// Deductible study-fund contribution as a share of annual income.
    pub study_rate: Decimal,
    /// Absolute ceiling on deductible study-fund contributions.
    pub study_cap: Decimal,
}

impl ContributionLimits {
    /// Checks every constant once at load time.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        for rate in [self.pension_rate, self.study_rate] {
            if rate < Decimal::ZERO || rate > Decimal::ONE {
                return Err(ConfigurationError::RateOutOfRange(rate));
            }
        }
        for (name, value) in [
            ("pension_cap", self.pension_cap),
            ("study_cap", self.study_cap),
        ] {
            if value < Decimal::ZERO {
                return Err(ConfigurationError::NegativeConstant { name, value });
            }
        }
        Ok(())
    }

    /// Maximum deductible pension contribution for the given annual income.
    pub fn max_pension(&self, annual_income: Decimal) -> Decimal {
        (self.pension_rate * annual_income.max(Decimal::ZERO)).min(self.pension_cap)
    }

    /// Maximum deductible study-fund contribution for the given annual income.
    pub fn max_study(&self, annual_income: Decimal) -> Decimal {
        (self.study_rate * annual_income.max(Decimal::ZERO)).min(self.study_cap)
    }
}
