use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;
use crate::models::{BracketSchedule, ContributionLimits};

/// Surtax levied on the slice of income above a threshold, on top of the
/// bracket schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Surtax {
    pub threshold: Decimal,
    pub rate: Decimal,
}

/// Process-wide configuration for one tax year.
///
/// Holds the income-tax and National-Insurance schedules, the NI accrual
/// floor and ceiling, surtax and credit-point constants, and the statutory
/// contribution limits. Loaded once at startup and shared read-only; nothing
/// here mutates during a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxYearConfig {
    pub tax_year: i32,
    pub income_tax: BracketSchedule,
    pub national_insurance: BracketSchedule,
    /// Annual income below which no NI accrues at all.
    pub ni_income_floor: Option<Decimal>,
    /// Annual income above which no further NI accrues. The published NI
    /// schedule stops at this point; keeping it as a clamp lets the bracket
    /// schedule itself stay non-decreasing.
    pub ni_income_ceiling: Option<Decimal>,
    pub surtax: Option<Surtax>,
    /// Personal credit points held by the taxpayer.
    pub credit_points: Decimal,
    /// Annual shekel value of one credit point.
    pub credit_point_value: Decimal,
    pub limits: ContributionLimits,
}

impl TaxYearConfig {
    /// Validates the year constants. The two schedules enforce their own
    /// invariants at construction, so only the scalar values are checked
    /// here.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        for (name, value) in [
            ("ni_income_floor", self.ni_income_floor),
            ("ni_income_ceiling", self.ni_income_ceiling),
        ] {
            if let Some(value) = value {
                if value < Decimal::ZERO {
                    return Err(ConfigurationError::NegativeConstant { name, value });
                }
            }
        }
        if let Some(surtax) = &self.surtax {
            if surtax.rate < Decimal::ZERO || surtax.rate > Decimal::ONE {
                return Err(ConfigurationError::RateOutOfRange(surtax.rate));
            }
            if surtax.threshold < Decimal::ZERO {
                return Err(ConfigurationError::NegativeConstant {
                    name: "surtax_threshold",
                    value: surtax.threshold,
                });
            }
        }
        for (name, value) in [
            ("credit_points", self.credit_points),
            ("credit_point_value", self.credit_point_value),
        ] {
            if value < Decimal::ZERO {
                return Err(ConfigurationError::NegativeConstant { name, value });
            }
        }
        self.limits.validate()
    }
}
