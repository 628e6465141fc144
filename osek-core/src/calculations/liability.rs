//! Annual income-tax and National-Insurance liability.
//!
//! The calculator is stateless: it borrows a [`TaxYearConfig`] and maps an
//! income figure to a [`Liability`]. Every evaluation is independent, so the
//! optimizer can price one candidate allocation per call without
//! interference.
//!
//! Income tax is the bracket-schedule total plus surtax on the slice above
//! the surtax threshold, less the taxpayer's credit points (floored at
//! zero). National Insurance runs on its own schedule, with an optional
//! accrual floor below which nothing is owed and a ceiling past which no
//! further NI accrues.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use osek_core::{
//!     BracketSchedule, ContributionLimits, TaxBracket, TaxCalculator, TaxYearConfig,
//! };
//!
//! let config = TaxYearConfig {
//!     tax_year: 2025,
//!     income_tax: BracketSchedule::new(vec![
//!         TaxBracket {
//!             min_income: dec!(0),
//!             max_income: Some(dec!(10000)),
//!             rate: dec!(0.10),
//!         },
//!         TaxBracket {
//!             min_income: dec!(10000),
//!             max_income: None,
//!             rate: dec!(0.20),
//!         },
//!     ])
//!     .unwrap(),
//!     national_insurance: BracketSchedule::new(vec![TaxBracket {
//!         min_income: dec!(0),
//!         max_income: None,
//!         rate: dec!(0),
//!     }])
//!     .unwrap(),
//!     ni_income_floor: None,
//!     ni_income_ceiling: None,
//!     surtax: None,
//!     credit_points: dec!(0),
//!     credit_point_value: dec!(0),
//!     limits: ContributionLimits {
//!         pension_rate: dec!(0.07),
//!         pension_cap: dec!(18000),
//!         study_rate: dec!(0.045),
//!         study_cap: dec!(20520),
//!     },
//! };
//!
//! let liability = TaxCalculator::new(&config).liability(dec!(15000));
//!
//! assert_eq!(liability.income_tax, dec!(2000.00));
//! assert_eq!(liability.net, dec!(13000.00));
//! ```

use rust_decimal::Decimal;

use crate::calculations::common::{non_negative, round_half_up};
use crate::models::{Liability, TaxYearConfig};

/// Stateless liability calculator for one year's configuration.
#[derive(Debug, Clone)]
pub struct TaxCalculator<'a> {
    config: &'a TaxYearConfig,
}

impl<'a> TaxCalculator<'a> {
    pub fn new(config: &'a TaxYearConfig) -> Self {
        Self { config }
    }

    /// Full liability for `annual_income`.
    pub fn liability(&self, annual_income: Decimal) -> Liability {
        self.liability_with_deductions(annual_income, Decimal::ZERO)
    }

    /// Liability once `deductions` worth of contributions are in place.
    ///
    /// Deductible contributions reduce the income-tax base only; National
    /// Insurance stays on the unreduced income. This asymmetry is the
    /// domain rule the optimizer leans on when it prices headroom.
    pub fn liability_with_deductions(
        &self,
        annual_income: Decimal,
        deductions: Decimal,
    ) -> Liability {
        let taxable = non_negative(annual_income - deductions);

        let bracket_tax = self.config.income_tax.tax_at(taxable);
        let surtax = self.surtax_on(taxable);
        let gross_income_tax = round_half_up(bracket_tax + surtax);

        let credit_value = self.config.credit_points * self.config.credit_point_value;
        let credit_applied = round_half_up(credit_value.min(gross_income_tax));
        let income_tax = gross_income_tax - credit_applied;

        let national_insurance = round_half_up(self.national_insurance_on(annual_income));

        Liability {
            annual_income,
            income_tax,
            gross_income_tax,
            surtax: round_half_up(surtax),
            credit_applied,
            national_insurance,
            net: round_half_up(annual_income - income_tax - national_insurance),
            marginal_rate: self.marginal_rate_at(taxable),
        }
    }

    fn surtax_on(&self, taxable: Decimal) -> Decimal {
        match &self.config.surtax {
            Some(surtax) if taxable > surtax.threshold => {
                (taxable - surtax.threshold) * surtax.rate
            }
            _ => Decimal::ZERO,
        }
    }

    fn national_insurance_on(&self, annual_income: Decimal) -> Decimal {
        if annual_income <= Decimal::ZERO {
            return Decimal::ZERO;
        }
        if let Some(floor) = self.config.ni_income_floor {
            if annual_income < floor {
                return Decimal::ZERO;
            }
        }
        let base = match self.config.ni_income_ceiling {
            Some(ceiling) => annual_income.min(ceiling),
            None => annual_income,
        };
        self.config.national_insurance.tax_at(base)
    }

    fn marginal_rate_at(&self, taxable: Decimal) -> Decimal {
        let mut rate = self.config.income_tax.marginal_rate_at(taxable);
        if let Some(surtax) = &self.config.surtax {
            if taxable > surtax.threshold {
                rate += surtax.rate;
            }
        }
        rate
    }
}
