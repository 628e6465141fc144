//! The surface the surrounding application drives.
//!
//! [`TaxYearPlanner`] owns the year's [`FinancialState`] and borrows the
//! shared read-only [`TaxYearConfig`]. Commands mutate the ledger; queries
//! derive projections, liabilities, and recommendations from it. One planner
//! serves one profile for one tax year; a caller that ever serves concurrent
//! requests wraps the whole planner in a single mutual-exclusion boundary so
//! each record/read sequence stays atomic.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use osek_core::{RecommendationMode, RecordField, TaxYearPlanner};
//! # use osek_core::{BracketSchedule, ContributionLimits, TaxBracket, TaxYearConfig};
//! # let config = TaxYearConfig {
//! #     tax_year: 2025,
//! #     income_tax: BracketSchedule::new(vec![TaxBracket {
//! #         min_income: dec!(0), max_income: None, rate: dec!(0.10),
//! #     }]).unwrap(),
//! #     national_insurance: BracketSchedule::new(vec![TaxBracket {
//! #         min_income: dec!(0), max_income: None, rate: dec!(0.05),
//! #     }]).unwrap(),
//! #     ni_income_floor: None,
//! #     ni_income_ceiling: None,
//! #     surtax: None,
//! #     credit_points: dec!(0),
//! #     credit_point_value: dec!(0),
//! #     limits: ContributionLimits {
//! #         pension_rate: dec!(0.165), pension_cap: dec!(34848),
//! #         study_rate: dec!(0.045), study_cap: dec!(20520),
//! #     },
//! # };
//!
//! let mut planner = TaxYearPlanner::new(&config);
//! planner.record(1, RecordField::Income, dec!(20000)).unwrap();
//! planner.record(2, RecordField::Income, dec!(20000)).unwrap();
//!
//! let recommendation = planner.recommend(RecommendationMode::Monthly).unwrap();
//! assert!(recommendation.pension.suggested_deposit > dec!(0));
//! ```

use rust_decimal::Decimal;
use tracing::debug;

use crate::calculations::{DeductionOptimizer, ProjectedState, TaxCalculator, project};
use crate::error::{StateError, ValidationError};
use crate::models::{Liability, Recommendation, RecommendationMode, RecordField, TaxYearConfig};
use crate::state::{FinancialState, MonthSnapshot, YearArchive};

/// Facade binding one year's configuration to one profile's ledger.
#[derive(Debug)]
pub struct TaxYearPlanner<'a> {
    config: &'a TaxYearConfig,
    state: FinancialState,
}

impl<'a> TaxYearPlanner<'a> {
    /// Starts an empty year under `config`.
    pub fn new(config: &'a TaxYearConfig) -> Self {
        Self {
            config,
            state: FinancialState::new(config.tax_year),
        }
    }

    /// Resumes a planner from previously persisted state.
    pub fn with_state(config: &'a TaxYearConfig, state: FinancialState) -> Self {
        Self { config, state }
    }

    pub fn state(&self) -> &FinancialState {
        &self.state
    }

    /// Adds to a month's field. See [`FinancialState::record`].
    pub fn record(
        &mut self,
        month: u32,
        field: RecordField,
        amount: Decimal,
    ) -> Result<(), ValidationError> {
        self.state.record(month, field, amount)
    }

    /// Replaces a month's field. See [`FinancialState::set`].
    pub fn set(
        &mut self,
        month: u32,
        field: RecordField,
        amount: Decimal,
    ) -> Result<(), ValidationError> {
        self.state.set(month, field, amount)
    }

    pub fn year_to_date(&self, field: RecordField) -> Decimal {
        self.state.year_to_date(field)
    }

    pub fn snapshot(&self) -> Vec<MonthSnapshot> {
        self.state.snapshot()
    }

    /// Liability under this year's configuration for an arbitrary income.
    pub fn liability(&self, annual_income: Decimal) -> Liability {
        TaxCalculator::new(self.config).liability(annual_income)
    }

    /// Extrapolates the ledger across the stated horizon.
    pub fn project(
        &self,
        months_elapsed: u32,
        months_remaining: u32,
    ) -> Result<ProjectedState, StateError> {
        project(&self.state, months_elapsed, months_remaining)
    }

    /// Recommends deposits for the rest of the year.
    ///
    /// Months elapsed is taken as the latest recorded calendar month, so a
    /// ledger filled through June projects over the six months that follow.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::EmptyYear`] when nothing has been recorded yet.
    pub fn recommend(&self, mode: RecommendationMode) -> Result<Recommendation, StateError> {
        let months_elapsed = self
            .state
            .latest_month()
            .ok_or(StateError::EmptyYear(self.state.tax_year()))?;
        let months_remaining = 12 - months_elapsed;
        debug!(months_elapsed, months_remaining, "projecting for recommendation");

        let projected = project(&self.state, months_elapsed, months_remaining)?;
        Ok(DeductionOptimizer::new(self.config).recommend(&projected, mode))
    }

    /// Closes the active year and starts `next_year` fresh.
    pub fn roll_over(&mut self, next_year: i32) -> YearArchive {
        self.state.roll_over(next_year)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::models::{BracketSchedule, ContributionLimits, TaxBracket};

    fn config() -> TaxYearConfig {
        TaxYearConfig {
            tax_year: 2025,
            income_tax: BracketSchedule::new(vec![
                TaxBracket {
                    min_income: dec!(0),
                    max_income: Some(dec!(100000)),
                    rate: dec!(0.10),
                },
                TaxBracket {
                    min_income: dec!(100000),
                    max_income: None,
                    rate: dec!(0.30),
                },
            ])
            .unwrap(),
            national_insurance: BracketSchedule::new(vec![TaxBracket {
                min_income: dec!(0),
                max_income: None,
                rate: dec!(0.05),
            }])
            .unwrap(),
            ni_income_floor: None,
            ni_income_ceiling: None,
            surtax: None,
            credit_points: dec!(0),
            credit_point_value: dec!(0),
            limits: ContributionLimits {
                pension_rate: dec!(0.07),
                pension_cap: dec!(18000),
                study_rate: dec!(0.045),
                study_cap: dec!(20520),
            },
        }
    }

    #[test]
    fn recommend_fails_on_empty_year() {
        let config = config();
        let planner = TaxYearPlanner::new(&config);

        let result = planner.recommend(RecommendationMode::Monthly);

        assert_eq!(result, Err(StateError::EmptyYear(2025)));
    }

    #[test]
    fn recommend_projects_from_latest_recorded_month() {
        let config = config();
        let mut planner = TaxYearPlanner::new(&config);
        for month in 1..=6 {
            planner.record(month, RecordField::Income, dec!(20000)).unwrap();
        }

        let rec = planner.recommend(RecommendationMode::Monthly).unwrap();

        // Projected income 240000; pension cap min(16800, 18000) = 16800
        // split over six remaining months.
        assert_eq!(rec.pension.headroom, dec!(16800.00));
        assert_eq!(rec.pension.suggested_deposit, dec!(2800.00));
    }

    #[test]
    fn recommend_in_december_collapses_to_lump_sum() {
        let config = config();
        let mut planner = TaxYearPlanner::new(&config);
        planner.record(12, RecordField::Income, dec!(120000)).unwrap();

        let rec = planner.recommend(RecommendationMode::Monthly).unwrap();

        assert_eq!(rec.mode, RecommendationMode::LumpSum);
    }

    #[test]
    fn liability_matches_direct_calculator() {
        let config = config();
        let planner = TaxYearPlanner::new(&config);

        let liability = planner.liability(dec!(150000));

        assert_eq!(liability.income_tax, dec!(25000.00));
        assert_eq!(liability.national_insurance, dec!(7500.00));
        assert_eq!(liability.net, dec!(117500.00));
    }

    #[test]
    fn project_via_planner_fails_with_zero_elapsed() {
        let config = config();
        let planner = TaxYearPlanner::new(&config);

        assert_eq!(planner.project(0, 12), Err(StateError::NoElapsedMonths));
    }

    #[test]
    fn roll_over_starts_a_fresh_year() {
        let config = config();
        let mut planner = TaxYearPlanner::new(&config);
        planner.record(1, RecordField::Income, dec!(1000)).unwrap();

        let archive = planner.roll_over(2026);

        assert_eq!(archive.tax_year, 2025);
        assert_eq!(planner.state().tax_year(), 2026);
        assert_eq!(planner.year_to_date(RecordField::Income), dec!(0));
    }
}
