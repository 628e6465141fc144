//! Allocation of remaining deduction headroom.
//!
//! The optimizer consumes a [`ProjectedState`], never the live ledger, and
//! produces an advisory [`Recommendation`]: how much more to deposit into
//! pension and study fund, either spread over the remaining months or as a
//! single year-end top-up, and what income tax the full headroom avoids.
//!
//! # Example
//!
//! The worked case from the published limits: a 7% pension rate capped at
//! 18,000 against a projected 200,000 income allows 14,000; with 5,000
//! already deposited the headroom is 9,000, or 3,000 per month with three
//! months to go.

use rust_decimal::Decimal;
use tracing::warn;

use crate::calculations::common::{non_negative, round_half_up};
use crate::calculations::liability::TaxCalculator;
use crate::calculations::projection::ProjectedState;
use crate::models::{
    CategoryAdvice, Recommendation, RecommendationMode, TaxYearConfig,
};

/// Advisory allocator for one year's contribution headroom.
#[derive(Debug, Clone)]
pub struct DeductionOptimizer<'a> {
    config: &'a TaxYearConfig,
}

impl<'a> DeductionOptimizer<'a> {
    pub fn new(config: &'a TaxYearConfig) -> Self {
        Self { config }
    }

    /// Recommends additional pension and study-fund deposits.
    ///
    /// Monthly mode splits each category's headroom evenly over the months
    /// still to come; lump-sum mode reports the whole headroom at once.
    /// With no months remaining only a lump sum is actionable, so a monthly
    /// request collapses to lump-sum mode. Exhausted categories report zero
    /// rather than failing.
    pub fn recommend(
        &self,
        projected: &ProjectedState,
        mode: RecommendationMode,
    ) -> Recommendation {
        let base = non_negative(projected.net_income());
        let limits = &self.config.limits;

        let pension_headroom = Self::headroom(
            "pension",
            limits.max_pension(base),
            projected.pension_deposited,
        );
        let study_headroom = Self::headroom(
            "study fund",
            limits.max_study(base),
            projected.study_deposited,
        );

        let mode = if projected.months_remaining == 0 {
            RecommendationMode::LumpSum
        } else {
            mode
        };

        // Deductions shrink the income-tax base; the NI base is untouched,
        // so the saving is the income-tax delta alone.
        let calc = TaxCalculator::new(self.config);
        let before = calc.liability(projected.net_income());
        let after = calc
            .liability_with_deductions(projected.net_income(), pension_headroom + study_headroom);
        let projected_tax_saved = before.income_tax - after.income_tax;

        Recommendation {
            mode,
            pension: Self::advice(pension_headroom, mode, projected.months_remaining),
            study: Self::advice(study_headroom, mode, projected.months_remaining),
            projected_tax_saved,
        }
    }

    fn headroom(category: &str, cap: Decimal, deposited: Decimal) -> Decimal {
        if deposited > cap {
            warn!(
                category,
                %deposited,
                %cap,
                "deposits exceed the deductible cap; the excess is non-deductible"
            );
        }
        non_negative(round_half_up(cap - deposited))
    }

    fn advice(
        headroom: Decimal,
        mode: RecommendationMode,
        months_remaining: u32,
    ) -> CategoryAdvice {
        let suggested_deposit = match mode {
            RecommendationMode::LumpSum => headroom,
            RecommendationMode::Monthly => {
                round_half_up(headroom / Decimal::from(months_remaining.max(1)))
            }
        };
        CategoryAdvice {
            headroom,
            suggested_deposit,
            headroom_after: non_negative(headroom - suggested_deposit),
        }
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

    fn projected(
        net_income: Decimal,
        pension: Decimal,
        study: Decimal,
        months_remaining: u32,
    ) -> ProjectedState {
        ProjectedState {
            months_elapsed: 12 - months_remaining,
            months_remaining,
            annual_income: net_income,
            annual_expenses: dec!(0),
            pension_deposited: pension,
            study_deposited: study,
        }
    }

    // =========================================================================
    // headroom tests
    // =========================================================================

    #[test]
    fn monthly_mode_splits_headroom_evenly() {
        let config = config();
        let optimizer = DeductionOptimizer::new(&config);
        let state = projected(dec!(200000), dec!(5000), dec!(0), 3);

        let rec = optimizer.recommend(&state, RecommendationMode::Monthly);

        // max_pension = min(0.07 × 200000, 18000) = 14000; headroom 9000
        assert_eq!(rec.mode, RecommendationMode::Monthly);
        assert_eq!(rec.pension.headroom, dec!(9000.00));
        assert_eq!(rec.pension.suggested_deposit, dec!(3000.00));
        assert_eq!(rec.pension.headroom_after, dec!(6000.00));
    }

    #[test]
    fn lump_sum_mode_reports_full_headroom() {
        let config = config();
        let optimizer = DeductionOptimizer::new(&config);
        let state = projected(dec!(200000), dec!(5000), dec!(0), 3);

        let rec = optimizer.recommend(&state, RecommendationMode::LumpSum);

        assert_eq!(rec.pension.suggested_deposit, dec!(9000.00));
        assert_eq!(rec.pension.headroom_after, dec!(0.00));
    }

    #[test]
    fn monthly_request_collapses_to_lump_sum_when_year_is_over() {
        let config = config();
        let optimizer = DeductionOptimizer::new(&config);
        let state = projected(dec!(200000), dec!(5000), dec!(0), 0);

        let rec = optimizer.recommend(&state, RecommendationMode::Monthly);

        assert_eq!(rec.mode, RecommendationMode::LumpSum);
        assert_eq!(rec.pension.suggested_deposit, dec!(9000.00));
    }

    #[test]
    fn exhausted_category_reports_zero() {
        let config = config();
        let optimizer = DeductionOptimizer::new(&config);
        let state = projected(dec!(200000), dec!(20000), dec!(0), 3);

        let rec = optimizer.recommend(&state, RecommendationMode::Monthly);

        // 20000 deposited against a 14000 cap: no headroom, no failure.
        assert_eq!(rec.pension.headroom, dec!(0));
        assert_eq!(rec.pension.suggested_deposit, dec!(0.00));
    }

    #[test]
    fn monthly_suggestions_never_exceed_lump_sum_headroom() {
        let config = config();
        let optimizer = DeductionOptimizer::new(&config);
        let state = projected(dec!(200000), dec!(5000), dec!(2000), 5);

        let monthly = optimizer.recommend(&state, RecommendationMode::Monthly);
        let lump = optimizer.recommend(&state, RecommendationMode::LumpSum);

        let months = Decimal::from(state.months_remaining);
        assert!(monthly.pension.suggested_deposit * months <= lump.pension.suggested_deposit);
        assert!(monthly.study.suggested_deposit * months <= lump.study.suggested_deposit);
        assert_eq!(monthly.pension.headroom, lump.pension.headroom);
        assert_eq!(monthly.study.headroom, lump.study.headroom);
    }

    // =========================================================================
    // tax saving tests
    // =========================================================================

    #[test]
    fn tax_saved_prices_headroom_at_the_marginal_rate() {
        let config = config();
        let optimizer = DeductionOptimizer::new(&config);
        // Pension headroom 9000 and study headroom 9000 all sit inside the
        // 30% bracket (base 200000, deductions end at 182000).
        let state = projected(dec!(200000), dec!(5000), dec!(0), 3);

        let rec = optimizer.recommend(&state, RecommendationMode::Monthly);

        assert_eq!(rec.study.headroom, dec!(9000.00));
        assert_eq!(rec.projected_tax_saved, dec!(5400.00));
    }

    #[test]
    fn tax_saved_is_zero_when_no_headroom_remains() {
        let config = config();
        let optimizer = DeductionOptimizer::new(&config);
        let state = projected(dec!(200000), dec!(18000), dec!(20520), 3);

        let rec = optimizer.recommend(&state, RecommendationMode::Monthly);

        assert_eq!(rec.projected_tax_saved, dec!(0.00));
    }

    #[test]
    fn negative_projected_net_income_yields_zero_headroom() {
        let config = config();
        let optimizer = DeductionOptimizer::new(&config);
        let state = ProjectedState {
            months_elapsed: 3,
            months_remaining: 9,
            annual_income: dec!(10000),
            annual_expenses: dec!(40000),
            pension_deposited: dec!(0),
            study_deposited: dec!(0),
        };

        let rec = optimizer.recommend(&state, RecommendationMode::Monthly);

        assert_eq!(rec.pension.headroom, dec!(0.00));
        assert_eq!(rec.study.headroom, dec!(0.00));
        assert_eq!(rec.projected_tax_saved, dec!(0.00));
    }
}
