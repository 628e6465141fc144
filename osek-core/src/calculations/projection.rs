//! Year-end extrapolation of a financial state.
//!
//! Income and expenses extend linearly at the pace observed so far; deposits
//! are carried as already-realized amounts and never extrapolated, since
//! future deposits are exactly what the optimizer is asked to recommend.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::StateError;
use crate::models::RecordField;
use crate::state::FinancialState;

/// A value object distinct from the live [`FinancialState`]; producing one
/// never mutates the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectedState {
    pub months_elapsed: u32,
    pub months_remaining: u32,
    /// Income extrapolated to year end.
    pub annual_income: Decimal,
    /// Expenses extrapolated to year end.
    pub annual_expenses: Decimal,
    /// Pension deposits actually made so far.
    pub pension_deposited: Decimal,
    /// Study-fund deposits actually made so far.
    pub study_deposited: Decimal,
}

impl ProjectedState {
    /// Projected annual income net of expenses: the base for both the
    /// income-tax liability and the deduction limits. May be negative when
    /// expenses outpace income.
    pub fn net_income(&self) -> Decimal {
        self.annual_income - self.annual_expenses
    }
}

/// Extrapolates `state` across the rest of the year.
///
/// `projected = ytd + (ytd / months_elapsed) × months_remaining` for income
/// and expenses.
///
/// # Errors
///
/// Returns [`StateError::NoElapsedMonths`] when `months_elapsed` is zero; a
/// linear projection needs at least one month of signal, and the caller is
/// expected to surface the insufficient-data condition rather than receive a
/// division-by-zero artifact.
pub fn project(
    state: &FinancialState,
    months_elapsed: u32,
    months_remaining: u32,
) -> Result<ProjectedState, StateError> {
    if months_elapsed == 0 {
        return Err(StateError::NoElapsedMonths);
    }

    let extend = |ytd: Decimal| -> Decimal {
        ytd + ytd / Decimal::from(months_elapsed) * Decimal::from(months_remaining)
    };

    Ok(ProjectedState {
        months_elapsed,
        months_remaining,
        annual_income: extend(state.year_to_date(RecordField::Income)),
        annual_expenses: extend(state.year_to_date(RecordField::Expenses)),
        pension_deposited: state.year_to_date(RecordField::Pension),
        study_deposited: state.year_to_date(RecordField::Study),
    })
}
