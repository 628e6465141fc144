//! The mutable year-to-date ledger for one tax year.
//!
//! [`FinancialState`] owns every [`MonthlyRecord`] of its year; totals are
//! derived on demand so they can never drift from the month data. The state
//! holds no I/O: it serializes via `serde` and is handed whole to whatever
//! persistence collaborator the surrounding application uses.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use osek_core::{FinancialState, RecordField};
//!
//! let mut state = FinancialState::new(2025);
//! state.record(3, RecordField::Income, dec!(15000)).unwrap();
//! state.record(3, RecordField::Income, dec!(5000)).unwrap();
//!
//! // Updates accumulate rather than overwrite.
//! assert_eq!(state.year_to_date(RecordField::Income), dec!(20000));
//! ```

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::models::{MonthlyRecord, RecordField};

/// One month's state as handed out by [`FinancialState::snapshot`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthSnapshot {
    pub month: u32,
    pub record: MonthlyRecord,
}

/// A closed-out year produced by [`FinancialState::roll_over`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearArchive {
    pub tax_year: i32,
    pub months: BTreeMap<u32, MonthlyRecord>,
    pub closed_at: DateTime<Utc>,
}

/// The year ledger. Months are created lazily on first update and never
/// deleted within the year; the year ends by rolling over into an archive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinancialState {
    tax_year: i32,
    months: BTreeMap<u32, MonthlyRecord>,
}

impl FinancialState {
    pub fn new(tax_year: i32) -> Self {
        Self {
            tax_year,
            months: BTreeMap::new(),
        }
    }

    pub fn tax_year(&self) -> i32 {
        self.tax_year
    }

    /// Adds `amount` to the month's existing value for `field`.
    ///
    /// Deposit-style updates accumulate; use [`set`](Self::set) when a
    /// command means "replace". Invalid input is rejected, never coerced.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] if `amount` is negative or `month` is
    /// outside `1..=12`.
    pub fn record(
        &mut self,
        month: u32,
        field: RecordField,
        amount: Decimal,
    ) -> Result<(), ValidationError> {
        Self::check(month, amount)?;
        *self.months.entry(month).or_default().get_mut(field) += amount;
        Ok(())
    }

    /// Replaces the month's value for `field`.
    ///
    /// # Errors
    ///
    /// Same validation as [`record`](Self::record).
    pub fn set(
        &mut self,
        month: u32,
        field: RecordField,
        amount: Decimal,
    ) -> Result<(), ValidationError> {
        Self::check(month, amount)?;
        *self.months.entry(month).or_default().get_mut(field) = amount;
        Ok(())
    }

    fn check(month: u32, amount: Decimal) -> Result<(), ValidationError> {
        if !(1..=12).contains(&month) {
            return Err(ValidationError::MonthOutOfRange(month));
        }
        if amount < Decimal::ZERO {
            return Err(ValidationError::NegativeAmount(amount));
        }
        Ok(())
    }

    /// Sum of `field` across every recorded month.
    pub fn year_to_date(&self, field: RecordField) -> Decimal {
        self.months.values().map(|r| r.get(field)).sum()
    }

    /// Income less expenses, year to date. May be negative.
    pub fn net_income_ytd(&self) -> Decimal {
        self.year_to_date(RecordField::Income) - self.year_to_date(RecordField::Expenses)
    }

    /// Number of months holding at least one recorded value.
    pub fn months_recorded(&self) -> u32 {
        self.months.len() as u32
    }

    /// Latest calendar month with recorded data, if any.
    pub fn latest_month(&self) -> Option<u32> {
        self.months.keys().next_back().copied()
    }

    /// Read-only view of the months in calendar order.
    ///
    /// Returns owned copies, so callers cannot reach back into the live
    /// state, and two snapshots without an intervening update are equal.
    pub fn snapshot(&self) -> Vec<MonthSnapshot> {
        self.months
            .iter()
            .map(|(&month, record)| MonthSnapshot {
                month,
                record: record.clone(),
            })
            .collect()
    }

    /// Archives the current year's months and resets the ledger for
    /// `next_year`.
    pub fn roll_over(&mut self, next_year: i32) -> YearArchive {
        let months = std::mem::take(&mut self.months);
        let archive = YearArchive {
            tax_year: self.tax_year,
            months,
            closed_at: Utc::now(),
        };
        self.tax_year = next_year;
        archive
    }
}
