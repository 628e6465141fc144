use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The four financial fields tracked per month.
///
/// A closed enumeration: every update names one of these variants, so a
/// mistyped key can never become a silent no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordField {
    Income,
    Expenses,
    Pension,
    Study,
}

impl RecordField {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expenses => "expenses",
            Self::Pension => "pension",
            Self::Study => "study",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "income" => Some(Self::Income),
            "expenses" => Some(Self::Expenses),
            "pension" => Some(Self::Pension),
            "study" => Some(Self::Study),
            _ => None,
        }
    }
}

/// One calendar month of recorded activity. All amounts are non-negative;
/// the owning state enforces that at the update boundary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyRecord {
    pub income: Decimal,
    pub expenses: Decimal,
    pub pension: Decimal,
    pub study: Decimal,
}

impl MonthlyRecord {
    pub fn get(&self, field: RecordField) -> Decimal {
        match field {
            RecordField::Income => self.income,
            RecordField::Expenses => self.expenses,
            RecordField::Pension => self.pension,
            RecordField::Study => self.study,
        }
    }

    pub(crate) fn get_mut(&mut self, field: RecordField) -> &mut Decimal {
        match field {
            RecordField::Income => &mut self.income,
            RecordField::Expenses => &mut self.expenses,
            RecordField::Pension => &mut self.pension,
            RecordField::Study => &mut self.study,
        }
    }

    /// Income net of expenses for this month.
    pub fn net_income(&self) -> Decimal {
        self.income - self.expenses
    }
}
