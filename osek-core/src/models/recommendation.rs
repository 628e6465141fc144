use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How the optimizer spreads remaining headroom across the year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecommendationMode {
    /// Spread each category's headroom evenly across the remaining months.
    Monthly,
    /// Deposit the whole headroom at once (the December top-up).
    LumpSum,
}

/// Advice for a single contribution category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryAdvice {
    /// Deductible capacity still open before the statutory cap.
    pub headroom: Decimal,
    /// Deposit suggested now: per month in monthly mode, the full headroom
    /// in lump-sum mode.
    pub suggested_deposit: Decimal,
    /// Headroom left once one suggested deposit lands.
    pub headroom_after: Decimal,
}

/// The optimizer's advisory output. Immutable once produced and never
/// written back into the financial state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    /// Mode actually applied. A monthly request collapses to lump-sum when
    /// no months remain in the year.
    pub mode: RecommendationMode,
    pub pension: CategoryAdvice,
    pub study: CategoryAdvice,
    /// Income tax avoided by consuming the full headroom in both categories.
    pub projected_tax_saved: Decimal,
}
