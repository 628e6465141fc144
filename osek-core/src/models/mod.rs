mod bracket_schedule;
mod contribution_limits;
mod liability;
mod monthly_record;
mod recommendation;
mod tax_bracket;
mod tax_year_config;

pub use bracket_schedule::BracketSchedule;
pub use contribution_limits::ContributionLimits;
pub use liability::Liability;
pub use monthly_record::{MonthlyRecord, RecordField};
pub use recommendation::{CategoryAdvice, Recommendation, RecommendationMode};
pub use tax_bracket::TaxBracket;
pub use tax_year_config::{Surtax, TaxYearConfig};
