pub mod calculations;
pub mod error;
pub mod models;
pub mod planner;
pub mod state;

pub use calculations::{DeductionOptimizer, ProjectedState, TaxCalculator, project};
pub use error::{ConfigurationError, StateError, ValidationError};
pub use models::*;
pub use planner::TaxYearPlanner;
pub use state::{FinancialState, MonthSnapshot, YearArchive};
