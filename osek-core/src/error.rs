//! Error taxonomy for the planning engine.
//!
//! Three families cover every failure the core can produce: invalid input to
//! a financial update ([`ValidationError`]), malformed configuration caught
//! at load time ([`ConfigurationError`]), and requests the current state
//! cannot support ([`StateError`]). All of them surface to the caller
//! unmodified; the core never clamps or coerces a bad value, since a
//! silently absorbed data-entry mistake has financial consequences.

use rust_decimal::Decimal;
use thiserror::Error;

/// Invalid input to a financial update.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A monetary amount was negative.
    #[error("amount must be non-negative, got {0}")]
    NegativeAmount(Decimal),

    /// The month does not fall inside the active tax year.
    #[error("month must be between 1 and 12, got {0}")]
    MonthOutOfRange(u32),
}

/// Malformed bracket schedule or year constants, detected when the
/// configuration is assembled.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigurationError {
    /// A schedule must contain at least one bracket.
    #[error("bracket schedule is empty")]
    EmptySchedule,

    /// The first bracket must start at zero income.
    #[error("first bracket must start at zero, got {0}")]
    FirstBracketNotZero(Decimal),

    /// A bounded bracket whose upper bound does not exceed its lower bound.
    #[error("bracket starting at {0} covers no income")]
    EmptyBracket(Decimal),

    /// Adjacent brackets leave a gap or overlap.
    #[error("bracket starts at {found}, expected {expected}")]
    Discontinuity { expected: Decimal, found: Decimal },

    /// Marginal rates must not decrease as income rises.
    #[error("bracket rate {next} is lower than preceding rate {prev}")]
    DecreasingRate { prev: Decimal, next: Decimal },

    /// A rate outside `[0, 1]`.
    #[error("rate must be between 0 and 1, got {0}")]
    RateOutOfRange(Decimal),

    /// Only the final bracket may be unbounded.
    #[error("unbounded bracket starting at {0} is not the final bracket")]
    UnboundedInterior(Decimal),

    /// The final bracket must be unbounded so the schedule covers all income.
    #[error("final bracket is bounded; schedules must cover all income")]
    BoundedTail,

    /// A year constant that must not be negative.
    #[error("{name} must be non-negative, got {value}")]
    NegativeConstant { name: &'static str, value: Decimal },
}

/// A projection or recommendation the current state cannot support.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StateError {
    /// Projection requested before any month has elapsed; a linear
    /// extrapolation needs at least one month of signal.
    #[error("cannot project with zero elapsed months")]
    NoElapsedMonths,

    /// Recommendation requested against a year with no recorded data.
    #[error("no months recorded for tax year {0}")]
    EmptyYear(i32),
}
