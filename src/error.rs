use thiserror::Error;

/// Crate specific Errors implementation.
#[derive(Debug, Error, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DateExprError {
    /// Timezone specifier is neither `UTC`, a region id nor a `±hhmm` offset.
    #[error("invalid timezone: {0}")]
    InvalidTimezone(String),
    /// Input text does not match the expression's template.
    #[error("input does not match template: {0}")]
    UnparseableInput(String),
    /// Timezone extraction was requested against a template without `%z`.
    #[error("template contains no timezone specifier: {0}")]
    NoTimezoneInTemplate(String),
    /// Series generation was requested against a template without any
    /// granularity-bearing specifier.
    #[error("template contains no granularity-bearing specifier: {0}")]
    NoGranularity(String),
    /// Epoch value is outside the representable date/time range.
    #[error("instant is out of the representable range: {0}")]
    OutOfRangeInstant(i64),
}
