//! Error types for the calculation engine and the calculator service.
//!
//! The engine itself can only fail on caller input: every failure is a
//! `ValidationError` naming the offending field so a form can highlight it.
//! The service adds configuration failures on top.

/// Why an input was rejected. Closed set, serialized in snake_case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, thiserror::Error)]
#[serde(rename_all = "snake_case")]
pub enum Reason {
    #[error("value is not a finite number")]
    NonFinite,

    #[error("stake must not be negative")]
    NegativeStake,

    #[error("stake must be positive")]
    NonPositiveStake,

    #[error("odd must be unset (0) or greater than 1")]
    OddOutOfRange,

    #[error("odd must be set and greater than 1")]
    OddRequired,

    #[error("commission must be at least 0% and below 100%")]
    CommissionOutOfRange,

    #[error("lay odd must exceed the commission rate")]
    NonPositiveLayDenominator,

    #[error("at least two complete legs are required")]
    InsufficientLegs,

    #[error("index is out of range")]
    IndexOutOfRange,

    #[error("implied probabilities of the other legs reach 100%")]
    OverroundedBook,

    #[error("length does not match the number of legs")]
    LengthMismatch,

    #[error("too many items")]
    TooMany,

    #[error("request could not be parsed")]
    Malformed,
}

/// A structured rejection: which field, and why.
#[derive(Debug, Clone, PartialEq, serde::Serialize, thiserror::Error)]
#[error("{field}: {reason}")]
pub struct ValidationError {
    /// Path of the offending input, e.g. `legs[1].entries[0].odd`.
    pub field: String,
    pub reason: Reason,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, reason: Reason) -> Self {
        Self {
            field: field.into(),
            reason,
        }
    }
}

/// Service-level errors.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("config error: {0}")]
    Config(String),

    #[error("invalid input: {0}")]
    Validation(#[from] ValidationError),
}

pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_field_and_reason() {
        let err = ValidationError::new("legs[0].entries[1].odd", Reason::OddOutOfRange);
        assert_eq!(
            err.to_string(),
            "legs[0].entries[1].odd: odd must be unset (0) or greater than 1"
        );
    }

    #[test]
    fn test_reason_serializes_snake_case() {
        let err = ValidationError::new("commission_pct", Reason::CommissionOutOfRange);
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["field"], "commission_pct");
        assert_eq!(json["reason"], "commission_out_of_range");
    }

    #[test]
    fn test_validation_converts_into_engine_error() {
        let err: EngineError = ValidationError::new("legs", Reason::InsufficientLegs).into();
        assert!(matches!(err, EngineError::Validation(_)));
        assert!(err.to_string().contains("at least two complete legs"));
    }
}
