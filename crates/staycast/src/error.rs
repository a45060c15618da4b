use thiserror::Error;

use crate::narrative::MAX_STAY_DAYS;

/// Input validation failures raised by the narrative and predictor layers.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum StayError {
    #[error("invalid severity of illness '{0}': expected one of Mild, Moderate, Severe")]
    InvalidSeverity(String),
    #[error("length of stay {0} is outside 1..={max}", max = MAX_STAY_DAYS)]
    DaysOutOfRange(i64),
    #[error("model produced a non-finite length of stay estimate ({0})")]
    NonFiniteEstimate(f32),
}
