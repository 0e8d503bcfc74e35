//! Error types for the integration engine and the dynamics models

use thiserror::Error;

/// Main error type for simulation operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    /// A matrix handed to the guarded inversion is numerically singular
    #[error("singular matrix (determinant {determinant:e})")]
    SingularMatrix { determinant: f64 },

    /// The attitude quaternion has zero norm and cannot be rescaled
    #[error("quaternion has zero norm, renormalization skipped")]
    DegenerateRenormalization,

    /// A non-finite value reached the integration boundary.
    /// `index` is `None` when the offending value is an interval bound.
    #[error("non-finite input {value} at {}", describe_index(.index))]
    InvalidState { index: Option<usize>, value: f64 },

    /// `integrate` was asked for zero steps
    #[error("step count must be positive")]
    InvalidStepCount,

    /// Parameter validation failed while building a model
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

fn describe_index(index: &Option<usize>) -> String {
    match index {
        Some(i) => format!("state[{i}]"),
        None => "interval bound".to_string(),
    }
}

/// Result type for simulation operations
pub type Result<T> = std::result::Result<T, SimError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offender() {
        let e = SimError::InvalidState { index: Some(4), value: f64::NAN };
        assert_eq!(e.to_string(), "non-finite input NaN at state[4]");

        let e = SimError::InvalidState { index: None, value: f64::INFINITY };
        assert_eq!(e.to_string(), "non-finite input inf at interval bound");
    }
}
