use thiserror::Error;

/// A facelet string that cannot describe a cube reachable from solved. These
/// are detected before any search begins.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("There is not exactly one facelet of each colour")]
    FaceletCount,
    #[error("Not all 12 edges exist exactly once")]
    MissingEdge,
    #[error("Flip error: One edge has to be flipped")]
    EdgeFlip,
    #[error("Not all corners exist exactly once")]
    MissingCorner,
    #[error("Twist error: One corner has to be twisted")]
    CornerTwist,
    #[error("Parity error: Two corners or two edges have to be exchanged")]
    Parity,
}

/// A bounded search that ran out of budget. Callers may retry with a larger
/// depth or time limit.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExhaustionError {
    #[error("No solution exists for the given maxDepth")]
    DepthExhausted,
    #[error("Timeout, no solution within given time")]
    Timeout,
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Exhaustion(#[from] ExhaustionError),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NotationError {
    #[error("Empty move token")]
    Empty,
    #[error("Unknown face `{0}`")]
    UnknownFace(char),
    #[error("Unknown move suffix `{suffix}` in `{token}`")]
    UnknownSuffix { token: String, suffix: String },
}

impl ValidationError {
    /// The stable tag collaborators match on.
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            ValidationError::FaceletCount => "Error1",
            ValidationError::MissingEdge => "Error2",
            ValidationError::EdgeFlip => "Error3",
            ValidationError::MissingCorner => "Error4",
            ValidationError::CornerTwist => "Error5",
            ValidationError::Parity => "Error6",
        }
    }
}

impl ExhaustionError {
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            ExhaustionError::DepthExhausted => "Error7",
            ExhaustionError::Timeout => "Error8",
        }
    }
}

impl SolveError {
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            SolveError::Validation(e) => e.code(),
            SolveError::Exhaustion(e) => e.code(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_distinct_and_ordered() {
        let codes = [
            SolveError::from(ValidationError::FaceletCount),
            ValidationError::MissingEdge.into(),
            ValidationError::EdgeFlip.into(),
            ValidationError::MissingCorner.into(),
            ValidationError::CornerTwist.into(),
            ValidationError::Parity.into(),
            ExhaustionError::DepthExhausted.into(),
            ExhaustionError::Timeout.into(),
        ]
        .map(SolveError::code);

        for (i, code) in codes.iter().enumerate() {
            assert_eq!(*code, format!("Error{}", i + 1));
        }
    }

    #[test]
    fn test_messages_pass_through() {
        assert_eq!(
            SolveError::from(ExhaustionError::Timeout).to_string(),
            "Timeout, no solution within given time"
        );
    }
}
