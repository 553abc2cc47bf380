//! Error types for the orrery engine.

use thiserror::Error;

/// Result type for fallible engine operations.
pub type OrreryResult<T> = Result<T, OrreryError>;

/// Everything that can go wrong in the engine.
///
/// None of these are fatal to a running session: construction errors
/// exclude the offending body, runtime errors leave state untouched.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OrreryError {
    #[error("invalid speed multiplier: {0} (must be finite and positive)")]
    InvalidSpeed(f64),

    #[error("invalid body `{name}`: {reason}")]
    InvalidBody { name: String, reason: String },

    #[error("duplicate body name: {0}")]
    DuplicateName(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to parse definition: {0}")]
    Parse(String),
}

impl OrreryError {
    pub(crate) fn invalid_body(name: &str, reason: impl Into<String>) -> Self {
        Self::InvalidBody {
            name: name.to_owned(),
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for OrreryError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_body() {
        let err = OrreryError::invalid_body("Vulcan", "radius must be positive");
        assert_eq!(err.to_string(), "invalid body `Vulcan`: radius must be positive");
    }

    #[test]
    fn json_errors_become_parse_errors() {
        let err: OrreryError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(matches!(err, OrreryError::Parse(_)));
    }
}
