use thiserror::Error;

/// A column or form field that could not be converted to its expected type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid {field} value '{value}': {reason}")]
pub struct ParseError {
    pub field: &'static str,
    pub value: String,
    pub reason: String,
}

impl ParseError {
    pub fn new(field: &'static str, value: &str, reason: impl Into<String>) -> Self {
        Self {
            field,
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}
