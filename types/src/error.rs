//! Parse errors for textual identifier forms.

use thiserror::Error;

/// Error returned when parsing an identifier from its hex text form.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseIdError {
    #[error("identifier must be {expected} hex characters, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("identifier contains a non-hex character: {0:?}")]
    InvalidCharacter(char),
}
