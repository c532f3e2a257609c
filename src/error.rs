//! Errors for the hard-fail fields and profile compilation

use thiserror::Error;

/// Failure of a hard-fail field (`id`, `title`) or of profile setup.
///
/// Cloneable so a cached structured-record failure can be handed out again
/// on every call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    #[error("no element matches `{0}`")]
    MissingNode(String),

    #[error("element `{selector}` has no `{attr}` attribute")]
    MissingAttribute { selector: String, attr: String },

    #[error("`{0}` is not an integer")]
    InvalidInteger(String),

    #[error("structured record is not valid JSON: {0}")]
    MalformedRecord(String),

    #[error("structured record has no `{0}` key")]
    MissingKey(String),

    #[error("structured record key `{key}` is not a {expected}")]
    UnexpectedType { key: String, expected: &'static str },

    #[error("invalid CSS selector `{0}`")]
    InvalidSelector(String),

    #[error("invalid pattern `{pattern}`: {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("invalid site profile: {0}")]
    InvalidProfile(String),
}
