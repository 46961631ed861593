//! Error handling
//!
//! One small taxonomy covers everything that can go wrong at the hook
//! boundary. A missing context provider is a structural usage mistake and
//! fails loudly at setup time; navigation-source failures pass through the
//! navigate hook unchanged. Path resolution itself is total and has no error
//! path at all.

use crate::context::ContextKey;
use std::fmt;

/// Errors surfaced by hooks, providers, and navigation sources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouterError {
    /// A hook was invoked in a scope with no ancestor publishing the
    /// required context key.
    MissingContext { key: ContextKey },

    /// A location snapshot could not be built from a URL string.
    InvalidLocation { message: String },

    /// A navigation source rejected or failed a transition.
    NavigationFailed { message: String },
}

impl fmt::Display for RouterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouterError::MissingContext { key } => {
                write!(f, "no {} provider found in scope", key)
            }
            RouterError::InvalidLocation { message } => {
                write!(f, "invalid location: {}", message)
            }
            RouterError::NavigationFailed { message } => {
                write!(f, "navigation failed: {}", message)
            }
        }
    }
}

impl std::error::Error for RouterError {}

/// Convenience alias used across the crate.
pub type RouterResult<T> = Result<T, RouterError>;
