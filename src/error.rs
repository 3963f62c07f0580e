//! Construction-time failures.
//!
//! Matching itself never fails: an input that cannot be matched simply
//! yields an empty token stream, `None` from a single-match accessor, or
//! `false` from a boolean accessor. The only caller-facing failures in this
//! crate happen while a [`crate::Pattern`] is being *built* (or driven in a
//! direction a particular combinator does not support).

use std::fmt;

/// A pattern could not be constructed, or was driven in an unsupported
/// direction.
///
/// This type intentionally stays small and is written by hand rather than
/// derived, since the set of failure modes here is short and unlikely to
/// grow much.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// A combinator was asked to build a pattern from nonsensical
    /// arguments, e.g. a repetition with `max < min`, or a
    /// [`crate::try_recursive`] generator that reported failure.
    InvalidPatternArgument {
        /// A short, human-readable explanation.
        detail: &'static str,
    },
    /// A pattern containing a forward-only combinator (currently only
    /// [`crate::Pattern::then_with_selector`]) was driven backward.
    UnsupportedDirection {
        /// A short, human-readable explanation.
        detail: &'static str,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidPatternArgument { detail } => {
                write!(f, "invalid pattern argument: {detail}")
            }
            Error::UnsupportedDirection { detail } => {
                write!(f, "unsupported match direction: {detail}")
            }
        }
    }
}

impl std::error::Error for Error {}

pub(crate) fn invalid(detail: &'static str) -> Error {
    Error::InvalidPatternArgument { detail }
}

pub(crate) fn unsupported_direction(detail: &'static str) -> Error {
    Error::UnsupportedDirection { detail }
}
