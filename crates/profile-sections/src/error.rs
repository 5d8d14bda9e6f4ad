//! Error types for section operations.

use crate::store::Phase;
use profile_http::ApiError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SectionError>;

#[derive(Error, Debug)]
#[non_exhaustive]
pub enum SectionError {
    #[error("cannot {op} while {phase}")]
    InvalidTransition { op: &'static str, phase: Phase },

    #[error("section is locked for this viewer")]
    Locked,

    #[error("section is read-only for this viewer")]
    ReadOnly,

    #[error("a request for this section is still in flight")]
    Busy,

    #[error("no item at index {0}")]
    NoSuchItem(usize),

    #[error("payload names record {found} but the edited row is {expected:?}")]
    IdentityMismatch { expected: Option<i64>, found: i64 },

    #[error("remote error: {0}")]
    Remote(#[from] ApiError),
}

impl SectionError {
    /// Whether the error came back from the server rather than from a
    /// rejected transition.
    #[inline]
    #[must_use]
    pub fn is_remote(&self) -> bool {
        matches!(self, SectionError::Remote(_))
    }
}
