//! Failure reporting for the partial operators.
//!
//! `compose` and `transform` are partial functions. When a pair of operations
//! lies outside an operator's domain the operator returns one of these
//! variants instead of a value. Neither variant says anything about the
//! operations themselves being the identity; that is a separate fact carried
//! by the operation values.

use thiserror::Error;

/// The two ways a document operator can be undefined.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error)]
pub enum Error {
    /// `compose(a, b)` has no result: `b` does not apply to the state `a`
    /// produces (a GWW chain mismatch, a sequence index collision with a
    /// different payload, a failing record key).
    #[error("operations are not composable")]
    Incomposable,

    /// `transform(a, b)` has no result: `a` and `b` do not share a base state
    /// (a GWW origin mismatch, two deletes of different elements at one index,
    /// a failing record key).
    #[error("operations are not transformable")]
    Untransformable,
}

/// Result type used by every partial operator in this crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;
