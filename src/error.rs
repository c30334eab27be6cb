// Copyright 2025 Lars Brubaker
// License: SGI Free Software License B (MIT-compatible)
//
// Error type shared by every fallible operation in the crate.

use thiserror::Error;

/// Result type for area operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building, combining or querying areas.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// The segment stream did not begin with a move-to.
    #[error("missing initial move-to in path definition")]
    MissingMoveTo,

    /// A transform with a (numerically) zero determinant was inverted.
    #[error("transform is not invertible (determinant = {det})")]
    NonInvertible { det: f64 },

    /// A non-finite coordinate was found while strict validation was enabled.
    #[error("invalid coordinate ({x}, {y}) in path segment")]
    InvalidCoordinate { x: f64, y: f64 },

    /// Flatness must be a non-negative number.
    #[error("flatness must be >= 0, got {0}")]
    InvalidFlatness(f64),

    /// The sweep or the chain stitching reached a state that well-formed,
    /// monotonic input can never produce.
    #[error("internal invariant violated: {0}")]
    Invariant(String),
}

impl Error {
    pub(crate) fn invariant(msg: impl Into<String>) -> Self {
        let msg = msg.into();
        tracing::error!(%msg, "area invariant violated");
        Error::Invariant(msg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_problem() {
        assert_eq!(
            Error::MissingMoveTo.to_string(),
            "missing initial move-to in path definition"
        );
        assert!(Error::NonInvertible { det: 0.0 }
            .to_string()
            .contains("not invertible"));
        assert!(Error::invariant("odd number of chains")
            .to_string()
            .ends_with("odd number of chains"));
    }
}
