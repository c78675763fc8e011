use std::fmt::Debug;
use thiserror::Error;

/// Enum with all errors in this crate.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QuadTreeError {
    /// The point lies outside the root region of the tree and was not inserted.
    #[error("Point ({x}, {y}) lies outside the bounds of the tree")]
    OutOfBounds {
        /// x coordinate of the rejected point
        x: f64,
        /// y coordinate of the rejected point
        y: f64,
    },

    /// A point inside a node could not be routed to any of its children.
    #[error("Internal inconsistency: {0}")]
    InternalInconsistency(String),

    /// An argument passed to a constructor or query was not valid.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

pub type Result<T> = std::result::Result<T, QuadTreeError>;
