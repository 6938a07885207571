//! Error types for seed field queries.

use thiserror::Error;

/// Errors raised by [`SeedField`](crate::seed_field::SeedField) index-based operations.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldError {
    /// The requested seed index does not exist (yet).
    #[error("seed index {index} out of range (field holds {count} seeds)")]
    IndexOutOfRange { index: usize, count: usize },
}
