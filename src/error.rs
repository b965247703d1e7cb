//! Domain errors for the aquarium store.
//!
//! These are precondition violations rather than retryable failures: every
//! core operation is a local, synchronous computation on in-memory state.

use thiserror::Error;

/// Errors raised when a store operation would break one of its invariants.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Error {
    #[error("filter medium id '{0}' appears more than once")]
    DuplicateFilterMedium(String),

    #[error("filter medium '{0}' must have a change interval of at least one day")]
    ZeroChangeInterval(String),

    #[error("no filter medium with id '{0}'")]
    UnknownFilterMedium(String),

    #[error("filter media can only be changed while editing")]
    NotEditing,

    #[error("no catalog entry with id '{0}'")]
    UnknownCatalogMedium(String),

    #[error("unknown parameter '{0}' (expected temperature, ph, ammonia, nitrite or nitrate)")]
    UnknownParameter(String),

    #[error("reading at {got} ms is older than the latest reading at {previous} ms")]
    OutOfOrderReading { previous: i64, got: i64 },

    #[error("no reading has been recorded yet")]
    EmptyHistory,
}

/// Convenience alias used throughout the data layer.
pub type Result<T> = std::result::Result<T, Error>;
