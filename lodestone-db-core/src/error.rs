//! Error types for lodestone-db-core
//!
//! Deliberately small: the ordering core is pure and infallible by design.
//! Malformed wire data (an unparseable timestamp, invalid base64, an
//! unrecognized variant reaching the comparator) is an upstream contract
//! violation and panics rather than surfacing here; see the crate docs.

use thiserror::Error;

/// Result type alias using our Error
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type
#[derive(Error, Debug)]
pub enum Error {
    /// Wire JSON (de)serialization error
    #[error("wire JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
