//! Store-level error types.

use thiserror::Error;

/// Errors surfaced by a post store implementation.
///
/// Not-found conditions are not errors: lookups for unknown ids yield
/// `Ok(None)` (or a zero delete count) so callers can distinguish
/// "nothing matched" from an actual failure.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Store connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),
}
