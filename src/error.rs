use thiserror::Error;

/// Infrastructure failure talking to the backing store.
///
/// This covers connection acquisition, statement execution, and row decoding.
/// An absent row is never a `StoreError`; lookups report absence as
/// `Option::None` and deletes report it through the affected-row count.
#[derive(Debug, Error)]
#[error("store error: {0}")]
pub struct StoreError(#[from] pub sqlx::Error);

pub type Result<T> = std::result::Result<T, StoreError>;
