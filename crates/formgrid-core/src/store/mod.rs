//! Persistence abstraction for stored fields.

mod file;
mod memory;

pub use file::FileFieldStore;
pub use memory::MemoryFieldStore;

use crate::field::Field;
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// Store errors.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Field not found: {0}")]
    NotFound(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("IO error: {0}")]
    Io(String),
    #[error("Store error: {0}")]
    Other(String),
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Boxed future for async operations.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Trait for field persistence backends.
///
/// Implementations can keep fields in memory, on disk, or behind a remote
/// API; the builder controller only sees this contract. Batch semantics:
/// `create_fields` inserts a whole form in one call, `update_field` and
/// `delete_field` act on a single stored field identified by its id.
pub trait FieldStore: Send + Sync {
    /// List all fields of a collection.
    fn list_fields(&self, cat_id: i64) -> BoxFuture<'_, StoreResult<Vec<Field>>>;

    /// Create a batch of fields in a collection, assigning ids.
    fn create_fields(&self, cat_id: i64, fields: &[Field]) -> BoxFuture<'_, StoreResult<()>>;

    /// Update a single stored field.
    fn update_field(&self, field: &Field) -> BoxFuture<'_, StoreResult<()>>;

    /// Delete a single stored field, identified by its id.
    fn delete_field(&self, field: &Field) -> BoxFuture<'_, StoreResult<()>>;
}
