//! Storage abstraction for persistence.
//!
//! A stored document is the list of serialized shapes, keyed by a document
//! name.

mod memory;

#[cfg(not(target_arch = "wasm32"))]
mod file;

pub use memory::MemoryStorage;

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStorage;

use crate::shapes::ShapeDto;
use thiserror::Error;

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Document not found: {0}")]
    NotFound(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("IO error: {0}")]
    Io(String),
    #[error("Storage error: {0}")]
    Other(String),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for document storage backends.
pub trait Storage: Send + Sync {
    /// Save a document.
    fn save(&self, name: &str, shapes: &[ShapeDto]) -> StorageResult<()>;

    /// Load a document.
    fn load(&self, name: &str) -> StorageResult<Vec<ShapeDto>>;

    /// Delete a document. Deleting a missing document is not an error.
    fn delete(&self, name: &str) -> StorageResult<()>;

    /// List all document names, sorted.
    fn list(&self) -> StorageResult<Vec<String>>;

    /// Check if a document exists.
    fn exists(&self, name: &str) -> StorageResult<bool>;
}
