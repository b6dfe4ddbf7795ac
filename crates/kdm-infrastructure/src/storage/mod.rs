//! Storage layer for atomic document files.

mod document_store;

pub use document_store::{DocumentStore, StorageError, write_atomic};
