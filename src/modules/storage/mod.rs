//! Storage module for poster files
//!
//! Provides a local-directory file store for uploads and downloads.

mod local_store;

pub use local_store::LocalFileStore;
