//! Storage traits.
//!
//! - [`storage`] - The [`RecordStorage`] trait implemented by every backend

pub mod storage;

pub use storage::RecordStorage;
