//! Pixgate Records Library
//!
//! Durable per-image status records, keyed by `image_id`. The `RecordStore`
//! trait is the narrow contract the pipeline needs; an in-memory backend
//! serves tests and local development, and a Postgres backend is gated
//! behind `records-postgres`.

pub mod memory;
#[cfg(feature = "records-postgres")]
pub mod postgres;
pub mod traits;

// Re-export commonly used types
pub use memory::MemoryRecordStore;
#[cfg(feature = "records-postgres")]
pub use postgres::PgRecordStore;
pub use traits::{RecordError, RecordResult, RecordStore};
