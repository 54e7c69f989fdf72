//! Storage abstraction for flowdoc graph documents.
//!
//! Provides the [`DocumentStore`] trait defining the storage contract that
//! all backends implement, plus [`InMemoryStore`] and [`SqliteStore`] as
//! first-class backends.
//!
//! # Architecture
//!
//! Each namespace key maps to exactly one JSON document; a save is a full
//! read-modify-write of that value. Backends are fully swappable behind the
//! trait without changing adapter logic.
//!
//! # Modules
//!
//! - [`error`]: StorageError enum with all failure modes
//! - [`traits`]: DocumentStore trait definition
//! - [`memory`]: InMemoryStore implementation
//! - [`schema`]: SQL schema constants and migration setup
//! - [`sqlite`]: SqliteStore implementation

pub mod error;
pub mod memory;
pub mod schema;
pub mod sqlite;
pub mod traits;

// Re-export key types for ergonomic use.
pub use error::StorageError;
pub use memory::InMemoryStore;
pub use sqlite::SqliteStore;
pub use traits::DocumentStore;
