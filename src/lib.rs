//! # Entry Ledger
//!
//! A small HTTP gateway for logging driver and vehicle trip entries (date,
//! driver, vehicle, billing amounts) into a document store.
//!
//! ## Features
//!
//! - **Five CRUD routes**: list, create, edit, delete, bulk delete
//! - **Boundary coercion**: numeric fields accept text or numbers, `present`
//!   accepts the attendance word
//! - **Pluggable storage**: in-memory store by default, MongoDB behind the
//!   `mongodb_backend` feature
//! - **Graceful shutdown**: the store connection is closed after in-flight
//!   requests finish
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use entry_ledger::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     ServerBuilder::new()
//!         .with_entry_service(InMemoryEntryStore::new())
//!         .serve("0.0.0.0:5000")
//!         .await
//! }
//! ```

pub mod config;
pub mod core;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        DeleteSummary, Entry, EntryError, EntryField, EntryId, EntryPatch, EntryService,
        FieldValue, Operation,
        coerce::{patch_for_create, patch_for_update},
    };

    // === Storage ===
    pub use crate::storage::InMemoryEntryStore;
    #[cfg(feature = "mongodb_backend")]
    pub use crate::storage::MongoEntryStore;

    // === Config ===
    pub use crate::config::ServerConfig;

    // === Server ===
    pub use crate::server::{AppState, ServerBuilder};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
}
