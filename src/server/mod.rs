//! HTTP server for the entry gateway
//!
//! This module provides a `ServerBuilder` that wires the entry routes, the
//! utility routes and the tower layers around an `EntryService`.

pub mod builder;
pub mod handlers;
pub mod router;

pub use builder::ServerBuilder;
pub use handlers::AppState;
