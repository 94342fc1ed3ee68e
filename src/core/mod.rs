//! Core types and traits: the entry model, coercion, errors and the store seam

pub mod coerce;
pub mod entry;
pub mod error;
pub mod service;

pub use entry::{
    DeleteSummary, Entry, EntryField, EntryId, EntryPatch, FieldKind, FieldValue, ParseEntryIdError,
};
pub use error::{CoercionError, EntryError, Operation};
pub use service::EntryService;
