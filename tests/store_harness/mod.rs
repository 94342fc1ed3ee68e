//! Shared test harness for entry store backends
//!
//! Provides entry builders and two macros: `entry_store_tests!`, which
//! generates a conformance suite for any `EntryService` implementation, and
//! `entry_rest_tests!`, which runs the HTTP routes on top of it.
//!
//! # Usage
//!
//! From any integration test file in `tests/`:
//! ```rust,ignore
//! #[macro_use]
//! mod store_harness;
//! use store_harness::*;
//!
//! entry_store_tests!(InMemoryEntryStore::new());
//! entry_rest_tests!(InMemoryEntryStore::new());
//! ```

#![allow(dead_code)]

#[macro_use]
pub mod entry_store_tests;

use entry_ledger::core::{Entry, EntryField, EntryPatch, FieldValue};

/// Text assignment for a patch
pub fn text(value: &str) -> FieldValue {
    FieldValue::Text(Some(value.to_string()))
}

/// An entry with a fresh id and the given date
pub fn entry_on(date: &str) -> Entry {
    let mut patch = EntryPatch::new();
    patch.set(EntryField::Date, text(date));
    Entry::from_patch(&patch)
}

/// A fully populated entry, as a create request would produce
pub fn sample_entry(driver: &str, date: &str) -> Entry {
    let mut patch = EntryPatch::new();
    patch
        .set(EntryField::DriverName, text(driver))
        .set(EntryField::VehicleNumber, text("MH12AB1234"))
        .set(EntryField::Date, text(date))
        .set(EntryField::Present, FieldValue::Flag(true))
        .set(EntryField::Advance, FieldValue::Number(500.0))
        .set(EntryField::CngCost, FieldValue::Number(320.5))
        .set(EntryField::DriverSalary, FieldValue::Number(900.0))
        .set(EntryField::ShiftTo, text("Pune"))
        .set(EntryField::BillTo, text("Acme Logistics"))
        .set(EntryField::PartyRate, FieldValue::Number(4200.0))
        .set(EntryField::GstPercent, FieldValue::Number(18.0))
        .set(EntryField::VehicleRate, FieldValue::Number(3600.0))
        .set(EntryField::Remark, text("night shift"));
    Entry::from_patch(&patch)
}
