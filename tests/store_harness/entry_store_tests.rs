//! Macro-generated test suite for `EntryService` contract validation.
//!
//! # Generated Tests
//!
//! ## CRUD
//! - `test_create_and_list`: created entry is listed with all fields
//! - `test_list_empty`: empty store lists nothing
//! - `test_update_partial`: only patched fields change
//! - `test_update_nonexistent`: `None`, store unchanged
//! - `test_update_empty_patch`: returns the current entry
//! - `test_delete_twice`: first returns the entry, second `None`
//! - `test_delete_many_mixed_ids`: unknown ids are ignored
//! - `test_delete_many_empty`: nothing deleted
//!
//! ## Ordering
//! - `test_list_newest_date_first`: "2024-01-02" before "2024-01-01"
//! - `test_list_string_order_not_calendar`: "2024-9-1" before "2024-10-1"
//! - `test_list_undated_last`
//!
//! ## Edge Cases
//! - `test_nan_survives_storage`: not-a-number sentinel persisted as-is
//! - `test_concurrent_creates`: parallel creates from spawned tasks

/// Generate a full `EntryService` conformance test suite.
///
/// `$factory` must evaluate to a fresh, empty store. It is re-evaluated for
/// each test. For the concurrent test the store must also be `Clone + 'static`.
#[macro_export]
macro_rules! entry_store_tests {
    ($factory:expr) => {
        mod entry_store_contract_tests {
            use super::*;
            use entry_ledger::core::{
                DeleteSummary, EntryField, EntryId, EntryPatch, EntryService, FieldValue,
            };

            // ==================================================================
            // CRUD
            // ==================================================================

            #[tokio::test]
            async fn test_create_and_list() {
                let store = $factory;
                let entry = sample_entry("Ravi", "2024-01-01");

                let created = store.create(entry.clone()).await.unwrap();
                assert_eq!(created, entry);

                let listed = store.list().await.unwrap();
                assert_eq!(listed, vec![entry]);
            }

            #[tokio::test]
            async fn test_list_empty() {
                let store = $factory;
                assert!(store.list().await.unwrap().is_empty());
            }

            #[tokio::test]
            async fn test_update_partial() {
                let store = $factory;
                let entry = store
                    .create(sample_entry("Ravi", "2024-01-01"))
                    .await
                    .unwrap();

                let mut patch = EntryPatch::new();
                patch
                    .set(EntryField::Advance, FieldValue::Number(750.0))
                    .set(EntryField::Remark, FieldValue::Text(None))
                    .set(EntryField::Present, FieldValue::Flag(false));

                let updated = store.update(&entry.id, &patch).await.unwrap().unwrap();

                assert_eq!(updated.id, entry.id);
                assert_eq!(updated.advance, Some(750.0));
                assert_eq!(updated.remark, None);
                assert_eq!(updated.present, Some(false));
                assert_eq!(updated.driver_name.as_deref(), Some("Ravi"));
                assert_eq!(updated.cng_cost, Some(320.5));

                let listed = store.list().await.unwrap();
                assert_eq!(listed, vec![updated]);
            }

            #[tokio::test]
            async fn test_update_nonexistent() {
                let store = $factory;
                let kept = store.create(entry_on("2024-01-01")).await.unwrap();

                let mut patch = EntryPatch::new();
                patch.set(EntryField::Date, text("2099-12-31"));

                let result = store.update(&EntryId::new(), &patch).await.unwrap();
                assert!(result.is_none());
                assert_eq!(store.list().await.unwrap(), vec![kept]);
            }

            #[tokio::test]
            async fn test_update_empty_patch() {
                let store = $factory;
                let entry = store
                    .create(sample_entry("Ravi", "2024-01-01"))
                    .await
                    .unwrap();

                let same = store.update(&entry.id, &EntryPatch::new()).await.unwrap();
                assert_eq!(same, Some(entry));

                let missing = store
                    .update(&EntryId::new(), &EntryPatch::new())
                    .await
                    .unwrap();
                assert!(missing.is_none());
            }

            #[tokio::test]
            async fn test_delete_twice() {
                let store = $factory;
                let entry = store
                    .create(sample_entry("Ravi", "2024-01-01"))
                    .await
                    .unwrap();

                let first = store.delete(&entry.id).await.unwrap();
                assert_eq!(first, Some(entry.clone()));

                let second = store.delete(&entry.id).await.unwrap();
                assert!(second.is_none());
                assert!(store.list().await.unwrap().is_empty());
            }

            #[tokio::test]
            async fn test_delete_many_mixed_ids() {
                let store = $factory;
                let gone = store.create(entry_on("2024-01-01")).await.unwrap();
                let kept = store.create(entry_on("2024-01-02")).await.unwrap();

                let summary = store
                    .delete_many(&[gone.id, EntryId::new()])
                    .await
                    .unwrap();

                assert_eq!(summary, DeleteSummary::deleted(1));
                assert_eq!(store.list().await.unwrap(), vec![kept]);
            }

            #[tokio::test]
            async fn test_delete_many_empty() {
                let store = $factory;
                store.create(entry_on("2024-01-01")).await.unwrap();

                let summary = store.delete_many(&[]).await.unwrap();
                assert_eq!(summary.deleted_count, 0);
                assert_eq!(store.list().await.unwrap().len(), 1);
            }

            // ==================================================================
            // Ordering
            // ==================================================================

            #[tokio::test]
            async fn test_list_newest_date_first() {
                let store = $factory;
                let older = store.create(entry_on("2024-01-01")).await.unwrap();
                let newer = store.create(entry_on("2024-01-02")).await.unwrap();

                let listed = store.list().await.unwrap();
                assert_eq!(listed, vec![newer, older]);
            }

            #[tokio::test]
            async fn test_list_string_order_not_calendar() {
                let store = $factory;
                let october = store.create(entry_on("2024-10-1")).await.unwrap();
                let september = store.create(entry_on("2024-9-1")).await.unwrap();

                let listed = store.list().await.unwrap();
                assert_eq!(listed, vec![september, october]);
            }

            #[tokio::test]
            async fn test_list_undated_last() {
                let store = $factory;
                let undated = store
                    .create(entry_ledger::core::Entry::new(EntryId::new()))
                    .await
                    .unwrap();
                let dated = store.create(entry_on("2024-01-01")).await.unwrap();

                let listed = store.list().await.unwrap();
                assert_eq!(listed, vec![dated, undated]);
            }

            // ==================================================================
            // Edge Cases
            // ==================================================================

            #[tokio::test]
            async fn test_nan_survives_storage() {
                let store = $factory;
                let mut patch = EntryPatch::new();
                patch.set(EntryField::PartyRate, FieldValue::Number(f64::NAN));
                let entry = entry_ledger::core::Entry::from_patch(&patch);

                store.create(entry.clone()).await.unwrap();

                let listed = store.list().await.unwrap();
                assert_eq!(listed.len(), 1);
                assert_eq!(listed[0].id, entry.id);
                assert!(listed[0].party_rate.is_some_and(f64::is_nan));
            }

            #[tokio::test]
            async fn test_concurrent_creates() {
                let store = $factory;
                let mut handles = Vec::new();

                for i in 0..10 {
                    let store = store.clone();
                    handles.push(tokio::spawn(async move {
                        store
                            .create(entry_on(&format!("2024-02-{:02}", i + 1)))
                            .await
                            .unwrap()
                    }));
                }
                for handle in handles {
                    handle.await.unwrap();
                }

                let listed = store.list().await.unwrap();
                assert_eq!(listed.len(), 10);
                assert_eq!(listed[0].date.as_deref(), Some("2024-02-10"));
                assert_eq!(listed[9].date.as_deref(), Some("2024-02-01"));
            }
        }
    };
}
