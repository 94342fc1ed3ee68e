//! MongoDB storage backend using the official MongoDB async driver.
//!
//! Provides `MongoEntryStore`, an `EntryService` backed by a single
//! collection (`entries` by default).
//!
//! # Feature flag
//!
//! This module is gated behind the `mongodb_backend` feature flag:
//! ```sh
//! cargo run --features mongodb_backend
//! ```
//!
//! # Storage model
//!
//! Entries are serialized straight to BSON through serde, so the
//! not-a-number sentinel survives as a BSON double. Entries created here keep
//! a UUID string in `_id`; documents inserted by other clients usually carry
//! an ObjectId there, which is read as [`EntryId::ObjectId`] and queried in its
//! native BSON form. Updates use `$set` through `find_one_and_update`, so a
//! patch touches only the fields it names and is applied atomically by the
//! server.

use crate::core::{DeleteSummary, Entry, EntryId, EntryPatch, EntryService, FieldValue};
use anyhow::{Context, Result};
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{self, Bson, Document, doc};
use mongodb::options::ReturnDocument;
use mongodb::{Client, Collection, Database};

/// Collection used when none is configured
pub const DEFAULT_COLLECTION: &str = "entries";

/// Database used when neither the config nor the URI names one
pub const DEFAULT_DATABASE: &str = "test";

// ---------------------------------------------------------------------------
// Conversion helpers
// ---------------------------------------------------------------------------

/// Convert an entry id to the BSON value stored in `_id`.
fn id_bson(id: &EntryId) -> Bson {
    match id {
        EntryId::Uuid(_) => Bson::String(id.to_string()),
        EntryId::ObjectId(bytes) => Bson::ObjectId(ObjectId::from_bytes(*bytes)),
    }
}

fn entry_to_document(entry: &Entry) -> Result<Document> {
    let mut document = bson::to_document(entry).context("Failed to encode entry")?;
    document.insert("_id", id_bson(&entry.id));
    Ok(document)
}

/// Decode a stored document, accepting an ObjectId `_id`.
fn entry_from_document(mut document: Document) -> Result<Entry> {
    if let Ok(oid) = document.get_object_id("_id") {
        document.insert("_id", oid.to_hex());
    }
    bson::from_document(document).context("Failed to decode entry")
}

fn field_bson(value: &FieldValue) -> Bson {
    match value {
        FieldValue::Text(Some(text)) => Bson::String(text.clone()),
        FieldValue::Text(None) => Bson::Null,
        FieldValue::Number(number) => Bson::Double(*number),
        FieldValue::Flag(flag) => Bson::Boolean(*flag),
    }
}

/// Build the `$set` body for a patch, skipping values of the wrong kind.
fn set_document(patch: &EntryPatch) -> Document {
    let mut set = Document::new();
    for (field, value) in patch.iter() {
        if value.kind() == field.kind() {
            set.insert(field.as_str(), field_bson(value));
        }
    }
    set
}

// ---------------------------------------------------------------------------
// MongoEntryStore
// ---------------------------------------------------------------------------

/// Entry storage service backed by MongoDB.
///
/// The client is opened once and shared by every clone of the store; call
/// [`EntryService::shutdown`] once at teardown.
///
/// # Example
///
/// ```rust,ignore
/// use entry_ledger::storage::MongoEntryStore;
///
/// let store = MongoEntryStore::connect("mongodb://localhost:27017/fleet", None, "entries").await?;
/// let entries = store.list().await?;
/// ```
#[derive(Clone, Debug)]
pub struct MongoEntryStore {
    client: Client,
    database: Database,
    collection: Collection<Document>,
}

impl MongoEntryStore {
    /// Create a store on `database` using the default collection.
    pub fn new(client: Client, database: &str) -> Self {
        let database = client.database(database);
        let collection = database.collection(DEFAULT_COLLECTION);
        Self {
            client,
            database,
            collection,
        }
    }

    /// Use another collection in the same database.
    pub fn with_collection(mut self, name: &str) -> Self {
        self.collection = self.database.collection(name);
        self
    }

    /// Connect to MongoDB and check that the server answers.
    ///
    /// `database` falls back to the database named in the URI, then to
    /// [`DEFAULT_DATABASE`].
    pub async fn connect(uri: &str, database: Option<&str>, collection: &str) -> Result<Self> {
        let client = Client::with_uri_str(uri)
            .await
            .context("Failed to create MongoDB client")?;

        let database = match database {
            Some(name) => name.to_string(),
            None => client
                .default_database()
                .map(|db| db.name().to_string())
                .unwrap_or_else(|| DEFAULT_DATABASE.to_string()),
        };

        let store = Self::new(client, &database).with_collection(collection);
        store
            .database
            .run_command(doc! { "ping": 1 })
            .await
            .context("Failed to reach MongoDB")?;

        tracing::info!(
            database = %database,
            collection = %collection,
            "MongoDB connected"
        );
        Ok(store)
    }

    /// Get a reference to the underlying database.
    pub fn database(&self) -> &Database {
        &self.database
    }

    /// Get the collection entries are stored in.
    pub fn collection(&self) -> &Collection<Document> {
        &self.collection
    }
}

#[async_trait]
impl EntryService for MongoEntryStore {
    async fn list(&self) -> Result<Vec<Entry>> {
        let cursor = self
            .collection
            .find(doc! {})
            .sort(doc! { "date": -1 })
            .await
            .context("Failed to list entries")?;

        let documents = cursor
            .try_collect::<Vec<Document>>()
            .await
            .context("Failed to collect entries")?;

        documents.into_iter().map(entry_from_document).collect()
    }

    async fn create(&self, entry: Entry) -> Result<Entry> {
        self.collection
            .insert_one(entry_to_document(&entry)?)
            .await
            .context("Failed to create entry")?;

        Ok(entry)
    }

    async fn update(&self, id: &EntryId, patch: &EntryPatch) -> Result<Option<Entry>> {
        let filter = doc! { "_id": id_bson(id) };
        let set = set_document(patch);

        // An empty `$set` is rejected by the server.
        let document = if set.is_empty() {
            self.collection
                .find_one(filter)
                .await
                .context("Failed to get entry")?
        } else {
            self.collection
                .find_one_and_update(filter, doc! { "$set": set })
                .return_document(ReturnDocument::After)
                .await
                .context("Failed to update entry")?
        };

        document.map(entry_from_document).transpose()
    }

    async fn delete(&self, id: &EntryId) -> Result<Option<Entry>> {
        self.collection
            .find_one_and_delete(doc! { "_id": id_bson(id) })
            .await
            .context("Failed to delete entry")?
            .map(entry_from_document)
            .transpose()
    }

    async fn delete_many(&self, ids: &[EntryId]) -> Result<DeleteSummary> {
        let ids: Vec<Bson> = ids.iter().map(id_bson).collect();
        let result = self
            .collection
            .delete_many(doc! { "_id": { "$in": ids } })
            .await
            .context("Failed to delete entries")?;

        Ok(DeleteSummary::deleted(result.deleted_count))
    }

    async fn shutdown(&self) -> Result<()> {
        self.client.clone().shutdown().await;
        tracing::info!("MongoDB connection closed");
        Ok(())
    }
}
