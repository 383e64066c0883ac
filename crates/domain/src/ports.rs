//! Port definitions (traits) for external dependencies
//!
//! These traits define the boundaries between the domain and external systems.
//! Adapters implement these traits to connect to real infrastructure.

use async_trait::async_trait;
use thiserror::Error;
use time::OffsetDateTime;

use crate::model::{Article, Collection, NamingKey, Settings};

/// Error type for content store operations. Any failure here is fatal to
/// the publish attempt that triggered it.
#[derive(Debug, Error)]
pub enum ContentStoreError {
    #[error("content store unreachable: {0}")]
    Transport(String),
    #[error("content store rejected upload: {0}")]
    Rejected(String),
}

/// An object stored under its content address
#[derive(Debug, Clone)]
pub struct StoredObject {
    /// Content address derived from the bytes
    pub cid: String,
    /// Gateway URL resolving to the bytes
    pub url: String,
}

/// Port for the content-addressed store. Identical bytes yield the
/// identical address, so `put` is idempotent.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Store bytes under a cosmetic artifact name and media type
    async fn put(
        &self,
        bytes: Vec<u8>,
        name: &str,
        media_type: &str,
    ) -> Result<StoredObject, ContentStoreError>;

    /// Whether the backing node is reachable
    async fn is_available(&self) -> bool;
}

/// Error type for name service operations. The single-article pipeline
/// treats every variant as best-effort (logged, never propagated).
#[derive(Debug, Error)]
pub enum NameServiceError {
    #[error("name service unreachable: {0}")]
    Transport(String),
    #[error("name service error: {0}")]
    Api(String),
}

/// A published "key name -> content address" binding as reported by the
/// name service
#[derive(Debug, Clone)]
pub struct BoundName {
    pub name: String,
    pub value: String,
}

/// Port for the mutable-pointer name service
#[async_trait]
pub trait NameService: Send + Sync {
    /// List all registered naming keys
    async fn list_keys(&self) -> Result<Vec<NamingKey>, NameServiceError>;

    /// Create a new naming key under the given name
    async fn create_key(&self, name: &str) -> Result<NamingKey, NameServiceError>;

    /// Bind a content address under a key name, superseding the previous
    /// binding. The previous address stays fetchable by its own cid.
    async fn bind(&self, cid: &str, key_name: &str) -> Result<BoundName, NameServiceError>;

    /// Public gateway URL for a naming identifier
    fn public_url(&self, ipns_id: &str) -> String;
}

/// Error type for record store operations
#[derive(Debug, Error)]
pub enum RecordStoreError {
    #[error("storage error: {0}")]
    Storage(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Port for keyed persistence of articles, collections, and settings.
///
/// Each call is atomic, but the backing pattern is read-entire-collection /
/// mutate / write-entire-collection with no per-record locking: callers
/// must serialize writes to a given collection. Articles, collections, and
/// settings are independent collections.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn list_articles(&self) -> Result<Vec<Article>, RecordStoreError>;
    async fn get_article(&self, id: &str) -> Result<Option<Article>, RecordStoreError>;
    async fn create_article(&self, article: &Article) -> Result<(), RecordStoreError>;
    /// Replace an existing article; `NotFound` if the ID is unknown
    async fn update_article(&self, article: &Article) -> Result<(), RecordStoreError>;
    /// Returns whether the article existed
    async fn delete_article(&self, id: &str) -> Result<bool, RecordStoreError>;

    async fn list_collections(&self) -> Result<Vec<Collection>, RecordStoreError>;
    async fn get_collection(&self, id: &str) -> Result<Option<Collection>, RecordStoreError>;
    async fn create_collection(&self, collection: &Collection) -> Result<(), RecordStoreError>;
    async fn update_collection(&self, collection: &Collection) -> Result<(), RecordStoreError>;
    async fn delete_collection(&self, id: &str) -> Result<bool, RecordStoreError>;

    /// Settings are materialized with defaults if never saved
    async fn get_settings(&self) -> Result<Settings, RecordStoreError>;
    /// Wholesale replace
    async fn save_settings(&self, settings: &Settings) -> Result<(), RecordStoreError>;
}

/// Port for time/clock operations (enables deterministic testing)
pub trait Clock: Send + Sync {
    /// Get the current time
    fn now(&self) -> OffsetDateTime;
}

/// Real clock implementation
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc()
    }
}
