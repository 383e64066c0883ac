//! JSON-file record store.
//!
//! Each collection lives in its own file under the data directory
//! (`articles.json`, `collections.json`, `settings.json`) and is read and
//! written whole. Calls are atomic per file; there is no per-record
//! locking, so writers to the same collection must be serialized by the
//! caller. The articles, collections, and settings files are independent.

use async_trait::async_trait;
use permapress_domain::{Article, Collection, RecordStore, RecordStoreError, Settings};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use tokio::fs;

const ARTICLES_FILE: &str = "articles.json";
const COLLECTIONS_FILE: &str = "collections.json";
const SETTINGS_FILE: &str = "settings.json";

pub struct JsonRecordStore {
    dir: PathBuf,
}

impl JsonRecordStore {
    /// Open a store rooted at `dir`, creating the directory if needed.
    pub async fn new(dir: impl Into<PathBuf>) -> Result<Self, RecordStoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .await
            .map_err(|e| RecordStoreError::Storage(e.to_string()))?;
        Ok(Self { dir })
    }

    fn file(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }

    async fn read_list<T: DeserializeOwned>(&self, name: &str) -> Result<Vec<T>, RecordStoreError> {
        read_json(&self.file(name)).await.map(Option::unwrap_or_default)
    }

    async fn write_list<T: Serialize>(
        &self,
        name: &str,
        items: &[T],
    ) -> Result<(), RecordStoreError> {
        write_json(&self.file(name), items).await
    }
}

async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, RecordStoreError> {
    match fs::read(path).await {
        Ok(bytes) => serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(|e| RecordStoreError::Serialization(e.to_string())),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(RecordStoreError::Storage(e.to_string())),
    }
}

/// Write to a sibling temp file and rename over the target, so an
/// interrupted write never leaves a half-written collection behind.
async fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), RecordStoreError> {
    let bytes = serde_json::to_vec_pretty(value)
        .map_err(|e| RecordStoreError::Serialization(e.to_string()))?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, bytes)
        .await
        .map_err(|e| RecordStoreError::Storage(e.to_string()))?;
    fs::rename(&tmp, path)
        .await
        .map_err(|e| RecordStoreError::Storage(e.to_string()))
}

#[async_trait]
impl RecordStore for JsonRecordStore {
    async fn list_articles(&self) -> Result<Vec<Article>, RecordStoreError> {
        self.read_list(ARTICLES_FILE).await
    }

    async fn get_article(&self, id: &str) -> Result<Option<Article>, RecordStoreError> {
        let articles: Vec<Article> = self.read_list(ARTICLES_FILE).await?;
        Ok(articles.into_iter().find(|a| a.id == id))
    }

    async fn create_article(&self, article: &Article) -> Result<(), RecordStoreError> {
        let mut articles: Vec<Article> = self.read_list(ARTICLES_FILE).await?;
        // Newest first
        articles.insert(0, article.clone());
        self.write_list(ARTICLES_FILE, &articles).await
    }

    async fn update_article(&self, article: &Article) -> Result<(), RecordStoreError> {
        let mut articles: Vec<Article> = self.read_list(ARTICLES_FILE).await?;
        let Some(slot) = articles.iter_mut().find(|a| a.id == article.id) else {
            return Err(RecordStoreError::NotFound(article.id.clone()));
        };
        *slot = article.clone();
        self.write_list(ARTICLES_FILE, &articles).await
    }

    async fn delete_article(&self, id: &str) -> Result<bool, RecordStoreError> {
        let mut articles: Vec<Article> = self.read_list(ARTICLES_FILE).await?;
        let before = articles.len();
        articles.retain(|a| a.id != id);
        if articles.len() == before {
            return Ok(false);
        }
        self.write_list(ARTICLES_FILE, &articles).await?;
        Ok(true)
    }

    async fn list_collections(&self) -> Result<Vec<Collection>, RecordStoreError> {
        self.read_list(COLLECTIONS_FILE).await
    }

    async fn get_collection(&self, id: &str) -> Result<Option<Collection>, RecordStoreError> {
        let collections: Vec<Collection> = self.read_list(COLLECTIONS_FILE).await?;
        Ok(collections.into_iter().find(|c| c.id == id))
    }

    async fn create_collection(&self, collection: &Collection) -> Result<(), RecordStoreError> {
        let mut collections: Vec<Collection> = self.read_list(COLLECTIONS_FILE).await?;
        collections.insert(0, collection.clone());
        self.write_list(COLLECTIONS_FILE, &collections).await
    }

    async fn update_collection(&self, collection: &Collection) -> Result<(), RecordStoreError> {
        let mut collections: Vec<Collection> = self.read_list(COLLECTIONS_FILE).await?;
        let Some(slot) = collections.iter_mut().find(|c| c.id == collection.id) else {
            return Err(RecordStoreError::NotFound(collection.id.clone()));
        };
        *slot = collection.clone();
        self.write_list(COLLECTIONS_FILE, &collections).await
    }

    async fn delete_collection(&self, id: &str) -> Result<bool, RecordStoreError> {
        let mut collections: Vec<Collection> = self.read_list(COLLECTIONS_FILE).await?;
        let before = collections.len();
        collections.retain(|c| c.id != id);
        if collections.len() == before {
            return Ok(false);
        }
        self.write_list(COLLECTIONS_FILE, &collections).await?;
        Ok(true)
    }

    async fn get_settings(&self) -> Result<Settings, RecordStoreError> {
        Ok(read_json::<Settings>(&self.file(SETTINGS_FILE))
            .await?
            .unwrap_or_default())
    }

    async fn save_settings(&self, settings: &Settings) -> Result<(), RecordStoreError> {
        write_json(&self.file(SETTINGS_FILE), settings).await
    }
}
