//! In-memory record store for testing and offline use

use async_trait::async_trait;
use permapress_domain::{Article, Collection, RecordStore, RecordStoreError, Settings};
use std::sync::RwLock;

/// In-memory record store implementation
pub struct InMemoryRecordStore {
    articles: RwLock<Vec<Article>>,
    collections: RwLock<Vec<Collection>>,
    settings: RwLock<Option<Settings>>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self {
            articles: RwLock::new(Vec::new()),
            collections: RwLock::new(Vec::new()),
            settings: RwLock::new(None),
        }
    }
}

impl Default for InMemoryRecordStore {
    fn default() -> Self {
        Self::new()
    }
}

fn poisoned(e: impl std::fmt::Display) -> RecordStoreError {
    RecordStoreError::Storage(e.to_string())
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn list_articles(&self) -> Result<Vec<Article>, RecordStoreError> {
        Ok(self.articles.read().map_err(poisoned)?.clone())
    }

    async fn get_article(&self, id: &str) -> Result<Option<Article>, RecordStoreError> {
        let articles = self.articles.read().map_err(poisoned)?;
        Ok(articles.iter().find(|a| a.id == id).cloned())
    }

    async fn create_article(&self, article: &Article) -> Result<(), RecordStoreError> {
        let mut articles = self.articles.write().map_err(poisoned)?;
        articles.insert(0, article.clone());
        Ok(())
    }

    async fn update_article(&self, article: &Article) -> Result<(), RecordStoreError> {
        let mut articles = self.articles.write().map_err(poisoned)?;
        match articles.iter_mut().find(|a| a.id == article.id) {
            Some(slot) => {
                *slot = article.clone();
                Ok(())
            }
            None => Err(RecordStoreError::NotFound(article.id.clone())),
        }
    }

    async fn delete_article(&self, id: &str) -> Result<bool, RecordStoreError> {
        let mut articles = self.articles.write().map_err(poisoned)?;
        let before = articles.len();
        articles.retain(|a| a.id != id);
        Ok(articles.len() != before)
    }

    async fn list_collections(&self) -> Result<Vec<Collection>, RecordStoreError> {
        Ok(self.collections.read().map_err(poisoned)?.clone())
    }

    async fn get_collection(&self, id: &str) -> Result<Option<Collection>, RecordStoreError> {
        let collections = self.collections.read().map_err(poisoned)?;
        Ok(collections.iter().find(|c| c.id == id).cloned())
    }

    async fn create_collection(&self, collection: &Collection) -> Result<(), RecordStoreError> {
        let mut collections = self.collections.write().map_err(poisoned)?;
        collections.insert(0, collection.clone());
        Ok(())
    }

    async fn update_collection(&self, collection: &Collection) -> Result<(), RecordStoreError> {
        let mut collections = self.collections.write().map_err(poisoned)?;
        match collections.iter_mut().find(|c| c.id == collection.id) {
            Some(slot) => {
                *slot = collection.clone();
                Ok(())
            }
            None => Err(RecordStoreError::NotFound(collection.id.clone())),
        }
    }

    async fn delete_collection(&self, id: &str) -> Result<bool, RecordStoreError> {
        let mut collections = self.collections.write().map_err(poisoned)?;
        let before = collections.len();
        collections.retain(|c| c.id != id);
        Ok(collections.len() != before)
    }

    async fn get_settings(&self) -> Result<Settings, RecordStoreError> {
        Ok(self
            .settings
            .read()
            .map_err(poisoned)?
            .clone()
            .unwrap_or_default())
    }

    async fn save_settings(&self, settings: &Settings) -> Result<(), RecordStoreError> {
        *self.settings.write().map_err(poisoned)? = Some(settings.clone());
        Ok(())
    }
}
