//! Hand-written port fakes shared by use case tests.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use time::OffsetDateTime;

use crate::model::{Article, Collection, NamingKey, Settings};
use crate::ports::{
    BoundName, Clock, ContentStore, ContentStoreError, NameService, NameServiceError, RecordStore,
    RecordStoreError, StoredObject,
};

pub(crate) const FAKE_GATEWAY: &str = "https://ipfs.io/ipfs/";

/// Content store fake with a scripted response queue. When the queue is
/// empty it succeeds with generated addresses bafyfake0, bafyfake1, ...
pub(crate) struct FakeContentStore {
    responses: Mutex<VecDeque<Result<String, ContentStoreError>>>,
    put_names: Mutex<Vec<String>>,
    counter: AtomicUsize,
}

impl FakeContentStore {
    pub(crate) fn new() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            put_names: Mutex::new(Vec::new()),
            counter: AtomicUsize::new(0),
        }
    }

    pub(crate) fn push_cid(&self, cid: &str) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Ok(cid.to_string()));
    }

    pub(crate) fn push_failure(&self, message: &str) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Err(ContentStoreError::Transport(message.to_string())));
    }

    pub(crate) fn put_names(&self) -> Vec<String> {
        self.put_names.lock().unwrap().clone()
    }
}

#[async_trait]
impl ContentStore for FakeContentStore {
    async fn put(
        &self,
        _bytes: Vec<u8>,
        name: &str,
        _media_type: &str,
    ) -> Result<StoredObject, ContentStoreError> {
        self.put_names.lock().unwrap().push(name.to_string());
        let scripted = self.responses.lock().unwrap().pop_front();
        let cid = match scripted {
            Some(Ok(cid)) => cid,
            Some(Err(e)) => return Err(e),
            None => format!("bafyfake{}", self.counter.fetch_add(1, Ordering::SeqCst)),
        };
        Ok(StoredObject {
            url: format!("{FAKE_GATEWAY}{cid}"),
            cid,
        })
    }

    async fn is_available(&self) -> bool {
        true
    }
}

/// Name service fake tracking created keys and bindings, with per-call
/// failure switches.
pub(crate) struct FakeNameService {
    pub(crate) keys: Mutex<Vec<NamingKey>>,
    pub(crate) bindings: Mutex<Vec<(String, String)>>,
    pub(crate) created: AtomicUsize,
    pub(crate) fail_list: Mutex<bool>,
    pub(crate) fail_create: Mutex<bool>,
    pub(crate) fail_bind: Mutex<bool>,
}

impl FakeNameService {
    pub(crate) fn new() -> Self {
        Self {
            keys: Mutex::new(Vec::new()),
            bindings: Mutex::new(Vec::new()),
            created: AtomicUsize::new(0),
            fail_list: Mutex::new(false),
            fail_create: Mutex::new(false),
            fail_bind: Mutex::new(false),
        }
    }

    pub(crate) fn with_key(self, name: &str, id: &str) -> Self {
        self.keys.lock().unwrap().push(NamingKey {
            name: name.to_string(),
            id: id.to_string(),
        });
        self
    }

    pub(crate) fn created_count(&self) -> usize {
        self.created.load(Ordering::SeqCst)
    }

    pub(crate) fn last_binding(&self) -> Option<(String, String)> {
        self.bindings.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl NameService for FakeNameService {
    async fn list_keys(&self) -> Result<Vec<NamingKey>, NameServiceError> {
        if *self.fail_list.lock().unwrap() {
            return Err(NameServiceError::Transport("key list failed".to_string()));
        }
        Ok(self.keys.lock().unwrap().clone())
    }

    async fn create_key(&self, name: &str) -> Result<NamingKey, NameServiceError> {
        if *self.fail_create.lock().unwrap() {
            return Err(NameServiceError::Api("key gen failed".to_string()));
        }
        self.created.fetch_add(1, Ordering::SeqCst);
        let key = NamingKey {
            name: name.to_string(),
            id: format!("k51-{name}"),
        };
        self.keys.lock().unwrap().push(key.clone());
        Ok(key)
    }

    async fn bind(&self, cid: &str, key_name: &str) -> Result<BoundName, NameServiceError> {
        if *self.fail_bind.lock().unwrap() {
            return Err(NameServiceError::Api("name publish failed".to_string()));
        }
        self.bindings
            .lock()
            .unwrap()
            .push((key_name.to_string(), cid.to_string()));
        Ok(BoundName {
            name: key_name.to_string(),
            value: format!("/ipfs/{cid}"),
        })
    }

    fn public_url(&self, ipns_id: &str) -> String {
        format!("https://ipfs.io/ipns/{ipns_id}")
    }
}

/// In-memory record store fake with an update counter.
pub(crate) struct FakeRecordStore {
    articles: Mutex<Vec<Article>>,
    collections: Mutex<Vec<Collection>>,
    settings: Mutex<Option<Settings>>,
    pub(crate) article_updates: AtomicUsize,
}

impl FakeRecordStore {
    pub(crate) fn new() -> Self {
        Self {
            articles: Mutex::new(Vec::new()),
            collections: Mutex::new(Vec::new()),
            settings: Mutex::new(None),
            article_updates: AtomicUsize::new(0),
        }
    }

    pub(crate) fn with_articles(self, articles: Vec<Article>) -> Self {
        *self.articles.lock().unwrap() = articles;
        self
    }

    pub(crate) fn with_collections(self, collections: Vec<Collection>) -> Self {
        *self.collections.lock().unwrap() = collections;
        self
    }

    pub(crate) fn article_update_count(&self) -> usize {
        self.article_updates.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RecordStore for FakeRecordStore {
    async fn list_articles(&self) -> Result<Vec<Article>, RecordStoreError> {
        Ok(self.articles.lock().unwrap().clone())
    }

    async fn get_article(&self, id: &str) -> Result<Option<Article>, RecordStoreError> {
        Ok(self
            .articles
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.id == id)
            .cloned())
    }

    async fn create_article(&self, article: &Article) -> Result<(), RecordStoreError> {
        self.articles.lock().unwrap().insert(0, article.clone());
        Ok(())
    }

    async fn update_article(&self, article: &Article) -> Result<(), RecordStoreError> {
        self.article_updates.fetch_add(1, Ordering::SeqCst);
        let mut articles = self.articles.lock().unwrap();
        match articles.iter_mut().find(|a| a.id == article.id) {
            Some(slot) => {
                *slot = article.clone();
                Ok(())
            }
            None => Err(RecordStoreError::NotFound(article.id.clone())),
        }
    }

    async fn delete_article(&self, id: &str) -> Result<bool, RecordStoreError> {
        let mut articles = self.articles.lock().unwrap();
        let before = articles.len();
        articles.retain(|a| a.id != id);
        Ok(articles.len() != before)
    }

    async fn list_collections(&self) -> Result<Vec<Collection>, RecordStoreError> {
        Ok(self.collections.lock().unwrap().clone())
    }

    async fn get_collection(&self, id: &str) -> Result<Option<Collection>, RecordStoreError> {
        Ok(self
            .collections
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id == id)
            .cloned())
    }

    async fn create_collection(&self, collection: &Collection) -> Result<(), RecordStoreError> {
        self.collections.lock().unwrap().insert(0, collection.clone());
        Ok(())
    }

    async fn update_collection(&self, collection: &Collection) -> Result<(), RecordStoreError> {
        let mut collections = self.collections.lock().unwrap();
        match collections.iter_mut().find(|c| c.id == collection.id) {
            Some(slot) => {
                *slot = collection.clone();
                Ok(())
            }
            None => Err(RecordStoreError::NotFound(collection.id.clone())),
        }
    }

    async fn delete_collection(&self, id: &str) -> Result<bool, RecordStoreError> {
        let mut collections = self.collections.lock().unwrap();
        let before = collections.len();
        collections.retain(|c| c.id != id);
        Ok(collections.len() != before)
    }

    async fn get_settings(&self) -> Result<Settings, RecordStoreError> {
        Ok(self.settings.lock().unwrap().clone().unwrap_or_default())
    }

    async fn save_settings(&self, settings: &Settings) -> Result<(), RecordStoreError> {
        *self.settings.lock().unwrap() = Some(settings.clone());
        Ok(())
    }
}

/// Fixed clock for deterministic timestamps
pub(crate) struct FixedClock(pub(crate) OffsetDateTime);

impl Clock for FixedClock {
    fn now(&self) -> OffsetDateTime {
        self.0
    }
}
