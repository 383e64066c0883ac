//! Default article-listing publish: an index page over every published
//! article, kept under the settings-owned naming key.

use std::sync::Arc;

use crate::model::{ArticleStatus, ListingOutcome};
use crate::ports::{
    ContentStore, ContentStoreError, NameService, NameServiceError, RecordStore, RecordStoreError,
};
use crate::render::{self, ListingEntry};
use crate::usecases::naming::{self, DEFAULT_LISTING_KEY};

/// Unlike the per-article pipeline, a naming failure here is the
/// operation's failure: the listing exists solely to keep a stable
/// pointer current.
#[derive(Debug, thiserror::Error)]
pub enum ListingPublishError {
    #[error("content store failed: {0}")]
    ContentStore(#[from] ContentStoreError),
    #[error("naming failed: {0}")]
    Naming(#[from] NameServiceError),
    #[error("record store failed: {0}")]
    Store(#[from] RecordStoreError),
}

pub struct ListingPublishUseCase<C, N, R>
where
    C: ContentStore + ?Sized,
    N: NameService + ?Sized,
    R: RecordStore + ?Sized,
{
    content_store: Arc<C>,
    name_service: Arc<N>,
    records: Arc<R>,
}

impl<C, N, R> ListingPublishUseCase<C, N, R>
where
    C: ContentStore + ?Sized,
    N: NameService + ?Sized,
    R: RecordStore + ?Sized,
{
    pub fn new(content_store: Arc<C>, name_service: Arc<N>, records: Arc<R>) -> Self {
        Self {
            content_store,
            name_service,
            records,
        }
    }

    /// Render and publish the index of all published articles, bind it
    /// under the settings key (default `article-list`), and persist the
    /// key fields back into settings.
    pub async fn publish(&self) -> Result<ListingOutcome, ListingPublishError> {
        let mut settings = self.records.get_settings().await?;
        let articles = self.records.list_articles().await?;

        let entries: Vec<ListingEntry> = articles
            .iter()
            .filter(|a| a.status == ArticleStatus::Published)
            .filter_map(|a| {
                a.cid.as_ref().map(|cid| ListingEntry {
                    title: a.title.clone(),
                    cid: cid.clone(),
                    body: a.body.clone(),
                    created_at: a.created_at,
                })
            })
            .collect();

        tracing::info!(count = entries.len(), "Publishing article listing");

        let page = render::render_listing(&entries, &settings.gateway, None);
        let stored = self
            .content_store
            .put(page.into_bytes(), "articles.html", "text/html")
            .await?;

        let key_name = settings
            .ipns_key_name
            .clone()
            .unwrap_or_else(|| DEFAULT_LISTING_KEY.to_string());
        let binding =
            naming::ensure_and_bind(self.name_service.as_ref(), &key_name, &stored.cid).await?;

        settings.ipns_key_name = Some(binding.key_name.clone());
        settings.ipns_id = Some(binding.ipns_id.clone());
        settings.ipns_url = Some(binding.ipns_url.clone());
        self.records.save_settings(&settings).await?;

        Ok(ListingOutcome {
            cid: stored.cid,
            url: stored.url,
            key_name: binding.key_name,
            ipns_url: binding.ipns_url,
        })
    }
}
