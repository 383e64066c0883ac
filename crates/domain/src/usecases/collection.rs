//! Collection publish: render a listing page over the published members
//! of a collection and publish it under the collection's naming key.

use std::sync::Arc;

use crate::model::{Article, ArticleStatus, Collection, CollectionOutcome};
use crate::ports::{
    Clock, ContentStore, ContentStoreError, NameService, RecordStore, RecordStoreError,
};
use crate::render::{self, ListingEntry, ListingMeta};
use crate::usecases::naming::{self, COLLECTION_KEY_PREFIX};

#[derive(Debug, thiserror::Error)]
pub enum CollectionPublishError {
    #[error("collection not found: {0}")]
    NotFound(String),
    #[error("content store failed: {0}")]
    ContentStore(#[from] ContentStoreError),
    #[error("record store failed: {0}")]
    Store(#[from] RecordStoreError),
}

pub struct CollectionPublishUseCase<C, N, R, Cl>
where
    C: ContentStore + ?Sized,
    N: NameService + ?Sized,
    R: RecordStore + ?Sized,
    Cl: Clock + ?Sized,
{
    content_store: Arc<C>,
    name_service: Arc<N>,
    records: Arc<R>,
    clock: Arc<Cl>,
}

impl<C, N, R, Cl> CollectionPublishUseCase<C, N, R, Cl>
where
    C: ContentStore + ?Sized,
    N: NameService + ?Sized,
    R: RecordStore + ?Sized,
    Cl: Clock + ?Sized,
{
    pub fn new(
        content_store: Arc<C>,
        name_service: Arc<N>,
        records: Arc<R>,
        clock: Arc<Cl>,
    ) -> Self {
        Self {
            content_store,
            name_service,
            records,
            clock,
        }
    }

    /// Publish the listing page of a collection.
    ///
    /// Members without a published content address are silently excluded.
    /// Content upload is fatal; naming is best-effort, as in the
    /// single-article pipeline. Member articles are never mutated.
    pub async fn publish(
        &self,
        collection_id: &str,
    ) -> Result<CollectionOutcome, CollectionPublishError> {
        let Some(mut collection) = self.records.get_collection(collection_id).await? else {
            return Err(CollectionPublishError::NotFound(collection_id.to_string()));
        };

        let settings = self.records.get_settings().await?;
        let articles = self.records.list_articles().await?;
        let entries = member_entries(&collection, &articles);

        tracing::info!(
            collection_id = %collection.id,
            name = %collection.name,
            members = collection.article_ids.len(),
            published_members = entries.len(),
            "Publishing collection listing"
        );

        let meta = ListingMeta {
            name: collection.name.clone(),
            description: collection.description.clone(),
            author: collection.author.clone(),
        };
        let page = render::render_listing(&entries, &settings.gateway, Some(&meta));
        let artifact = render::artifact_name(&collection.name);

        let stored = self
            .content_store
            .put(page.into_bytes(), &artifact, "text/html")
            .await?;

        let key_name = collection
            .ipns_key_name
            .clone()
            .unwrap_or_else(|| naming::derive_key_name(COLLECTION_KEY_PREFIX, &collection.id));
        let binding =
            match naming::ensure_and_bind(self.name_service.as_ref(), &key_name, &stored.cid)
                .await
            {
                Ok(binding) => Some(binding),
                Err(e) => {
                    tracing::warn!(
                        collection_id = %collection.id,
                        key_name = %key_name,
                        error = %e,
                        "Naming update failed; keeping previous pointer"
                    );
                    None
                }
            };

        let now = self.clock.now();
        collection.last_published_at = Some(now);
        collection.updated_at = now;
        if let Some(binding) = &binding {
            collection.ipns_key_name = Some(binding.key_name.clone());
            collection.ipns_id = Some(binding.ipns_id.clone());
            collection.ipns_url = Some(binding.ipns_url.clone());
        }
        self.records.update_collection(&collection).await?;

        Ok(CollectionOutcome {
            url: stored.url,
            cid: stored.cid,
            ipns_url: binding.map(|b| b.ipns_url),
            collection,
        })
    }
}

/// Listing entries for the published, content-addressed members of a
/// collection, in member order.
fn member_entries(collection: &Collection, articles: &[Article]) -> Vec<ListingEntry> {
    collection
        .article_ids
        .iter()
        .filter_map(|id| articles.iter().find(|a| &a.id == id))
        .filter(|a| a.status == ArticleStatus::Published)
        .filter_map(|a| {
            a.cid.as_ref().map(|cid| ListingEntry {
                title: a.title.clone(),
                cid: cid.clone(),
                body: a.body.clone(),
                created_at: a.created_at,
            })
        })
        .collect()
}
