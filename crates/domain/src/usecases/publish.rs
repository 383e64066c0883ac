//! Single-article publish pipeline: render, store content, update the
//! mutable name pointer, and persist the terminal status.

use std::sync::Arc;

use crate::model::{Article, ArticleStatus, PublishOutcome};
use crate::ports::{Clock, ContentStore, ContentStoreError, NameService, RecordStore, RecordStoreError};
use crate::render::{self, RenderError};
use crate::usecases::naming::{self, ARTICLE_KEY_PREFIX};

/// Classified failure of a publish attempt. Naming-subsystem errors never
/// appear here: they are recovered inside the pipeline.
#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    #[error("article not found: {0}")]
    NotFound(String),
    #[error("article {id} is {status:?} and cannot be published")]
    NotPublishable { id: String, status: ArticleStatus },
    #[error("render failed: {0}")]
    Render(#[from] RenderError),
    #[error("content store failed: {0}")]
    ContentStore(#[from] ContentStoreError),
    #[error("record store failed: {0}")]
    Store(#[from] RecordStoreError),
}

/// Publish pipeline orchestrator
pub struct PublishUseCase<C, N, R, Cl>
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

impl<C, N, R, Cl> PublishUseCase<C, N, R, Cl>
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

    /// Publish one article.
    ///
    /// Status goes Draft|Failed -> Publishing (persisted immediately) and
    /// ends at Published or Failed on every exit path: the record is never
    /// left at Publishing once this returns. A content-store or render
    /// failure is fatal; a naming failure is logged and the article still
    /// ends Published, retaining whatever naming fields it had before.
    pub async fn publish(&self, article_id: &str) -> Result<PublishOutcome, PublishError> {
        let Some(mut article) = self.records.get_article(article_id).await? else {
            return Err(PublishError::NotFound(article_id.to_string()));
        };

        if !article.status.is_publishable() {
            return Err(PublishError::NotPublishable {
                id: article.id,
                status: article.status,
            });
        }

        article.status = ArticleStatus::Publishing;
        article.updated_at = self.clock.now();
        self.records.update_article(&article).await?;

        tracing::info!(article_id = %article.id, title = %article.title, "Publishing article");

        let page = match render::render_article(&article.title, &article.body, article.created_at)
        {
            Ok(page) => page,
            Err(e) => {
                self.mark_failed(&mut article, &e.to_string()).await;
                return Err(e.into());
            }
        };

        let artifact = render::artifact_name(&article.title);
        let stored = match self
            .content_store
            .put(page.into_bytes(), &artifact, "text/html")
            .await
        {
            Ok(stored) => stored,
            Err(e) => {
                self.mark_failed(&mut article, &e.to_string()).await;
                return Err(e.into());
            }
        };

        tracing::info!(article_id = %article.id, cid = %stored.cid, "Content stored");

        // Best-effort naming: the content upload stands regardless.
        let key_name = article
            .ipns_key_name
            .clone()
            .unwrap_or_else(|| naming::derive_key_name(ARTICLE_KEY_PREFIX, &article.id));
        let binding =
            match naming::ensure_and_bind(self.name_service.as_ref(), &key_name, &stored.cid)
                .await
            {
                Ok(binding) => Some(binding),
                Err(e) => {
                    tracing::warn!(
                        article_id = %article.id,
                        key_name = %key_name,
                        error = %e,
                        "Naming update failed; keeping previous pointer"
                    );
                    None
                }
            };

        let now = self.clock.now();
        article.status = ArticleStatus::Published;
        article.cid = Some(stored.cid.clone());
        article.url = Some(stored.url.clone());
        article.published_at = Some(now);
        article.updated_at = now;
        article.error_message = None;
        if let Some(binding) = &binding {
            article.ipns_key_name = Some(binding.key_name.clone());
            article.ipns_id = Some(binding.ipns_id.clone());
            article.ipns_url = Some(binding.ipns_url.clone());
        }

        if let Err(e) = self.records.update_article(&article).await {
            self.mark_failed(&mut article, &e.to_string()).await;
            return Err(e.into());
        }

        Ok(PublishOutcome {
            cid: stored.cid,
            url: stored.url,
            ipns_url: binding.map(|b| b.ipns_url),
            article,
        })
    }

    /// Terminal failure update. Persisting the failure is itself best
    /// effort: there is nothing left to do when the record store is down.
    async fn mark_failed(&self, article: &mut Article, message: &str) {
        article.status = ArticleStatus::Failed;
        article.error_message = Some(message.to_string());
        article.updated_at = self.clock.now();
        if let Err(e) = self.records.update_article(article).await {
            tracing::error!(article_id = %article.id, error = %e, "Failed to persist failure state");
        }
    }
}
