//! Batch publisher: run the single-article pipeline over every eligible
//! article, isolating failures per item.

use std::sync::Arc;

use crate::model::{BatchItem, BatchReport};
use crate::ports::{Clock, ContentStore, NameService, RecordStore, RecordStoreError};
use crate::usecases::publish::PublishUseCase;

/// Batch orchestrator over the single-article pipeline
pub struct BatchPublishUseCase<C, N, R, Cl>
where
    C: ContentStore + ?Sized,
    N: NameService + ?Sized,
    R: RecordStore + ?Sized,
    Cl: Clock + ?Sized,
{
    publisher: PublishUseCase<C, N, R, Cl>,
    records: Arc<R>,
}

impl<C, N, R, Cl> BatchPublishUseCase<C, N, R, Cl>
where
    C: ContentStore + ?Sized,
    N: NameService + ?Sized,
    R: RecordStore + ?Sized,
    Cl: Clock + ?Sized,
{
    pub fn new(publisher: PublishUseCase<C, N, R, Cl>, records: Arc<R>) -> Self {
        Self { publisher, records }
    }

    /// Publish every Draft or Failed article, strictly sequentially.
    ///
    /// Items are processed one at a time: the record store is a
    /// read-modify-write whole-collection pattern with no per-record
    /// locking, so concurrent publishes would silently lose updates. One
    /// item's failure never aborts the batch; it is recorded and the loop
    /// moves on. An empty eligible set yields a zero report.
    pub async fn publish_all(&self) -> Result<BatchReport, RecordStoreError> {
        let articles = self.records.list_articles().await?;
        let eligible: Vec<_> = articles
            .into_iter()
            .filter(|a| a.status.is_publishable())
            .collect();

        if eligible.is_empty() {
            tracing::info!("No articles eligible for publishing");
            return Ok(BatchReport::default());
        }

        tracing::info!(count = eligible.len(), "Starting batch publish");

        let mut report = BatchReport::default();
        for article in eligible {
            match self.publisher.publish(&article.id).await {
                Ok(outcome) => {
                    report.published += 1;
                    report.results.push(BatchItem {
                        article_id: article.id,
                        title: article.title,
                        success: true,
                        cid: Some(outcome.cid),
                        ipns_url: outcome.ipns_url,
                        error: None,
                    });
                }
                Err(e) => {
                    tracing::error!(article_id = %article.id, error = %e, "Batch item failed");
                    report.failed += 1;
                    report.results.push(BatchItem {
                        article_id: article.id,
                        title: article.title,
                        success: false,
                        cid: None,
                        ipns_url: None,
                        error: Some(e.to_string()),
                    });
                }
            }
        }

        tracing::info!(
            published = report.published,
            failed = report.failed,
            "Batch publish finished"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fakes::{FakeContentStore, FakeNameService, FakeRecordStore, FixedClock};
    use crate::model::{Article, ArticleStatus};
    use time::macros::datetime;

    const NOW: time::OffsetDateTime = datetime!(2024-06-01 12:00:00 UTC);

    fn batch(
        articles: Vec<Article>,
        content: Arc<FakeContentStore>,
    ) -> (
        Arc<FakeRecordStore>,
        BatchPublishUseCase<FakeContentStore, FakeNameService, FakeRecordStore, FixedClock>,
    ) {
        let records = Arc::new(FakeRecordStore::new().with_articles(articles));
        let publisher = PublishUseCase::new(
            content,
            Arc::new(FakeNameService::new()),
            Arc::clone(&records),
            Arc::new(FixedClock(NOW)),
        );
        let usecase = BatchPublishUseCase::new(publisher, Arc::clone(&records));
        (records, usecase)
    }

    #[tokio::test]
    async fn one_failing_item_does_not_abort_the_batch() {
        let articles: Vec<Article> = (0..3)
            .map(|i| Article::new(format!("Article {i}"), "body", NOW))
            .collect();
        let failing_id = articles[1].id.clone();

        let content = Arc::new(FakeContentStore::new());
        content.push_cid("bafy0");
        content.push_failure("upload rejected");
        content.push_cid("bafy2");

        let (records, usecase) = batch(articles, content);
        let report = usecase.publish_all().await.unwrap();

        assert_eq!(report.published, 2);
        assert_eq!(report.failed, 1);
        assert_eq!(report.results.len(), 3);

        let failed_item = report
            .results
            .iter()
            .find(|r| r.article_id == failing_id)
            .unwrap();
        assert!(!failed_item.success);
        assert!(failed_item.cid.is_none());
        assert!(failed_item.error.as_deref().unwrap().contains("upload rejected"));

        let failed_article = records.get_article(&failing_id).await.unwrap().unwrap();
        assert_eq!(failed_article.status, ArticleStatus::Failed);
    }

    #[tokio::test]
    async fn skips_published_and_publishing_articles() {
        let draft = Article::new("Draft", "body", NOW);
        let mut published = Article::new("Published", "body", NOW);
        published.status = ArticleStatus::Published;
        let mut in_flight = Article::new("InFlight", "body", NOW);
        in_flight.status = ArticleStatus::Publishing;
        let mut failed = Article::new("Failed", "body", NOW);
        failed.status = ArticleStatus::Failed;

        let (_, usecase) = batch(
            vec![draft, published, in_flight, failed],
            Arc::new(FakeContentStore::new()),
        );
        let report = usecase.publish_all().await.unwrap();

        assert_eq!(report.published, 2);
        assert_eq!(report.failed, 0);
        let titles: Vec<_> = report.results.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["Draft", "Failed"]);
    }

    #[tokio::test]
    async fn empty_batch_is_a_zero_report() {
        let mut published = Article::new("Published", "body", NOW);
        published.status = ArticleStatus::Published;

        let (records, usecase) = batch(vec![published], Arc::new(FakeContentStore::new()));
        let report = usecase.publish_all().await.unwrap();

        assert_eq!(report.published, 0);
        assert_eq!(report.failed, 0);
        assert!(report.results.is_empty());
        // No record was touched
        assert_eq!(records.article_update_count(), 0);
    }
}
