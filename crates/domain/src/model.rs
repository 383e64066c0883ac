//! Domain models and value objects

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

/// Lifecycle status of an article
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ArticleStatus {
    /// Saved locally, not yet published (or edited since the last publish)
    #[default]
    Draft,
    /// A publish attempt is in flight
    Publishing,
    /// Content is stored and addressable
    Published,
    /// The last publish attempt failed
    Failed,
}

impl ArticleStatus {
    /// Whether a publish attempt may start from this state.
    /// Published and Publishing articles are never force-republished.
    pub fn is_publishable(self) -> bool {
        matches!(self, ArticleStatus::Draft | ArticleStatus::Failed)
    }
}

impl std::fmt::Display for ArticleStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ArticleStatus::Draft => "draft",
            ArticleStatus::Publishing => "publishing",
            ArticleStatus::Published => "published",
            ArticleStatus::Failed => "failed",
        };
        f.write_str(s)
    }
}

/// A user-authored document under lifecycle management
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    /// Opaque unique ID
    pub id: String,
    /// Document title
    pub title: String,
    /// Source markup text (markdown)
    pub body: String,
    /// Lifecycle status
    pub status: ArticleStatus,
    /// Content address of the last published page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cid: Option<String>,
    /// Gateway URL of the last published page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// When the article was last published
    #[serde(
        with = "time::serde::rfc3339::option",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub published_at: Option<OffsetDateTime>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
    /// Naming key owned by this article; assigned on first publish and
    /// never changed afterwards (stability of the permanent link)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ipns_key_name: Option<String>,
    /// Resolvable identifier of the naming key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ipns_id: Option<String>,
    /// Public URL of the mutable pointer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ipns_url: Option<String>,
    /// Message from the last failed publish attempt
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl Article {
    /// Create a new draft article
    pub fn new(title: impl Into<String>, body: impl Into<String>, now: OffsetDateTime) -> Self {
        Self {
            id: Uuid::new_v4().simple().to_string(),
            title: title.into(),
            body: body.into(),
            status: ArticleStatus::Draft,
            cid: None,
            url: None,
            published_at: None,
            created_at: now,
            updated_at: now,
            ipns_key_name: None,
            ipns_id: None,
            ipns_url: None,
            error_message: None,
        }
    }

    /// Apply an edit to title and/or body. Any content change resets the
    /// status to Draft: the published page no longer matches the source.
    pub fn apply_edit(
        &mut self,
        title: Option<String>,
        body: Option<String>,
        now: OffsetDateTime,
    ) {
        if let Some(title) = title {
            self.title = title;
        }
        if let Some(body) = body {
            self.body = body;
        }
        self.status = ArticleStatus::Draft;
        self.updated_at = now;
    }
}

/// A curated collection of articles published as a single listing page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collection {
    /// Opaque unique ID
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// Member article IDs. Members need not be published; only published
    /// members with a content address appear on the rendered page.
    #[serde(default)]
    pub article_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ipns_key_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ipns_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ipns_url: Option<String>,
    #[serde(
        with = "time::serde::rfc3339::option",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub last_published_at: Option<OffsetDateTime>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl Collection {
    pub fn new(
        name: impl Into<String>,
        description: Option<String>,
        author: Option<String>,
        now: OffsetDateTime,
    ) -> Self {
        Self {
            id: Uuid::new_v4().simple().to_string(),
            name: name.into(),
            description,
            author,
            article_ids: Vec::new(),
            ipns_key_name: None,
            ipns_id: None,
            ipns_url: None,
            last_published_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Add a member article. Idempotent: adding an existing member is a no-op.
    pub fn add_article(&mut self, article_id: &str, now: OffsetDateTime) -> bool {
        if self.article_ids.iter().any(|id| id == article_id) {
            return false;
        }
        self.article_ids.push(article_id.to_string());
        self.updated_at = now;
        true
    }

    /// Remove a member article. Returns whether it was present.
    pub fn remove_article(&mut self, article_id: &str, now: OffsetDateTime) -> bool {
        let before = self.article_ids.len();
        self.article_ids.retain(|id| id != article_id);
        if self.article_ids.len() != before {
            self.updated_at = now;
            true
        } else {
            false
        }
    }
}

/// Process-wide configuration, lazily materialized with defaults on first
/// read and overwritten wholesale on save
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Gateway base for content addresses, e.g. `https://ipfs.io/ipfs/`
    pub gateway: String,
    /// Node RPC endpoint, e.g. `http://127.0.0.1:5001`
    pub api_endpoint: String,
    /// Naming key used for the default article listing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ipns_key_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ipns_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ipns_url: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            gateway: "https://ipfs.io/ipfs/".to_string(),
            api_endpoint: "http://127.0.0.1:5001".to_string(),
            ipns_key_name: None,
            ipns_id: None,
            ipns_url: None,
        }
    }
}

/// A named signing key registered with the name service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NamingKey {
    pub name: String,
    pub id: String,
}

/// A successfully established "key name -> content address" pointer
#[derive(Debug, Clone)]
pub struct NamingBinding {
    pub key_name: String,
    pub ipns_id: String,
    pub ipns_url: String,
}

/// Result of a successful single-article publish
#[derive(Debug, Clone)]
pub struct PublishOutcome {
    pub cid: String,
    pub url: String,
    /// Present only when the naming step succeeded on this attempt
    pub ipns_url: Option<String>,
    /// The article as persisted after the publish
    pub article: Article,
}

/// Result of a successful collection publish
#[derive(Debug, Clone)]
pub struct CollectionOutcome {
    pub cid: String,
    pub url: String,
    pub ipns_url: Option<String>,
    pub collection: Collection,
}

/// Result of publishing the default article listing
#[derive(Debug, Clone)]
pub struct ListingOutcome {
    pub cid: String,
    pub url: String,
    pub key_name: String,
    pub ipns_url: String,
}

/// Per-item entry in a batch publish report
#[derive(Debug, Clone, Serialize)]
pub struct BatchItem {
    pub article_id: String,
    pub title: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ipns_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Aggregated result of a batch publish. The batch itself always succeeds;
/// per-item failures are recorded here, not propagated.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchReport {
    pub published: usize,
    pub failed: usize,
    pub results: Vec<BatchItem>,
}
