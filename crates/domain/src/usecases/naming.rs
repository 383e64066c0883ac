//! Naming-key lifecycle: ensure a key exists, then bind a content address
//! under it. Shared by the article, collection, and listing publish paths.

use crate::model::NamingBinding;
use crate::ports::{NameService, NameServiceError};

pub const ARTICLE_KEY_PREFIX: &str = "article";
pub const COLLECTION_KEY_PREFIX: &str = "collection";
/// Key name for the default article listing when settings carry none
pub const DEFAULT_LISTING_KEY: &str = "article-list";

/// Deterministic default key name for an owner ID: the prefix plus the
/// first 8 characters of the ID. Used only on first publish; afterwards
/// the owner's stored key name wins.
pub fn derive_key_name(prefix: &str, id: &str) -> String {
    let short: String = id.chars().take(8).collect();
    format!("{prefix}-{short}")
}

/// Ensure a naming key exists and bind `cid` under it.
///
/// The ensure step is look-before-create: listing keys and creating only
/// on absence, so calling this twice with the same key name never creates
/// a second key. Rebinding simply supersedes the previous pointer; the
/// previously bound address stays fetchable by its own cid.
///
/// Errors from any sub-step propagate as `NameServiceError`; whether that
/// is fatal is the caller's policy.
pub async fn ensure_and_bind<N>(
    name_service: &N,
    key_name: &str,
    cid: &str,
) -> Result<NamingBinding, NameServiceError>
where
    N: NameService + ?Sized,
{
    let keys = name_service.list_keys().await?;
    let key = match keys.into_iter().find(|k| k.name == key_name) {
        Some(key) => key,
        None => {
            tracing::info!(key_name = %key_name, "Creating naming key");
            name_service.create_key(key_name).await?
        }
    };

    let bound = name_service.bind(cid, key_name).await?;
    tracing::debug!(name = %bound.name, value = %bound.value, "Bound content address");

    let ipns_url = name_service.public_url(&key.id);
    Ok(NamingBinding {
        key_name: key.name,
        ipns_id: key.id,
        ipns_url,
    })
}
