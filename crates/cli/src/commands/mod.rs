//! Command implementations

pub mod article;
pub mod collection;
pub mod config;
pub mod doctor;
pub mod keys;
pub mod listing;
pub mod publish_all;
pub mod settings;

use anyhow::{Context, Result};
use permapress_adapters::KuboNode;
use permapress_adapters::records::JsonRecordStore;
use permapress_domain::{RecordStore, Settings};
use std::sync::Arc;

use crate::config::AppConfig;

/// Open the record store under the configured data directory.
pub(crate) async fn open_store(config: &AppConfig) -> Result<Arc<JsonRecordStore>> {
    let store = JsonRecordStore::new(&config.general.data_dir)
        .await
        .with_context(|| {
            format!(
                "Failed to open record store at {}",
                config.general.data_dir.display()
            )
        })?;
    Ok(Arc::new(store))
}

/// Settings for this invocation: the persisted record, with config-file /
/// environment overrides applied on top.
pub(crate) async fn effective_settings(
    config: &AppConfig,
    store: &JsonRecordStore,
) -> Result<Settings> {
    let mut settings = store
        .get_settings()
        .await
        .context("Failed to read settings")?;
    if let Some(gateway) = &config.ipfs.gateway {
        settings.gateway = gateway.clone();
    }
    if let Some(api_endpoint) = &config.ipfs.api_endpoint {
        settings.api_endpoint = api_endpoint.clone();
    }
    Ok(settings)
}

/// Build the node client from the effective settings.
pub(crate) fn connect_node(settings: &Settings) -> Arc<KuboNode> {
    Arc::new(KuboNode::new(&settings.api_endpoint, &settings.gateway))
}
