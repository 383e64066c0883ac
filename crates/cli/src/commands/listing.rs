//! Default listing publish command

use anyhow::{Result, bail};
use permapress_domain::usecases::ListingPublishUseCase;
use std::path::PathBuf;
use std::sync::Arc;

use crate::args::{ListingArgs, ListingCommands};
use crate::commands::{connect_node, effective_settings, open_store};
use crate::config::AppConfig;

pub async fn execute(args: ListingArgs, config_path: Option<PathBuf>) -> Result<()> {
    match args.command {
        ListingCommands::Publish => publish(config_path).await,
    }
}

async fn publish(config_path: Option<PathBuf>) -> Result<()> {
    let config = AppConfig::load(config_path.as_deref())?;
    let store = open_store(&config).await?;
    let settings = effective_settings(&config, &store).await?;
    let node = connect_node(&settings);

    let usecase = ListingPublishUseCase::new(Arc::clone(&node), node, store);

    match usecase.publish().await {
        Ok(outcome) => {
            println!("Published article listing");
            println!("CID: {}", outcome.cid);
            println!("URL: {}", outcome.url);
            println!("Key: {}", outcome.key_name);
            println!("Permanent link: {}", outcome.ipns_url);
            Ok(())
        }
        Err(e) => bail!("Listing publish failed: {e}"),
    }
}
