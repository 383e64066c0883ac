//! Batch publish command

use anyhow::Result;
use permapress_domain::SystemClock;
use permapress_domain::usecases::{BatchPublishUseCase, PublishUseCase};
use std::path::PathBuf;
use std::sync::Arc;

use crate::args::PublishAllArgs;
use crate::commands::{connect_node, effective_settings, open_store};
use crate::config::AppConfig;

pub async fn execute(args: PublishAllArgs, config_path: Option<PathBuf>) -> Result<()> {
    let config = AppConfig::load(config_path.as_deref())?;
    let store = open_store(&config).await?;
    let settings = effective_settings(&config, &store).await?;
    let node = connect_node(&settings);

    let publisher = PublishUseCase::new(
        Arc::clone(&node),
        node,
        Arc::clone(&store),
        Arc::new(SystemClock),
    );
    let batch = BatchPublishUseCase::new(publisher, store);

    let report = batch.publish_all().await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    for item in &report.results {
        if item.success {
            println!(
                "ok    {}  {}  cid={}",
                item.article_id,
                item.title,
                item.cid.as_deref().unwrap_or("-")
            );
        } else {
            println!(
                "fail  {}  {}  {}",
                item.article_id,
                item.title,
                item.error.as_deref().unwrap_or("unknown error")
            );
        }
    }
    println!("Published: {}, failed: {}", report.published, report.failed);
    Ok(())
}
