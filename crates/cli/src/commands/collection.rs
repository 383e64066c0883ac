//! Collection commands: create, list, show, delete, membership, publish

use anyhow::{Context, Result, bail};
use permapress_domain::{Collection, RecordStore, SystemClock};
use permapress_domain::usecases::CollectionPublishUseCase;
use std::path::PathBuf;
use std::sync::Arc;

use crate::args::{CollectionArgs, CollectionCommands};
use crate::commands::{connect_node, effective_settings, open_store};
use crate::config::AppConfig;

pub async fn execute(args: CollectionArgs, config_path: Option<PathBuf>) -> Result<()> {
    let config = AppConfig::load(config_path.as_deref())?;

    match args.command {
        CollectionCommands::Create {
            name,
            description,
            author,
        } => create(&config, name, description, author).await,
        CollectionCommands::List { json } => list(&config, json).await,
        CollectionCommands::Show { id, json } => show(&config, id, json).await,
        CollectionCommands::Delete { id } => delete(&config, id).await,
        CollectionCommands::Add {
            collection_id,
            article_id,
        } => add(&config, collection_id, article_id).await,
        CollectionCommands::Remove {
            collection_id,
            article_id,
        } => remove(&config, collection_id, article_id).await,
        CollectionCommands::Publish { id } => publish(&config, id).await,
    }
}

async fn create(
    config: &AppConfig,
    name: String,
    description: Option<String>,
    author: Option<String>,
) -> Result<()> {
    let store = open_store(config).await?;
    let collection = Collection::new(name, description, author, time::OffsetDateTime::now_utc());
    store
        .create_collection(&collection)
        .await
        .context("Failed to save collection")?;

    println!("Created collection {} ({})", collection.id, collection.name);
    Ok(())
}

async fn list(config: &AppConfig, json: bool) -> Result<()> {
    let store = open_store(config).await?;
    let collections = store.list_collections().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&collections)?);
        return Ok(());
    }

    println!("Collections ({} found)", collections.len());
    for collection in &collections {
        println!(
            "{}  {}  ({} articles)",
            collection.id,
            collection.name,
            collection.article_ids.len()
        );
    }
    Ok(())
}

async fn show(config: &AppConfig, id: String, json: bool) -> Result<()> {
    let store = open_store(config).await?;
    let Some(collection) = store.get_collection(&id).await? else {
        bail!("Collection not found: {id}");
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&collection)?);
        return Ok(());
    }

    println!("ID: {}", collection.id);
    println!("Name: {}", collection.name);
    if let Some(description) = &collection.description {
        println!("Description: {description}");
    }
    if let Some(author) = &collection.author {
        println!("Author: {author}");
    }
    println!("Articles: {}", collection.article_ids.join(", "));
    if let Some(ipns_url) = &collection.ipns_url {
        println!("Permanent link: {ipns_url}");
    }
    Ok(())
}

async fn delete(config: &AppConfig, id: String) -> Result<()> {
    let store = open_store(config).await?;
    if store.delete_collection(&id).await? {
        println!("Deleted {id}");
        Ok(())
    } else {
        bail!("Collection not found: {id}");
    }
}

async fn add(config: &AppConfig, collection_id: String, article_id: String) -> Result<()> {
    let store = open_store(config).await?;
    let Some(mut collection) = store.get_collection(&collection_id).await? else {
        bail!("Collection not found: {collection_id}");
    };
    if store.get_article(&article_id).await?.is_none() {
        bail!("Article not found: {article_id}");
    }

    if collection.add_article(&article_id, time::OffsetDateTime::now_utc()) {
        store.update_collection(&collection).await?;
        println!("Added {article_id} to {}", collection.name);
    } else {
        println!("{article_id} is already in {}", collection.name);
    }
    Ok(())
}

async fn remove(config: &AppConfig, collection_id: String, article_id: String) -> Result<()> {
    let store = open_store(config).await?;
    let Some(mut collection) = store.get_collection(&collection_id).await? else {
        bail!("Collection not found: {collection_id}");
    };

    if collection.remove_article(&article_id, time::OffsetDateTime::now_utc()) {
        store.update_collection(&collection).await?;
        println!("Removed {article_id} from {}", collection.name);
    } else {
        println!("{article_id} is not in {}", collection.name);
    }
    Ok(())
}

async fn publish(config: &AppConfig, id: String) -> Result<()> {
    let store = open_store(config).await?;
    let settings = effective_settings(config, &store).await?;
    let node = connect_node(&settings);

    let usecase = CollectionPublishUseCase::new(
        Arc::clone(&node),
        node,
        store,
        Arc::new(SystemClock),
    );

    match usecase.publish(&id).await {
        Ok(outcome) => {
            println!("Published collection {}", outcome.collection.name);
            println!("CID: {}", outcome.cid);
            println!("URL: {}", outcome.url);
            match outcome.ipns_url {
                Some(ipns_url) => println!("Permanent link: {ipns_url}"),
                None => println!("Permanent link not updated (naming step failed; see logs)"),
            }
            Ok(())
        }
        Err(e) => bail!("Collection publish failed: {e}"),
    }
}
