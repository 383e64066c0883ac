//! Article commands: save, edit, list, show, delete, publish

use anyhow::{Context, Result, bail};
use permapress_domain::{Article, RecordStore, SystemClock};
use permapress_domain::usecases::PublishUseCase;
use std::path::PathBuf;
use std::sync::Arc;

use crate::args::{ArticleArgs, ArticleCommands};
use crate::commands::{connect_node, effective_settings, open_store};
use crate::config::AppConfig;

pub async fn execute(args: ArticleArgs, config_path: Option<PathBuf>) -> Result<()> {
    let config = AppConfig::load(config_path.as_deref())?;

    match args.command {
        ArticleCommands::New { title, body, file } => new_article(&config, title, body, file).await,
        ArticleCommands::Edit {
            id,
            title,
            body,
            file,
        } => edit_article(&config, id, title, body, file).await,
        ArticleCommands::List { json } => list_articles(&config, json).await,
        ArticleCommands::Show { id, json } => show_article(&config, id, json).await,
        ArticleCommands::Delete { id } => delete_article(&config, id).await,
        ArticleCommands::Publish { id } => publish_article(&config, id).await,
    }
}

async fn read_body(body: Option<String>, file: Option<PathBuf>) -> Result<Option<String>> {
    match (body, file) {
        (Some(body), None) => Ok(Some(body)),
        (None, Some(path)) => {
            let text = tokio::fs::read_to_string(&path)
                .await
                .with_context(|| format!("Failed to read {}", path.display()))?;
            Ok(Some(text))
        }
        (None, None) => Ok(None),
        (Some(_), Some(_)) => unreachable!("clap conflicts_with"),
    }
}

async fn new_article(
    config: &AppConfig,
    title: String,
    body: Option<String>,
    file: Option<PathBuf>,
) -> Result<()> {
    let Some(body) = read_body(body, file).await? else {
        bail!("Provide the article body with --body or --file");
    };

    let store = open_store(config).await?;
    let article = Article::new(title, body, time::OffsetDateTime::now_utc());
    store
        .create_article(&article)
        .await
        .context("Failed to save article")?;

    println!("Saved draft {} ({})", article.id, article.title);
    Ok(())
}

async fn edit_article(
    config: &AppConfig,
    id: String,
    title: Option<String>,
    body: Option<String>,
    file: Option<PathBuf>,
) -> Result<()> {
    let body = read_body(body, file).await?;
    if title.is_none() && body.is_none() {
        bail!("Nothing to change; pass --title, --body, or --file");
    }

    let store = open_store(config).await?;
    let Some(mut article) = store.get_article(&id).await? else {
        bail!("Article not found: {id}");
    };

    article.apply_edit(title, body, time::OffsetDateTime::now_utc());
    store
        .update_article(&article)
        .await
        .context("Failed to update article")?;

    println!("Updated {} (back to draft)", article.id);
    Ok(())
}

async fn list_articles(config: &AppConfig, json: bool) -> Result<()> {
    let store = open_store(config).await?;
    let articles = store.list_articles().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&articles)?);
        return Ok(());
    }

    println!("Articles ({} found)", articles.len());
    for article in &articles {
        println!("{}  [{}]  {}", article.id, article.status, article.title);
    }
    Ok(())
}

async fn show_article(config: &AppConfig, id: String, json: bool) -> Result<()> {
    let store = open_store(config).await?;
    let Some(article) = store.get_article(&id).await? else {
        bail!("Article not found: {id}");
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&article)?);
        return Ok(());
    }

    println!("ID: {}", article.id);
    println!("Title: {}", article.title);
    println!("Status: {}", article.status);
    if let Some(cid) = &article.cid {
        println!("CID: {cid}");
    }
    if let Some(url) = &article.url {
        println!("URL: {url}");
    }
    if let Some(ipns_url) = &article.ipns_url {
        println!("Permanent link: {ipns_url}");
    }
    if let Some(error) = &article.error_message {
        println!("Last error: {error}");
    }
    Ok(())
}

async fn delete_article(config: &AppConfig, id: String) -> Result<()> {
    let store = open_store(config).await?;
    if store.delete_article(&id).await? {
        println!("Deleted {id}");
        Ok(())
    } else {
        bail!("Article not found: {id}");
    }
}

async fn publish_article(config: &AppConfig, id: String) -> Result<()> {
    let store = open_store(config).await?;
    let settings = effective_settings(config, &store).await?;
    let node = connect_node(&settings);

    let usecase = PublishUseCase::new(
        Arc::clone(&node),
        node,
        Arc::clone(&store),
        Arc::new(SystemClock),
    );

    match usecase.publish(&id).await {
        Ok(outcome) => {
            println!("Published {id}");
            println!("CID: {}", outcome.cid);
            println!("URL: {}", outcome.url);
            match outcome.ipns_url {
                Some(ipns_url) => println!("Permanent link: {ipns_url}"),
                None => println!("Permanent link not updated (naming step failed; see logs)"),
            }
            Ok(())
        }
        Err(e) => bail!("Publish failed: {e}"),
    }
}
