//! Naming key commands

use anyhow::{Context, Result};
use permapress_domain::NameService;
use std::path::PathBuf;

use crate::args::{KeysArgs, KeysCommands};
use crate::commands::{connect_node, effective_settings, open_store};
use crate::config::AppConfig;

pub async fn execute(args: KeysArgs, config_path: Option<PathBuf>) -> Result<()> {
    let config = AppConfig::load(config_path.as_deref())?;
    let store = open_store(&config).await?;
    let settings = effective_settings(&config, &store).await?;
    let node = connect_node(&settings);

    match args.command {
        KeysCommands::List { json } => {
            let keys = node.list_keys().await.context("Failed to list keys")?;
            if json {
                println!("{}", serde_json::to_string_pretty(&keys)?);
            } else {
                println!("Naming keys ({} found)", keys.len());
                for key in &keys {
                    println!("{}  {}", key.name, key.id);
                }
            }
            Ok(())
        }
        KeysCommands::Create { name } => {
            let key = node
                .create_key(&name)
                .await
                .context("Failed to create key")?;
            println!("Created key {} ({})", key.name, key.id);
            println!("Permanent link: {}", node.public_url(&key.id));
            Ok(())
        }
    }
}
