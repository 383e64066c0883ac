//! Settings commands

use anyhow::{Context, Result, bail};
use permapress_domain::RecordStore;
use std::path::PathBuf;

use crate::args::{SettingsArgs, SettingsCommands};
use crate::commands::{effective_settings, open_store};
use crate::config::AppConfig;

pub async fn execute(args: SettingsArgs, config_path: Option<PathBuf>) -> Result<()> {
    let config = AppConfig::load(config_path.as_deref())?;
    let store = open_store(&config).await?;

    match args.command {
        SettingsCommands::Show { json } => {
            let settings = effective_settings(&config, &store).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&settings)?);
            } else {
                println!("Gateway: {}", settings.gateway);
                println!("API endpoint: {}", settings.api_endpoint);
                if let Some(key) = &settings.ipns_key_name {
                    println!("Listing key: {key}");
                }
                if let Some(ipns_url) = &settings.ipns_url {
                    println!("Listing permanent link: {ipns_url}");
                }
            }
            Ok(())
        }
        SettingsCommands::Set {
            gateway,
            api_endpoint,
        } => {
            if gateway.is_none() && api_endpoint.is_none() {
                bail!("Nothing to change; pass --gateway or --api-endpoint");
            }

            let mut settings = store
                .get_settings()
                .await
                .context("Failed to read settings")?;
            if let Some(gateway) = gateway {
                settings.gateway = gateway;
            }
            if let Some(api_endpoint) = api_endpoint {
                settings.api_endpoint = api_endpoint;
            }
            store
                .save_settings(&settings)
                .await
                .context("Failed to save settings")?;

            println!("Settings saved");
            Ok(())
        }
    }
}
