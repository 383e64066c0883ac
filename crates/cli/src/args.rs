//! CLI argument definitions

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// permapress: publish local articles to a content-addressed network and
/// keep stable "latest version" pointers for them
#[derive(Parser, Debug)]
#[command(name = "permapress")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage and publish articles
    Article(ArticleArgs),

    /// Publish every draft or failed article in one batch
    PublishAll(PublishAllArgs),

    /// Publish the index page of all published articles
    Listing(ListingArgs),

    /// Manage and publish curated article collections
    Collection(CollectionArgs),

    /// Manage naming keys on the node
    Keys(KeysArgs),

    /// Show or change persisted settings
    Settings(SettingsArgs),

    /// Configuration file management
    Config(ConfigArgs),

    /// Validate configuration and check node availability
    Doctor(DoctorArgs),
}

#[derive(Args, Debug)]
pub struct ArticleArgs {
    #[command(subcommand)]
    pub command: ArticleCommands,
}

#[derive(Subcommand, Debug)]
pub enum ArticleCommands {
    /// Save a new draft article
    New {
        #[arg(long)]
        title: String,

        /// Markdown body text
        #[arg(long, conflicts_with = "file")]
        body: Option<String>,

        /// File containing the markdown body
        #[arg(long, conflicts_with = "body")]
        file: Option<PathBuf>,
    },

    /// Edit an article; any change resets it to draft
    Edit {
        id: String,

        #[arg(long)]
        title: Option<String>,

        #[arg(long, conflicts_with = "file")]
        body: Option<String>,

        #[arg(long, conflicts_with = "body")]
        file: Option<PathBuf>,
    },

    /// List all articles
    List {
        #[arg(long)]
        json: bool,
    },

    /// Show one article
    Show {
        id: String,

        #[arg(long)]
        json: bool,
    },

    /// Delete an article
    Delete { id: String },

    /// Publish an article
    Publish { id: String },
}

#[derive(Args, Debug)]
pub struct PublishAllArgs {
    /// Output the batch report as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct ListingArgs {
    #[command(subcommand)]
    pub command: ListingCommands,
}

#[derive(Subcommand, Debug)]
pub enum ListingCommands {
    /// Publish the article index under the settings-owned naming key
    Publish,
}

#[derive(Args, Debug)]
pub struct CollectionArgs {
    #[command(subcommand)]
    pub command: CollectionCommands,
}

#[derive(Subcommand, Debug)]
pub enum CollectionCommands {
    /// Create a collection
    Create {
        #[arg(long)]
        name: String,

        #[arg(long)]
        description: Option<String>,

        #[arg(long)]
        author: Option<String>,
    },

    /// List all collections
    List {
        #[arg(long)]
        json: bool,
    },

    /// Show one collection
    Show {
        id: String,

        #[arg(long)]
        json: bool,
    },

    /// Delete a collection
    Delete { id: String },

    /// Add an article to a collection
    Add {
        collection_id: String,
        article_id: String,
    },

    /// Remove an article from a collection
    Remove {
        collection_id: String,
        article_id: String,
    },

    /// Publish the collection's listing page
    Publish { id: String },
}

#[derive(Args, Debug)]
pub struct KeysArgs {
    #[command(subcommand)]
    pub command: KeysCommands,
}

#[derive(Subcommand, Debug)]
pub enum KeysCommands {
    /// List naming keys registered on the node
    List {
        #[arg(long)]
        json: bool,
    },

    /// Create a naming key
    Create { name: String },
}

#[derive(Args, Debug)]
pub struct SettingsArgs {
    #[command(subcommand)]
    pub command: SettingsCommands,
}

#[derive(Subcommand, Debug)]
pub enum SettingsCommands {
    /// Show the effective settings
    Show {
        #[arg(long)]
        json: bool,
    },

    /// Update persisted settings
    Set {
        #[arg(long)]
        gateway: Option<String>,

        #[arg(long)]
        api_endpoint: Option<String>,
    },
}

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Generate example configuration file
    Init {
        /// Path to write config file
        #[arg(long, default_value = "./config.toml")]
        path: PathBuf,

        /// Overwrite existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Args, Debug)]
pub struct DoctorArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}
