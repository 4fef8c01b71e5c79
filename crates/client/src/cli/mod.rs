use clap::{Parser, Subcommand, ValueEnum};

use quarry::entity::EntityKind;
use quarry_client::config::ClientConfig;

mod browse;
mod delete;
mod list;
mod login;

#[derive(Debug, Parser)]
#[command(name = "quarry", about = "Browse and edit the Quarry catalog", long_about = None)]
pub(crate) struct Cli {
    #[command(flatten)]
    config: ClientConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Show browsable collections, or drill into one
    Browse(browse::BrowseArgs),

    /// Print one page of an entity type
    List(list::ListArgs),

    /// Sign in and print a token for QUARRY_TOKEN
    Login(login::LoginArgs),

    /// Delete an entity (needs QUARRY_TOKEN)
    Delete(delete::DeleteArgs),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Browse(args) => browse::run(&self.config, args).await,
            Commands::List(args) => list::run(&self.config, args).await,
            Commands::Login(args) => login::run(&self.config, args).await,
            Commands::Delete(args) => delete::run(&self.config, args).await,
        }
    }
}

/// Entity type argument.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub(crate) enum Kind {
    Collections,
    Products,
    Variants,
    Gallery,
}

impl From<Kind> for EntityKind {
    fn from(kind: Kind) -> Self {
        match kind {
            Kind::Collections => EntityKind::Collection,
            Kind::Products => EntityKind::Product,
            Kind::Variants => EntityKind::Variant,
            Kind::Gallery => EntityKind::GalleryImage,
        }
    }
}
