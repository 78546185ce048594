use super::commands::{
    CacheCommands, CreateArgs, DeleteArgs, InspectArgs, QueryArgs,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "intacct-cli")]
#[command(about = "A CLI tool for the Intacct XML gateway")]
pub struct Cli {
    /// Establish an API session before running the command
    #[arg(long, global = true)]
    pub session: bool,

    /// Read credentials from this .env file instead of the environment
    #[arg(long, global = true, value_name = "PATH")]
    pub env_file: Option<PathBuf>,

    /// Use this config file instead of the default location
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Metadata cache management
    Cache(CacheCommands),
    /// Inspect object definitions
    Inspect(InspectArgs),
    /// Run a readByQuery and print every page
    Query(QueryArgs),
    /// Delete records by key
    Delete(DeleteArgs),
    /// Create one record from key=value pairs
    Create(CreateArgs),
}
