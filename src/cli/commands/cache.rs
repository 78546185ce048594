use clap::{Args, Subcommand};

#[derive(Args)]
pub struct CacheCommands {
    #[command(subcommand)]
    pub command: CacheSubcommands,
}

#[derive(Subcommand)]
pub enum CacheSubcommands {
    /// Inspect the configured record types and write the metadata cache
    Init {
        /// Record types to fetch instead of the configured list
        #[arg(value_name = "TYPE")]
        types: Vec<String>,
    },
    /// Print the cached metadata
    Show,
}
