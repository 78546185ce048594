use anyhow::Result;
use clap::Parser;
use intacct::config::Config;
use log::{debug, info};

mod cli;
mod commands;

use cli::Cli;
use cli::Commands;
use cli::commands::CacheSubcommands;
use commands::Context;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logger to file (truncate on each run)
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open("intacct-cli.log")?;
    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .init();

    let cli = Cli::parse();
    info!("Starting intacct-cli");

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    debug!("Gateway: {}", config.gateway_url);

    let ctx = Context {
        config,
        env_file: cli.env_file,
        session: cli.session,
    };

    match cli.command {
        Commands::Cache(cache) => match cache.command {
            CacheSubcommands::Init { types } => commands::cache::init_command(&ctx, types).await,
            CacheSubcommands::Show => commands::cache::show_command(&ctx),
        },
        Commands::Inspect(args) => {
            commands::inspect::inspect_command(&ctx, args.object, args.name, args.detail).await
        }
        Commands::Query(args) => {
            commands::query::query_command(
                &ctx,
                args.object,
                args.query,
                args.fields,
                args.page_size,
                args.pretty,
            )
            .await
        }
        Commands::Delete(args) => {
            commands::delete::delete_command(&ctx, args.object, args.keys).await
        }
        Commands::Create(args) => {
            commands::create::create_command(&ctx, args.record_type, args.values, args.dry_run)
                .await
        }
    }
}
