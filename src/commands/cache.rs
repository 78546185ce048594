use super::Context;
use anyhow::{Context as _, Result};
use intacct::{MetadataCache, SchemaRegistry};
use log::info;

pub async fn init_command(ctx: &Context, types: Vec<String>) -> Result<()> {
    let types = if types.is_empty() {
        ctx.config.cache_objects.clone()
    } else {
        types
    };
    let path = ctx.config.cache_path()?;
    info!("Initializing metadata cache at {:?} for {:?}", path, types);

    let mut client = ctx.connect().await?;
    let mut cache = MetadataCache::new(path);
    cache
        .initialize(&mut client, &types)
        .await
        .context("Failed to initialize metadata cache")?;

    println!(
        "Cached {} of {} record type(s) in {:?}",
        cache.len(),
        types.len(),
        cache.path()
    );
    Ok(())
}

pub fn show_command(ctx: &Context) -> Result<()> {
    let path = ctx.config.cache_path()?;
    let cache = MetadataCache::load(&path)
        .with_context(|| format!("Failed to load metadata cache {:?}", path))?;

    if cache.is_empty() {
        println!("Metadata cache {:?} is empty. Run 'intacct-cli cache init' first.", path);
        return Ok(());
    }
    print!("{}", cache.dump());

    let registry = SchemaRegistry::from_cache(&cache);
    println!();
    println!("Record types:");
    for name in registry.type_names() {
        if let Some(schema) = registry.get(name) {
            println!("  {} ({} fields)", name, schema.root.leaf_count());
        }
    }
    Ok(())
}
