use super::Context;
use anyhow::{Context as _, Result};
use intacct::{MetadataCache, SchemaRegistry};
use log::{info, warn};

/// Split `KEY=VALUE`; the value may itself contain `=`
pub fn parse_assignment(raw: &str) -> Result<(String, String)> {
    let (key, value) = raw
        .split_once('=')
        .with_context(|| format!("Expected KEY=VALUE, got '{}'", raw))?;
    let key = key.trim();
    if key.is_empty() {
        anyhow::bail!("Missing field name in '{}'", raw);
    }
    Ok((key.to_string(), value.to_string()))
}

pub async fn create_command(
    ctx: &Context,
    record_type: String,
    values: Vec<String>,
    dry_run: bool,
) -> Result<()> {
    let path = ctx.config.cache_path()?;
    let cache = MetadataCache::load(&path)
        .with_context(|| format!("Failed to load metadata cache {:?}", path))?;
    let registry = SchemaRegistry::from_cache(&cache);

    let mut record = registry
        .shape(&record_type)
        .with_context(|| format!("Run 'intacct-cli cache init' to fetch '{}'", record_type))?
        .instantiate(Vec::<(String, intacct::Value)>::new())?;

    for raw in &values {
        let (key, value) = parse_assignment(raw)?;
        record.set_path(&key, value)?;
    }

    let missing = record.missing_required();
    if !missing.is_empty() {
        warn!("Required fields not set: {}", missing.join(", "));
        eprintln!("Warning: required fields not set: {}", missing.join(", "));
    }

    if dry_run {
        println!("{}", record.to_wire_format().to_pretty_string()?);
        return Ok(());
    }

    info!("Creating {} record", record.type_name());
    let mut client = ctx.connect().await?;
    let response = client.create(vec![record]).await?;
    match response.result().and_then(|r| r.find("data")) {
        Some(data) => println!("{}", data.to_pretty_string()?),
        None => println!("Created {} record", record_type),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_assignment() {
        assert_eq!(
            parse_assignment("CONTACTINFO.EMAIL1=a@b.c").unwrap(),
            ("CONTACTINFO.EMAIL1".to_string(), "a@b.c".to_string())
        );
        assert_eq!(
            parse_assignment("NOTE=x=y").unwrap(),
            ("NOTE".to_string(), "x=y".to_string())
        );
        assert_eq!(parse_assignment("NAME=").unwrap().1, "");
        assert!(parse_assignment("NAME").is_err());
        assert!(parse_assignment("=x").is_err());
    }
}
