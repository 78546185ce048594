use super::Context;
use anyhow::Result;
use log::info;

pub async fn delete_command(ctx: &Context, object: String, keys: Vec<String>) -> Result<()> {
    info!("Deleting {:?} from {}", keys, object);

    let mut client = ctx.connect().await?;
    client.delete(&object, &keys).await?;

    println!("Deleted {} {} record(s)", keys.len(), object);
    Ok(())
}
