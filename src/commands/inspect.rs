use super::Context;
use anyhow::Result;
use intacct::InspectTarget;
use log::info;

pub async fn inspect_command(
    ctx: &Context,
    object: Option<String>,
    name: Option<String>,
    detail: bool,
) -> Result<()> {
    let target = InspectTarget::from_args(object.as_deref(), name.as_deref())?;
    info!("Inspecting {:?} (detail: {})", target, detail);

    let mut client = ctx.connect().await?;
    let data = client.inspect(target, detail).await?;
    println!("{}", data.to_pretty_string()?);
    Ok(())
}
