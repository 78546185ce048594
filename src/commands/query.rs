use super::Context;
use anyhow::Result;
use intacct::ReadByQuery;
use log::{debug, info};

pub async fn query_command(
    ctx: &Context,
    object: String,
    query: String,
    fields: String,
    page_size: Option<u32>,
    pretty: bool,
) -> Result<()> {
    info!("Querying {} where '{}'", object, query);

    let mut request = ReadByQuery::new(object).query(query).fields(fields);
    if let Some(size) = page_size {
        request = request.page_size(size);
    }

    let mut client = ctx.connect().await?;
    let result = client.read_by_query(request).await?;
    debug!("Query returned {} records in {} page(s)", result.len(), result.pages);

    let element = result.to_element();
    if pretty {
        println!("{}", element.to_pretty_string()?);
    } else {
        println!("{}", element.to_xml_string()?);
    }
    eprintln!("{} record(s)", result.len());
    Ok(())
}
