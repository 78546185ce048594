use clap::Args;

#[derive(Args)]
pub struct QueryArgs {
    /// Object to query, e.g. VENDOR
    pub object: String,
    /// Filter expression, e.g. "STATUS = 'active'"
    #[arg(short, long, default_value = "")]
    pub query: String,
    /// Comma separated field list
    #[arg(short, long, default_value = "*")]
    pub fields: String,
    /// Records per page; out of range values fall back to the default
    #[arg(short, long)]
    pub page_size: Option<u32>,
    /// Pretty print the output
    #[arg(long)]
    pub pretty: bool,
}
