use clap::Args;

#[derive(Args)]
pub struct CreateArgs {
    /// Record type, canonical name or cache alias
    pub record_type: String,
    /// Field assignments as KEY=VALUE; dotted keys address nested groups
    #[arg(value_name = "KEY=VALUE", required = true)]
    pub values: Vec<String>,
    /// Print the request payload without sending it
    #[arg(long)]
    pub dry_run: bool,
}
