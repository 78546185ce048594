use clap::{ArgGroup, Args};

#[derive(Args)]
#[command(group(ArgGroup::new("target").required(true).args(["object", "name"])))]
pub struct InspectArgs {
    /// Integration object name, or `*` for all objects
    #[arg(long)]
    pub object: Option<String>,
    /// Record name, e.g. `User`
    #[arg(long)]
    pub name: Option<String>,
    /// Request field level detail
    #[arg(short, long)]
    pub detail: bool,
}
