use clap::Args;

#[derive(Args)]
pub struct DeleteArgs {
    /// Object the keys belong to
    pub object: String,
    /// Record keys to delete
    #[arg(required = true)]
    pub keys: Vec<String>,
}
