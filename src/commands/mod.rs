pub mod cache;
pub mod create;
pub mod delete;
pub mod inspect;
pub mod query;

use anyhow::{Context as _, Result};
use intacct::IntacctClient;
use intacct::auth::Credentials;
use intacct::config::Config;
use log::info;
use std::path::PathBuf;

/// Settings shared by every command
pub struct Context {
    pub config: Config,
    pub env_file: Option<PathBuf>,
    pub session: bool,
}

impl Context {
    pub fn credentials(&self) -> Result<Credentials> {
        match &self.env_file {
            Some(path) => Credentials::from_env_file(path),
            None => Credentials::from_env(),
        }
    }

    /// Build a gateway client, opening an API session when `--session` was given
    pub async fn connect(&self) -> Result<IntacctClient> {
        let credentials = self.credentials()?;
        let mut client = IntacctClient::from_config(&self.config, &credentials)
            .context("Failed to create gateway client")?;

        if self.session {
            client
                .get_api_session()
                .await
                .context("Failed to establish API session")?;
            info!("Using session endpoint {}", client.session().base_url());
        }
        Ok(client)
    }
}
