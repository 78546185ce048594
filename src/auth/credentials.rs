use crate::api::{ControlCredentials, LoginCredentials};
use anyhow::{Context, Result};
use log::info;
use std::collections::HashMap;
use std::path::Path;

pub const SENDER_ID: &str = "INTACCT_SENDER_ID";
pub const SENDER_PASSWORD: &str = "INTACCT_SENDER_PASSWORD";
pub const COMPANY_ID: &str = "INTACCT_COMPANY_ID";
pub const USER_ID: &str = "INTACCT_USER_ID";
pub const USER_PASSWORD: &str = "INTACCT_USER_PASSWORD";
pub const CONTROL_ID: &str = "INTACCT_CONTROL_ID";
pub const UNIQUE_ID: &str = "INTACCT_UNIQUE_ID";
pub const DTD_VERSION: &str = "INTACCT_DTD_VERSION";

/// Sender and user credentials for one gateway client
#[derive(Debug, Clone)]
pub struct Credentials {
    pub control: ControlCredentials,
    pub login: LoginCredentials,
}

impl Credentials {
    pub fn from_env() -> Result<Credentials> {
        info!("Importing credentials from environment variables");
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
            .context("Incomplete credentials in environment")
    }

    /// Read a `.env` file without touching the process environment
    pub fn from_env_file(path: &Path) -> Result<Credentials> {
        info!("Importing credentials from .env file: {:?}", path);

        if !path.exists() {
            anyhow::bail!("Environment file not found: {:?}", path);
        }

        let values = dotenvy::from_path_iter(path)
            .with_context(|| format!("Failed to load .env file {:?}", path))?
            .collect::<std::result::Result<HashMap<String, String>, _>>()
            .with_context(|| format!("Failed to parse .env file {:?}", path))?;

        Self::from_lookup(|key| values.get(key).cloned())
            .with_context(|| format!("Incomplete credentials in .env file {:?}", path))
    }

    /// Build from any key lookup; required keys must be present and non-empty
    pub fn from_lookup<F>(lookup: F) -> Result<Credentials>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let require = |key: &str| get(key).with_context(|| format!("{} not set", key));

        let control = ControlCredentials {
            sender_id: Some(require(SENDER_ID)?),
            sender_password: Some(require(SENDER_PASSWORD)?),
            control_id: get(CONTROL_ID),
            unique_id: get(UNIQUE_ID),
            dtd_version: get(DTD_VERSION),
        };
        let login = LoginCredentials {
            company_id: Some(require(COMPANY_ID)?),
            user_id: Some(require(USER_ID)?),
            user_password: Some(require(USER_PASSWORD)?),
        };

        Ok(Credentials { control, login })
    }
}
