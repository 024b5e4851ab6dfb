pub mod auth;
pub mod people;
pub mod skill;
pub mod timeoff;

use crate::auth::{CredentialResolver, EnvSource};
use crate::client::{ApiClient, BASE_URL_ENV, DEFAULT_BASE_URL};
use crate::config::ConfigStore;
use crate::output::{OutputOptions, format_error};
use crate::spinner::SpinnerSettings;
use anyhow::Result;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    /// A required id argument was empty; raised before any request.
    #[error("{}", format_error("MISSING_ID", .0, &[]))]
    MissingId(&'static str),
}

/// Everything a command needs besides its own arguments.
pub struct AppContext<'a> {
    pub env: &'a dyn EnvSource,
    pub base_url: Option<String>,
    pub no_spinner: bool,
}

impl AppContext<'_> {
    pub fn config_store(&self) -> Result<ConfigStore> {
        ConfigStore::from_env(self.env)
    }

    /// `--base-url`, then `HIBOB_BASE_URL`, then the public API.
    pub fn base_url(&self) -> String {
        self.base_url
            .clone()
            .or_else(|| self.env.var(BASE_URL_ENV).filter(|v| !v.is_empty()))
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
    }

    /// Authenticated client; fails with a missing-credential error before any
    /// network traffic.
    pub fn client(&self, output: &OutputOptions) -> Result<ApiClient> {
        let store = self.config_store()?;
        let credentials = CredentialResolver::new(self.env, &store).credentials()?;
        let spinner =
            SpinnerSettings::resolve(self.no_spinner, output.is_machine_readable(), self.env);
        let base_url = self.base_url();
        debug!(%base_url, spinner = spinner.enabled, "building API client");
        ApiClient::new(&base_url, credentials, spinner)
    }
}

/// Reject blank ids with a `MISSING_ID` error.
pub fn require_id<'a>(id: &'a str, message: &'static str) -> Result<&'a str, CommandError> {
    let trimmed = id.trim();
    if trimmed.is_empty() {
        Err(CommandError::MissingId(message))
    } else {
        Ok(trimmed)
    }
}
