// bob - CLI for the HiBob HR API
// Copyright (C) 2024 Mathias Uhl <mathiasuhl@gmx.de>
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Credential resolution: environment variables over the config file.

use crate::config::{Config, ConfigStore};
use anyhow::Result;
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;
use tracing::debug;

pub const SERVICE_ID_ENV: &str = "HIBOB_SERVICE_ID";
pub const API_TOKEN_ENV: &str = "HIBOB_API_TOKEN";

/// Where environment variables come from.
pub trait EnvSource {
    fn var(&self, key: &str) -> Option<String>;
}

/// The real process environment.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

impl EnvSource for HashMap<String, String> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CredentialError {
    #[error(
        "Missing service ID. Set HIBOB_SERVICE_ID and HIBOB_API_TOKEN environment variables, or run `bob auth login`."
    )]
    MissingServiceId,
    #[error(
        "Missing API token. Set HIBOB_SERVICE_ID and HIBOB_API_TOKEN environment variables, or run `bob auth login`."
    )]
    MissingApiToken,
}

/// Which source supplied a credential field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialSource {
    Env,
    Config,
    None,
}

impl CredentialSource {
    pub fn label(&self) -> &'static str {
        match self {
            CredentialSource::Env => "environment variable",
            CredentialSource::Config => "config file",
            CredentialSource::None => "not configured",
        }
    }
}

impl fmt::Display for CredentialSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CredentialSource::Env => "env",
            CredentialSource::Config => "config",
            CredentialSource::None => "none",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthStatus {
    pub service_id: CredentialSource,
    pub api_token: CredentialSource,
}

impl AuthStatus {
    pub fn is_unauthenticated(&self) -> bool {
        self.service_id == CredentialSource::None && self.api_token == CredentialSource::None
    }
}

/// Resolved Basic-auth credentials. The token is never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub service_id: String,
    pub api_token: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("service_id", &self.service_id)
            .field("api_token", &"*****")
            .finish()
    }
}

#[derive(Clone, Copy)]
enum Field {
    ServiceId,
    ApiToken,
}

impl Field {
    fn env_key(self) -> &'static str {
        match self {
            Field::ServiceId => SERVICE_ID_ENV,
            Field::ApiToken => API_TOKEN_ENV,
        }
    }

    fn from_config(self, config: &Config) -> &str {
        match self {
            Field::ServiceId => &config.service_id,
            Field::ApiToken => &config.api_token,
        }
    }

    fn missing(self) -> CredentialError {
        match self {
            Field::ServiceId => CredentialError::MissingServiceId,
            Field::ApiToken => CredentialError::MissingApiToken,
        }
    }
}

pub struct CredentialResolver<'a> {
    env: &'a dyn EnvSource,
    store: &'a ConfigStore,
}

impl<'a> CredentialResolver<'a> {
    pub fn new(env: &'a dyn EnvSource, store: &'a ConfigStore) -> Self {
        Self { env, store }
    }

    fn env_value(&self, field: Field) -> Option<String> {
        self.env.var(field.env_key()).filter(|v| !v.is_empty())
    }

    fn resolve(&self, field: Field) -> Result<String> {
        if let Some(value) = self.env_value(field) {
            debug!(var = field.env_key(), "credential from environment");
            return Ok(value);
        }
        match self.store.read()? {
            Some(config) => {
                debug!(path = %self.store.path().display(), "credential from config file");
                Ok(field.from_config(&config).to_string())
            }
            None => Err(field.missing().into()),
        }
    }

    pub fn service_id(&self) -> Result<String> {
        self.resolve(Field::ServiceId)
    }

    pub fn api_token(&self) -> Result<String> {
        self.resolve(Field::ApiToken)
    }

    pub fn credentials(&self) -> Result<Credentials> {
        Ok(Credentials {
            service_id: self.service_id()?,
            api_token: self.api_token()?,
        })
    }

    /// Provenance of each field, for display only.
    pub fn status(&self) -> Result<AuthStatus> {
        let config = self.store.read()?;
        let source = |field: Field| {
            if self.env_value(field).is_some() {
                CredentialSource::Env
            } else if config.is_some() {
                CredentialSource::Config
            } else {
                CredentialSource::None
            }
        };
        Ok(AuthStatus {
            service_id: source(Field::ServiceId),
            api_token: source(Field::ApiToken),
        })
    }
}
