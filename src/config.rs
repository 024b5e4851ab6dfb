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

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs::{self, OpenOptions},
    io::{ErrorKind, Write},
    path::{Path, PathBuf},
};
use thiserror::Error;
use tracing::debug;

#[cfg(unix)]
use std::os::unix::fs::{DirBuilderExt, OpenOptionsExt, PermissionsExt};

use crate::auth::EnvSource;

pub const CONFIG_DIR_ENV: &str = "BOB_CONFIG_DIR";
const CONFIG_FILE: &str = "config.json";

/// Credentials persisted by `bob auth login`.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub service_id: String,
    #[serde(default)]
    pub api_token: String,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not locate the home directory for the current user")]
    MissingHomeDir,
}

/// The on-disk credentials file.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    /// `$BOB_CONFIG_DIR/config.json`, else `~/.config/bob-cli/config.json`.
    pub fn from_env(env: &dyn EnvSource) -> Result<Self> {
        if let Some(custom) = env.var(CONFIG_DIR_ENV).filter(|v| !v.is_empty()) {
            return Ok(Self::with_path(PathBuf::from(custom).join(CONFIG_FILE)));
        }
        let home = dirs::home_dir().ok_or(ConfigError::MissingHomeDir)?;
        Ok(Self::with_path(
            home.join(".config").join("bob-cli").join(CONFIG_FILE),
        ))
    }

    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stored credentials, or `None` when the file is missing, malformed, or
    /// either field is empty. Other IO errors (permissions) propagate.
    pub fn read(&self) -> Result<Option<Config>> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no config file");
                return Ok(None);
            }
            Err(err) => {
                return Err(err).with_context(|| format!("reading {:?}", self.path));
            }
        };

        let config: Config = match serde_json::from_str(&contents) {
            Ok(config) => config,
            Err(err) => {
                debug!(path = %self.path.display(), error = %err, "ignoring malformed config");
                return Ok(None);
            }
        };

        if config.service_id.is_empty() || config.api_token.is_empty() {
            return Ok(None);
        }
        Ok(Some(config))
    }

    /// Persist credentials as pretty JSON with a trailing newline, owner-only.
    pub fn write(&self, service_id: &str, api_token: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            create_private_dir(parent).with_context(|| format!("creating {:?}", parent))?;
        }

        let config = Config {
            service_id: service_id.to_string(),
            api_token: api_token.to_string(),
        };
        let mut serialized = serde_json::to_string_pretty(&config).context("serializing config")?;
        serialized.push('\n');

        let mut options = OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        options.mode(0o600);
        let mut file = options
            .open(&self.path)
            .with_context(|| format!("opening {:?}", self.path))?;

        // mode() only applies on creation
        #[cfg(unix)]
        file.set_permissions(fs::Permissions::from_mode(0o600))
            .with_context(|| format!("restricting permissions on {:?}", self.path))?;

        file.write_all(serialized.as_bytes())
            .with_context(|| format!("writing {:?}", self.path))?;
        debug!(path = %self.path.display(), "saved credentials");
        Ok(())
    }

    /// Remove the file; a missing file is not an error.
    pub fn delete(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err).with_context(|| format!("removing {:?}", self.path)),
        }
    }
}

fn create_private_dir(path: &Path) -> std::io::Result<()> {
    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    builder.mode(0o700);
    builder.create(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::tempdir;

    fn store_in(dir: &Path) -> ConfigStore {
        ConfigStore::with_path(dir.join("bob-cli").join(CONFIG_FILE))
    }

    #[test]
    fn resolves_path_from_config_dir_override() {
        let env = HashMap::from([(CONFIG_DIR_ENV.to_string(), "/tmp/bob-test".to_string())]);
        let store = ConfigStore::from_env(&env).unwrap();
        assert_eq!(store.path(), Path::new("/tmp/bob-test/config.json"));
    }

    #[test]
    fn round_trips_credentials() {
        let dir = tempdir().unwrap();
        let store = store_in(dir.path());
        store.write("svc-a", "tok-b").unwrap();
        assert_eq!(
            store.read().unwrap(),
            Some(Config {
                service_id: "svc-a".into(),
                api_token: "tok-b".into(),
            })
        );
    }

    #[test]
    fn writes_pretty_json_with_trailing_newline() {
        let dir = tempdir().unwrap();
        let store = store_in(dir.path());
        store.write("svc", "tok").unwrap();
        let raw = fs::read_to_string(store.path()).unwrap();
        assert!(raw.starts_with('{'));
        assert!(raw.ends_with("}\n"));
        assert_eq!(
            raw,
            "{\n  \"service_id\": \"svc\",\n  \"api_token\": \"tok\"\n}\n"
        );
    }

    #[cfg(unix)]
    #[test]
    fn restricts_permissions() {
        let dir = tempdir().unwrap();
        let store = store_in(dir.path());
        store.write("svc", "tok").unwrap();
        let file_mode = fs::metadata(store.path()).unwrap().permissions().mode() & 0o777;
        assert_eq!(file_mode, 0o600);
        let dir_mode = fs::metadata(store.path().parent().unwrap())
            .unwrap()
            .permissions()
            .mode()
            & 0o777;
        assert_eq!(dir_mode, 0o700);
    }

    #[test]
    fn missing_file_reads_as_absent() {
        let dir = tempdir().unwrap();
        assert_eq!(store_in(dir.path()).read().unwrap(), None);
    }

    #[test]
    fn malformed_or_empty_config_reads_as_absent() {
        let dir = tempdir().unwrap();
        let store = store_in(dir.path());
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();

        fs::write(store.path(), "not json").unwrap();
        assert_eq!(store.read().unwrap(), None);

        fs::write(store.path(), r#"{"service_id": "", "api_token": ""}"#).unwrap();
        assert_eq!(store.read().unwrap(), None);

        fs::write(store.path(), r#"{"service_id": "svc"}"#).unwrap();
        assert_eq!(store.read().unwrap(), None);
    }

    #[test]
    fn unreadable_path_is_an_error() {
        let dir = tempdir().unwrap();
        // a directory where the file should be
        let store = ConfigStore::with_path(dir.path().to_path_buf());
        assert!(store.read().is_err());
    }

    #[test]
    fn delete_is_idempotent() {
        let dir = tempdir().unwrap();
        let store = store_in(dir.path());
        store.write("svc", "tok").unwrap();
        store.delete().unwrap();
        assert_eq!(store.read().unwrap(), None);
        store.delete().unwrap();
    }
}
