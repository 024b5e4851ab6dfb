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

//! Loading indicator around the single network call of a command.
//!
//! This is a scoped begin/end marker on stderr, not an animation thread:
//! the line is drawn when the guard is created and cleared when it is
//! dropped, or replaced with a failure mark.

use crate::auth::EnvSource;
use colored::Colorize;
use console::Term;

/// Labels keyed by `"<METHOD> <path>"`; a path ending in `/` matches by prefix.
const LABELS: &[(&str, &str)] = &[
    ("POST /people/search", "Fetching people"),
    ("POST /people/", "Fetching person"),
    ("GET /timeoff/whosout", "Fetching who's out"),
    ("GET /timeoff/outtoday", "Fetching out today"),
];

const DEFAULT_LABEL: &str = "Loading";

pub fn label_for(method: &str, path: &str) -> &'static str {
    LABELS
        .iter()
        .find(|(key, _)| {
            let Some((key_method, key_path)) = key.split_once(' ') else {
                return false;
            };
            key_method == method
                && (key_path == path || (key_path.ends_with('/') && path.starts_with(key_path)))
        })
        .map(|(_, label)| *label)
        .unwrap_or(DEFAULT_LABEL)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpinnerSettings {
    pub enabled: bool,
}

impl SpinnerSettings {
    /// Disabled by `--no-spinner`, machine-readable output, `BOB_SPINNER=false`,
    /// or `CI`. Terminal detection happens when the spinner starts.
    pub fn resolve(no_spinner: bool, machine_output: bool, env: &dyn EnvSource) -> Self {
        let disabled_by_env = env.var("BOB_SPINNER").as_deref() == Some("false")
            || env.var("CI").is_some();
        Self {
            enabled: !(no_spinner || machine_output || disabled_by_env),
        }
    }

    pub fn disabled() -> Self {
        Self { enabled: false }
    }
}

pub struct Spinner {
    term: Option<Term>,
}

impl Spinner {
    pub fn start(label: &str, settings: SpinnerSettings) -> Self {
        let term = Term::stderr();
        if !settings.enabled || !term.is_term() {
            return Self { term: None };
        }
        let _ = term.write_str(&format!("{} {}…", "⠋".blue(), label.blue()));
        Self { term: Some(term) }
    }

    /// Replace the line with a failure mark and keep it visible.
    pub fn fail(mut self) {
        if let Some(term) = self.term.take() {
            let _ = term.clear_line();
            let _ = term.write_line(&"✗".red().to_string());
        }
    }

    pub fn is_active(&self) -> bool {
        self.term.is_some()
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        if let Some(term) = self.term.take() {
            let _ = term.clear_line();
        }
    }
}

/// Run `operation` with a spinner shown for its duration.
pub fn with_spinner<T, E>(
    label: &str,
    settings: SpinnerSettings,
    operation: impl FnOnce() -> Result<T, E>,
) -> Result<T, E> {
    let spinner = Spinner::start(label, settings);
    let result = operation();
    if result.is_err() {
        spinner.fail();
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn labels_match_exact_and_prefix_paths() {
        assert_eq!(label_for("POST", "/people/search"), "Fetching people");
        assert_eq!(label_for("POST", "/people/123"), "Fetching person");
        assert_eq!(label_for("GET", "/people/123"), "Loading");
        assert_eq!(label_for("GET", "/timeoff/whosout"), "Fetching who's out");
        assert_eq!(label_for("GET", "/timeoff/outtoday"), "Fetching out today");
        assert_eq!(label_for("GET", "/timeoff/employees/1/balance"), "Loading");
    }

    #[test]
    fn settings_respect_flags_and_env() {
        let empty: HashMap<String, String> = HashMap::new();
        assert!(SpinnerSettings::resolve(false, false, &empty).enabled);
        assert!(!SpinnerSettings::resolve(true, false, &empty).enabled);
        assert!(!SpinnerSettings::resolve(false, true, &empty).enabled);

        let ci = HashMap::from([("CI".to_string(), "1".to_string())]);
        assert!(!SpinnerSettings::resolve(false, false, &ci).enabled);

        let off = HashMap::from([("BOB_SPINNER".to_string(), "false".to_string())]);
        assert!(!SpinnerSettings::resolve(false, false, &off).enabled);

        let on = HashMap::from([("BOB_SPINNER".to_string(), "true".to_string())]);
        assert!(SpinnerSettings::resolve(false, false, &on).enabled);
    }

    #[test]
    fn disabled_spinner_is_inert() {
        let spinner = Spinner::start("Loading", SpinnerSettings::disabled());
        assert!(!spinner.is_active());
        let result: Result<u8, &str> =
            with_spinner("Loading", SpinnerSettings::disabled(), || Err("boom"));
        assert_eq!(result, Err("boom"));
    }
}
