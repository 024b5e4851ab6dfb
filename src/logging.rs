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

//! Diagnostic logging to stderr.
//!
//! `BOB_LOG` takes an `EnvFilter` directive (`debug`, `bob=trace`, ...).
//! Without it, `--verbose` selects `debug` and the default is `warn`.

use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "BOB_LOG";

pub fn filter(directive: Option<&str>, verbose: bool) -> EnvFilter {
    let fallback = if verbose { "debug" } else { "warn" };
    directive
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(fallback))
}

pub fn init(directive: Option<&str>, verbose: bool) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter(directive, verbose))
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .try_init();
}
