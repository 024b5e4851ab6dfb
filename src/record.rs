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

//! Dotted-path access over loosely typed API records.
//!
//! HiBob payloads have no fixed schema: any key may be missing, null, or of an
//! unexpected type. Everything here is total; a read never fails, it only
//! comes back empty.

use serde_json::{Map, Value};

/// Follow `path` (dot separated) through nested objects.
///
/// Returns `None` when a segment is missing or an intermediate value is not a
/// container. Numeric segments index into arrays.
pub fn get_path<'a>(record: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(record, |current, segment| match current {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    })
}

/// Write `value` at `path`, creating intermediate objects as needed.
///
/// A non-object intermediate (or target) is replaced with an empty object, so
/// writing never fails.
pub fn set_path(target: &mut Value, path: &str, value: Value) {
    if !target.is_object() {
        *target = Value::Object(Map::new());
    }
    if let Value::Object(map) = target {
        set_in_map(map, path, value);
    }
}

fn set_in_map(map: &mut Map<String, Value>, path: &str, value: Value) {
    match path.split_once('.') {
        None => {
            map.insert(path.to_string(), value);
        }
        Some((head, rest)) => {
            let child = map
                .entry(head.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            set_path(child, rest, value);
        }
    }
}

/// Read-only view over one raw API record.
#[derive(Debug, Clone, Copy)]
pub struct RawRecord<'a>(&'a Value);

impl<'a> RawRecord<'a> {
    pub fn new(value: &'a Value) -> Self {
        Self(value)
    }

    pub fn get(&self, path: &str) -> Option<&'a Value> {
        get_path(self.0, path)
    }

    /// Any string at `path`, including an empty one.
    pub fn get_string(&self, path: &str) -> Option<&'a str> {
        self.get(path).and_then(Value::as_str)
    }

    pub fn get_non_empty_string(&self, path: &str) -> Option<&'a str> {
        self.get_string(path).filter(|s| !s.is_empty())
    }

    pub fn get_bool(&self, path: &str) -> Option<bool> {
        self.get(path).and_then(Value::as_bool)
    }

    /// First candidate holding a non-empty string.
    pub fn first_non_empty(&self, candidates: &[&str]) -> Option<&'a str> {
        candidates
            .iter()
            .find_map(|path| self.get_non_empty_string(path))
    }

    /// First candidate holding any string, empty or not.
    pub fn first_string(&self, candidates: &[&str]) -> Option<&'a str> {
        candidates.iter().find_map(|path| self.get_string(path))
    }

    pub fn first_bool(&self, candidates: &[&str]) -> Option<bool> {
        candidates.iter().find_map(|path| self.get_bool(path))
    }
}
