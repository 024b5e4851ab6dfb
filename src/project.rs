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

//! Essential-field projection and JSON/NDJSON serialization.

use crate::record::{get_path, set_path};
use crate::schema::EntityType;
use anyhow::{Context, Result};
use serde_json::{Map, Value};

/// Rebuild `record` from the essential paths of `entity` that it defines.
///
/// Absent paths are skipped; nesting is reconstructed, never flattened.
pub fn pick_fields(record: &Value, entity: EntityType) -> Value {
    let mut projected = Value::Object(Map::new());
    for path in entity.essential_paths() {
        if let Some(value) = get_path(record, path) {
            set_path(&mut projected, path, value.clone());
        }
    }
    projected
}

fn project<'a>(
    records: impl IntoIterator<Item = &'a Value>,
    entity: Option<EntityType>,
    full: bool,
) -> Vec<Value> {
    match entity {
        Some(entity) if !full => records
            .into_iter()
            .map(|r| pick_fields(r, entity))
            .collect(),
        _ => records.into_iter().cloned().collect(),
    }
}

/// Pretty-printed JSON document for a single payload. An array payload is
/// projected element by element.
pub fn format_json_item(item: &Value, entity: Option<EntityType>, full: bool) -> Result<String> {
    let value = match item {
        Value::Array(items) => Value::Array(project(items, entity, full)),
        _ => project([item], entity, full)
            .into_iter()
            .next()
            .unwrap_or(Value::Null),
    };
    serde_json::to_string_pretty(&value).context("serializing JSON output")
}

/// Pretty-printed JSON array for a list of records.
pub fn format_json_list(items: &[Value], entity: Option<EntityType>, full: bool) -> Result<String> {
    let projected = Value::Array(project(items, entity, full));
    serde_json::to_string_pretty(&projected).context("serializing JSON output")
}

/// One compact JSON object per record, newline separated, no trailing newline.
pub fn format_ndjson(items: &[Value], entity: Option<EntityType>, full: bool) -> Result<String> {
    let lines = project(items, entity, full)
        .iter()
        .map(serde_json::to_string)
        .collect::<Result<Vec<_>, _>>()
        .context("serializing NDJSON output")?;
    Ok(lines.join("\n"))
}
