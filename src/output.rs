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

//! Choosing between JSON, NDJSON and human-readable output.
//!
//! `--json` wins over `--ndjson`, and both win over the human renderer. The
//! router only builds text; `emit` writes it.

use crate::project::{format_json_item, format_json_list, format_ndjson};
use crate::schema::EntityType;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use serde_json::Value;

/// Output flags shared by every list and item command.
#[derive(Args, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutputOptions {
    /// JSON output (essential fields)
    #[arg(long)]
    pub json: bool,
    /// NDJSON output (essential fields)
    #[arg(long)]
    pub ndjson: bool,
    /// Include all fields in JSON output
    #[arg(long)]
    pub full: bool,
}

impl OutputOptions {
    pub fn is_machine_readable(&self) -> bool {
        self.json || self.ndjson
    }
}

pub type RenderFn = fn(&Value) -> String;

pub fn output_item(
    item: &Value,
    options: &OutputOptions,
    entity: Option<EntityType>,
    render: Option<RenderFn>,
) -> Result<String> {
    if options.json {
        return format_json_item(item, entity, options.full);
    }
    if options.ndjson {
        return format_ndjson(std::slice::from_ref(item), entity, options.full);
    }
    if let Some(render) = render {
        return Ok(render(item));
    }
    Ok(serde_json::to_string_pretty(item)?)
}

pub fn output_list(
    items: &[Value],
    options: &OutputOptions,
    entity: Option<EntityType>,
    render: Option<RenderFn>,
) -> Result<String> {
    if options.json {
        return format_json_list(items, entity, options.full);
    }
    if options.ndjson {
        return format_ndjson(items, entity, options.full);
    }
    if let Some(render) = render {
        return Ok(items.iter().map(render).collect::<Vec<_>>().join("\n"));
    }
    Ok(serde_json::to_string_pretty(items)?)
}

/// Print routed output to stdout; empty output prints nothing.
pub fn emit(text: &str) {
    if !text.is_empty() {
        println!("{text}");
    }
}

/// `Error: <code>`, the message, then indented hints.
pub fn format_error(code: &str, message: &str, hints: &[&str]) -> String {
    let mut lines = vec![format!("Error: {code}"), message.to_string()];
    if !hints.is_empty() {
        lines.push(String::new());
        lines.extend(hints.iter().map(|hint| format!("  - {hint}")));
    }
    lines.join("\n").red().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn render_name(item: &Value) -> String {
        format!("name={}", item["displayName"].as_str().unwrap_or("?"))
    }

    fn people() -> Vec<Value> {
        vec![
            json!({"id": "1", "displayName": "First", "secret": "x"}),
            json!({"id": "2", "displayName": "Second", "secret": "y"}),
        ]
    }

    fn opts(json: bool, ndjson: bool, full: bool) -> OutputOptions {
        OutputOptions { json, ndjson, full }
    }

    #[test]
    fn json_takes_precedence_over_everything() {
        let out = output_list(
            &people(),
            &opts(true, true, false),
            Some(EntityType::Person),
            Some(render_name),
        )
        .unwrap();
        let parsed: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(
            parsed,
            json!([{"id": "1", "displayName": "First"}, {"id": "2", "displayName": "Second"}])
        );
    }

    #[test]
    fn ndjson_beats_the_renderer() {
        let out = output_list(
            &people(),
            &opts(false, true, false),
            Some(EntityType::Person),
            Some(render_name),
        )
        .unwrap();
        assert_eq!(out.lines().count(), 2);
        assert!(!out.contains("name="));
    }

    #[test]
    fn json_item_projects_array_balances() {
        let balance = crate::envelope::extract_balance(&json!([
            {"policyType": "Holiday", "balance": 12, "extra": 1}
        ]));
        let out = output_item(
            &balance,
            &opts(true, false, false),
            Some(EntityType::Timeoff),
            None,
        )
        .unwrap();
        let parsed: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed, json!([{"policyType": "Holiday", "balance": 12}]));
    }

    #[test]
    fn item_ndjson_is_a_single_line() {
        let item = json!({"id": "1", "displayName": "First", "secret": "x"});
        let out = output_item(&item, &opts(false, true, false), Some(EntityType::Person), None)
            .unwrap();
        assert_eq!(out, r#"{"id":"1","displayName":"First"}"#);
        let full = output_item(&item, &opts(false, true, true), Some(EntityType::Person), None)
            .unwrap();
        assert_eq!(full, r#"{"id":"1","displayName":"First","secret":"x"}"#);
    }

    #[test]
    fn renderer_is_used_for_human_output() {
        let out = output_list(&people(), &OutputOptions::default(), None, Some(render_name))
            .unwrap();
        assert_eq!(out, "name=First\nname=Second");
        let item = output_item(&people()[0], &OutputOptions::default(), None, Some(render_name))
            .unwrap();
        assert_eq!(item, "name=First");
    }

    #[test]
    fn falls_back_to_verbatim_pretty_json() {
        let out = output_list(
            &people(),
            &OutputOptions::default(),
            Some(EntityType::Person),
            None,
        )
        .unwrap();
        assert_eq!(out, serde_json::to_string_pretty(&people()).unwrap());
    }

    #[test]
    fn empty_ndjson_list_has_no_lines() {
        let out = output_list(&[], &opts(false, true, false), Some(EntityType::Timeoff), None)
            .unwrap();
        assert_eq!(out, "");
    }

    #[test]
    fn formats_errors_with_hints() {
        colored::control::set_override(false);
        assert_eq!(
            format_error("MISSING_ID", "Person id is required.", &[]),
            "Error: MISSING_ID\nPerson id is required."
        );
        assert_eq!(
            format_error("AUTH", "Not authenticated.", &["Run bob auth login"]),
            "Error: AUTH\nNot authenticated.\n\n  - Run bob auth login"
        );
    }
}
