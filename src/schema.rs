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

//! Essential-field tables for HiBob entities.
//!
//! Default machine-readable output (`--json`, `--ndjson`) is reduced to these
//! fields so scripts and agents get a stable shape no matter which extra keys
//! the API decides to return. `--full` bypasses the tables.

use std::fmt;

/// Entity kinds the CLI knows how to normalize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityType {
    Person,
    Timeoff,
}

/// One field that survives projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldMeta {
    /// Dotted path into the raw record
    pub path: &'static str,
    /// Human-readable description
    pub description: &'static str,
}

const fn field(path: &'static str, description: &'static str) -> FieldMeta {
    FieldMeta { path, description }
}

const PERSON_FIELDS: &[FieldMeta] = &[
    field("id", "Employee id"),
    field("displayName", "Display name"),
    field("email", "Work email address"),
    field("work.department", "Department"),
    field("work.title", "Job title"),
    field("work.site", "Office or site"),
];

const TIMEOFF_FIELDS: &[FieldMeta] = &[
    field("id", "Time-off entry id"),
    field("employeeId", "Employee id"),
    field("employeeDisplayName", "Employee display name"),
    field("displayName", "Display name (older responses)"),
    field("employeeEmail", "Employee email"),
    field("email", "Email (older responses)"),
    field("policyTypeDisplayName", "Policy type label"),
    field("type", "Time-off type"),
    field("policyType", "Policy type id"),
    field("status", "Request status"),
    field("startDate", "First day"),
    field("endDate", "Last day"),
    field("start", "Start (alternate naming)"),
    field("end", "End (alternate naming)"),
    field("from", "Start (range naming)"),
    field("to", "End (range naming)"),
    field("date", "Single-day date"),
    field("balance", "Balance amount"),
    field("hours", "Duration in hours"),
    field("days", "Duration in days"),
    field("amount", "Amount"),
];

impl EntityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityType::Person => "person",
            EntityType::Timeoff => "timeoff",
        }
    }

    pub fn fields(&self) -> &'static [FieldMeta] {
        match self {
            EntityType::Person => PERSON_FIELDS,
            EntityType::Timeoff => TIMEOFF_FIELDS,
        }
    }

    pub fn essential_paths(&self) -> impl Iterator<Item = &'static str> {
        self.fields().iter().map(|f| f.path)
    }

    pub fn all() -> [EntityType; 2] {
        [EntityType::Person, EntityType::Timeoff]
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Markdown bullet list of the essential fields, for generated docs.
pub fn describe_fields(entity: EntityType) -> String {
    entity
        .fields()
        .iter()
        .map(|f| format!("- `{}`: {}", f.path, f.description))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn person_fields_keep_nested_work_data() {
        let paths: Vec<_> = EntityType::Person.essential_paths().collect();
        assert_eq!(
            paths,
            vec![
                "id",
                "displayName",
                "email",
                "work.department",
                "work.title",
                "work.site"
            ]
        );
    }

    #[test]
    fn field_paths_are_unique() {
        for entity in EntityType::all() {
            let unique: HashSet<_> = entity.essential_paths().collect();
            assert_eq!(unique.len(), entity.fields().len(), "{entity}");
        }
    }

    #[test]
    fn describes_fields_as_markdown() {
        let doc = describe_fields(EntityType::Timeoff);
        assert!(doc.starts_with("- `id`: "));
        assert!(doc.contains("- `policyTypeDisplayName`: Policy type label"));
        assert_eq!(doc.lines().count(), EntityType::Timeoff.fields().len());
    }
}
