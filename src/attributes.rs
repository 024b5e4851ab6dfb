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

//! Canonical attribute resolution for people and time-off entries.
//!
//! Each attribute is an ordered list of candidate paths; the first one holding
//! a non-empty string wins. The order of every table is observable in the
//! human output, so reordering a table is a breaking change.

use crate::record::RawRecord;
use serde_json::Value;

pub const UNKNOWN_NAME: &str = "Unknown";

pub mod person {
    pub const DISPLAY_NAME: &[&str] = &["displayName", "fullName", "name"];
    pub const EMAIL: &[&str] = &["email", "work.email"];
    pub const DEPARTMENT: &[&str] = &["work.department", "department"];
    pub const TITLE: &[&str] = &["work.title", "title"];
    pub const SITE: &[&str] = &["work.site", "site"];
    pub const ACTIVE_FLAGS: &[&str] = &["active", "isActive"];
    pub const STATUS_TEXT: &[&str] = &["status", "employmentStatus"];
}

pub mod timeoff {
    pub const DISPLAY_NAME: &[&str] = &[
        "employeeDisplayName",
        "displayName",
        "name",
        "employeeName",
        "employee.displayName",
        "employee.name",
    ];
    pub const EMAIL: &[&str] = &["email", "employeeEmail", "employee.email"];
    pub const TYPE: &[&str] = &[
        "policyTypeDisplayName",
        "type",
        "policyType",
        "timeOffType",
        "reason",
        "policy.name",
    ];
    pub const START: &[&str] = &[
        "startDate",
        "start",
        "from",
        "date",
        "start.date",
        "time.startDate",
    ];
    pub const END: &[&str] = &["endDate", "end", "to", "date", "end.date", "time.endDate"];
    pub const BALANCE_LABEL: &[&str] = &["policyType", "type", "name"];
    pub const BALANCE_AMOUNT: &[&str] = &["balance", "amount", "days", "hours"];
}

fn text_or_empty(record: RawRecord<'_>, candidates: &[&str]) -> String {
    record
        .first_non_empty(candidates)
        .unwrap_or_default()
        .to_string()
}

pub fn person_display_name(value: &Value) -> String {
    RawRecord::new(value)
        .first_non_empty(person::DISPLAY_NAME)
        .unwrap_or(UNKNOWN_NAME)
        .to_string()
}

pub fn person_email(value: &Value) -> String {
    text_or_empty(RawRecord::new(value), person::EMAIL)
}

pub fn person_department(value: &Value) -> String {
    text_or_empty(RawRecord::new(value), person::DEPARTMENT)
}

pub fn person_title(value: &Value) -> String {
    text_or_empty(RawRecord::new(value), person::TITLE)
}

pub fn person_site(value: &Value) -> String {
    text_or_empty(RawRecord::new(value), person::SITE)
}

/// Employment status, or `None` when the record does not say.
pub fn person_is_active(value: &Value) -> Option<bool> {
    let record = RawRecord::new(value);
    if let Some(flag) = record.first_bool(person::ACTIVE_FLAGS) {
        return Some(flag);
    }
    person::STATUS_TEXT.iter().find_map(|path| {
        let status = record.get_string(path)?;
        match status.to_lowercase().as_str() {
            "active" => Some(true),
            "inactive" | "terminated" => Some(false),
            _ => None,
        }
    })
}

pub fn timeoff_display_name(value: &Value) -> String {
    RawRecord::new(value)
        .first_non_empty(timeoff::DISPLAY_NAME)
        .unwrap_or(UNKNOWN_NAME)
        .to_string()
}

pub fn timeoff_email(value: &Value) -> String {
    text_or_empty(RawRecord::new(value), timeoff::EMAIL)
}

pub fn timeoff_type(value: &Value) -> String {
    text_or_empty(RawRecord::new(value), timeoff::TYPE)
}

/// `"<start> - <end>"`, a single date, or `""`.
///
/// Start and end are resolved independently from the first string-typed
/// candidate; an empty string counts as missing.
pub fn timeoff_date_range(value: &Value) -> String {
    let record = RawRecord::new(value);
    let start = record.first_string(timeoff::START).filter(|s| !s.is_empty());
    let end = record.first_string(timeoff::END).filter(|s| !s.is_empty());
    match (start, end) {
        (Some(start), Some(end)) if start != end => format!("{start} - {end}"),
        (Some(date), _) | (None, Some(date)) => date.to_string(),
        (None, None) => String::new(),
    }
}

/// One line of a time-off balance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BalanceLine {
    pub label: String,
    pub amount: String,
}

/// Labelled amounts from the `balances` array; entries without an amount are
/// skipped.
pub fn timeoff_balances(value: &Value) -> Vec<BalanceLine> {
    let Some(balances) = value.get("balances").and_then(Value::as_array) else {
        return Vec::new();
    };
    balances
        .iter()
        .filter(|entry| entry.is_object())
        .filter_map(|entry| {
            let record = RawRecord::new(entry);
            let amount = timeoff::BALANCE_AMOUNT
                .iter()
                .find_map(|path| match record.get(path)? {
                    Value::String(s) if !s.is_empty() => Some(s.clone()),
                    Value::Number(n) => Some(n.to_string()),
                    _ => None,
                })?;
            let label = record
                .first_non_empty(timeoff::BALANCE_LABEL)
                .unwrap_or("Balance")
                .to_string();
            Some(BalanceLine { label, amount })
        })
        .collect()
}
