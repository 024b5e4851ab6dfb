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

//! Human-readable layouts for people and time-off records.

use crate::attributes::{
    UNKNOWN_NAME, person_department, person_display_name, person_email, person_site,
    person_title, timeoff_balances, timeoff_date_range, timeoff_display_name, timeoff_email,
    timeoff_type,
};
use colored::Colorize;
use serde_json::Value;

fn join_row(name: String, details: Vec<String>) -> String {
    if details.is_empty() {
        name
    } else {
        format!("{}  {}", name, details.join("  "))
    }
}

pub fn person_row(person: &Value) -> String {
    let mut details = Vec::new();
    let email = person_email(person);
    if !email.is_empty() {
        details.push(email.dimmed().to_string());
    }
    let department = person_department(person);
    if !department.is_empty() {
        details.push(department.cyan().to_string());
    }
    let title = person_title(person);
    if !title.is_empty() {
        details.push(title.yellow().to_string());
    }
    let site = person_site(person);
    if !site.is_empty() {
        details.push(site.magenta().to_string());
    }
    if let Some(id) = person.get("id").and_then(Value::as_str).filter(|id| !id.is_empty()) {
        details.push(format!("id:{id}").dimmed().to_string());
    }
    join_row(person_display_name(person).bold().to_string(), details)
}

pub fn person_view(person: &Value) -> String {
    let mut lines = vec![person_display_name(person).bold().to_string(), String::new()];

    if let Some(id) = person.get("id").map(id_text).filter(|id| !id.is_empty()) {
        lines.push(format!("ID:          {id}"));
    }
    let fields = [
        ("Email:      ", person_email(person)),
        ("Department: ", person_department(person)),
        ("Title:      ", person_title(person)),
        ("Site:       ", person_site(person)),
    ];
    for (label, value) in fields {
        if !value.is_empty() {
            lines.push(format!("{label} {value}"));
        }
    }
    lines.join("\n")
}

fn id_text(id: &Value) -> String {
    match id {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    }
}

pub fn timeoff_row(entry: &Value) -> String {
    let mut details = Vec::new();
    let email = timeoff_email(entry);
    if !email.is_empty() {
        details.push(email.dimmed().to_string());
    }
    let kind = timeoff_type(entry);
    if !kind.is_empty() {
        details.push(kind.cyan().to_string());
    }
    let dates = timeoff_date_range(entry);
    if !dates.is_empty() {
        details.push(dates.yellow().to_string());
    }
    join_row(timeoff_display_name(entry).bold().to_string(), details)
}

/// Name header (when known) followed by one `label: amount` line per balance.
/// Falls back to the pretty-printed record when there is nothing to show.
pub fn timeoff_balance(entry: &Value) -> String {
    let mut lines = Vec::new();
    let name = timeoff_display_name(entry);
    if name != UNKNOWN_NAME {
        lines.push(name.bold().to_string());
        lines.push(String::new());
    }
    for balance in timeoff_balances(entry) {
        lines.push(format!("{}: {}", balance.label, balance.amount));
    }
    if lines.is_empty() {
        return serde_json::to_string_pretty(entry).unwrap_or_default();
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn plain(text: String) -> String {
        console::strip_ansi_codes(&text).into_owned()
    }

    #[test]
    fn person_row_lists_known_details() {
        let person = json!({
            "id": "42",
            "displayName": "Ava Test",
            "email": "ava@example.com",
            "work": {"department": "Engineering", "title": "Staff Engineer"}
        });
        assert_eq!(
            plain(person_row(&person)),
            "Ava Test  ava@example.com  Engineering  Staff Engineer  id:42"
        );
        assert_eq!(plain(person_row(&json!({}))), "Unknown");
    }

    #[test]
    fn person_view_aligns_labels() {
        let person = json!({
            "id": 42,
            "fullName": "Ava Test",
            "work": {"site": "Lisbon"}
        });
        assert_eq!(
            plain(person_view(&person)),
            "Ava Test\n\nID:          42\nSite:        Lisbon"
        );
    }

    #[test]
    fn timeoff_row_shows_type_and_dates() {
        let entry = json!({
            "employeeDisplayName": "Kai",
            "policyTypeDisplayName": "Holiday",
            "startDate": "2024-01-01",
            "endDate": "2024-01-05"
        });
        assert_eq!(
            plain(timeoff_row(&entry)),
            "Kai  Holiday  2024-01-01 - 2024-01-05"
        );
    }

    #[test]
    fn balance_lists_amounts_under_the_name() {
        let entry = json!({
            "displayName": "Kai",
            "balances": [{"policyType": "Holiday", "balance": 12}]
        });
        assert_eq!(plain(timeoff_balance(&entry)), "Kai\n\nHoliday: 12");
        assert_eq!(
            plain(timeoff_balance(&json!({"balances": [{"days": 3}]}))),
            "Balance: 3"
        );
    }

    #[test]
    fn balance_falls_back_to_raw_json() {
        let entry = json!({"value": 4});
        assert_eq!(
            timeoff_balance(&entry),
            serde_json::to_string_pretty(&entry).unwrap()
        );
    }
}
