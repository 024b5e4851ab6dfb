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

//! Unwrapping HiBob response envelopes.
//!
//! The API wraps payloads differently per endpoint and version. All knowledge
//! of those shapes lives here so command handlers stay shape-agnostic.

use serde_json::{Map, Value, json};

pub const PEOPLE_LIST_KEYS: &[&str] = &["employees", "people", "results", "items"];
pub const TIMEOFF_LIST_KEYS: &[&str] = &[
    "results", "items", "timeOff", "timeoff", "outs", "people", "employees",
];
pub const PERSON_ITEM_KEYS: &[&str] = &["employee", "person"];

/// Flat record list from a list response; empty when nothing matches.
pub fn extract_list(data: &Value, keys: &[&str]) -> Vec<Value> {
    match data {
        Value::Array(items) => items.clone(),
        Value::Object(map) => keys
            .iter()
            .find_map(|key| map.get(*key).and_then(Value::as_array))
            .cloned()
            .unwrap_or_default(),
        _ => Vec::new(),
    }
}

pub fn extract_people(data: &Value) -> Vec<Value> {
    extract_list(data, PEOPLE_LIST_KEYS)
}

pub fn extract_timeoff(data: &Value) -> Vec<Value> {
    extract_list(data, TIMEOFF_LIST_KEYS)
}

/// Single record from an item response.
///
/// Object-valued wrapper keys win; otherwise the payload itself, with falsy
/// payloads (`null`, `false`, `""`, `0`) collapsing to `{}`.
pub fn extract_item(data: &Value, keys: &[&str]) -> Value {
    if let Value::Object(map) = data
        && let Some(inner) = keys
            .iter()
            .find_map(|key| map.get(*key).filter(|v| v.is_object()))
    {
        return inner.clone();
    }
    if is_falsy(data) {
        Value::Object(Map::new())
    } else {
        data.clone()
    }
}

pub fn extract_person(data: &Value) -> Value {
    extract_item(data, PERSON_ITEM_KEYS)
}

/// Balance responses are used as-is when structured, otherwise wrapped as
/// `{"value": ...}`.
pub fn extract_balance(data: &Value) -> Value {
    match data {
        Value::Object(_) | Value::Array(_) => data.clone(),
        other => json!({ "value": other }),
    }
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::String(s) => s.is_empty(),
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::Array(_) | Value::Object(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unwraps_people_envelopes() {
        assert_eq!(
            extract_people(&json!({"employees": [{"id": "1"}]})),
            vec![json!({"id": "1"})]
        );
        assert_eq!(extract_people(&json!({"foo": "bar"})), Vec::<Value>::new());
        assert_eq!(extract_people(&json!([{"id": "2"}])), vec![json!({"id": "2"})]);
    }

    #[test]
    fn people_keys_are_probed_in_priority_order() {
        let data = json!({
            "items": [{"id": "items"}],
            "people": [{"id": "people"}],
            "employees": "not a list"
        });
        assert_eq!(extract_people(&data), vec![json!({"id": "people"})]);
    }

    #[test]
    fn unwraps_timeoff_envelopes() {
        let data = json!({"outs": [{"employeeId": "3"}], "employees": [{"id": "x"}]});
        assert_eq!(extract_timeoff(&data), vec![json!({"employeeId": "3"})]);
        assert_eq!(
            extract_timeoff(&json!({"timeOff": [], "employees": [{"id": "x"}]})),
            Vec::<Value>::new()
        );
    }

    #[test]
    fn scalars_and_null_yield_empty_lists() {
        for data in [Value::Null, json!("text"), json!(12), json!(true)] {
            assert!(extract_timeoff(&data).is_empty());
        }
    }

    #[test]
    fn unwraps_single_person() {
        assert_eq!(
            extract_person(&json!({"employee": {"id": "1"}, "person": {"id": "2"}})),
            json!({"id": "1"})
        );
        assert_eq!(
            extract_person(&json!({"employee": "x", "person": {"id": "2"}})),
            json!({"id": "2"})
        );
        assert_eq!(extract_person(&json!({"id": "3"})), json!({"id": "3"}));
        assert_eq!(extract_person(&Value::Null), json!({}));
        assert_eq!(extract_person(&json!("")), json!({}));
    }

    #[test]
    fn wraps_scalar_balances() {
        assert_eq!(extract_balance(&json!(4)), json!({"value": 4}));
        assert_eq!(extract_balance(&Value::Null), json!({"value": null}));
        assert_eq!(
            extract_balance(&json!({"balances": []})),
            json!({"balances": []})
        );
    }
}
