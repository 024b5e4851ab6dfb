use super::{AppContext, require_id};
use crate::attributes::{person_department, person_display_name, person_is_active};
use crate::envelope::{extract_people, extract_person};
use crate::output::{OutputOptions, output_item, output_list};
use crate::render::{person_row, person_view};
use crate::schema::EntityType;
use anyhow::Result;
use clap::Args;
use serde_json::{Map, Value, json};
use tracing::debug;

#[derive(Args, Debug, Clone, Default)]
pub struct PeopleArgs {
    /// Name search (local filter)
    #[arg(value_name = "QUERY")]
    pub query: Option<String>,
    /// Filter by department (local filter)
    #[arg(long, value_name = "NAME")]
    pub department: Option<String>,
    /// Include inactive employees
    #[arg(long)]
    pub inactive: bool,
    #[command(flatten)]
    pub output: OutputOptions,
}

#[derive(Args, Debug, Clone)]
pub struct PersonArgs {
    /// Employee id
    #[arg(value_name = "ID")]
    pub id: String,
    #[command(flatten)]
    pub output: OutputOptions,
}

fn normalize(value: &str) -> String {
    value.trim().to_lowercase()
}

fn matches_filter(value: &str, filter: &str) -> bool {
    !value.is_empty() && normalize(value).contains(&normalize(filter))
}

/// Local filters applied after the search request: name query, department,
/// and dropping people whose status resolves to inactive.
pub fn filter_people(people: Vec<Value>, args: &PeopleArgs) -> Vec<Value> {
    people
        .into_iter()
        .filter(|person| {
            args.query
                .as_deref()
                .filter(|q| !q.is_empty())
                .is_none_or(|q| matches_filter(&person_display_name(person), q))
        })
        .filter(|person| {
            args.department
                .as_deref()
                .filter(|d| !d.is_empty())
                .is_none_or(|d| matches_filter(&person_department(person), d))
        })
        .filter(|person| args.inactive || person_is_active(person) != Some(false))
        .collect()
}

pub fn search_body(args: &PeopleArgs) -> Value {
    if args.inactive {
        json!({ "showInactive": true })
    } else {
        Value::Object(Map::new())
    }
}

pub fn list_people(ctx: &AppContext<'_>, args: &PeopleArgs) -> Result<String> {
    let client = ctx.client(&args.output)?;
    let response = client.post_json(&["people", "search"], Some(&search_body(args)))?;
    let people = extract_people(&response);
    let fetched = people.len();
    let people = filter_people(people, args);
    debug!(fetched, kept = people.len(), "filtered people");
    output_list(&people, &args.output, Some(EntityType::Person), Some(person_row))
}

pub fn view_person(ctx: &AppContext<'_>, args: &PersonArgs) -> Result<String> {
    let id = require_id(&args.id, "Person id is required.")?;
    let client = ctx.client(&args.output)?;
    let response = client.post_json(&["people", id], None)?;
    let person = extract_person(&response);
    output_item(&person, &args.output, Some(EntityType::Person), Some(person_view))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn staff() -> Vec<Value> {
        vec![
            json!({"id": "1", "displayName": "Ava Stone", "work": {"department": "Engineering"}}),
            json!({"id": "2", "fullName": "Ben Avery", "department": "Sales", "status": "Active"}),
            json!({"id": "3", "name": "Cy Old", "work": {"department": "Engineering"}, "active": false}),
            json!({"id": "4", "work": {"department": "engineering ops"}, "employmentStatus": "terminated"}),
        ]
    }

    fn ids(people: &[Value]) -> Vec<&str> {
        people.iter().filter_map(|p| p["id"].as_str()).collect()
    }

    #[test]
    fn drops_inactive_people_by_default() {
        let kept = filter_people(staff(), &PeopleArgs::default());
        assert_eq!(ids(&kept), vec!["1", "2"]);
    }

    #[test]
    fn inactive_flag_keeps_everyone() {
        let args = PeopleArgs {
            inactive: true,
            ..Default::default()
        };
        assert_eq!(ids(&filter_people(staff(), &args)), vec!["1", "2", "3", "4"]);
        assert_eq!(search_body(&args), json!({"showInactive": true}));
        assert_eq!(search_body(&PeopleArgs::default()), json!({}));
    }

    #[test]
    fn query_matches_display_name_case_insensitively() {
        let args = PeopleArgs {
            query: Some("  AV ".into()),
            ..Default::default()
        };
        assert_eq!(ids(&filter_people(staff(), &args)), vec!["1", "2"]);
    }

    #[test]
    fn department_filter_uses_resolved_department() {
        let args = PeopleArgs {
            department: Some("engineering".into()),
            inactive: true,
            ..Default::default()
        };
        assert_eq!(ids(&filter_people(staff(), &args)), vec!["1", "3", "4"]);
    }

    #[test]
    fn blank_person_id_fails_before_any_request() {
        let env: HashMap<String, String> = HashMap::new();
        let ctx = AppContext {
            env: &env,
            base_url: Some("http://127.0.0.1:9".into()),
            no_spinner: true,
        };
        let args = PersonArgs {
            id: " ".into(),
            output: OutputOptions::default(),
        };
        let err = view_person(&ctx, &args).unwrap_err();
        assert!(err.to_string().contains("MISSING_ID"));
    }
}
