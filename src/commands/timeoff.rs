use super::{AppContext, require_id};
use crate::envelope::{extract_balance, extract_timeoff};
use crate::output::{OutputOptions, output_item, output_list};
use crate::render::{timeoff_balance, timeoff_row};
use crate::schema::EntityType;
use anyhow::Result;
use clap::Args;

#[derive(Args, Debug, Clone, Default)]
pub struct WhosOutArgs {
    /// Start date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub from: Option<String>,
    /// End date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub to: Option<String>,
    #[command(flatten)]
    pub output: OutputOptions,
}

#[derive(Args, Debug, Clone, Default)]
pub struct OutTodayArgs {
    /// Specific date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub date: Option<String>,
    #[command(flatten)]
    pub output: OutputOptions,
}

#[derive(Args, Debug, Clone)]
pub struct BalanceArgs {
    /// Employee id
    #[arg(value_name = "ID")]
    pub id: String,
    #[command(flatten)]
    pub output: OutputOptions,
}

fn push_param(query: &mut Vec<(&'static str, String)>, key: &'static str, value: &Option<String>) {
    if let Some(value) = value.as_ref().filter(|v| !v.is_empty()) {
        query.push((key, value.clone()));
    }
}

pub fn whos_out_query(args: &WhosOutArgs) -> Vec<(&'static str, String)> {
    let mut query = Vec::new();
    push_param(&mut query, "from", &args.from);
    push_param(&mut query, "to", &args.to);
    query
}

pub fn out_today_query(args: &OutTodayArgs) -> Vec<(&'static str, String)> {
    let mut query = Vec::new();
    push_param(&mut query, "date", &args.date);
    query
}

pub fn list_whos_out(ctx: &AppContext<'_>, args: &WhosOutArgs) -> Result<String> {
    let client = ctx.client(&args.output)?;
    let response = client.get(&["timeoff", "whosout"], &whos_out_query(args))?;
    let entries = extract_timeoff(&response);
    output_list(&entries, &args.output, Some(EntityType::Timeoff), Some(timeoff_row))
}

pub fn list_out_today(ctx: &AppContext<'_>, args: &OutTodayArgs) -> Result<String> {
    let client = ctx.client(&args.output)?;
    let response = client.get(&["timeoff", "outtoday"], &out_today_query(args))?;
    let entries = extract_timeoff(&response);
    output_list(&entries, &args.output, Some(EntityType::Timeoff), Some(timeoff_row))
}

pub fn show_balance(ctx: &AppContext<'_>, args: &BalanceArgs) -> Result<String> {
    let id = require_id(&args.id, "Employee id is required.")?;
    let client = ctx.client(&args.output)?;
    let response = client.get(&["timeoff", "employees", id, "balance"], &[])?;
    let entry = extract_balance(&response);
    output_item(&entry, &args.output, Some(EntityType::Timeoff), Some(timeoff_balance))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whos_out_query_skips_missing_dates() {
        let args = WhosOutArgs {
            from: Some("2024-01-15".into()),
            to: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(whos_out_query(&args), vec![("from", "2024-01-15".to_string())]);
        assert!(whos_out_query(&WhosOutArgs::default()).is_empty());
    }

    #[test]
    fn out_today_query_passes_date() {
        let args = OutTodayArgs {
            date: Some("2024-01-15".into()),
            ..Default::default()
        };
        assert_eq!(out_today_query(&args), vec![("date", "2024-01-15".to_string())]);
    }
}
