use crate::skills::{AGENTS, find_agent};
use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use std::path::{Path, PathBuf};

#[derive(Args, Debug, Clone)]
pub struct SkillTargetArgs {
    /// Agent name (claude-code, codex, cursor)
    #[arg(value_name = "AGENT")]
    pub agent: String,
    /// Use the current directory instead of the home directory
    #[arg(long)]
    pub local: bool,
}

fn install_root(local: bool) -> Result<PathBuf> {
    if !local && let Some(home) = dirs::home_dir() {
        return Ok(home);
    }
    std::env::current_dir().context("Failed to resolve current directory")
}

pub fn list_at(root: &Path) -> String {
    AGENTS
        .iter()
        .map(|agent| {
            let marker = if agent.is_installed(root) {
                "installed".green()
            } else {
                "not installed".dimmed()
            };
            format!("{:<12} {} ({})", agent.name.bold(), agent.description, marker)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn list() -> Result<String> {
    Ok(list_at(&install_root(false)?))
}

pub fn install_at(root: &Path, agent: &str) -> Result<String> {
    let agent = find_agent(agent)?;
    let path = agent.install(root)?;
    Ok(format!("Installed {} skill to {}", agent.name, path.display())
        .green()
        .to_string())
}

pub fn install(args: &SkillTargetArgs) -> Result<String> {
    install_at(&install_root(args.local)?, &args.agent)
}

pub fn uninstall_at(root: &Path, agent: &str) -> Result<String> {
    let agent = find_agent(agent)?;
    let dir = agent.skill_dir(root);
    Ok(if agent.uninstall(root)? {
        format!("Removed {} skill from {}", agent.name, dir.display())
    } else {
        format!("{} skill is not installed at {}", agent.name, dir.display())
    })
}

pub fn uninstall(args: &SkillTargetArgs) -> Result<String> {
    uninstall_at(&install_root(args.local)?, &args.agent)
}
