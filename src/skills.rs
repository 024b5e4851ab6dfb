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

//! Skill files that teach coding agents how to drive `bob`.

use crate::schema::{EntityType, describe_fields};
use anyhow::{Context, Result, anyhow};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const SKILL_NAME: &str = "hibob";
pub const SKILL_DESCRIPTION: &str =
    "Query HiBob HR data: employee directory and who's out via the bob CLI";

const SKILL_BODY: &str = r#"# HiBob CLI (bob)

Use this skill when the user wants to query HiBob HR data.

## Quick Reference

- `bob people` - List employees
- `bob people "john"` - Search employees by name (local filter)
- `bob person <id>` - View a single employee
- `bob whosout` - Who is out of office
- `bob outtoday` - Who is out today
- `bob timeoff <id>` - Time-off balance for an employee
- `bob skill list` - List supported agents

## Output Formats

All list and item commands support:
- `--json` - JSON output (essential fields)
- `--ndjson` - Newline-delimited JSON
- `--full` - Include all fields in JSON

## Examples

```bash
bob people --json
bob people "Ava" --department "Engineering"
bob person 12345
bob whosout --from 2024-01-15 --to 2024-01-20
bob outtoday --date 2024-01-15
```
"#;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Agent {
    pub name: &'static str,
    pub description: &'static str,
    /// Agent config directory under the install root
    pub dir_name: &'static str,
}

pub const AGENTS: &[Agent] = &[
    Agent {
        name: "claude-code",
        description: "Claude Code skill for HiBob CLI",
        dir_name: ".claude",
    },
    Agent {
        name: "codex",
        description: "Codex skill for HiBob CLI",
        dir_name: ".codex",
    },
    Agent {
        name: "cursor",
        description: "Cursor skill for HiBob CLI",
        dir_name: ".cursor",
    },
];

pub fn find_agent(name: &str) -> Result<&'static Agent> {
    AGENTS.iter().find(|a| a.name == name).ok_or_else(|| {
        let known: Vec<_> = AGENTS.iter().map(|a| a.name).collect();
        anyhow!(
            "Unknown agent `{}`. Supported agents: {}",
            name,
            known.join(", ")
        )
    })
}

/// Full `SKILL.md`: front matter, usage, and the essential-field reference.
pub fn skill_content() -> String {
    let mut content = format!(
        "---\nname: {SKILL_NAME}\ndescription: {SKILL_DESCRIPTION}\n---\n\n{SKILL_BODY}"
    );
    content.push_str("\n## Essential Fields\n");
    for entity in EntityType::all() {
        content.push_str(&format!("\n### {entity}\n\n{}\n", describe_fields(entity)));
    }
    content
}

impl Agent {
    pub fn skill_dir(&self, root: &Path) -> PathBuf {
        root.join(self.dir_name).join("skills").join(SKILL_NAME)
    }

    pub fn install(&self, root: &Path) -> Result<PathBuf> {
        let dir = self.skill_dir(root);
        fs::create_dir_all(&dir).with_context(|| format!("creating {:?}", dir))?;
        let path = dir.join("SKILL.md");
        fs::write(&path, skill_content()).with_context(|| format!("writing {:?}", path))?;
        debug!(agent = self.name, path = %path.display(), "installed skill");
        Ok(path)
    }

    /// Returns whether anything was removed.
    pub fn uninstall(&self, root: &Path) -> Result<bool> {
        let dir = self.skill_dir(root);
        match fs::remove_dir_all(&dir) {
            Ok(()) => Ok(true),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(false),
            Err(err) => Err(err).with_context(|| format!("removing {:?}", dir)),
        }
    }

    pub fn is_installed(&self, root: &Path) -> bool {
        self.skill_dir(root).join("SKILL.md").is_file()
    }
}
