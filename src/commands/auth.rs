use super::AppContext;
use crate::auth::{AuthStatus, CredentialResolver, CredentialSource};
use crate::config::ConfigStore;
use anyhow::{Context, Result, bail};
use colored::Colorize;
use std::io::{self, Write};
use tracing::debug;

fn prompt_line(question: &str) -> Result<String> {
    print!("{question}");
    io::stdout().flush()?;
    let mut input = String::new();
    io::stdin()
        .read_line(&mut input)
        .context("Failed to read input")?;
    Ok(input.trim().to_string())
}

/// Interactive login: service id is echoed, the token is not.
pub fn login(ctx: &AppContext<'_>) -> Result<String> {
    println!("Enter your HiBob service user credentials.");
    println!("You can find these in HiBob under Settings > Integrations > Service Users.\n");

    let service_id = prompt_line("Service ID: ")?;
    if service_id.is_empty() {
        bail!("Service ID cannot be empty.");
    }
    let api_token = rpassword::prompt_password("API Token: ")
        .context("Failed to read API token")?
        .trim()
        .to_string();

    save_credentials(&ctx.config_store()?, &service_id, &api_token)
}

pub fn save_credentials(store: &ConfigStore, service_id: &str, api_token: &str) -> Result<String> {
    if service_id.is_empty() {
        bail!("Service ID cannot be empty.");
    }
    if api_token.is_empty() {
        bail!("API Token cannot be empty.");
    }
    store.write(service_id, api_token)?;
    Ok(format!(
        "\n{}",
        format!("Credentials saved to {}", store.path().display()).green()
    ))
}

pub fn status(ctx: &AppContext<'_>) -> Result<String> {
    let store = ctx.config_store()?;
    let status = CredentialResolver::new(ctx.env, &store).status()?;
    debug!(service_id = %status.service_id, api_token = %status.api_token, "auth status");
    Ok(status_report(status))
}

pub fn status_report(status: AuthStatus) -> String {
    if status.is_unauthenticated() {
        return format!(
            "{}\nRun {} or set HIBOB_SERVICE_ID and HIBOB_API_TOKEN environment variables.",
            "Not authenticated.".yellow(),
            "bob auth login".cyan()
        );
    }

    let mut lines = vec![
        format!("Service ID: {}", status.service_id.label()),
        format!("API Token:  {}", status.api_token.label()),
    ];
    if status.service_id == CredentialSource::None {
        lines.push(format!("\n{}", "Warning: Service ID is not configured.".yellow()));
    }
    if status.api_token == CredentialSource::None {
        lines.push(format!("\n{}", "Warning: API Token is not configured.".yellow()));
    }
    lines.join("\n")
}

pub fn logout(ctx: &AppContext<'_>) -> Result<String> {
    ctx.config_store()?.delete()?;
    Ok("Config file credentials removed.\nNote: environment variables (if set) are not affected."
        .to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn save_rejects_empty_values() {
        let dir = tempdir().unwrap();
        let store = ConfigStore::with_path(dir.path().join("config.json"));
        let err = save_credentials(&store, "", "tok").unwrap_err();
        assert_eq!(err.to_string(), "Service ID cannot be empty.");
        let err = save_credentials(&store, "svc", "").unwrap_err();
        assert_eq!(err.to_string(), "API Token cannot be empty.");
        assert!(store.read().unwrap().is_none());
    }

    #[test]
    fn save_writes_config() {
        colored::control::set_override(false);
        let dir = tempdir().unwrap();
        let store = ConfigStore::with_path(dir.path().join("config.json"));
        let message = save_credentials(&store, "svc", "tok").unwrap();
        assert!(message.contains("Credentials saved to"));
        let config = store.read().unwrap().unwrap();
        assert_eq!(config.service_id, "svc");
        assert_eq!(config.api_token, "tok");
    }

    #[test]
    fn report_for_unauthenticated() {
        colored::control::set_override(false);
        let report = status_report(AuthStatus {
            service_id: CredentialSource::None,
            api_token: CredentialSource::None,
        });
        assert!(report.starts_with("Not authenticated.\nRun bob auth login"));
    }

    #[test]
    fn report_lists_sources_and_warnings() {
        colored::control::set_override(false);
        let report = status_report(AuthStatus {
            service_id: CredentialSource::Env,
            api_token: CredentialSource::None,
        });
        assert_eq!(
            report,
            "Service ID: environment variable\nAPI Token:  not configured\n\nWarning: API Token is not configured."
        );
    }
}
