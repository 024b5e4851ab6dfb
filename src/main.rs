mod attributes;
mod auth;
mod client;
mod commands;
mod config;
mod envelope;
mod logging;
mod output;
mod project;
mod record;
mod render;
mod schema;
mod skills;
mod spinner;

use crate::auth::{EnvSource, ProcessEnv};
use crate::commands::people::{PeopleArgs, PersonArgs};
use crate::commands::skill::SkillTargetArgs;
use crate::commands::timeoff::{BalanceArgs, OutTodayArgs, WhosOutArgs};
use crate::commands::{AppContext, auth as auth_cmd, people, skill, timeoff};
use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use std::process::ExitCode;

const AGENT_NOTE: &str = "\
Note for AI/LLM agents:
  Use --json or --ndjson flags for unambiguous, parseable output.
  Default JSON shows essential fields; use --full for all fields.";

#[derive(Parser)]
#[command(
    name = "bob",
    version,
    about = "HiBob CLI",
    after_help = AGENT_NOTE
)]
struct Cli {
    #[arg(
        long,
        global = true,
        value_name = "URL",
        help = "Base URL for the API (defaults to https://api.hibob.com/v1)"
    )]
    base_url: Option<String>,

    #[arg(long, global = true, help = "Disable loading animations")]
    no_spinner: bool,

    #[arg(
        long,
        short = 'v',
        global = true,
        help = "Log diagnostics to stderr (BOB_LOG overrides)"
    )]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List employees
    People(PeopleArgs),
    /// View a single employee
    Person(PersonArgs),
    /// Who is out of office
    Whosout(WhosOutArgs),
    /// Who is out today
    Outtoday(OutTodayArgs),
    /// Time-off balance for an employee
    Timeoff(BalanceArgs),
    /// Manage authentication credentials
    #[command(subcommand)]
    Auth(AuthCommand),
    /// Manage coding agent skills
    #[command(subcommand)]
    Skill(SkillCommand),
    /// Generate shell completion scripts
    Completion {
        #[arg(value_enum)]
        shell: CompletionShell,
    },
}

#[derive(Subcommand)]
enum AuthCommand {
    /// Save credentials to config file
    Login,
    /// Show current authentication status
    Status,
    /// Remove saved credentials from config file
    Logout,
}

#[derive(Subcommand)]
enum SkillCommand {
    /// List supported agents and install state
    List,
    /// Install the skill for an agent
    Install(SkillTargetArgs),
    /// Remove the skill for an agent
    Uninstall(SkillTargetArgs),
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum CompletionShell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let env = ProcessEnv;
    logging::init(env.var(logging::LOG_ENV).as_deref(), cli.verbose);

    match run(cli, &env) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli, env: &dyn EnvSource) -> Result<()> {
    let ctx = AppContext {
        env,
        base_url: cli.base_url,
        no_spinner: cli.no_spinner,
    };

    let text = match cli.command {
        Commands::People(args) => people::list_people(&ctx, &args)?,
        Commands::Person(args) => people::view_person(&ctx, &args)?,
        Commands::Whosout(args) => timeoff::list_whos_out(&ctx, &args)?,
        Commands::Outtoday(args) => timeoff::list_out_today(&ctx, &args)?,
        Commands::Timeoff(args) => timeoff::show_balance(&ctx, &args)?,
        Commands::Auth(command) => match command {
            AuthCommand::Login => auth_cmd::login(&ctx)?,
            AuthCommand::Status => auth_cmd::status(&ctx)?,
            AuthCommand::Logout => auth_cmd::logout(&ctx)?,
        },
        Commands::Skill(command) => match command {
            SkillCommand::List => skill::list()?,
            SkillCommand::Install(args) => skill::install(&args)?,
            SkillCommand::Uninstall(args) => skill::uninstall(&args)?,
        },
        Commands::Completion { shell } => {
            use clap_complete::{generate, shells};
            let mut cmd = Cli::command();
            let bin = cmd.get_name().to_string();
            let out = &mut std::io::stdout();
            match shell {
                CompletionShell::Bash => generate(shells::Bash, &mut cmd, bin, out),
                CompletionShell::Zsh => generate(shells::Zsh, &mut cmd, bin, out),
                CompletionShell::Fish => generate(shells::Fish, &mut cmd, bin, out),
                CompletionShell::PowerShell => generate(shells::PowerShell, &mut cmd, bin, out),
            }
            String::new()
        }
    };

    output::emit(&text);
    Ok(())
}
