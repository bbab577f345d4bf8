use std::io;
use std::path::Path;

use anyhow::{Context, Result};
use attn_core::{EmployeeId, EventStore};
use attn_store::Journal;
use chrono::{TimeDelta, Utc};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use attn_cli::commands::{log, record, report, status, sweep, util};
use attn_cli::{Cli, Commands, Config};

/// Load config and open the journal, ensuring its directory exists.
fn open_journal(config_path: Option<&Path>) -> Result<(Journal, Config)> {
    let config = Config::load_from(config_path).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    let journal = Journal::open(&config.log_path).context("failed to open event journal")?;
    Ok((journal, config))
}

fn parse_employee(employee: Option<&str>) -> Result<Option<EmployeeId>> {
    employee
        .map(EmployeeId::new)
        .transpose()
        .context("invalid --employee")
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    let mut stdout = io::stdout().lock();

    match &cli.command {
        Some(Commands::Record {
            employee,
            action,
            at,
        }) => {
            let (mut journal, config) = open_journal(cli.config.as_deref())?;
            let employee = EmployeeId::new(employee.as_str()).context("invalid employee")?;
            let at = match at {
                Some(when) => {
                    let now = Utc::now().with_timezone(&config.offset()?);
                    util::parse_when(when, now)?
                }
                None => config.now_local()?,
            };
            record::run(&mut stdout, &mut journal, employee, *action, at)?;
        }
        Some(Commands::Log { employee, json }) => {
            let (journal, _config) = open_journal(cli.config.as_deref())?;
            let employee = parse_employee(employee.as_deref())?;
            let events = journal.load().context("failed to load events")?;
            log::run(&mut stdout, &events, employee.as_ref(), *json)?;
        }
        Some(Commands::Report {
            employee,
            from,
            to,
            json,
        }) => {
            let (journal, _config) = open_journal(cli.config.as_deref())?;
            let filter = report::ReportFilter {
                employee: parse_employee(employee.as_deref())?,
                from: *from,
                to: *to,
            };
            let events = journal.load().context("failed to load events")?;
            report::run(&mut stdout, &events, &filter, *json)?;
        }
        Some(Commands::Status { employee }) => {
            let (journal, _config) = open_journal(cli.config.as_deref())?;
            let employee = parse_employee(employee.as_deref())?;
            let events = journal.load().context("failed to load events")?;
            status::run(&mut stdout, &events, employee.as_ref())?;
        }
        Some(Commands::Sweep { timeout_minutes }) => {
            let (mut journal, config) = open_journal(cli.config.as_deref())?;
            let timeout = match timeout_minutes {
                Some(minutes) => TimeDelta::try_minutes(*minutes)
                    .with_context(|| format!("--timeout-minutes out of range: {minutes}"))?,
                None => config.inactivity_timeout()?,
            };
            sweep::run(&mut stdout, &mut journal, config.now_local()?, timeout)?;
        }
        None => {
            // No subcommand, show help
            use clap::CommandFactory;
            Cli::command().print_help()?;
            println!();
        }
    }

    Ok(())
}
