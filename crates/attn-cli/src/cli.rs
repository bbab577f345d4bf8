//! Command-line argument definitions.

use std::path::PathBuf;

use attn_core::Action;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use crate::config::MAX_TIMEOUT_MINUTES;

/// Office and home attendance tracker.
///
/// Records arrival and departure events to a local journal and computes
/// daily office and home hours from it.
#[derive(Debug, Parser)]
#[command(name = "attn", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Record an attendance event.
    Record {
        /// The employee the event belongs to.
        employee: String,

        /// One of enter-office, leave-office, enter-home, leave-home.
        action: Action,

        /// When it happened, for manual entries: RFC 3339, "YYYY-MM-DD HH:MM[:SS]",
        /// "HH:MM[:SS]" (today), or relative ("2 hours ago"). Defaults to now.
        #[arg(long)]
        at: Option<String>,
    },

    /// Print raw events in the order they were recorded.
    Log {
        /// Only show this employee's events.
        #[arg(long)]
        employee: Option<String>,

        /// Output as JSON Lines.
        #[arg(long)]
        json: bool,
    },

    /// Show daily office and home hours.
    Report {
        /// Only report this employee.
        #[arg(long)]
        employee: Option<String>,

        /// First day to include (YYYY-MM-DD).
        #[arg(long)]
        from: Option<NaiveDate>,

        /// Last day to include (YYYY-MM-DD).
        #[arg(long)]
        to: Option<NaiveDate>,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show where each employee currently is.
    Status {
        /// Only show this employee.
        #[arg(long)]
        employee: Option<String>,
    },

    /// Close home sessions idle past the inactivity timeout.
    ///
    /// Meant to be run periodically by cron or a systemd timer.
    Sweep {
        /// Override the configured timeout.
        #[arg(long, value_parser = clap::value_parser!(i64).range(1..=MAX_TIMEOUT_MINUTES))]
        timeout_minutes: Option<i64>,
    },
}
