//! Configuration loading and management.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use chrono::{FixedOffset, NaiveDateTime, TimeDelta, Utc};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

/// Longest accepted inactivity timeout, one year in minutes.
pub const MAX_TIMEOUT_MINUTES: i64 = 366 * 24 * 60;

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to the event journal.
    pub log_path: PathBuf,

    /// Offset from UTC that all recorded dates and times are local to.
    pub utc_offset_minutes: i32,

    /// How long a home session may stay open before `sweep` closes it.
    pub inactivity_timeout_minutes: i64,
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = dirs_data_path().unwrap_or_else(|| PathBuf::from("."));
        Self {
            log_path: data_dir.join("events.jsonl"),
            utc_offset_minutes: 180,
            inactivity_timeout_minutes: 30,
        }
    }
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (ATTN_*)
        figment = figment.merge(Env::prefixed("ATTN_"));

        figment.extract()
    }

    /// The fixed offset recorded times are local to.
    pub fn offset(&self) -> Result<FixedOffset> {
        self.utc_offset_minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .with_context(|| {
                format!(
                    "utc_offset_minutes out of range: {}",
                    self.utc_offset_minutes
                )
            })
    }

    /// Current wall-clock time at the configured offset.
    pub fn now_local(&self) -> Result<NaiveDateTime> {
        Ok(Utc::now().with_timezone(&self.offset()?).naive_local())
    }

    /// The configured inactivity timeout.
    ///
    /// Must be between one minute and [`MAX_TIMEOUT_MINUTES`].
    pub fn inactivity_timeout(&self) -> Result<TimeDelta> {
        let minutes = self.inactivity_timeout_minutes;
        if !(1..=MAX_TIMEOUT_MINUTES).contains(&minutes) {
            bail!(
                "inactivity_timeout_minutes must be between 1 and {MAX_TIMEOUT_MINUTES}, got {minutes}"
            );
        }
        TimeDelta::try_minutes(minutes)
            .with_context(|| format!("inactivity_timeout_minutes out of range: {minutes}"))
    }
}

/// Returns the platform-specific config directory for attn.
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("attn"))
}

/// Returns the platform-specific data directory for attn.
///
/// On Linux: `~/.local/share/attn`
pub fn dirs_data_path() -> Option<PathBuf> {
    dirs::data_dir().map(|p| p.join("attn"))
}
