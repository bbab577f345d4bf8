//! CLI subcommand implementations.

pub mod log;
pub mod record;
pub mod report;
pub mod status;
pub mod sweep;
pub mod util;
