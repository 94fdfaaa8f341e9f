//! Runtime configuration for the search CLI.

use std::time::Duration;

use clap::Parser;

use crate::spec::{KeySpec, SpecError};

/// Ethereum Vanity Address Search
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Address prefix to search for (hex characters only: 0-9, a-f, A-F)
    #[arg(short, long, default_value = "")]
    pub prefix: String,

    /// Address suffix to search for (hex characters only: 0-9, a-f, A-F)
    #[arg(short, long, default_value = "")]
    pub suffix: String,

    /// Require exact EIP-55 checksum casing of the pattern
    #[arg(short = 'c', long, default_value = "false")]
    pub checksum: bool,

    /// Progress report interval in milliseconds
    #[arg(short = 'r', long, default_value = "1000")]
    pub report_interval_ms: u64,

    /// Assumed search speed (addresses/second) for the upfront estimate
    #[arg(long, default_value = "1000")]
    pub assumed_speed: f64,
}

impl Config {
    /// Validates the pattern input and builds the search target.
    pub fn to_spec(&self) -> Result<KeySpec, SpecError> {
        KeySpec::new(self.prefix.clone(), self.suffix.clone(), self.checksum)
    }

    /// Progress report interval as a duration.
    pub fn report_interval(&self) -> Duration {
        Duration::from_millis(self.report_interval_ms)
    }
}
