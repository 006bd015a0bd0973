//! Configuration and CLI argument handling

use std::path::PathBuf;

use clap::Parser;

use crate::settings::SettingsStore;

/// CLI argument parsing structure
#[derive(Parser)]
#[command(name = "look-away")]
#[command(about = "A background break reminder daemon with an HTTP control surface")]
#[command(version)]
pub struct Config {
    /// Port to bind the control surface to
    #[arg(short, long, default_value = "20977")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Path to the settings file (defaults to the user config directory)
    #[arg(short, long)]
    pub settings: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else {
            "info"
        }
    }

    /// Resolve the settings file location
    pub fn settings_path(&self) -> PathBuf {
        self.settings
            .clone()
            .unwrap_or_else(SettingsStore::default_path)
    }
}
