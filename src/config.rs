//! Configuration and CLI argument handling

use std::path::PathBuf;

use clap::Parser;

use crate::{
    error::SessionError,
    services::AlertConfig,
    state::{
        configuration::{DEFAULT_BREAK_SECONDS, DEFAULT_FOCUS_SECONDS},
        Configuration,
    },
};

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "focus-loop")]
#[command(about = "A focus/break interval timer with a local HTTP control surface")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Focus phase duration in minutes (1-1439)
    #[arg(short, long, default_value_t = DEFAULT_FOCUS_SECONDS / 60)]
    pub focus_minutes: u32,

    /// Break phase duration in seconds (10-3599)
    #[arg(short, long, default_value_t = DEFAULT_BREAK_SECONDS)]
    pub break_seconds: u32,

    /// Sound file played when a focus phase ends
    #[arg(long)]
    pub alert_sound: Option<PathBuf>,

    /// Command used to play the alert sound
    #[arg(long, default_value = "paplay")]
    pub sound_player: String,

    /// Do not show desktop notifications
    #[arg(long)]
    pub no_desktop_notify: bool,

    /// Start the first focus phase immediately
    #[arg(long)]
    pub autostart: bool,

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
        if self.verbose { "debug" } else { "info" }
    }

    /// Validated phase durations from the command line
    pub fn timer_configuration(&self) -> Result<Configuration, SessionError> {
        let mut config = Configuration::default();
        config.set_focus_minutes(self.focus_minutes)?;
        config.set_break_seconds(self.break_seconds)?;
        Ok(config)
    }

    pub fn alert_config(&self) -> AlertConfig {
        AlertConfig {
            sound: self.alert_sound.clone(),
            player: self.sound_player.clone(),
            desktop: !self.no_desktop_notify,
        }
    }
}
