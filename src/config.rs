use std::env;

use crate::error::ConfigError;

pub const DEFAULT_BIND: &str = "127.0.0.1:8000";
pub const DEFAULT_STATIC_DIR: &str = "frontend/dist";
pub const DEFAULT_BOARD_SIZE: usize = 7;
pub const DEFAULT_WIN_LENGTH: usize = 4;

/// Server settings, read from `STACKED_FOURSIDE_*` environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub bind: String,
    /// Public host handed out in registration URLs. When set, clients are
    /// told to connect over `wss`.
    pub public_host: Option<String>,
    pub static_dir: String,
    pub board_size: usize,
    pub win_length: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            bind: DEFAULT_BIND.to_string(),
            public_host: None,
            static_dir: DEFAULT_STATIC_DIR.to_string(),
            board_size: DEFAULT_BOARD_SIZE,
            win_length: DEFAULT_WIN_LENGTH,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Config::default();
        let config = Config {
            bind: lookup("STACKED_FOURSIDE_BIND").unwrap_or(defaults.bind),
            public_host: lookup("STACKED_FOURSIDE_HOST").filter(|host| !host.is_empty()),
            static_dir: lookup("STACKED_FOURSIDE_STATIC_DIR").unwrap_or(defaults.static_dir),
            board_size: parse_number(&lookup, "STACKED_FOURSIDE_BOARD_SIZE", defaults.board_size)?,
            win_length: parse_number(&lookup, "STACKED_FOURSIDE_WIN_LENGTH", defaults.win_length)?,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.board_size == 0 {
            return Err(ConfigError::EmptyBoard);
        }
        if self.win_length == 0 || self.win_length > self.board_size {
            return Err(ConfigError::WinLength {
                win_length: self.win_length,
                size: self.board_size,
            });
        }
        Ok(())
    }

    /// Websocket URL a registered session should connect to.
    pub fn session_url(&self, session_id: &str) -> String {
        match &self.public_host {
            Some(host) => format!("wss://{host}/ws/{session_id}"),
            None => format!("ws://{}/ws/{session_id}", self.bind),
        }
    }
}

fn parse_number(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    default: usize,
) -> Result<usize, ConfigError> {
    match lookup(name) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::NotANumber { name, value }),
    }
}
