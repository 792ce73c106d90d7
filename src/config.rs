use std::env;

use crate::error::AppError;
use crate::presenter::{ChronoDateFormatter, DEFAULT_DATE_FORMAT};

pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Runtime settings for the `userkit` binary. Command-line flags take precedence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub date_format: String,
    pub show_actions: bool,
    pub page_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            show_actions: true,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl Config {
    /// Loads `.env` if present, then reads `USERKIT_*` variables.
    pub fn from_env() -> Result<Self, AppError> {
        dotenv::dotenv().ok();
        Self::from_vars(|key| env::var(key).ok())
    }

    fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let defaults = Self::default();

        let date_format = lookup("USERKIT_DATE_FORMAT").unwrap_or(defaults.date_format);

        let show_actions = match lookup("USERKIT_SHOW_ACTIONS") {
            Some(raw) => parse_flag(&raw).ok_or_else(|| {
                AppError::Config(format!("USERKIT_SHOW_ACTIONS must be a boolean, got '{}'", raw))
            })?,
            None => defaults.show_actions,
        };

        let page_size = match lookup("USERKIT_PAGE_SIZE") {
            Some(raw) => match raw.trim().parse::<usize>() {
                Ok(size) if size > 0 => size,
                _ => {
                    return Err(AppError::Config(format!(
                        "USERKIT_PAGE_SIZE must be a positive integer, got '{}'",
                        raw
                    )))
                }
            },
            None => defaults.page_size,
        };

        Ok(Self {
            date_format,
            show_actions,
            page_size,
        })
    }

    /// Builds the formatter described by `date_format`, rejecting malformed patterns.
    pub fn date_formatter(&self) -> Result<ChronoDateFormatter, AppError> {
        ChronoDateFormatter::new(self.date_format.clone())
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
