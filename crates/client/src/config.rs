//! Environment-driven client configuration.
use std::env;
use std::path::PathBuf;

use beam_runtime::RuntimeConfig;
use strum::{Display, EnumString};

/// Rounds the terminal client allows before calling the game a draw.
pub const DEFAULT_MAX_ROUNDS: u64 = 100;

/// How events are printed to stdout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum EventFormat {
    #[default]
    Text,
    Json,
}

#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub runtime: RuntimeConfig,
    /// Log to stderr instead of the log file.
    pub log_stderr: bool,
    /// Overrides the platform log directory.
    pub log_dir: Option<PathBuf>,
    pub event_format: EventFormat,
    /// Every piece is computer-controlled.
    pub autoplay: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            runtime: RuntimeConfig {
                max_rounds: Some(DEFAULT_MAX_ROUNDS),
                ..RuntimeConfig::default()
            },
            log_stderr: false,
            log_dir: None,
            event_format: EventFormat::Text,
            autoplay: false,
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> Self {
        let mut config = Self::default();

        config.runtime = RuntimeConfig::from_env();
        if config.runtime.max_rounds.is_none() {
            config.runtime.max_rounds = Some(DEFAULT_MAX_ROUNDS);
        }

        if let Some(enable) = read_flag("BEAM_LOG_STDERR") {
            config.log_stderr = enable;
        }

        config.log_dir = env::var("BEAM_LOG_DIR").ok().map(PathBuf::from);

        if let Some(format) = read_env::<EventFormat>("BEAM_EVENT_FORMAT") {
            config.event_format = format;
        }

        if let Some(enable) = read_flag("BEAM_AUTOPLAY") {
            config.autoplay = enable;
        }

        config
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

fn read_flag(key: &str) -> Option<bool> {
    parse_flag(&env::var(key).ok()?)
}

/// Accepts `true`/`false`, `1`/`0`; an empty value counts as set.
fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "" | "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_format_parses_case_insensitively() {
        assert_eq!("json".parse::<EventFormat>(), Ok(EventFormat::Json));
        assert_eq!("TEXT".parse::<EventFormat>(), Ok(EventFormat::Text));
        assert!("yaml".parse::<EventFormat>().is_err());
    }

    #[test]
    fn flags_accept_common_spellings() {
        assert_eq!(parse_flag("1"), Some(true));
        assert_eq!(parse_flag(""), Some(true));
        assert_eq!(parse_flag("False"), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }

    #[test]
    fn default_caps_rounds() {
        assert_eq!(
            ClientConfig::default().runtime.max_rounds,
            Some(DEFAULT_MAX_ROUNDS)
        );
    }
}
