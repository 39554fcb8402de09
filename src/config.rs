//! Binary configuration.
//!
//! Defaults overridden by `HAND_CRICKET_*` environment variables.

use std::str::FromStr;

use crate::game::setup::{GameMode, PlayerNames};

/// Environment variable holding the RNG seed.
pub const ENV_SEED: &str = "HAND_CRICKET_SEED";
/// Environment variable holding the mode (`computer` or `player`).
pub const ENV_MODE: &str = "HAND_CRICKET_MODE";
/// Environment variable holding player 1's team.
pub const ENV_TEAM1: &str = "HAND_CRICKET_TEAM1";
/// Environment variable holding player 2's team.
pub const ENV_TEAM2: &str = "HAND_CRICKET_TEAM2";
/// Environment variable holding player 1's display name.
pub const ENV_NAME1: &str = "HAND_CRICKET_NAME1";
/// Environment variable holding player 2's display name.
pub const ENV_NAME2: &str = "HAND_CRICKET_NAME2";
/// Environment variable holding the log filter.
pub const ENV_LOG: &str = "HAND_CRICKET_LOG";
/// Environment variable switching to the interactive terminal match.
pub const ENV_INTERACTIVE: &str = "HAND_CRICKET_INTERACTIVE";

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Value could not be parsed for its key.
    #[error("invalid value for {key}: {value:?}")]
    InvalidValue {
        /// Environment key.
        key: &'static str,
        /// Raw value.
        value: String,
    },
}

/// Runtime configuration for the binary.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    /// Fixed RNG seed. Derived from a fresh match id when unset.
    pub seed: Option<u64>,
    /// Game mode.
    pub mode: GameMode,
    /// Player 1's team.
    pub team1: String,
    /// Player 2's team.
    pub team2: String,
    /// Display names.
    pub names: PlayerNames,
    /// `tracing` filter directive.
    pub log_filter: String,
    /// Read ball numbers from stdin instead of auto-playing.
    pub interactive: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            seed: None,
            mode: GameMode::VsComputer,
            team1: "India".to_string(),
            team2: "Australia".to_string(),
            names: PlayerNames::for_mode(GameMode::VsComputer),
            log_filter: "info".to_string(),
            interactive: false,
        }
    }
}

impl AppConfig {
    /// Defaults overridden by the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by `lookup`, which maps keys to raw values.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(ENV_SEED) {
            config.seed = Some(parse(ENV_SEED, &raw)?);
        }
        if let Some(raw) = lookup(ENV_MODE) {
            config.mode = parse(ENV_MODE, &raw)?;
            config.names = PlayerNames::for_mode(config.mode);
        }
        if let Some(team) = lookup(ENV_TEAM1) {
            config.team1 = team;
        }
        if let Some(team) = lookup(ENV_TEAM2) {
            config.team2 = team;
        }
        if let Some(name) = lookup(ENV_NAME1) {
            config.names.player1 = name;
        }
        if let Some(name) = lookup(ENV_NAME2) {
            config.names.player2 = name;
        }
        if let Some(filter) = lookup(ENV_LOG) {
            config.log_filter = filter;
        }
        if let Some(raw) = lookup(ENV_INTERACTIVE) {
            config.interactive = parse_flag(ENV_INTERACTIVE, &raw)?;
        }

        Ok(config)
    }
}

fn parse<T: FromStr>(key: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key,
        value: raw.to_string(),
    })
}

fn parse_flag(key: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key,
            value: raw.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: BTreeMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_env() {
        let config = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.names.player2, "Computer");
    }

    #[test]
    fn test_overrides() {
        let config = AppConfig::from_lookup(lookup(&[
            (ENV_SEED, "42"),
            (ENV_MODE, "player"),
            (ENV_TEAM1, "England"),
            (ENV_TEAM2, "Pakistan"),
            (ENV_NAME1, "Asha"),
            (ENV_LOG, "debug"),
            (ENV_INTERACTIVE, "yes"),
        ]))
        .unwrap();

        assert_eq!(config.seed, Some(42));
        assert_eq!(config.mode, GameMode::VsPlayer);
        assert_eq!((config.team1.as_str(), config.team2.as_str()), ("England", "Pakistan"));
        assert_eq!(config.names.player1, "Asha");
        assert_eq!(config.names.player2, "Player 2");
        assert_eq!(config.log_filter, "debug");
        assert!(config.interactive);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = AppConfig::from_lookup(lookup(&[(ENV_SEED, "soon")])).unwrap_err();
        assert_eq!(err, ConfigError::InvalidValue { key: ENV_SEED, value: "soon".into() });

        assert!(AppConfig::from_lookup(lookup(&[(ENV_MODE, "spectator")])).is_err());
        assert!(AppConfig::from_lookup(lookup(&[(ENV_INTERACTIVE, "maybe")])).is_err());
    }
}
