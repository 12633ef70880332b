//! # Bot Configuration Module
//!
//! Reads startup settings from the environment. A missing bot token is the
//! only fatal condition.

use std::fmt;
use std::path::PathBuf;

use crate::resources::DEFAULT_RESOURCES_PATH;

pub const TOKEN_VAR: &str = "BOT_TOKEN";
pub const TOKEN_ALIAS_VAR: &str = "TELEGRAM_BOT_TOKEN";
pub const RESOURCES_PATH_VAR: &str = "RESOURCES_PATH";
pub const LOG_FORMAT_VAR: &str = "LOG_FORMAT";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl LogFormat {
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some(format) if format.eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Pretty,
        }
    }

    /// Decided before the rest of the config so startup errors get logged
    pub fn from_env() -> Self {
        Self::parse(std::env::var(LOG_FORMAT_VAR).ok().as_deref())
    }
}

/// Errors that can occur when loading configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    MissingToken,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::MissingToken => {
                write!(f, "{TOKEN_VAR} is not set (or {TOKEN_ALIAS_VAR})")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Runtime settings for the bot
#[derive(Clone)]
pub struct BotConfig {
    pub bot_token: String,
    pub resources_path: PathBuf,
}

impl fmt::Debug for BotConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BotConfig")
            .field("bot_token", &"<redacted>")
            .field("resources_path", &self.resources_path)
            .finish()
    }
}

impl BotConfig {
    /// Load configuration from process environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let bot_token = non_blank(TOKEN_VAR)
            .or_else(|| non_blank(TOKEN_ALIAS_VAR))
            .ok_or(ConfigError::MissingToken)?;

        let resources_path = non_blank(RESOURCES_PATH_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_RESOURCES_PATH));

        Ok(Self {
            bot_token: bot_token.trim().to_string(),
            resources_path,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_missing_token_is_an_error() {
        assert_eq!(
            BotConfig::from_lookup(lookup(&[])).unwrap_err(),
            ConfigError::MissingToken
        );
        assert_eq!(
            BotConfig::from_lookup(lookup(&[(TOKEN_VAR, "  ")])).unwrap_err(),
            ConfigError::MissingToken
        );
    }

    #[test]
    fn test_defaults() {
        let config = BotConfig::from_lookup(lookup(&[(TOKEN_VAR, "123:abc")])).unwrap();
        assert_eq!(config.bot_token, "123:abc");
        assert_eq!(config.resources_path, PathBuf::from(DEFAULT_RESOURCES_PATH));
    }

    #[test]
    fn test_alias_and_overrides() {
        let config = BotConfig::from_lookup(lookup(&[
            (TOKEN_ALIAS_VAR, "456:def"),
            (RESOURCES_PATH_VAR, "/etc/bot/town.json"),
        ]))
        .unwrap();
        assert_eq!(config.bot_token, "456:def");
        assert_eq!(config.resources_path, PathBuf::from("/etc/bot/town.json"));
    }

    #[test]
    fn test_log_format_parsing() {
        assert_eq!(LogFormat::parse(Some(" JSON ")), LogFormat::Json);
        assert_eq!(LogFormat::parse(Some("pretty")), LogFormat::Pretty);
        assert_eq!(LogFormat::parse(None), LogFormat::Pretty);
    }

    #[test]
    fn test_debug_hides_token() {
        let config = BotConfig::from_lookup(lookup(&[(TOKEN_VAR, "secret-token")])).unwrap();
        assert!(!format!("{config:?}").contains("secret-token"));
    }
}
