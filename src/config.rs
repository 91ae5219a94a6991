use std::{env, net::SocketAddr, str::FromStr, time::Duration};

use log::{debug, info, warn};

use crate::chunker::DEFAULT_MAX_CHUNK_LENGTH;
use crate::error::{BotError, Result};

const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash-exp";
const DEFAULT_TIMEOUT_SECS: u64 = 60;
const DEFAULT_COMMAND_PREFIX: &str = "!";
const DEFAULT_LIVENESS_PORT: u16 = 5000;

#[derive(Debug, Clone)]
pub struct Config {
    pub discord_token: Option<String>,
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub response_timeout: Duration,
    pub command_prefix: String,
    pub max_chunk_length: usize,
    pub liveness_addr: SocketAddr,
}

impl Config {
    /// Loads configuration from the process environment, merging `.env` first.
    pub fn from_env() -> Result<Self> {
        debug!("Loading configuration from environment");
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let discord_token = non_empty("DISCORD_BOT_TOKEN");
        let gemini_api_key = non_empty("GEMINI_API_KEY");
        if gemini_api_key.is_none() {
            warn!("GEMINI_API_KEY is not set, chat replies will fail until it is configured");
        }

        let gemini_model =
            non_empty("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string());

        let timeout_secs: u64 = parse_or(
            "GEMINI_TIMEOUT_SECS",
            non_empty("GEMINI_TIMEOUT_SECS"),
            DEFAULT_TIMEOUT_SECS,
        )?;
        if timeout_secs == 0 {
            return Err(BotError::Config(
                "GEMINI_TIMEOUT_SECS must be greater than zero".to_string(),
            ));
        }

        let command_prefix =
            lookup("COMMAND_PREFIX").unwrap_or_else(|| DEFAULT_COMMAND_PREFIX.to_string());
        if command_prefix.trim().is_empty() {
            return Err(BotError::Config(
                "COMMAND_PREFIX is set but empty".to_string(),
            ));
        }
        if command_prefix.chars().any(char::is_whitespace) {
            return Err(BotError::Config(
                "COMMAND_PREFIX must not contain whitespace".to_string(),
            ));
        }

        let max_chunk_length = parse_or(
            "MAX_CHUNK_LENGTH",
            non_empty("MAX_CHUNK_LENGTH"),
            DEFAULT_MAX_CHUNK_LENGTH,
        )?;
        if max_chunk_length == 0 {
            return Err(BotError::Config(
                "MAX_CHUNK_LENGTH must be greater than zero".to_string(),
            ));
        }

        let liveness_addr = parse_or(
            "LIVENESS_ADDR",
            non_empty("LIVENESS_ADDR"),
            SocketAddr::from(([0, 0, 0, 0], DEFAULT_LIVENESS_PORT)),
        )?;

        info!("Configuration loaded successfully");
        debug!(
            "Discord token length: {} characters",
            discord_token.as_ref().map_or(0, String::len)
        );
        debug!(
            "Gemini API key length: {} characters",
            gemini_api_key.as_ref().map_or(0, String::len)
        );
        debug!("Gemini model: {gemini_model}");
        debug!("Response timeout: {timeout_secs}s");
        debug!("Command prefix: {command_prefix}");
        debug!("Max chunk length: {max_chunk_length}");
        debug!("Liveness address: {liveness_addr}");

        Ok(Self {
            discord_token,
            gemini_api_key,
            gemini_model,
            response_timeout: Duration::from_secs(timeout_secs),
            command_prefix,
            max_chunk_length,
            liveness_addr,
        })
    }
}

fn parse_or<T>(key: &str, raw: Option<String>, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| BotError::Config(format!("Invalid {key} value '{raw}': {e}"))),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() -> Result<()> {
        let config = config_from(&[])?;
        assert!(config.discord_token.is_none());
        assert!(config.gemini_api_key.is_none());
        assert_eq!(config.gemini_model, "gemini-2.0-flash-exp");
        assert_eq!(config.response_timeout, Duration::from_secs(60));
        assert_eq!(config.command_prefix, "!");
        assert_eq!(config.max_chunk_length, 1950);
        assert_eq!(config.liveness_addr.port(), 5000);
        Ok(())
    }

    #[test]
    fn reads_overrides() -> Result<()> {
        let config = config_from(&[
            ("DISCORD_BOT_TOKEN", "discord"),
            ("GEMINI_API_KEY", "gemini"),
            ("GEMINI_MODEL", "gemini-2.5-flash"),
            ("GEMINI_TIMEOUT_SECS", "15"),
            ("COMMAND_PREFIX", "?"),
            ("MAX_CHUNK_LENGTH", "500"),
            ("LIVENESS_ADDR", "127.0.0.1:8080"),
        ])?;
        assert_eq!(config.discord_token.as_deref(), Some("discord"));
        assert_eq!(config.gemini_api_key.as_deref(), Some("gemini"));
        assert_eq!(config.gemini_model, "gemini-2.5-flash");
        assert_eq!(config.response_timeout, Duration::from_secs(15));
        assert_eq!(config.command_prefix, "?");
        assert_eq!(config.max_chunk_length, 500);
        assert_eq!(config.liveness_addr, SocketAddr::from(([127, 0, 0, 1], 8080)));
        Ok(())
    }

    #[test]
    fn blank_token_counts_as_missing() -> Result<()> {
        let config = config_from(&[("DISCORD_BOT_TOKEN", "   ")])?;
        assert!(config.discord_token.is_none());
        Ok(())
    }

    #[test]
    fn rejects_malformed_numbers() {
        let err = config_from(&[("MAX_CHUNK_LENGTH", "lots")]).unwrap_err();
        assert!(matches!(err, BotError::Config(msg) if msg.contains("MAX_CHUNK_LENGTH")));
    }

    #[test]
    fn rejects_blank_command_prefix() {
        for prefix in ["", "   "] {
            let err = config_from(&[("COMMAND_PREFIX", prefix)]).unwrap_err();
            assert!(matches!(err, BotError::Config(msg) if msg.contains("COMMAND_PREFIX")));
        }
    }

    #[test]
    fn rejects_prefix_with_whitespace() {
        assert!(matches!(
            config_from(&[("COMMAND_PREFIX", "! ")]),
            Err(BotError::Config(_))
        ));
    }

    #[test]
    fn rejects_zero_chunk_length() {
        assert!(matches!(
            config_from(&[("MAX_CHUNK_LENGTH", "0")]),
            Err(BotError::Config(_))
        ));
    }

    #[test]
    fn rejects_bad_liveness_address() {
        assert!(matches!(
            config_from(&[("LIVENESS_ADDR", "not-an-address")]),
            Err(BotError::Config(_))
        ));
    }
}
