use std::{env, time::Duration};

use kyun_anilist::DEFAULT_ENDPOINT;
use kyun_utils::pagination::{DEFAULT_PAGE_CAPACITY, DEFAULT_TIMEOUT_SECS};

/// Default prefix for message commands.
pub const DEFAULT_COMMAND_PREFIX: &str = "!";
/// Default per-user command cooldown.
pub const DEFAULT_COOLDOWN_SECS: u64 = 5;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required variable `{0}`")]
    Missing(&'static str),
    #[error("variable `{name}` has invalid value `{value}`")]
    Invalid { name: &'static str, value: String },
}

/// Runtime settings, read from the process environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotConfig {
    pub discord_token: String,
    pub anilist_url: String,
    pub session_timeout: Duration,
    pub page_capacity: usize,
    pub command_prefix: String,
    pub command_cooldown: Duration,
}

impl BotConfig {
    /// Load settings from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load settings through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let discord_token = lookup("DISCORD_TOKEN")
            .filter(|token| !token.trim().is_empty())
            .ok_or(ConfigError::Missing("DISCORD_TOKEN"))?;

        let anilist_url = lookup("ANILIST_URL").unwrap_or_else(|| DEFAULT_ENDPOINT.to_owned());

        let timeout_secs = parse_positive(&lookup, "BROWSER_TIMEOUT_SECS")?
            .map_or(DEFAULT_TIMEOUT_SECS, |secs| secs as u64);
        let page_capacity =
            parse_positive(&lookup, "PAGE_CAPACITY")?.unwrap_or(DEFAULT_PAGE_CAPACITY);

        let cooldown_secs = match lookup("COMMAND_COOLDOWN_SECS") {
            None => DEFAULT_COOLDOWN_SECS,
            Some(raw) => raw.trim().parse::<u64>().map_err(|_| ConfigError::Invalid {
                name: "COMMAND_COOLDOWN_SECS",
                value: raw.clone(),
            })?,
        };

        let command_prefix = lookup("COMMAND_PREFIX")
            .filter(|prefix| !prefix.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_COMMAND_PREFIX.to_owned());

        Ok(Self {
            discord_token,
            anilist_url,
            session_timeout: Duration::from_secs(timeout_secs),
            page_capacity,
            command_prefix,
            command_cooldown: Duration::from_secs(cooldown_secs),
        })
    }
}

fn parse_positive(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
) -> Result<Option<usize>, ConfigError> {
    let Some(raw) = lookup(name) else {
        return Ok(None);
    };

    match raw.trim().parse::<usize>() {
        Ok(value) if value > 0 => Ok(Some(value)),
        _ => Err(ConfigError::Invalid { name, value: raw }),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> Result<BotConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| ((*key).to_owned(), (*value).to_owned()))
            .collect();
        BotConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn applies_defaults() {
        let config = config_from(&[("DISCORD_TOKEN", "secret")]).expect("valid config");

        assert_eq!(config.anilist_url, DEFAULT_ENDPOINT);
        assert_eq!(config.session_timeout, Duration::from_secs(30));
        assert_eq!(config.page_capacity, 10);
        assert_eq!(config.command_prefix, "!");
        assert_eq!(config.command_cooldown, Duration::from_secs(5));
    }

    #[test]
    fn requires_token() {
        assert_eq!(config_from(&[]), Err(ConfigError::Missing("DISCORD_TOKEN")));
    }

    #[test]
    fn reads_overrides() {
        let config = config_from(&[
            ("DISCORD_TOKEN", "secret"),
            ("BROWSER_TIMEOUT_SECS", "90"),
            ("PAGE_CAPACITY", "5"),
            ("COMMAND_PREFIX", "?"),
            ("COMMAND_COOLDOWN_SECS", "0"),
        ])
        .expect("valid config");

        assert_eq!(config.session_timeout, Duration::from_secs(90));
        assert_eq!(config.page_capacity, 5);
        assert_eq!(config.command_prefix, "?");
        assert_eq!(config.command_cooldown, Duration::ZERO);
    }

    #[test]
    fn rejects_non_numeric_cooldown() {
        assert_eq!(
            config_from(&[("DISCORD_TOKEN", "secret"), ("COMMAND_COOLDOWN_SECS", "soon")]),
            Err(ConfigError::Invalid {
                name: "COMMAND_COOLDOWN_SECS",
                value: "soon".to_owned(),
            })
        );
    }

    #[test]
    fn rejects_zero_capacity() {
        assert_eq!(
            config_from(&[("DISCORD_TOKEN", "secret"), ("PAGE_CAPACITY", "0")]),
            Err(ConfigError::Invalid {
                name: "PAGE_CAPACITY",
                value: "0".to_owned(),
            })
        );
    }
}
