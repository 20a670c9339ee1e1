use std::env;
use std::time::Duration;

use crate::cli::Cli;

pub(crate) const DEFAULT_BASE_URL: &str = "https://podcast-api.netlify.app";
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 5;
const DEFAULT_READ_TIMEOUT_SECS: u64 = 20;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Config {
    pub(crate) base_url: String,
    pub(crate) connect_timeout: Duration,
    pub(crate) read_timeout: Duration,
}

impl Config {
    pub(crate) fn from_cli(cli: &Cli) -> Self {
        Self::resolve(cli.base_url.as_deref(), |key| env::var(key).ok())
    }

    /// Flag first, then environment, then the built-in default.
    pub(crate) fn resolve(
        base_url_flag: Option<&str>,
        lookup_env: impl Fn(&str) -> Option<String>,
    ) -> Self {
        let base_url = base_url_flag
            .map(str::to_string)
            .or_else(|| lookup_env("PODSHELF_BASE_URL"))
            .map(|raw| raw.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let connect_timeout = timeout_secs(
            lookup_env("PODSHELF_CONNECT_TIMEOUT_SECS"),
            DEFAULT_CONNECT_TIMEOUT_SECS,
        );
        let read_timeout = timeout_secs(
            lookup_env("PODSHELF_READ_TIMEOUT_SECS"),
            DEFAULT_READ_TIMEOUT_SECS,
        );

        Self {
            base_url,
            connect_timeout,
            read_timeout,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::resolve(None, |_| None)
    }
}

fn timeout_secs(raw: Option<String>, default: u64) -> Duration {
    let secs = raw
        .and_then(|value| value.trim().parse::<u64>().ok())
        .filter(|secs| *secs > 0)
        .unwrap_or(default);
    Duration::from_secs(secs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_without_flag_or_env() {
        let config = Config::resolve(None, env_from(&[]));
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.connect_timeout, Duration::from_secs(5));
        assert_eq!(config.read_timeout, Duration::from_secs(20));
    }

    #[test]
    fn flag_wins_over_env_and_trailing_slash_is_stripped() {
        let config = Config::resolve(
            Some("http://127.0.0.1:9000/"),
            env_from(&[("PODSHELF_BASE_URL", "http://env.test")]),
        );
        assert_eq!(config.base_url, "http://127.0.0.1:9000");
    }

    #[test]
    fn env_base_url_is_used_when_flag_missing() {
        let config = Config::resolve(None, env_from(&[("PODSHELF_BASE_URL", " http://env.test ")]));
        assert_eq!(config.base_url, "http://env.test");
    }

    #[test]
    fn invalid_or_zero_timeouts_fall_back_to_defaults() {
        let config = Config::resolve(
            None,
            env_from(&[
                ("PODSHELF_CONNECT_TIMEOUT_SECS", "0"),
                ("PODSHELF_READ_TIMEOUT_SECS", "soon"),
            ]),
        );
        assert_eq!(config.connect_timeout, Duration::from_secs(5));
        assert_eq!(config.read_timeout, Duration::from_secs(20));

        let config = Config::resolve(None, env_from(&[("PODSHELF_READ_TIMEOUT_SECS", "3")]));
        assert_eq!(config.read_timeout, Duration::from_secs(3));
    }
}
