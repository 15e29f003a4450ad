//! Runtime configuration from the environment
//!
//! Credentials and site URLs never live in the repository or on the command
//! line; they come from environment variables. The CLI only carries the
//! per-run target (date, time, activity) and mode flags.

use crate::auth::Credentials;
use crate::error::{BookingError, Result};
use std::path::PathBuf;

/// Environment-derived settings for a booking run
#[derive(Debug, Clone)]
pub struct Settings {
    /// Login page URL (`BOOKER_LOGIN_URL`)
    pub login_url: String,

    /// Schedule page URL (`BOOKER_SCHEDULE_URL`); when unset, the login
    /// redirect is assumed to land on the schedule
    pub schedule_url: Option<String>,

    /// Account credentials (`BOOKER_USERNAME` / `BOOKER_PASSWORD`)
    pub credentials: Credentials,

    /// Run the browser headless (`BOOKER_HEADLESS`, default true)
    pub headless: bool,

    /// Chrome binary override (`CHROME_PATH`)
    pub chrome_path: Option<PathBuf>,

    /// Directory for failure artifacts (`BOOKER_DIAG_DIR`, default `diagnostics`)
    pub diagnostics_dir: PathBuf,
}

impl Settings {
    /// Read settings from process environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through a key lookup function
    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let login_url = require(&get, "BOOKER_LOGIN_URL")?;
        let username = require(&get, "BOOKER_USERNAME")?;
        let password = require(&get, "BOOKER_PASSWORD")?;

        Ok(Self {
            login_url,
            schedule_url: get("BOOKER_SCHEDULE_URL"),
            credentials: Credentials::new(username, password),
            headless: get("BOOKER_HEADLESS").map_or(true, |raw| parse_bool(&raw)),
            chrome_path: get("CHROME_PATH").map(PathBuf::from),
            diagnostics_dir: get("BOOKER_DIAG_DIR").map_or_else(|| PathBuf::from("diagnostics"), PathBuf::from),
        })
    }
}

fn require(get: &impl Fn(&str) -> Option<String>, key: &str) -> Result<String> {
    get(key)
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| BookingError::Config(format!("{} is not set", key)))
}

fn parse_bool(raw: &str) -> bool {
    matches!(raw.trim().to_lowercase().as_str(), "1" | "true" | "yes" | "on")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env<'a>(pairs: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        let map: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_minimal_settings() {
        let settings = Settings::from_lookup(env(&[
            ("BOOKER_LOGIN_URL", "https://gym.example/login"),
            ("BOOKER_USERNAME", "ola"),
            ("BOOKER_PASSWORD", "secret"),
        ]))
        .unwrap();

        assert_eq!(settings.login_url, "https://gym.example/login");
        assert!(settings.schedule_url.is_none());
        assert!(settings.headless);
        assert_eq!(settings.diagnostics_dir, PathBuf::from("diagnostics"));
    }

    #[test]
    fn test_missing_credentials() {
        let err = Settings::from_lookup(env(&[("BOOKER_LOGIN_URL", "https://gym.example/login")]));
        match err {
            Err(BookingError::Config(msg)) => assert!(msg.contains("BOOKER_USERNAME")),
            other => panic!("Expected Config error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_blank_value_counts_as_missing() {
        let err = Settings::from_lookup(env(&[
            ("BOOKER_LOGIN_URL", "https://gym.example/login"),
            ("BOOKER_USERNAME", "   "),
            ("BOOKER_PASSWORD", "secret"),
        ]));
        assert!(err.is_err());
    }

    #[test]
    fn test_headless_override() {
        let settings = Settings::from_lookup(env(&[
            ("BOOKER_LOGIN_URL", "https://gym.example/login"),
            ("BOOKER_USERNAME", "ola"),
            ("BOOKER_PASSWORD", "secret"),
            ("BOOKER_HEADLESS", "false"),
        ]))
        .unwrap();

        assert!(!settings.headless);
    }

    #[test]
    fn test_parse_bool() {
        assert!(parse_bool("1"));
        assert!(parse_bool("true"));
        assert!(parse_bool("Yes"));
        assert!(parse_bool(" on "));
        assert!(!parse_bool("0"));
        assert!(!parse_bool("false"));
        assert!(!parse_bool(""));
    }
}
