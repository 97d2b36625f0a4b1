// SPDX-FileCopyrightText: 2025-2026 Atelier Developers <dev@atelier.example>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use jiff::tz::TimeZone;

use crate::recurrence::Weekday;

/// The name of the Atelier application.
pub const APP_NAME: &str = "atelier";

/// Configuration for the scheduling engine.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct Config {
    /// IANA zone used for rules without their own; the system zone when absent.
    #[serde(default)]
    pub timezone: Option<String>,

    /// First day of the week shown by front ends. Expansion does not depend on it.
    #[serde(default = "default_week_start")]
    pub week_start: Weekday,

    /// If true, repeated session queries for the same window share one computation.
    #[serde(default = "default_coalesce")]
    pub coalesce: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timezone: None,
            week_start: default_week_start(),
            coalesce: default_coalesce(),
        }
    }
}

impl Config {
    /// Normalize the configuration.
    pub fn normalize(&mut self) -> Result<(), Box<dyn Error>> {
        self.timezone = self
            .timezone
            .take()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        if let Some(name) = &self.timezone {
            TimeZone::get(name).map_err(|e| format!("Invalid timezone `{name}`: {e}"))?;
        }
        Ok(())
    }

    /// Resolves the default zone of an expansion run: the configured zone, then the system
    /// zone, then UTC.
    pub fn resolve_timezone(&self) -> TimeZone {
        if let Some(name) = &self.timezone {
            match TimeZone::get(name) {
                Ok(tz) => return tz,
                Err(e) => tracing::warn!(timezone = %name, "unknown configured timezone: {e}"),
            }
        }

        match iana_time_zone::get_timezone() {
            Ok(name) => match TimeZone::get(&name) {
                Ok(tz) => tz,
                Err(e) => {
                    tracing::warn!(timezone = %name, "unknown system timezone, using UTC: {e}");
                    TimeZone::UTC
                }
            },
            Err(e) => {
                tracing::warn!("failed to detect system timezone, using UTC: {e}");
                TimeZone::UTC
            }
        }
    }
}

const fn default_week_start() -> Weekday {
    Weekday::Monday
}

const fn default_coalesce() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_from_empty_table() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.timezone, None);
        assert_eq!(config.week_start, Weekday::Monday);
        assert!(config.coalesce);
    }

    #[test]
    fn parses_all_fields() {
        let config: Config = toml::from_str(
            r#"
timezone = "Europe/Berlin"
week_start = "SU"
coalesce = false
"#,
        )
        .unwrap();
        assert_eq!(config.timezone.as_deref(), Some("Europe/Berlin"));
        assert_eq!(config.week_start, Weekday::Sunday);
        assert!(!config.coalesce);
    }

    #[test]
    fn week_start_accepts_names() {
        let config: Config = toml::from_str(r#"week_start = "sunday""#).unwrap();
        assert_eq!(config.week_start, Weekday::Sunday);
    }

    #[test]
    fn normalize_validates_timezone() {
        let mut config = Config {
            timezone: Some(" Europe/Berlin ".to_string()),
            ..Config::default()
        };
        config.normalize().unwrap();
        assert_eq!(config.timezone.as_deref(), Some("Europe/Berlin"));
        assert_eq!(config.resolve_timezone().iana_name(), Some("Europe/Berlin"));

        let mut config = Config {
            timezone: Some("Nowhere/Special".to_string()),
            ..Config::default()
        };
        assert!(config.normalize().is_err());
    }

    #[test]
    fn normalize_drops_blank_timezone() {
        let mut config = Config {
            timezone: Some("  ".to_string()),
            ..Config::default()
        };
        config.normalize().unwrap();
        assert_eq!(config.timezone, None);
    }
}
