//! # Configuration
//!
//! [`SystemConfig`] holds every tunable of a running [`BookstoreSystem`](crate::lifecycle::BookstoreSystem).
//! Defaults suit tests and the demo binary; [`SystemConfig::from_env`] overrides them from
//! `BOOKSTORE_*` variables:
//!
//! | Variable | Field | Unit |
//! |----------|-------|------|
//! | `BOOKSTORE_MAILBOX_CAPACITY` | `mailbox_capacity` | messages |
//! | `BOOKSTORE_PARTICIPANT_TIMEOUT_MS` | `participant_timeout` | milliseconds |
//! | `BOOKSTORE_TRANSACTION_TIMEOUT_MS` | `transaction_timeout` | milliseconds |
//! | `BOOKSTORE_RESERVATION_TTL_SECS` | `reservation_ttl` | seconds, `0` disables |
//! | `BOOKSTORE_SWEEP_INTERVAL_SECS` | `sweep_interval` | seconds |
//!
//! A reservation TTL must outlive any transaction that could still commit the reservation,
//! and may not exceed [`MAX_RESERVATION_TTL`].

use serde::Deserialize;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// Errors raised while building a configuration.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid value {value:?} for {key}: {reason}")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },

    #[error("{0} must be greater than zero")]
    Zero(&'static str),

    #[error("Reservation TTL {ttl:?} must be longer than a transaction's lifetime ({lifetime:?})")]
    TtlTooShort { ttl: Duration, lifetime: Duration },

    #[error("Reservation TTL {ttl:?} exceeds the maximum of {max:?}")]
    TtlTooLong { ttl: Duration, max: Duration },
}

/// Upper bound for `reservation_ttl`.
pub const MAX_RESERVATION_TTL: Duration = Duration::from_secs(30 * 24 * 60 * 60);

/// Settings for the whole system: actors, coordinator and the stale reservation sweep.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SystemConfig {
    /// Capacity of each participant's mailbox.
    pub mailbox_capacity: usize,
    /// Upper bound for a single call to a participant.
    pub participant_timeout: Duration,
    /// Budget for resolving, enlisting and preparing one transaction.
    pub transaction_timeout: Duration,
    /// Reservations older than this are dropped by the sweeper. `None` disables the sweeper.
    pub reservation_ttl: Option<Duration>,
    pub sweep_interval: Duration,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            mailbox_capacity: 32,
            participant_timeout: Duration::from_secs(2),
            transaction_timeout: Duration::from_secs(10),
            reservation_ttl: None,
            sweep_interval: Duration::from_secs(30),
        }
    }
}

/// The part of [`SystemConfig`] the coordinator needs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinatorConfig {
    pub participant_timeout: Duration,
    pub transaction_timeout: Duration,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        SystemConfig::default().coordinator()
    }
}

impl CoordinatorConfig {
    /// Longest a reservation can be staged before its commit arrives: the transaction
    /// deadline, then one commit call.
    pub fn transaction_lifetime(&self) -> Duration {
        self.transaction_timeout
            .saturating_add(self.participant_timeout)
    }

    /// Rejects a TTL that could expire a reservation a live transaction still needs.
    pub fn check_reservation_ttl(&self, ttl: Duration) -> Result<(), ConfigError> {
        let lifetime = self.transaction_lifetime();
        if ttl <= lifetime {
            return Err(ConfigError::TtlTooShort { ttl, lifetime });
        }
        if ttl > MAX_RESERVATION_TTL {
            return Err(ConfigError::TtlTooLong {
                ttl,
                max: MAX_RESERVATION_TTL,
            });
        }
        Ok(())
    }
}

impl SystemConfig {
    /// Defaults overridden by the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each `BOOKSTORE_*` key.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(capacity) = parse(&lookup, "BOOKSTORE_MAILBOX_CAPACITY")? {
            config.mailbox_capacity = capacity;
        }
        if let Some(ms) = parse(&lookup, "BOOKSTORE_PARTICIPANT_TIMEOUT_MS")? {
            config.participant_timeout = Duration::from_millis(ms);
        }
        if let Some(ms) = parse(&lookup, "BOOKSTORE_TRANSACTION_TIMEOUT_MS")? {
            config.transaction_timeout = Duration::from_millis(ms);
        }
        if let Some(secs) = parse::<u64>(&lookup, "BOOKSTORE_RESERVATION_TTL_SECS")? {
            config.reservation_ttl = (secs > 0).then(|| Duration::from_secs(secs));
        }
        if let Some(secs) = parse(&lookup, "BOOKSTORE_SWEEP_INTERVAL_SECS")? {
            config.sweep_interval = Duration::from_secs(secs);
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.mailbox_capacity == 0 {
            return Err(ConfigError::Zero("mailbox_capacity"));
        }
        if self.participant_timeout.is_zero() {
            return Err(ConfigError::Zero("participant_timeout"));
        }
        if self.transaction_timeout.is_zero() {
            return Err(ConfigError::Zero("transaction_timeout"));
        }
        if let Some(ttl) = self.reservation_ttl {
            if self.sweep_interval.is_zero() {
                return Err(ConfigError::Zero("sweep_interval"));
            }
            self.coordinator().check_reservation_ttl(ttl)?;
        }
        Ok(())
    }

    pub fn coordinator(&self) -> CoordinatorConfig {
        CoordinatorConfig {
            participant_timeout: self.participant_timeout,
            transaction_timeout: self.transaction_timeout,
        }
    }
}

fn parse<T>(lookup: &impl Fn(&str) -> Option<String>, key: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let Some(raw) = lookup(key) else {
        return Ok(None);
    };
    raw.trim()
        .parse()
        .map(Some)
        .map_err(|e: T::Err| ConfigError::InvalidValue {
            key,
            value: raw.clone(),
            reason: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_nothing_set() {
        let config = SystemConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, SystemConfig::default());
        assert_eq!(config.mailbox_capacity, 32);
        assert_eq!(config.reservation_ttl, None);
    }

    #[test]
    fn test_overrides() {
        let config = SystemConfig::from_lookup(lookup(&[
            ("BOOKSTORE_MAILBOX_CAPACITY", "8"),
            ("BOOKSTORE_PARTICIPANT_TIMEOUT_MS", "250"),
            ("BOOKSTORE_RESERVATION_TTL_SECS", "60"),
            ("BOOKSTORE_SWEEP_INTERVAL_SECS", " 5 "),
        ]))
        .unwrap();

        assert_eq!(config.mailbox_capacity, 8);
        assert_eq!(config.participant_timeout, Duration::from_millis(250));
        assert_eq!(config.transaction_timeout, Duration::from_secs(10));
        assert_eq!(config.reservation_ttl, Some(Duration::from_secs(60)));
        assert_eq!(config.sweep_interval, Duration::from_secs(5));
    }

    #[test]
    fn test_zero_ttl_disables_sweeper() {
        let config =
            SystemConfig::from_lookup(lookup(&[("BOOKSTORE_RESERVATION_TTL_SECS", "0")])).unwrap();
        assert_eq!(config.reservation_ttl, None);
    }

    #[test]
    fn test_malformed_values_are_reported() {
        let err = SystemConfig::from_lookup(lookup(&[("BOOKSTORE_MAILBOX_CAPACITY", "lots")]))
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                key: "BOOKSTORE_MAILBOX_CAPACITY",
                ..
            }
        ));

        let err = SystemConfig::from_lookup(lookup(&[("BOOKSTORE_MAILBOX_CAPACITY", "0")]))
            .unwrap_err();
        assert_eq!(err, ConfigError::Zero("mailbox_capacity"));
    }

    #[test]
    fn test_ttl_must_outlive_a_transaction() {
        let config = SystemConfig {
            reservation_ttl: Some(Duration::from_millis(1)),
            ..SystemConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::TtlTooShort {
                ttl: Duration::from_millis(1),
                lifetime: Duration::from_secs(12),
            })
        );

        // Exactly the lifetime is still too short
        let config = SystemConfig {
            reservation_ttl: Some(Duration::from_secs(12)),
            ..SystemConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::TtlTooShort { .. })
        ));

        let config = SystemConfig {
            reservation_ttl: Some(Duration::from_secs(13)),
            ..SystemConfig::default()
        };
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_ttl_from_env_is_bounded() {
        let err = SystemConfig::from_lookup(lookup(&[("BOOKSTORE_RESERVATION_TTL_SECS", "5")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::TtlTooShort { .. }));

        let err = SystemConfig::from_lookup(lookup(&[(
            "BOOKSTORE_RESERVATION_TTL_SECS",
            "31536000000000",
        )]))
        .unwrap_err();
        assert_eq!(
            err,
            ConfigError::TtlTooLong {
                ttl: Duration::from_secs(31_536_000_000_000),
                max: MAX_RESERVATION_TTL,
            }
        );
    }

    #[test]
    fn test_deserialize_fills_missing_fields_with_defaults() {
        let config: SystemConfig =
            serde_json::from_str(r#"{ "mailbox_capacity": 8, "reservation_ttl": null }"#).unwrap();
        assert_eq!(
            config,
            SystemConfig {
                mailbox_capacity: 8,
                ..SystemConfig::default()
            }
        );

        let config: SystemConfig = serde_json::from_str(
            r#"{ "reservation_ttl": { "secs": 60, "nanos": 0 }, "sweep_interval": { "secs": 5, "nanos": 0 } }"#,
        )
        .unwrap();
        assert_eq!(config.reservation_ttl, Some(Duration::from_secs(60)));
        assert_eq!(config.sweep_interval, Duration::from_secs(5));
        assert_eq!(config.validate(), Ok(()));
    }
}
