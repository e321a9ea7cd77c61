use std::str::FromStr;

use relief_core::schedule::PastWindowRule;
use thiserror::Error;

pub const CREATE_PAST_WINDOW_VAR: &str = "RELIEF_CREATE_PAST_WINDOW";
pub const BOUND_REFRESH_VAR: &str = "RELIEF_BOUND_REFRESH";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {var}: {value}")]
    Invalid { var: &'static str, value: String },
    #[error("invalid bound refresh: {0}")]
    InvalidBoundRefresh(String),
}

/// When read replaces a local bound with the one reported by the service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BoundRefresh {
    /// Only when the two strings name different instants.
    #[default]
    OnInstantChange,
    /// Whenever the text differs, adopting the service's layout.
    OnTextChange,
}

impl FromStr for BoundRefresh {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "instant" => Ok(Self::OnInstantChange),
            "text" => Ok(Self::OnTextChange),
            other => Err(ConfigError::InvalidBoundRefresh(other.to_owned())),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcilerConfig {
    /// Rule deciding whether a rejected create is absorbed. Delete always
    /// looks at the end bound only.
    pub create_past_window: PastWindowRule,
    pub bound_refresh: BoundRefresh,
}

impl ReconcilerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = lookup(CREATE_PAST_WINDOW_VAR) {
            config.create_past_window = value.parse().map_err(|_| ConfigError::Invalid {
                var: CREATE_PAST_WINDOW_VAR,
                value,
            })?;
        }

        if let Some(value) = lookup(BOUND_REFRESH_VAR) {
            config.bound_refresh = value.parse().map_err(|_| ConfigError::Invalid {
                var: BOUND_REFRESH_VAR,
                value,
            })?;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |var: &str| vars.get(var).cloned()
    }

    #[test]
    fn defaults_keep_any_bound_and_instant_refresh() {
        let config = ReconcilerConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ReconcilerConfig::default());
        assert_eq!(config.create_past_window, PastWindowRule::AnyBoundPast);
        assert_eq!(config.bound_refresh, BoundRefresh::OnInstantChange);
    }

    #[test]
    fn reads_both_variables() {
        let config = ReconcilerConfig::from_lookup(lookup(&[
            (CREATE_PAST_WINDOW_VAR, "whole-window"),
            (BOUND_REFRESH_VAR, "text"),
        ]))
        .unwrap();
        assert_eq!(config.create_past_window, PastWindowRule::WholeWindowPast);
        assert_eq!(config.bound_refresh, BoundRefresh::OnTextChange);
    }

    #[test]
    fn bound_refresh_parses_config_names() {
        assert_eq!(" Text ".parse::<BoundRefresh>(), Ok(BoundRefresh::OnTextChange));
        assert_eq!("instant".parse::<BoundRefresh>(), Ok(BoundRefresh::OnInstantChange));
        assert_eq!(
            "always".parse::<BoundRefresh>(),
            Err(ConfigError::InvalidBoundRefresh("always".into()))
        );
    }

    #[test]
    fn rejects_unknown_values() {
        let err = ReconcilerConfig::from_lookup(lookup(&[(BOUND_REFRESH_VAR, "always")]))
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::Invalid {
                var: BOUND_REFRESH_VAR,
                value: "always".into(),
            }
        );
        assert_eq!(
            err.to_string(),
            "invalid value for RELIEF_BOUND_REFRESH: always"
        );
    }
}
