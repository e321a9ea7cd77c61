use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::timestamp::parse_iso8601;

/// Parsed bounds of an override.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverrideWindow {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl OverrideWindow {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    pub fn parse(start: &str, end: &str) -> Result<Self, DomainError> {
        Ok(Self {
            start: parse_iso8601(start)?,
            end: parse_iso8601(end)?,
        })
    }

    pub fn any_bound_before(&self, now: DateTime<Utc>) -> bool {
        self.start < now || self.end < now
    }

    pub fn entirely_before(&self, now: DateTime<Utc>) -> bool {
        self.start < now && self.end < now
    }
}

/// When a rejected create counts as already elapsed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PastWindowRule {
    /// Either bound before now. This also absorbs windows that are still
    /// running.
    #[default]
    AnyBoundPast,
    /// Both bounds before now.
    WholeWindowPast,
}

impl PastWindowRule {
    pub fn is_past(&self, window: &OverrideWindow, now: DateTime<Utc>) -> bool {
        match self {
            Self::AnyBoundPast => window.any_bound_before(now),
            Self::WholeWindowPast => window.entirely_before(now),
        }
    }
}

impl FromStr for PastWindowRule {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "any-bound" => Ok(Self::AnyBoundPast),
            "whole-window" => Ok(Self::WholeWindowPast),
            other => Err(DomainError::InvalidPastWindowRule(other.to_owned())),
        }
    }
}

impl fmt::Display for PastWindowRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AnyBoundPast => write!(f, "any-bound"),
            Self::WholeWindowPast => write!(f, "whole-window"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(s: &str) -> DateTime<Utc> {
        chrono::DateTime::parse_from_rfc3339(s)
            .unwrap()
            .with_timezone(&Utc)
    }

    fn now() -> DateTime<Utc> {
        ts("2026-06-01T12:00:00Z")
    }

    #[test]
    fn elapsed_window_is_past_under_both_rules() {
        let window =
            OverrideWindow::parse("2000-01-01T00:00:00Z", "2000-01-02T00:00:00Z").unwrap();
        assert!(PastWindowRule::AnyBoundPast.is_past(&window, now()));
        assert!(PastWindowRule::WholeWindowPast.is_past(&window, now()));
    }

    #[test]
    fn running_window_is_past_only_for_any_bound() {
        let window =
            OverrideWindow::new(ts("2026-06-01T00:00:00Z"), ts("2026-06-02T00:00:00Z"));
        assert!(PastWindowRule::AnyBoundPast.is_past(&window, now()));
        assert!(!PastWindowRule::WholeWindowPast.is_past(&window, now()));
    }

    #[test]
    fn future_window_is_never_past() {
        let window =
            OverrideWindow::parse("2999-01-01T00:00:00Z", "2999-01-02T00:00:00Z").unwrap();
        assert!(!PastWindowRule::AnyBoundPast.is_past(&window, now()));
        assert!(!PastWindowRule::WholeWindowPast.is_past(&window, now()));
    }

    #[test]
    fn bound_equal_to_now_is_not_before() {
        let window = OverrideWindow::new(now(), ts("2026-06-02T00:00:00Z"));
        assert!(!window.any_bound_before(now()));
    }

    #[test]
    fn rule_parses_from_config_names() {
        assert_eq!(
            "whole-window".parse::<PastWindowRule>(),
            Ok(PastWindowRule::WholeWindowPast)
        );
        assert_eq!(
            " Any-Bound ".parse::<PastWindowRule>(),
            Ok(PastWindowRule::AnyBoundPast)
        );
        assert_eq!(
            "sometimes".parse::<PastWindowRule>(),
            Err(DomainError::InvalidPastWindowRule("sometimes".into()))
        );
        assert_eq!(PastWindowRule::WholeWindowPast.to_string(), "whole-window");
    }
}
