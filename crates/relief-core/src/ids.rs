use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Marker carried by override ids that were fabricated locally instead of
/// being assigned by the scheduling service.
pub const SENTINEL_PREFIX: &str = "IGNORED_";

macro_rules! define_id {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(String);

        impl $name {
            pub fn parse(s: &str) -> Result<Self, DomainError> {
                if s.trim().is_empty() {
                    return Err(DomainError::InvalidId(stringify!($name).into()));
                }
                Ok(Self(s.to_owned()))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

define_id!(OverrideId);
define_id!(ScheduleId);
define_id!(UserId);

impl OverrideId {
    /// Builds a local-only id for an override the service never stored.
    pub fn sentinel(tag: u64) -> Self {
        Self(format!("{SENTINEL_PREFIX}{tag}"))
    }

    pub fn is_sentinel(&self) -> bool {
        self.0.starts_with(SENTINEL_PREFIX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_keeps_server_format() {
        let id = OverrideId::parse("PQ47DCP").unwrap();
        assert_eq!(id.as_str(), "PQ47DCP");
        assert_eq!(id.to_string(), "PQ47DCP");
    }

    #[test]
    fn parse_blank_fails() {
        assert_eq!(
            ScheduleId::parse("  "),
            Err(DomainError::InvalidId("ScheduleId".into()))
        );
        assert_eq!(
            UserId::parse(""),
            Err(DomainError::InvalidId("UserId".into()))
        );
    }

    #[test]
    fn sentinel_is_prefixed_decimal() {
        let id = OverrideId::sentinel(5_577_006_791_947_779_410);
        assert_eq!(id.as_str(), "IGNORED_5577006791947779410");
        assert!(id.is_sentinel());
    }

    #[test]
    fn server_ids_are_not_sentinels() {
        assert!(!OverrideId::parse("PQ47DCP").unwrap().is_sentinel());
        assert!(!OverrideId::parse("IGNORED").unwrap().is_sentinel());
    }
}
