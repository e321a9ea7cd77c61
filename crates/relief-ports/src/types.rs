use serde::{Deserialize, Serialize};

use relief_core::ids::UserId;
use relief_core::schedule::OverrideRequest;

/// Body of a create call. Fields map one to one from the request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewOverride {
    pub user_id: UserId,
    pub start: String,
    pub end: String,
}

impl From<&OverrideRequest> for NewOverride {
    fn from(request: &OverrideRequest) -> Self {
        Self {
            user_id: request.user_id().clone(),
            start: request.start().to_owned(),
            end: request.end().to_owned(),
        }
    }
}

/// Window filter for listing overrides. `None` leaves the bound to the
/// service's default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListOverridesQuery {
    pub since: Option<String>,
    pub until: Option<String>,
}

impl ListOverridesQuery {
    pub fn for_window(start: &str, end: &str) -> Self {
        let bound = |s: &str| (!s.is_empty()).then(|| s.to_owned());
        Self {
            since: bound(start),
            until: bound(end),
        }
    }
}
