use serde::{Deserialize, Serialize};

use crate::ids::{OverrideId, ScheduleId, UserId};
use crate::schedule::shift_override::OverrideRequest;

/// Locally tracked state of one override resource.
///
/// Once `id` is set the override is either known to the scheduling service or
/// carries a sentinel id for a window that had already elapsed when it was
/// created. `user_id` is `None` only for an imported override that has not
/// been read yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackedOverride {
    id: Option<OverrideId>,
    schedule_id: ScheduleId,
    user_id: Option<UserId>,
    start: String,
    end: String,
}

impl TrackedOverride {
    pub fn from_request(request: OverrideRequest, id: OverrideId) -> Self {
        Self {
            id: Some(id),
            schedule_id: request.schedule_id().clone(),
            user_id: Some(request.user_id().clone()),
            start: request.start().to_owned(),
            end: request.end().to_owned(),
        }
    }

    /// State known from an externally supplied id alone.
    pub fn imported(schedule_id: ScheduleId, id: OverrideId) -> Self {
        Self {
            id: Some(id),
            schedule_id,
            user_id: None,
            start: String::new(),
            end: String::new(),
        }
    }

    pub fn id(&self) -> Option<&OverrideId> {
        self.id.as_ref()
    }

    pub fn schedule_id(&self) -> &ScheduleId {
        &self.schedule_id
    }

    pub fn user_id(&self) -> Option<&UserId> {
        self.user_id.as_ref()
    }

    pub fn start(&self) -> &str {
        &self.start
    }

    pub fn end(&self) -> &str {
        &self.end
    }

    pub fn is_tracked(&self) -> bool {
        self.id.is_some()
    }

    pub fn clear_id(&mut self) {
        self.id = None;
    }

    pub fn set_user_id(&mut self, user_id: UserId) {
        self.user_id = Some(user_id);
    }

    pub fn set_start(&mut self, start: String) {
        self.start = start;
    }

    pub fn set_end(&mut self, end: String) {
        self.end = end;
    }
}
