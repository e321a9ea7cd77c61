use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::ids::{OverrideId, ScheduleId, UserId};
use crate::schedule::window::OverrideWindow;
use crate::schema::{FIELD_END, FIELD_SCHEDULE, FIELD_START, FIELD_USER, OVERRIDE_FIELDS};

/// Desired override as declared in configuration.
///
/// `start` and `end` are kept as written; they are only parsed when a window
/// has to be classified against the current time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverrideRequest {
    schedule_id: ScheduleId,
    user_id: UserId,
    start: String,
    end: String,
}

impl OverrideRequest {
    pub fn new(schedule: &str, user: &str, start: &str, end: &str) -> Result<Self, DomainError> {
        let values = [
            (FIELD_USER, user),
            (FIELD_START, start),
            (FIELD_END, end),
            (FIELD_SCHEDULE, schedule),
        ];
        for field in OVERRIDE_FIELDS.iter().filter(|f| f.required) {
            let value = values
                .iter()
                .find(|(name, _)| *name == field.name)
                .map_or("", |(_, value)| *value);
            if value.trim().is_empty() {
                return Err(DomainError::MissingField(field.name));
            }
        }
        Ok(Self {
            schedule_id: ScheduleId::parse(schedule)?,
            user_id: UserId::parse(user)?,
            start: start.to_owned(),
            end: end.to_owned(),
        })
    }

    pub fn schedule_id(&self) -> &ScheduleId {
        &self.schedule_id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn start(&self) -> &str {
        &self.start
    }

    pub fn end(&self) -> &str {
        &self.end
    }

    pub fn window(&self) -> Result<OverrideWindow, DomainError> {
        OverrideWindow::parse(&self.start, &self.end)
    }
}

/// Override as reported by the scheduling service. Bounds keep the server's
/// own textual layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverrideRecord {
    id: OverrideId,
    user_id: UserId,
    start: String,
    end: String,
}

impl OverrideRecord {
    pub fn new(id: OverrideId, user_id: UserId, start: String, end: String) -> Self {
        Self {
            id,
            user_id,
            start,
            end,
        }
    }

    pub fn id(&self) -> &OverrideId {
        &self.id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn start(&self) -> &str {
        &self.start
    }

    pub fn end(&self) -> &str {
        &self.end
    }
}
