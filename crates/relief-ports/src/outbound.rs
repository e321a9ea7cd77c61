use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use relief_core::ids::{OverrideId, ScheduleId};
use relief_core::schedule::OverrideRecord;

use crate::error::PortError;
use crate::types::{ListOverridesQuery, NewOverride};

/// Remote scheduling service, reduced to the three calls overrides need.
#[async_trait]
pub trait OverrideClient: Send + Sync {
    async fn create_override(
        &self,
        schedule_id: &ScheduleId,
        ovr: &NewOverride,
    ) -> Result<OverrideRecord, PortError>;
    async fn list_overrides(
        &self,
        schedule_id: &ScheduleId,
        query: &ListOverridesQuery,
    ) -> Result<Vec<OverrideRecord>, PortError>;
    async fn delete_override(
        &self,
        schedule_id: &ScheduleId,
        override_id: &OverrideId,
    ) -> Result<(), PortError>;
}

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

impl<T: Clock + ?Sized> Clock for Arc<T> {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}

/// Source of the integer tag appended to sentinel override ids.
pub trait SentinelSource: Send + Sync {
    fn next_tag(&self) -> u64;
}
