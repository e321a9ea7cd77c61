use chrono::{DateTime, Utc};

use relief_core::ids::{OverrideId, ScheduleId};
use relief_core::schedule::{OverrideRecord, OverrideRequest, OverrideWindow, TrackedOverride};
use relief_core::timestamp::{parse_iso8601, parse_rfc3339};
use relief_ports::outbound::{Clock, OverrideClient, SentinelSource};
use relief_ports::types::{ListOverridesQuery, NewOverride};

use crate::config::{BoundRefresh, ReconcilerConfig};
use crate::error::AppError;

/// Create, read and delete of schedule overrides against the scheduling
/// service.
///
/// The service rejects creating and deleting overrides whose window has
/// already elapsed. Those rejections are absorbed: a rejected create of an
/// elapsed window is tracked under a sentinel id, and a rejected delete of an
/// ended override still drops it locally. Every other failure is returned
/// as the service reported it.
pub struct OverrideReconciler<C, K, G>
where
    C: OverrideClient,
    K: Clock,
    G: SentinelSource,
{
    client: C,
    clock: K,
    sentinels: G,
    config: ReconcilerConfig,
}

impl<C, K, G> OverrideReconciler<C, K, G>
where
    C: OverrideClient,
    K: Clock,
    G: SentinelSource,
{
    pub fn new(client: C, clock: K, sentinels: G, config: ReconcilerConfig) -> Self {
        Self {
            client,
            clock,
            sentinels,
            config,
        }
    }

    pub async fn create(&self, request: OverrideRequest) -> Result<TrackedOverride, AppError> {
        let schedule_id = request.schedule_id().clone();
        tracing::info!(schedule_id = %schedule_id, "creating schedule override");

        let id = match self
            .client
            .create_override(&schedule_id, &NewOverride::from(&request))
            .await
        {
            Ok(created) => created.id().clone(),
            Err(err) => {
                tracing::error!(
                    schedule_id = %schedule_id,
                    error = %err,
                    "creating schedule override failed, checking window"
                );
                // An unparsable window is never treated as elapsed
                let now = self.clock.now();
                let elapsed = request
                    .window()
                    .is_ok_and(|window| self.config.create_past_window.is_past(&window, now));
                if !elapsed {
                    return Err(err.into());
                }

                let id = OverrideId::sentinel(self.sentinels.next_tag());
                tracing::info!(
                    override_id = %id,
                    "override window already elapsed, tracking it as ignored"
                );
                id
            }
        };

        let mut tracked = TrackedOverride::from_request(request, id);
        if let Err(err) = self.read(&mut tracked).await {
            tracing::error!(
                override_id = ?tracked.id(),
                error = %err,
                "reading back created schedule override failed"
            );
            return Err(AppError::ReadBack {
                tracked: Box::new(tracked),
                source: Box::new(err),
            });
        }
        Ok(tracked)
    }

    pub async fn read(&self, tracked: &mut TrackedOverride) -> Result<(), AppError> {
        let id = tracked.id().cloned().ok_or(AppError::NotTracked)?;
        tracing::info!(override_id = %id, "reading schedule override");

        let query = ListOverridesQuery::for_window(tracked.start(), tracked.end());
        let records = self
            .client
            .list_overrides(tracked.schedule_id(), &query)
            .await?;

        let Some(record) = single_match(records, &id) else {
            if id.is_sentinel() {
                tracing::info!(
                    override_id = %id,
                    "ignored override not found remotely, keeping state"
                );
                return Ok(());
            }
            return Err(AppError::NotFound(id));
        };

        tracked.set_user_id(record.user_id().clone());

        let local_start = parse_iso8601(tracked.start()).ok();
        let local_end = parse_iso8601(tracked.end()).ok();
        if let (Some(start), Some(end)) = (local_start, local_end) {
            if OverrideWindow::new(start, end).entirely_before(self.clock.now()) {
                tracing::info!(
                    override_id = %id,
                    "override window already elapsed, keeping local bounds"
                );
                return Ok(());
            }
        }

        if self.bound_diverges(tracked.start(), local_start, record.start()) {
            tracing::info!(
                override_id = %id,
                local = tracked.start(),
                remote = record.start(),
                "refreshing override start from service"
            );
            tracked.set_start(record.start().to_owned());
        }

        if self.bound_diverges(tracked.end(), local_end, record.end()) {
            tracing::info!(
                override_id = %id,
                local = tracked.end(),
                remote = record.end(),
                "refreshing override end from service"
            );
            tracked.set_end(record.end().to_owned());
        }

        Ok(())
    }

    pub async fn delete(&self, tracked: &mut TrackedOverride) -> Result<(), AppError> {
        let id = tracked.id().cloned().ok_or(AppError::NotTracked)?;
        tracing::info!(override_id = %id, "deleting schedule override");

        // Sentinels were never stored remotely
        if id.is_sentinel() {
            tracing::info!(override_id = %id, "dropping ignored override");
            tracked.clear_id();
            return Ok(());
        }

        if let Err(err) = self
            .client
            .delete_override(tracked.schedule_id(), &id)
            .await
        {
            tracing::error!(
                override_id = %id,
                error = %err,
                "deleting schedule override failed, checking window"
            );
            let ended = parse_rfc3339(tracked.end()).is_ok_and(|end| end < self.clock.now());
            if !ended {
                return Err(err.into());
            }
            tracing::info!(
                override_id = %id,
                "override already ended, dropping it despite the rejected delete"
            );
        }

        tracked.clear_id();
        Ok(())
    }

    /// Populates every field of an override known only by its id.
    pub async fn import(
        &self,
        schedule_id: ScheduleId,
        id: OverrideId,
    ) -> Result<TrackedOverride, AppError> {
        let mut tracked = TrackedOverride::imported(schedule_id, id);
        self.read(&mut tracked).await?;
        Ok(tracked)
    }

    fn bound_diverges(
        &self,
        local_text: &str,
        local: Option<DateTime<Utc>>,
        remote_text: &str,
    ) -> bool {
        match (local, parse_iso8601(remote_text).ok()) {
            (None, _) => local_text != remote_text,
            (Some(_), None) => false,
            (Some(local), Some(remote)) => match self.config.bound_refresh {
                BoundRefresh::OnInstantChange => local != remote,
                BoundRefresh::OnTextChange => local_text != remote_text,
            },
        }
    }
}

fn single_match(records: Vec<OverrideRecord>, id: &OverrideId) -> Option<OverrideRecord> {
    let mut matching = records.into_iter().filter(|r| r.id() == id);
    match (matching.next(), matching.next()) {
        (Some(record), None) => Some(record),
        _ => None,
    }
}
