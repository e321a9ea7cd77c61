use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use uuid::Uuid;

use relief_core::ids::{OverrideId, ScheduleId};
use relief_core::schedule::OverrideRecord;
use relief_core::timestamp::parse_iso8601;
use relief_ports::error::PortError;
use relief_ports::outbound::{Clock, OverrideClient};
use relief_ports::types::{ListOverridesQuery, NewOverride};

use super::SqliteDb;

fn format_bound(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn parse_bound(raw: &str) -> Result<DateTime<Utc>, PortError> {
    parse_iso8601(raw).map_err(|e| PortError::Remote(e.to_string()))
}

#[async_trait]
impl OverrideClient for SqliteDb {
    async fn create_override(
        &self,
        schedule_id: &ScheduleId,
        ovr: &NewOverride,
    ) -> Result<OverrideRecord, PortError> {
        let start = parse_bound(&ovr.start)?;
        let end = parse_bound(&ovr.end)?;
        if end <= start {
            return Err(PortError::Remote(
                "override end must be after its start".into(),
            ));
        }
        if end <= self.clock.now() {
            return Err(PortError::Remote(
                "cannot create an override that has already ended".into(),
            ));
        }

        let id = OverrideId::parse(&format!("P{}", Uuid::new_v4().simple()).to_uppercase())
            .map_err(|e| PortError::Persistence(e.to_string()))?;
        let record = OverrideRecord::new(
            id,
            ovr.user_id.clone(),
            format_bound(start),
            format_bound(end),
        );
        let data =
            serde_json::to_string(&record).map_err(|e| PortError::Persistence(e.to_string()))?;

        sqlx::query(
            "INSERT INTO overrides (id, schedule_id, start_at, end_at, data)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(record.id().as_str())
        .bind(schedule_id.as_str())
        .bind(record.start())
        .bind(record.end())
        .bind(&data)
        .execute(&self.pool)
        .await
        .map_err(|e| PortError::Persistence(e.to_string()))?;

        Ok(record)
    }

    async fn list_overrides(
        &self,
        schedule_id: &ScheduleId,
        query: &ListOverridesQuery,
    ) -> Result<Vec<OverrideRecord>, PortError> {
        let since = query
            .since
            .as_deref()
            .map(|s| parse_bound(s).map(format_bound))
            .transpose()?;
        let until = query
            .until
            .as_deref()
            .map(|s| parse_bound(s).map(format_bound))
            .transpose()?;

        // Overlap with [since, until); stored bounds share one layout so text
        // order is time order
        let mut sql = String::from("SELECT data FROM overrides WHERE schedule_id = ?");
        if since.is_some() {
            sql.push_str(" AND end_at > ?");
        }
        if until.is_some() {
            sql.push_str(" AND start_at < ?");
        }
        sql.push_str(" ORDER BY start_at");

        let mut select =
            sqlx::query_as::<sqlx::Sqlite, (String,)>(&sql).bind(schedule_id.as_str());
        if let Some(since) = &since {
            select = select.bind(since.as_str());
        }
        if let Some(until) = &until {
            select = select.bind(until.as_str());
        }

        let rows = select
            .fetch_all(&self.pool)
            .await
            .map_err(|e| PortError::Persistence(e.to_string()))?;

        let mut overrides = Vec::with_capacity(rows.len());
        for (data,) in rows {
            let record: OverrideRecord =
                serde_json::from_str(&data).map_err(|e| PortError::Persistence(e.to_string()))?;
            overrides.push(record);
        }
        Ok(overrides)
    }

    async fn delete_override(
        &self,
        schedule_id: &ScheduleId,
        override_id: &OverrideId,
    ) -> Result<(), PortError> {
        let row: Option<(String,)> =
            sqlx::query_as("SELECT end_at FROM overrides WHERE schedule_id = ? AND id = ?")
                .bind(schedule_id.as_str())
                .bind(override_id.as_str())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| PortError::Persistence(e.to_string()))?;

        let Some((end_at,)) = row else {
            return Err(PortError::NotFound);
        };

        let end = parse_iso8601(&end_at).map_err(|e| PortError::Persistence(e.to_string()))?;
        if end <= self.clock.now() {
            tracing::warn!(
                override_id = override_id.as_str(),
                "rejecting delete of ended override"
            );
            return Err(PortError::Remote(
                "cannot delete an override that has already ended".into(),
            ));
        }

        sqlx::query("DELETE FROM overrides WHERE schedule_id = ? AND id = ?")
            .bind(schedule_id.as_str())
            .bind(override_id.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| PortError::Persistence(e.to_string()))?;

        Ok(())
    }
}
