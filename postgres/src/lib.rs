//! `PostgreSQL` store for the festival registration service.
//!
//! Implements [`FestivalStore`] on two tables created by the bundled sqlx
//! migrations:
//!
//! ```sql
//! festival_events(id UUID PRIMARY KEY, seq BIGSERIAL, data JSONB, participant_count INTEGER, created_at TIMESTAMPTZ)
//! festival_registrations(id UUID PRIMARY KEY, seq BIGSERIAL, event_ids UUID[], data JSONB, registered_at TIMESTAMPTZ)
//! ```
//!
//! `seq` preserves insertion order. A registration is written in one
//! transaction that locks the referenced event rows, inserts the document and
//! increments each counter with `participant_count = participant_count + 1`.
//!
//! # Example
//!
//! ```ignore
//! use festival_postgres::{PoolSettings, PostgresFestivalStore};
//!
//! let store = PostgresFestivalStore::connect("postgres://localhost/festival", PoolSettings::default()).await?;
//! store.migrate().await?;
//! ```

use chrono::{DateTime, Utc};
use festival_core::{
    Event, EventDetails, EventFilter, EventId, EventPatch, FestivalStore, NewRegistration,
    Registration, RegistrationId, StoreError, StoreFuture,
};
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::collections::HashSet;
use std::time::Duration;
use uuid::Uuid;

/// Connection pool settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolSettings {
    /// Maximum pooled connections
    pub max_connections: u32,
    /// How long to wait for a connection
    pub connect_timeout: Duration,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            max_connections: 10,
            connect_timeout: Duration::from_secs(30),
        }
    }
}

/// `PostgreSQL`-backed [`FestivalStore`].
#[derive(Clone, Debug)]
pub struct PostgresFestivalStore {
    pool: PgPool,
}

type EventRow = (Uuid, serde_json::Value, i32);

fn db_error(error: sqlx::Error) -> StoreError {
    StoreError::DatabaseError(error.to_string())
}

fn decode_event((id, data, participant_count): EventRow) -> Result<Event, StoreError> {
    let details: EventDetails = serde_json::from_value(data)?;
    Ok(Event {
        id: EventId::from_uuid(id),
        details,
        participant_count: u32::try_from(participant_count).unwrap_or_default(),
    })
}

fn decode_registration(data: serde_json::Value) -> Result<Registration, StoreError> {
    Ok(serde_json::from_value(data)?)
}

fn encode_count(count: u32) -> Result<i32, StoreError> {
    i32::try_from(count)
        .map_err(|_| StoreError::SerializationError(format!("participant count {count} out of range")))
}

impl PostgresFestivalStore {
    /// Connect to `PostgreSQL` with the given pool settings.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DatabaseError`] if the connection fails.
    pub async fn connect(database_url: &str, settings: PoolSettings) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(settings.max_connections)
            .acquire_timeout(settings.connect_timeout)
            .connect(database_url)
            .await
            .map_err(|e| StoreError::DatabaseError(format!("Failed to connect: {e}")))?;

        Ok(Self::from_pool(pool))
    }

    /// Create a store using an existing connection pool.
    #[must_use]
    pub const fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// The underlying connection pool.
    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Create or upgrade the festival tables.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DatabaseError`] if a migration fails.
    pub async fn migrate(&self) -> Result<(), StoreError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| StoreError::DatabaseError(format!("Migration failed: {e}")))?;
        tracing::info!("Festival schema migrations applied");
        Ok(())
    }

    async fn fetch_registrations(
        &self,
        event_id: Option<EventId>,
    ) -> Result<Vec<Registration>, StoreError> {
        let rows: Vec<(serde_json::Value,)> = sqlx::query_as(
            "SELECT data FROM festival_registrations
             WHERE $1::uuid IS NULL OR $1 = ANY(event_ids)
             ORDER BY seq DESC",
        )
        .bind(event_id.map(|id| *id.as_uuid()))
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;

        rows.into_iter().map(|(data,)| decode_registration(data)).collect()
    }
}

impl FestivalStore for PostgresFestivalStore {
    fn list_events(&self, filter: EventFilter) -> StoreFuture<'_, Vec<Event>> {
        Box::pin(async move {
            let rows: Vec<EventRow> = sqlx::query_as(
                "SELECT id, data, participant_count FROM festival_events
                 WHERE ($1::text IS NULL OR data->>'category' = $1)
                   AND ($2::text IS NULL OR lower(trim(data->>'department')) = lower(trim($2)))
                 ORDER BY seq",
            )
            .bind(filter.category.map(|c| c.as_str()))
            .bind(filter.department.as_deref())
            .fetch_all(&self.pool)
            .await
            .map_err(db_error)?;

            rows.into_iter().map(decode_event).collect()
        })
    }

    fn get_event(&self, id: EventId) -> StoreFuture<'_, Option<Event>> {
        Box::pin(async move {
            let row: Option<EventRow> = sqlx::query_as(
                "SELECT id, data, participant_count FROM festival_events WHERE id = $1",
            )
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error)?;

            row.map(decode_event).transpose()
        })
    }

    fn create_event(&self, details: EventDetails) -> StoreFuture<'_, Event> {
        Box::pin(async move {
            let event = Event::new(EventId::new(), details);
            let data = serde_json::to_value(&event.details)?;

            sqlx::query(
                "INSERT INTO festival_events (id, data, participant_count) VALUES ($1, $2, 0)",
            )
            .bind(event.id.as_uuid())
            .bind(data)
            .execute(&self.pool)
            .await
            .map_err(db_error)?;

            tracing::debug!(event_id = %event.id, "Event inserted");
            Ok(event)
        })
    }

    fn update_event(&self, id: EventId, patch: EventPatch) -> StoreFuture<'_, Option<Event>> {
        Box::pin(async move {
            let mut tx = self.pool.begin().await.map_err(db_error)?;

            let row: Option<EventRow> = sqlx::query_as(
                "SELECT id, data, participant_count FROM festival_events WHERE id = $1 FOR UPDATE",
            )
            .bind(id.as_uuid())
            .fetch_optional(&mut *tx)
            .await
            .map_err(db_error)?;

            let Some(row) = row else {
                return Ok(None);
            };

            let mut event = decode_event(row)?;
            patch.apply(&mut event);

            sqlx::query(
                "UPDATE festival_events SET data = $2, participant_count = $3 WHERE id = $1",
            )
            .bind(id.as_uuid())
            .bind(serde_json::to_value(&event.details)?)
            .bind(encode_count(event.participant_count)?)
            .execute(&mut *tx)
            .await
            .map_err(db_error)?;

            tx.commit().await.map_err(db_error)?;
            Ok(Some(event))
        })
    }

    fn delete_event(&self, id: EventId) -> StoreFuture<'_, bool> {
        Box::pin(async move {
            let result = sqlx::query("DELETE FROM festival_events WHERE id = $1")
                .bind(id.as_uuid())
                .execute(&self.pool)
                .await
                .map_err(db_error)?;

            Ok(result.rows_affected() > 0)
        })
    }

    fn increment_participation(&self, ids: Vec<EventId>) -> StoreFuture<'_, ()> {
        Box::pin(async move {
            let ids: Vec<Uuid> = ids.iter().map(|id| *id.as_uuid()).collect();

            sqlx::query(
                "UPDATE festival_events SET participant_count = participant_count + 1
                 WHERE id = ANY($1)",
            )
            .bind(ids)
            .execute(&self.pool)
            .await
            .map_err(db_error)?;

            Ok(())
        })
    }

    fn list_registrations(&self) -> StoreFuture<'_, Vec<Registration>> {
        Box::pin(self.fetch_registrations(None))
    }

    fn get_registration(&self, id: RegistrationId) -> StoreFuture<'_, Option<Registration>> {
        Box::pin(async move {
            let row: Option<(serde_json::Value,)> =
                sqlx::query_as("SELECT data FROM festival_registrations WHERE id = $1")
                    .bind(id.as_uuid())
                    .fetch_optional(&self.pool)
                    .await
                    .map_err(db_error)?;

            row.map(|(data,)| decode_registration(data)).transpose()
        })
    }

    fn registrations_for_event(&self, event_id: EventId) -> StoreFuture<'_, Vec<Registration>> {
        Box::pin(self.fetch_registrations(Some(event_id)))
    }

    fn create_registration(&self, registration: NewRegistration) -> StoreFuture<'_, Registration> {
        Box::pin(async move {
            let ids: Vec<Uuid> = registration.event_ids.iter().map(|id| *id.as_uuid()).collect();
            let mut tx = self.pool.begin().await.map_err(db_error)?;

            // Lock the referenced rows so a concurrent delete cannot slip in.
            let found: Vec<(Uuid,)> = sqlx::query_as(
                "SELECT id FROM festival_events WHERE id = ANY($1) ORDER BY id FOR UPDATE",
            )
            .bind(&ids)
            .fetch_all(&mut *tx)
            .await
            .map_err(db_error)?;

            let found: HashSet<Uuid> = found.into_iter().map(|(id,)| id).collect();
            let unknown: Vec<EventId> = registration
                .event_ids
                .iter()
                .filter(|id| !found.contains(id.as_uuid()))
                .copied()
                .collect();
            if !unknown.is_empty() {
                return Err(StoreError::UnknownEvents(unknown));
            }

            let registered_at: DateTime<Utc> = Utc::now();
            let registration = registration.into_registration(RegistrationId::new(), registered_at);

            sqlx::query(
                "INSERT INTO festival_registrations (id, event_ids, data, registered_at)
                 VALUES ($1, $2, $3, $4)",
            )
            .bind(registration.id.as_uuid())
            .bind(&ids)
            .bind(serde_json::to_value(&registration)?)
            .bind(registered_at)
            .execute(&mut *tx)
            .await
            .map_err(db_error)?;

            sqlx::query(
                "UPDATE festival_events SET participant_count = participant_count + 1
                 WHERE id = ANY($1)",
            )
            .bind(&ids)
            .execute(&mut *tx)
            .await
            .map_err(db_error)?;

            tx.commit().await.map_err(db_error)?;

            tracing::debug!(
                registration_id = %registration.id,
                events = ids.len(),
                "Registration committed"
            );
            Ok(registration)
        })
    }

    fn health_check(&self) -> StoreFuture<'_, ()> {
        Box::pin(async move {
            sqlx::query("SELECT 1")
                .execute(&self.pool)
                .await
                .map_err(db_error)?;
            Ok(())
        })
    }
}
