//! Storage abstraction for the event catalog and registrations.
//!
//! The [`FestivalStore`] trait is the only seam between the HTTP layer and
//! persistence. Callers own the store and share it as `Arc<dyn FestivalStore>`.
//!
//! # Implementations
//!
//! - [`InMemoryFestivalStore`](crate::memory::InMemoryFestivalStore): one lock over
//!   both collections, used for development and tests
//! - `PostgresFestivalStore` (in `festival-postgres`): JSONB documents, one
//!   transaction per registration
//!
//! # Atomicity
//!
//! [`FestivalStore::create_registration`] must check the referenced events,
//! persist the registration and increment every counter as one step. Counters
//! therefore always equal the number of successful registrations naming the event.

use crate::types::{
    Event, EventDetails, EventFilter, EventId, EventPatch, NewRegistration, Registration,
    RegistrationId,
};
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// Boxed future returned by every [`FestivalStore`] operation.
pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, StoreError>> + Send + 'a>>;

/// Errors that can occur during store operations.
#[derive(Error, Debug)]
pub enum StoreError {
    /// A registration named events that do not exist. Nothing was written.
    #[error("Unknown events: {}", join_ids(.0))]
    UnknownEvents(Vec<EventId>),

    /// Database connection or query error.
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// Stored document could not be encoded or decoded.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

fn join_ids(ids: &[EventId]) -> String {
    ids.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

impl From<serde_json::Error> for StoreError {
    fn from(error: serde_json::Error) -> Self {
        Self::SerializationError(error.to_string())
    }
}

/// Persistence for events and registrations.
///
/// # Dyn Compatibility
///
/// Methods return [`StoreFuture`] instead of using `async fn` so the trait can
/// be used as `Arc<dyn FestivalStore>` in application state.
pub trait FestivalStore: Send + Sync {
    /// List events in insertion order, keeping only those that match `filter`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend fails.
    fn list_events(&self, filter: EventFilter) -> StoreFuture<'_, Vec<Event>>;

    /// Look up one event. A missing event is `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend fails.
    fn get_event(&self, id: EventId) -> StoreFuture<'_, Option<Event>>;

    /// Store a new event with a fresh id and a zero counter.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend fails.
    fn create_event(&self, details: EventDetails) -> StoreFuture<'_, Event>;

    /// Apply a partial update. Returns `Ok(None)` if the event does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend fails.
    fn update_event(&self, id: EventId, patch: EventPatch) -> StoreFuture<'_, Option<Event>>;

    /// Remove an event. Returns `true` if a record was removed.
    ///
    /// Registrations naming the event are kept.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend fails.
    fn delete_event(&self, id: EventId) -> StoreFuture<'_, bool>;

    /// Add one to the counter of every listed event. Unknown ids are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend fails.
    fn increment_participation(&self, ids: Vec<EventId>) -> StoreFuture<'_, ()>;

    /// List registrations, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend fails.
    fn list_registrations(&self) -> StoreFuture<'_, Vec<Registration>>;

    /// Look up one registration. A missing registration is `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend fails.
    fn get_registration(&self, id: RegistrationId) -> StoreFuture<'_, Option<Registration>>;

    /// Registrations naming the given event, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend fails.
    fn registrations_for_event(&self, event_id: EventId) -> StoreFuture<'_, Vec<Registration>>;

    /// Persist a registration and increment its events' counters atomically.
    ///
    /// Assigns the id and `registeredAt` timestamp.
    ///
    /// # Errors
    ///
    /// - `UnknownEvents`: one or more referenced events do not exist (nothing written)
    /// - `DatabaseError` / `SerializationError`: the backend failed (nothing written)
    fn create_registration(&self, registration: NewRegistration) -> StoreFuture<'_, Registration>;

    /// Check that the backend is reachable.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend cannot serve requests.
    fn health_check(&self) -> StoreFuture<'_, ()>;
}
