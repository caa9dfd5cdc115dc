//! In-memory implementation of [`FestivalStore`].
//!
//! Both collections live behind a single `RwLock`, so a registration write and
//! its counter increments are one critical section.

use crate::seed::festival_catalog;
use crate::store::{FestivalStore, StoreError, StoreFuture};
use crate::types::{
    Event, EventDetails, EventFilter, EventId, EventPatch, NewRegistration, Registration,
    RegistrationId,
};
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct Collections {
    /// Insertion order
    events: Vec<Event>,
    /// Oldest first
    registrations: Vec<Registration>,
}

impl Collections {
    fn event_mut(&mut self, id: EventId) -> Option<&mut Event> {
        self.events.iter_mut().find(|event| event.id == id)
    }

    fn contains_event(&self, id: &EventId) -> bool {
        self.events.iter().any(|event| event.id == *id)
    }

    fn increment(&mut self, ids: &[EventId]) {
        for id in ids {
            if let Some(event) = self.event_mut(*id) {
                event.participant_count = event.participant_count.saturating_add(1);
            }
        }
    }
}

/// Process-local store. Cloning shares the same underlying collections.
#[derive(Clone, Debug, Default)]
pub struct InMemoryFestivalStore {
    inner: Arc<RwLock<Collections>>,
}

impl InMemoryFestivalStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-loaded with the festival catalog.
    #[must_use]
    pub fn with_catalog() -> Self {
        Self::with_events(festival_catalog())
    }

    /// Creates a store pre-loaded with the given events, all counters at zero.
    #[must_use]
    pub fn with_events(details: impl IntoIterator<Item = EventDetails>) -> Self {
        let events = details
            .into_iter()
            .map(|details| Event::new(EventId::new(), details))
            .collect();

        Self {
            inner: Arc::new(RwLock::new(Collections {
                events,
                registrations: Vec::new(),
            })),
        }
    }
}

impl FestivalStore for InMemoryFestivalStore {
    fn list_events(&self, filter: EventFilter) -> StoreFuture<'_, Vec<Event>> {
        Box::pin(async move {
            let collections = self.inner.read().await;
            Ok(collections
                .events
                .iter()
                .filter(|event| event.matches(&filter))
                .cloned()
                .collect())
        })
    }

    fn get_event(&self, id: EventId) -> StoreFuture<'_, Option<Event>> {
        Box::pin(async move {
            let collections = self.inner.read().await;
            Ok(collections.events.iter().find(|event| event.id == id).cloned())
        })
    }

    fn create_event(&self, details: EventDetails) -> StoreFuture<'_, Event> {
        Box::pin(async move {
            let event = Event::new(EventId::new(), details);
            self.inner.write().await.events.push(event.clone());
            tracing::debug!(event_id = %event.id, title = %event.details.title, "Event created");
            Ok(event)
        })
    }

    fn update_event(&self, id: EventId, patch: EventPatch) -> StoreFuture<'_, Option<Event>> {
        Box::pin(async move {
            let mut collections = self.inner.write().await;
            Ok(collections.event_mut(id).map(|event| {
                patch.apply(event);
                event.clone()
            }))
        })
    }

    fn delete_event(&self, id: EventId) -> StoreFuture<'_, bool> {
        Box::pin(async move {
            let mut collections = self.inner.write().await;
            let before = collections.events.len();
            collections.events.retain(|event| event.id != id);
            Ok(collections.events.len() < before)
        })
    }

    fn increment_participation(&self, ids: Vec<EventId>) -> StoreFuture<'_, ()> {
        Box::pin(async move {
            self.inner.write().await.increment(&ids);
            Ok(())
        })
    }

    fn list_registrations(&self) -> StoreFuture<'_, Vec<Registration>> {
        Box::pin(async move {
            let collections = self.inner.read().await;
            Ok(collections.registrations.iter().rev().cloned().collect())
        })
    }

    fn get_registration(&self, id: RegistrationId) -> StoreFuture<'_, Option<Registration>> {
        Box::pin(async move {
            let collections = self.inner.read().await;
            Ok(collections
                .registrations
                .iter()
                .find(|registration| registration.id == id)
                .cloned())
        })
    }

    fn registrations_for_event(&self, event_id: EventId) -> StoreFuture<'_, Vec<Registration>> {
        Box::pin(async move {
            let collections = self.inner.read().await;
            Ok(collections
                .registrations
                .iter()
                .rev()
                .filter(|registration| registration.includes_event(&event_id))
                .cloned()
                .collect())
        })
    }

    fn create_registration(&self, registration: NewRegistration) -> StoreFuture<'_, Registration> {
        Box::pin(async move {
            let mut collections = self.inner.write().await;

            let unknown: Vec<EventId> = registration
                .event_ids
                .iter()
                .filter(|id| !collections.contains_event(id))
                .copied()
                .collect();
            if !unknown.is_empty() {
                return Err(StoreError::UnknownEvents(unknown));
            }

            let registration = registration.into_registration(RegistrationId::new(), Utc::now());
            collections.increment(&registration.event_ids);
            collections.registrations.push(registration.clone());

            tracing::debug!(
                registration_id = %registration.id,
                events = registration.event_ids.len(),
                "Registration stored"
            );
            Ok(registration)
        })
    }

    fn health_check(&self) -> StoreFuture<'_, ()> {
        Box::pin(async { Ok(()) })
    }
}
