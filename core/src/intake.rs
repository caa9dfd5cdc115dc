//! Registration intake: validate, normalize, persist.

use crate::store::{FestivalStore, StoreError};
use crate::types::Registration;
use crate::validation::{RegistrationPayload, ValidationErrors};
use thiserror::Error;

/// Why a registration was not accepted.
#[derive(Error, Debug)]
pub enum IntakeError {
    /// The payload failed validation, or named events that do not exist.
    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    /// The store failed. Nothing was written.
    #[error("Failed to store registration: {0}")]
    Store(StoreError),
}

/// Validate a submitted registration and persist it.
///
/// On success the store has recorded the registration and incremented the
/// counter of every named event. Unknown events are reported on the
/// corresponding `eventIds[i]` field.
///
/// # Errors
///
/// - [`IntakeError::Validation`]: invalid fields or unknown events
/// - [`IntakeError::Store`]: the store failed
pub async fn submit_registration(
    store: &dyn FestivalStore,
    payload: RegistrationPayload,
) -> Result<Registration, IntakeError> {
    let kind = payload.kind();
    let registration = payload.validate().inspect_err(|errors| {
        tracing::debug!(%kind, errors = errors.len(), "Registration rejected by validation");
    })?;
    let event_ids = registration.event_ids.clone();

    match store.create_registration(registration).await {
        Ok(registration) => {
            tracing::info!(
                registration_id = %registration.id,
                %kind,
                events = registration.event_ids.len(),
                "Registration accepted"
            );
            Ok(registration)
        }
        Err(StoreError::UnknownEvents(unknown)) => {
            let mut errors = ValidationErrors::new();
            for (index, id) in event_ids.iter().enumerate() {
                if unknown.contains(id) {
                    errors.push(format!("eventIds[{index}]"), format!("Event {id} does not exist"));
                }
            }
            tracing::debug!(%kind, unknown = unknown.len(), "Registration names unknown events");
            Err(IntakeError::Validation(errors))
        }
        Err(error) => Err(IntakeError::Store(error)),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::memory::InMemoryFestivalStore;
    use crate::types::{
        EventCategory, EventDetails, EventFilter, EventId, GroupMember, RegistrationKind,
    };
    use crate::validation::{GroupPayload, SoloPayload};

    fn event() -> EventDetails {
        EventDetails {
            title: "Chess Championship".to_string(),
            description: "Rapid format".to_string(),
            category: EventCategory::Sports,
            department: Some("Sports".to_string()),
            date: None,
            time: None,
            prize: "₹10,000".to_string(),
            icon: None,
        }
    }

    fn solo(event_ids: Vec<String>) -> RegistrationPayload {
        RegistrationPayload::Solo(SoloPayload {
            name: "Asha Rao".to_string(),
            email: "asha@example.com".to_string(),
            phone: "9876543210".to_string(),
            college: "JNTU".to_string(),
            event_ids,
            ..SoloPayload::default()
        })
    }

    #[tokio::test]
    async fn accepted_solo_registration_is_stored_and_counted() {
        let store = InMemoryFestivalStore::new();
        let event = store.create_event(event()).await.unwrap();

        let registration = submit_registration(&store, solo(vec![event.id.to_string()]))
            .await
            .unwrap();

        assert_eq!(registration.registration_type, RegistrationKind::Solo);
        assert_eq!(registration.contact.email, "asha@example.com");
        assert_eq!(
            store.get_registration(registration.id).await.unwrap(),
            Some(registration)
        );
        assert_eq!(store.get_event(event.id).await.unwrap().unwrap().participant_count, 1);
    }

    #[tokio::test]
    async fn accepted_group_registration_keeps_members() {
        let store = InMemoryFestivalStore::new();
        let event = store.create_event(event()).await.unwrap();
        let members = vec![
            GroupMember {
                name: "Kiran".to_string(),
                roll_number: "21CS010".to_string(),
            },
            GroupMember {
                name: "Meena".to_string(),
                roll_number: "21CS011".to_string(),
            },
        ];

        let payload = RegistrationPayload::Group(GroupPayload {
            group_leader_name: "Ravi".to_string(),
            group_leader_email: "ravi@example.com".to_string(),
            group_leader_phone: "9876543210".to_string(),
            group_leader_college: "VNR".to_string(),
            group_members: members.clone(),
            event_ids: vec![event.id.to_string()],
            ..GroupPayload::default()
        });

        let registration = submit_registration(&store, payload).await.unwrap();
        assert_eq!(registration.contact.name, "Ravi");
        assert_eq!(registration.group_members, Some(members));
    }

    #[tokio::test]
    async fn empty_event_list_persists_nothing() {
        let store = InMemoryFestivalStore::new();

        let error = submit_registration(&store, solo(Vec::new())).await.unwrap_err();

        assert!(matches!(error, IntakeError::Validation(ref e) if e.has_field("eventIds")));
        assert!(store.list_registrations().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn unknown_event_reported_on_its_position() {
        let store = InMemoryFestivalStore::new();
        let event = store.create_event(event()).await.unwrap();
        let missing = EventId::new();

        let error = submit_registration(
            &store,
            solo(vec![event.id.to_string(), missing.to_string()]),
        )
        .await
        .unwrap_err();

        let IntakeError::Validation(errors) = error else {
            panic!("expected validation error");
        };
        assert_eq!(errors.len(), 1);
        assert!(errors.has_field("eventIds[1]"));

        let events = store.list_events(EventFilter::all()).await.unwrap();
        assert_eq!(events[0].participant_count, 0);
        assert!(store.list_registrations().await.unwrap().is_empty());
    }
}
