//! # Festival Testing
//!
//! Fixtures and mock stores shared by the festival crates' tests.
//!
//! ## Example
//!
//! ```ignore
//! use festival_testing::fixtures;
//! use festival_core::{InMemoryFestivalStore, submit_registration};
//!
//! #[tokio::test]
//! async fn registers() {
//!     let store = InMemoryFestivalStore::new();
//!     let event = store.create_event(fixtures::event_details("Code Sprint")).await?;
//!     let payload = fixtures::solo_payload(&[event.id]);
//!     submit_registration(&store, payload).await?;
//! }
//! ```

use std::sync::Once;

/// Payload and event builders.
pub mod fixtures {
    use festival_core::{
        EventCategory, EventDetails, EventId, GroupMember, RegistrationPayload,
        validation::{GroupPayload, SoloPayload},
    };
    use serde_json::{Value, json};

    /// A technical event with every optional field set.
    #[must_use]
    pub fn event_details(title: &str) -> EventDetails {
        EventDetails {
            title: title.to_string(),
            description: format!("{title} at the annual fest"),
            category: EventCategory::Technical,
            department: Some("CSE".to_string()),
            date: Some("December 17, 2025".to_string()),
            time: Some("10:00 AM - 1:00 PM".to_string()),
            prize: "₹50,000".to_string(),
            icon: Some("Laptop".to_string()),
        }
    }

    /// A valid solo registration for the given events.
    #[must_use]
    pub fn solo_payload(event_ids: &[EventId]) -> RegistrationPayload {
        RegistrationPayload::Solo(SoloPayload {
            name: "Asha Rao".to_string(),
            email: "asha.rao@example.com".to_string(),
            phone: "+91 98765 43210".to_string(),
            college: "JNTU Hyderabad".to_string(),
            event_ids: event_ids.iter().map(ToString::to_string).collect(),
            ..SoloPayload::default()
        })
    }

    /// Two roster entries.
    #[must_use]
    pub fn group_members() -> Vec<GroupMember> {
        vec![
            GroupMember {
                name: "Kiran Kumar".to_string(),
                roll_number: "21CS010".to_string(),
            },
            GroupMember {
                name: "Meena Iyer".to_string(),
                roll_number: "21CS011".to_string(),
            },
        ]
    }

    /// A valid group registration for the given events.
    #[must_use]
    pub fn group_payload(event_ids: &[EventId]) -> RegistrationPayload {
        RegistrationPayload::Group(GroupPayload {
            group_leader_name: "Ravi Teja".to_string(),
            group_leader_email: "ravi.teja@example.com".to_string(),
            group_leader_phone: "9876543210".to_string(),
            group_leader_college: "VNR VJIET".to_string(),
            group_members: group_members(),
            event_ids: event_ids.iter().map(ToString::to_string).collect(),
            ..GroupPayload::default()
        })
    }

    /// JSON body of a valid solo registration, as the frontend sends it.
    #[must_use]
    pub fn solo_json(event_ids: &[EventId]) -> Value {
        json!({
            "registrationType": "solo",
            "name": "Asha Rao",
            "email": "asha.rao@example.com",
            "phone": "+91 98765 43210",
            "college": "JNTU Hyderabad",
            "eventIds": event_ids.iter().map(ToString::to_string).collect::<Vec<_>>(),
            "accommodation": "No",
            "transportation": "Yes",
        })
    }

    /// JSON body of a valid group registration, as the frontend sends it.
    #[must_use]
    pub fn group_json(event_ids: &[EventId]) -> Value {
        json!({
            "registrationType": "group",
            "groupLeaderName": "Ravi Teja",
            "groupLeaderEmail": "ravi.teja@example.com",
            "groupLeaderPhone": "9876543210",
            "groupLeaderCollege": "VNR VJIET",
            "groupMembers": [
                {"name": "Kiran Kumar", "rollNumber": "21CS010"},
                {"name": "Meena Iyer", "rollNumber": "21CS011"}
            ],
            "eventIds": event_ids.iter().map(ToString::to_string).collect::<Vec<_>>(),
        })
    }

    /// JSON body for creating an event through the admin API.
    #[must_use]
    pub fn event_json(title: &str) -> Value {
        json!({
            "title": title,
            "description": format!("{title} at the annual fest"),
            "category": "Cultural",
            "department": "Literary & Cultural",
            "date": "December 18, 2025",
            "time": "6:00 PM - 9:00 PM",
            "prize": "₹20,000",
            "icon": "Music",
        })
    }
}

/// Mock store implementations.
pub mod mocks {
    use festival_core::{
        Event, EventDetails, EventFilter, EventId, EventPatch, FestivalStore, NewRegistration,
        Registration, RegistrationId, StoreError, StoreFuture,
    };

    /// Store whose every operation fails with a database error.
    ///
    /// Used to exercise 500 and readiness-failure paths.
    #[derive(Debug, Clone, Default)]
    pub struct FailingStore;

    fn fail<'a, T: Send + 'a>() -> StoreFuture<'a, T> {
        Box::pin(async { Err(StoreError::DatabaseError("store offline".to_string())) })
    }

    impl FestivalStore for FailingStore {
        fn list_events(&self, _filter: EventFilter) -> StoreFuture<'_, Vec<Event>> {
            fail()
        }

        fn get_event(&self, _id: EventId) -> StoreFuture<'_, Option<Event>> {
            fail()
        }

        fn create_event(&self, _details: EventDetails) -> StoreFuture<'_, Event> {
            fail()
        }

        fn update_event(&self, _id: EventId, _patch: EventPatch) -> StoreFuture<'_, Option<Event>> {
            fail()
        }

        fn delete_event(&self, _id: EventId) -> StoreFuture<'_, bool> {
            fail()
        }

        fn increment_participation(&self, _ids: Vec<EventId>) -> StoreFuture<'_, ()> {
            fail()
        }

        fn list_registrations(&self) -> StoreFuture<'_, Vec<Registration>> {
            fail()
        }

        fn get_registration(&self, _id: RegistrationId) -> StoreFuture<'_, Option<Registration>> {
            fail()
        }

        fn registrations_for_event(&self, _event_id: EventId) -> StoreFuture<'_, Vec<Registration>> {
            fail()
        }

        fn create_registration(&self, _registration: NewRegistration) -> StoreFuture<'_, Registration> {
            fail()
        }

        fn health_check(&self) -> StoreFuture<'_, ()> {
            fail()
        }
    }
}

static TRACING: Once = Once::new();

/// Install a test tracing subscriber once per process.
///
/// Honors `RUST_LOG`; output is captured by the test harness.
pub fn init_test_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}
