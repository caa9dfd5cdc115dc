//! # Festival Core
//!
//! Domain types, validation and storage abstractions for the festival
//! registration service.
//!
//! ## Concepts
//!
//! - **Event**: a festival activity with a participation counter
//! - **Registration**: a solo or group participation request naming one or more events
//! - **Participation counter**: number of registrations naming an event
//!
//! ## Flow
//!
//! ```text
//! RegistrationPayload ──validate──▶ NewRegistration ──FestivalStore::create_registration──▶ Registration
//!                                                     (reference check + insert + counters, atomic)
//! ```
//!
//! ## Example
//!
//! ```ignore
//! use festival_core::{intake::submit_registration, memory::InMemoryFestivalStore};
//!
//! let store = InMemoryFestivalStore::with_catalog();
//! let payload = serde_json::from_str(body)?;
//! let registration = submit_registration(&store, payload).await?;
//! ```

pub mod intake;
pub mod memory;
pub mod seed;
pub mod store;
pub mod types;
pub mod validation;

pub use intake::{IntakeError, submit_registration};
pub use memory::InMemoryFestivalStore;
pub use store::{FestivalStore, StoreError, StoreFuture};
pub use types::{
    Contact, Event, EventCategory, EventDetails, EventFilter, EventId, EventPatch, GroupMember,
    NewRegistration, Registration, RegistrationId, RegistrationKind, YesNo,
};
pub use validation::{
    EventDraft, EventPatchDraft, FieldError, RegistrationPayload, ValidationErrors,
};
