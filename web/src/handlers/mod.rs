//! HTTP request handlers, organized by resource.

pub mod admin;
pub mod events;
pub mod health;
pub mod registrations;

use crate::error::AppError;
use festival_core::{EventId, RegistrationId};
use uuid::Uuid;

/// Parse an event id from a path segment. Malformed ids cannot exist, so they
/// are reported as not found.
pub(crate) fn parse_event_id(raw: &str) -> Result<EventId, AppError> {
    raw.parse::<EventId>()
        .map_err(|_| AppError::not_found("Event", raw))
}

/// Parse a registration id from a path segment.
pub(crate) fn parse_registration_id(raw: &str) -> Result<RegistrationId, AppError> {
    Uuid::parse_str(raw.trim())
        .map(RegistrationId::from_uuid)
        .map_err(|_| AppError::not_found("Registration", raw))
}
