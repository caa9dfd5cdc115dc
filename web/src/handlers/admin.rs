//! Admin catalog endpoints. Every handler requires [`AdminAccess`].
//!
//! - `POST /api/admin/events` - create an event
//! - `PUT /api/admin/events/:id` - partial update
//! - `DELETE /api/admin/events/:id` - remove an event
//! - `GET /api/admin/events/:id/registrations` - registrations naming an event

use super::parse_event_id;
use crate::error::AppError;
use crate::extractors::{AdminAccess, CorrelationId};
use crate::metrics::record_admin_operation;
use crate::state::AppState;
use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use festival_core::{Event, EventDraft, EventPatchDraft, Registration};

/// Create an event with a zero participation counter.
///
/// # Errors
///
/// 401/403 for missing or wrong credentials, 400 for invalid fields,
/// 500 if the store fails.
pub async fn create_event(
    _admin: AdminAccess,
    correlation_id: CorrelationId,
    State(state): State<AppState>,
    draft: Result<Json<EventDraft>, JsonRejection>,
) -> Result<(StatusCode, Json<Event>), AppError> {
    let Json(draft) = draft?;
    let details = draft.validate()?;

    let event = state.store().create_event(details).await?;
    record_admin_operation("create");
    tracing::info!(
        correlation_id = %correlation_id.0,
        event_id = %event.id,
        title = %event.details.title,
        "Event created"
    );

    Ok((StatusCode::CREATED, Json(event)))
}

/// Apply a partial update to an event.
///
/// # Errors
///
/// 401/403 for missing or wrong credentials, 400 for invalid fields,
/// 404 if the event does not exist, 500 if the store fails.
pub async fn update_event(
    _admin: AdminAccess,
    correlation_id: CorrelationId,
    State(state): State<AppState>,
    Path(id): Path<String>,
    draft: Result<Json<EventPatchDraft>, JsonRejection>,
) -> Result<Json<Event>, AppError> {
    let event_id = parse_event_id(&id)?;
    let Json(draft) = draft?;
    let patch = draft.validate()?;

    let event = state
        .store()
        .update_event(event_id, patch)
        .await?
        .ok_or_else(|| AppError::not_found("Event", event_id))?;
    record_admin_operation("update");
    tracing::info!(correlation_id = %correlation_id.0, event_id = %event.id, "Event updated");

    Ok(Json(event))
}

/// Remove an event. Existing registrations are kept.
///
/// # Errors
///
/// 401/403 for missing or wrong credentials, 404 if the event does not exist,
/// 500 if the store fails.
pub async fn delete_event(
    _admin: AdminAccess,
    correlation_id: CorrelationId,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let event_id = parse_event_id(&id)?;

    if !state.store().delete_event(event_id).await? {
        return Err(AppError::not_found("Event", event_id));
    }
    record_admin_operation("delete");
    tracing::info!(correlation_id = %correlation_id.0, %event_id, "Event deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// List registrations naming an event, newest first.
///
/// # Errors
///
/// 401/403 for missing or wrong credentials, 404 if the event does not exist,
/// 500 if the store fails.
pub async fn event_registrations(
    _admin: AdminAccess,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Registration>>, AppError> {
    let event_id = parse_event_id(&id)?;
    let store = state.store();

    if store.get_event(event_id).await?.is_none() {
        return Err(AppError::not_found("Event", event_id));
    }

    Ok(Json(store.registrations_for_event(event_id).await?))
}
