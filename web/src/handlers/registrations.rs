//! Registration endpoints.
//!
//! - `POST /api/registrations` - submit a solo or group registration
//! - `GET /api/registrations` - list registrations, newest first
//! - `GET /api/registrations/:id` - registration details

use super::parse_registration_id;
use crate::error::AppError;
use crate::extractors::CorrelationId;
use crate::metrics::{record_registration, record_rejection};
use crate::state::AppState;
use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use festival_core::{IntakeError, Registration, RegistrationPayload, submit_registration};

/// Submit a registration.
///
/// The body is tagged by `registrationType` (`solo` or `group`). On success
/// every named event's participation counter has been incremented.
///
/// ```bash
/// curl -X POST http://localhost:5000/api/registrations \
///   -H "Content-Type: application/json" \
///   -d '{
///     "registrationType": "solo",
///     "name": "Asha Rao",
///     "email": "asha@example.com",
///     "phone": "9876543210",
///     "college": "JNTU",
///     "eventIds": ["<event id>"]
///   }'
/// ```
///
/// # Errors
///
/// - 400 `BAD_REQUEST`: malformed JSON or unknown `registrationType`
/// - 400 `VALIDATION_ERROR`: field errors, including unknown events
/// - 500: the store failed
pub async fn create_registration(
    correlation_id: CorrelationId,
    State(state): State<AppState>,
    payload: Result<Json<RegistrationPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<Registration>), AppError> {
    let Json(payload) = payload.inspect_err(|rejection| {
        tracing::debug!(
            correlation_id = %correlation_id.0,
            error = %rejection.body_text(),
            "Malformed registration payload"
        );
        record_rejection();
    })?;
    let kind = payload.kind();

    match submit_registration(state.store(), payload).await {
        Ok(registration) => {
            record_registration(kind);
            tracing::debug!(
                correlation_id = %correlation_id.0,
                registration_id = %registration.id,
                "Registration created"
            );
            Ok((StatusCode::CREATED, Json(registration)))
        }
        Err(IntakeError::Validation(errors)) => {
            record_rejection();
            tracing::debug!(
                correlation_id = %correlation_id.0,
                errors = errors.len(),
                "Registration rejected"
            );
            Err(AppError::validation_failed(errors))
        }
        Err(error) => Err(error.into()),
    }
}

/// List registrations, newest first.
///
/// # Errors
///
/// 500 if the store fails.
pub async fn list_registrations(
    State(state): State<AppState>,
) -> Result<Json<Vec<Registration>>, AppError> {
    Ok(Json(state.store().list_registrations().await?))
}

/// Get one registration.
///
/// # Errors
///
/// 404 if the registration does not exist, 500 if the store fails.
pub async fn get_registration(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Registration>, AppError> {
    let registration_id = parse_registration_id(&id)?;

    state
        .store()
        .get_registration(registration_id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found("Registration", registration_id))
}
