//! Public catalog endpoints.
//!
//! - `GET /api/events` - list events, optionally filtered by `category` / `department`
//! - `GET /api/events/:id` - event details

use super::parse_event_id;
use crate::error::AppError;
use crate::state::AppState;
use axum::{
    Json,
    extract::{Path, Query, State, rejection::QueryRejection},
};
use festival_core::{Event, EventCategory, EventFilter};
use serde::Deserialize;

/// Query parameters for listing events.
#[derive(Debug, Default, Deserialize)]
pub struct ListEventsQuery {
    /// Category label (`Technical`, `Cultural`, `Sports`), case-insensitive
    pub category: Option<String>,
    /// Department, case-insensitive
    pub department: Option<String>,
}

impl ListEventsQuery {
    /// Convert into a store filter. Blank parameters are ignored.
    ///
    /// # Errors
    ///
    /// Returns 400 for an unknown category.
    pub fn into_filter(self) -> Result<EventFilter, AppError> {
        let category = match non_blank(self.category) {
            Some(label) => Some(EventCategory::parse(&label).ok_or_else(|| {
                AppError::bad_request(format!(
                    "Unknown category '{label}'. Expected Technical, Cultural or Sports"
                ))
            })?),
            None => None,
        };

        Ok(EventFilter {
            category,
            department: non_blank(self.department),
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// List events in catalog order.
///
/// ```bash
/// curl 'http://localhost:5000/api/events?category=Sports'
/// ```
///
/// # Errors
///
/// 400 for malformed query parameters, 500 if the store fails.
pub async fn list_events(
    State(state): State<AppState>,
    query: Result<Query<ListEventsQuery>, QueryRejection>,
) -> Result<Json<Vec<Event>>, AppError> {
    let Query(query) = query?;
    let filter = query.into_filter()?;

    let events = state.store().list_events(filter).await?;
    Ok(Json(events))
}

/// Get one event.
///
/// # Errors
///
/// 404 if the event does not exist, 500 if the store fails.
pub async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Event>, AppError> {
    let event_id = parse_event_id(&id)?;

    state
        .store()
        .get_event(event_id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found("Event", event_id))
}
