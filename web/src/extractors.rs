//! Custom Axum extractors.
//!
//! - [`CorrelationId`]: request correlation id (from the middleware, the header, or fresh)
//! - [`BearerToken`]: raw token from `Authorization: Bearer <token>`
//! - [`AdminAccess`]: proof that the caller presented the configured admin token

use crate::error::AppError;
use crate::middleware::correlation_id_from_headers;
use crate::state::AppState;
use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use constant_time_eq::constant_time_eq;
use uuid::Uuid;

/// Correlation ID for request tracing.
///
/// Prefers the id assigned by the correlation middleware, then the
/// `X-Correlation-ID` header, and finally generates a new UUID v4.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CorrelationId(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for CorrelationId
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        if let Some(id) = parts.extensions.get::<Self>() {
            return Ok(*id);
        }

        let id = correlation_id_from_headers(&parts.headers).unwrap_or_else(Uuid::new_v4);
        Ok(Self(id))
    }
}

/// Bearer token extracted from `Authorization: Bearer <token>` header.
#[derive(Clone)]
pub struct BearerToken(pub String);

impl std::fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("BearerToken(..)")
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for BearerToken
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::unauthorized("Missing authorization header"))?;

        let token = header
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or_else(|| {
                AppError::unauthorized("Invalid authorization format. Expected 'Bearer <token>'")
            })?;

        Ok(Self(token.to_string()))
    }
}

/// Guard for admin-only handlers.
///
/// Rejects with 403 when admin access is disabled or the token does not match,
/// and with 401 when no usable bearer token was sent.
#[derive(Debug, Clone, Copy)]
pub struct AdminAccess;

#[async_trait]
impl FromRequestParts<AppState> for AdminAccess {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(expected) = state.admin_token() else {
            tracing::warn!("Admin request rejected: no admin token configured");
            return Err(AppError::forbidden("Admin access is disabled"));
        };

        let BearerToken(token) = BearerToken::from_request_parts(parts, state).await?;

        if constant_time_eq(token.as_bytes(), expected.as_bytes()) {
            Ok(Self)
        } else {
            tracing::warn!("Admin request rejected: invalid token");
            Err(AppError::forbidden("Invalid admin token"))
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use axum::http::{Request, StatusCode};
    use festival_core::InMemoryFestivalStore;
    use std::sync::Arc;

    fn parts(auth: Option<&str>) -> Parts {
        let mut builder = Request::builder();
        if let Some(value) = auth {
            builder = builder.header(AUTHORIZATION, value);
        }
        builder.body(()).expect("Valid request").into_parts().0
    }

    fn state(token: Option<&str>) -> AppState {
        let state = AppState::new(Arc::new(InMemoryFestivalStore::new()));
        match token {
            Some(token) => state.with_admin_token(token),
            None => state,
        }
    }

    #[tokio::test]
    async fn correlation_id_from_header() {
        let uuid = Uuid::new_v4();
        let mut parts = Request::builder()
            .header("X-Correlation-ID", uuid.to_string())
            .body(())
            .expect("Valid request")
            .into_parts()
            .0;

        let correlation_id = CorrelationId::from_request_parts(&mut parts, &())
            .await
            .expect("Should extract");

        assert_eq!(correlation_id.0, uuid);
    }

    #[tokio::test]
    async fn correlation_id_prefers_extension() {
        let assigned = CorrelationId(Uuid::new_v4());
        let mut parts = parts(None);
        parts.extensions.insert(assigned);

        let correlation_id = CorrelationId::from_request_parts(&mut parts, &())
            .await
            .expect("Should extract");

        assert_eq!(correlation_id, assigned);
    }

    #[tokio::test]
    async fn bearer_token_requires_header() {
        let err = BearerToken::from_request_parts(&mut parts(None), &())
            .await
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn bearer_token_requires_scheme() {
        let err = BearerToken::from_request_parts(&mut parts(Some("Basic abc")), &())
            .await
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::UNAUTHORIZED);

        let err = BearerToken::from_request_parts(&mut parts(Some("Bearer   ")), &())
            .await
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn admin_access_accepts_matching_token() {
        let result =
            AdminAccess::from_request_parts(&mut parts(Some("Bearer s3cret")), &state(Some("s3cret")))
                .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn admin_access_rejects_wrong_token() {
        let err =
            AdminAccess::from_request_parts(&mut parts(Some("Bearer guess")), &state(Some("s3cret")))
                .await
                .unwrap_err();
        assert_eq!(err.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn admin_access_missing_header_is_unauthorized() {
        let err = AdminAccess::from_request_parts(&mut parts(None), &state(Some("s3cret")))
            .await
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn admin_access_disabled_without_token() {
        let err = AdminAccess::from_request_parts(&mut parts(Some("Bearer anything")), &state(None))
            .await
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::FORBIDDEN);
    }
}
