//! Axum HTTP layer for the festival registration service.
//!
//! # Request Flow
//!
//! 1. **Correlation layer** assigns a request id and opens a tracing span
//! 2. **Extractors** parse the body, path and admin credentials
//! 3. **Handler** calls the [`FestivalStore`](festival_core::FestivalStore) held in [`AppState`]
//! 4. **`AppError`** maps domain failures to `{code, message, details?}` JSON
//!
//! # Example
//!
//! ```ignore
//! use festival_core::InMemoryFestivalStore;
//! use festival_web::{AppState, build_router, cors_layer};
//! use std::sync::Arc;
//!
//! let state = AppState::new(Arc::new(InMemoryFestivalStore::with_catalog()))
//!     .with_admin_token("s3cret");
//! let app = build_router(state, cors_layer(None)?);
//! axum::serve(listener, app).await?;
//! ```

#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod router;
pub mod state;

pub use error::AppError;
pub use extractors::{AdminAccess, BearerToken, CorrelationId};
pub use metrics::register_metrics;
pub use middleware::{CORRELATION_ID_HEADER, correlation_id_layer};
pub use router::{build_router, cors_layer};
pub use state::AppState;
