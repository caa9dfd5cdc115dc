//! Business metrics for the festival service.
//!
//! # Exported Metrics
//!
//! - `festival_registrations_total{kind}`: accepted registrations by type (solo, group)
//! - `festival_registration_rejections_total`: registrations rejected by validation
//! - `festival_event_admin_operations_total{operation}`: admin catalog changes (create, update, delete)
//!
//! Recording is a no-op until a recorder is installed (see the server binary).

use festival_core::RegistrationKind;
use metrics::{counter, describe_counter};

/// Accepted registrations by type.
pub const REGISTRATIONS_TOTAL: &str = "festival_registrations_total";
/// Registrations rejected by validation.
pub const REGISTRATION_REJECTIONS_TOTAL: &str = "festival_registration_rejections_total";
/// Admin catalog changes by operation.
pub const EVENT_ADMIN_OPERATIONS_TOTAL: &str = "festival_event_admin_operations_total";

/// Register metric descriptions. Call once after installing a recorder.
pub fn register_metrics() {
    describe_counter!(
        REGISTRATIONS_TOTAL,
        "Total number of accepted registrations by kind (solo, group)"
    );
    describe_counter!(
        REGISTRATION_REJECTIONS_TOTAL,
        "Total number of registrations rejected by validation"
    );
    describe_counter!(
        EVENT_ADMIN_OPERATIONS_TOTAL,
        "Total number of admin catalog changes by operation"
    );

    tracing::debug!("Festival metrics registered");
}

pub(crate) fn record_registration(kind: RegistrationKind) {
    counter!(REGISTRATIONS_TOTAL, "kind" => kind.as_str()).increment(1);
}

pub(crate) fn record_rejection() {
    counter!(REGISTRATION_REJECTIONS_TOTAL).increment(1);
}

pub(crate) fn record_admin_operation(operation: &'static str) {
    counter!(EVENT_ADMIN_OPERATIONS_TOTAL, "operation" => operation).increment(1);
}
