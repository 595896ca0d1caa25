//! Domain error types.

use thiserror::Error;

use crate::EntityId;
use crate::validation::FieldErrors;

/// Top-level domain error type.
#[derive(Debug, Error)]
pub enum DomainError {
    /// A request addressed an identity the local store does not have.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Aggregate name.
        entity: &'static str,
        /// The identifier that was looked up.
        id: EntityId,
    },

    /// A declared foreign key does not resolve in the service that owns it.
    #[error("invalid reference: {field}")]
    InvalidReference {
        /// The foreign-key field that failed to resolve.
        field: &'static str,
    },

    /// A remote lookup failed for a reason other than a clean "absent".
    #[error("dependency unavailable while checking {field}: {reason}")]
    DependencyUnavailable {
        /// The foreign-key field being checked.
        field: &'static str,
        /// Transport, status or decoding failure description.
        reason: String,
    },

    /// Field-level input validation failed.
    #[error("validation error: {0}")]
    Validation(FieldErrors),

    /// A batch lookup did not resolve every requested identifier.
    #[error("no {entity} records found for identifiers {}", join_ids(missing))]
    IncompleteBatch {
        /// Aggregate name.
        entity: &'static str,
        /// Requested identifiers that were not found, ascending.
        missing: Vec<EntityId>,
    },

    /// A store failure during a write, re-signalled as a generic service
    /// failure. `cause` is kept for diagnostics and never shown to callers.
    #[error("an error occurred while {action} the {entity}")]
    OperationFailed {
        /// Verb in progressive form (`"saving"`, `"updating"`, `"deleting"`).
        action: &'static str,
        /// Aggregate name.
        entity: &'static str,
        /// Underlying failure.
        cause: String,
    },

    /// An infrastructure/persistence error.
    #[error("infrastructure error: {0}")]
    Infrastructure(String),
}

impl DomainError {
    /// Wraps a store failure that happened after the request was accepted.
    #[must_use]
    pub fn operation_failed(action: &'static str, entity: &'static str, cause: &Self) -> Self {
        Self::OperationFailed {
            action,
            entity,
            cause: cause.to_string(),
        }
    }
}

fn join_ids(ids: &[EntityId]) -> String {
    ids.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
