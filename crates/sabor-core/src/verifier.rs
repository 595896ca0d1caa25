//! Reference verification before a write.
//!
//! Every foreign key on a candidate aggregate is checked against the client
//! of the service that owns the target. Checks for one candidate run
//! concurrently and are combined into a single [`Verdict`]. A reject must
//! stop the write before the local store is touched.
//!
//! Collection references follow an asymmetric rule: a non-empty request that
//! resolves to nothing is rejected, but one that resolves to a proper subset
//! is accepted. The partial case is logged at `warn`.

use std::fmt;

use futures::future::{BoxFuture, join_all};
use tracing::{debug, warn};

use crate::client::RemoteEntityClient;
use crate::error::DomainError;
use crate::{EntityId, IdSet};

/// Why a candidate was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// The reference does not resolve.
    InvalidReference {
        /// The foreign-key field.
        field: &'static str,
    },
    /// The owning service could not be asked.
    DependencyUnavailable {
        /// The foreign-key field.
        field: &'static str,
        /// Lookup failure description.
        reason: String,
    },
}

impl Rejection {
    /// The foreign-key field the rejection is about.
    #[must_use]
    pub fn field(&self) -> &'static str {
        match self {
            Self::InvalidReference { field } | Self::DependencyUnavailable { field, .. } => field,
        }
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidReference { field } => write!(f, "invalid reference: {field}"),
            Self::DependencyUnavailable { field, reason } => {
                write!(f, "dependency unavailable while checking {field}: {reason}")
            }
        }
    }
}

impl From<Rejection> for DomainError {
    fn from(rejection: Rejection) -> Self {
        match rejection {
            Rejection::InvalidReference { field } => Self::InvalidReference { field },
            Rejection::DependencyUnavailable { field, reason } => {
                Self::DependencyUnavailable { field, reason }
            }
        }
    }
}

/// Outcome of verifying one candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// Every reference resolved; the write may proceed.
    Accept,
    /// At least one reference failed; the write must not happen.
    Reject(Rejection),
}

impl Verdict {
    /// Returns `true` for [`Verdict::Accept`].
    #[must_use]
    pub fn is_accept(&self) -> bool {
        matches!(self, Self::Accept)
    }

    /// Converts a reject into the matching `DomainError`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidReference` or
    /// `DomainError::DependencyUnavailable` for a reject.
    pub fn into_result(self) -> Result<(), DomainError> {
        match self {
            Self::Accept => Ok(()),
            Self::Reject(rejection) => Err(rejection.into()),
        }
    }
}

type Check<'a> = BoxFuture<'a, Result<(), Rejection>>;

/// Collects the reference checks for one candidate and runs them.
#[derive(Default)]
pub struct ReferenceVerifier<'a> {
    checks: Vec<Check<'a>>,
}

impl<'a> ReferenceVerifier<'a> {
    /// Creates a verifier with no checks; it accepts unless checks are added.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a required singular reference: `id` must exist at `client`.
    #[must_use]
    pub fn single<C>(mut self, field: &'static str, client: &'a C, id: EntityId) -> Self
    where
        C: RemoteEntityClient + ?Sized,
    {
        self.checks.push(Box::pin(async move {
            match client.get_by_id(id).await {
                Ok(Some(_)) => Ok(()),
                Ok(None) => Err(Rejection::InvalidReference { field }),
                Err(e) => Err(Rejection::DependencyUnavailable {
                    field,
                    reason: e.to_string(),
                }),
            }
        }));
        self
    }

    /// Adds a collection reference. An empty `ids` passes without a lookup.
    #[must_use]
    pub fn collection<C>(mut self, field: &'static str, client: &'a C, ids: &'a IdSet) -> Self
    where
        C: RemoteEntityClient + ?Sized,
    {
        self.checks.push(Box::pin(async move {
            if ids.is_empty() {
                return Ok(());
            }
            match client.get_by_ids(ids).await {
                Ok(found) if found.is_empty() => Err(Rejection::InvalidReference { field }),
                Ok(found) => {
                    if found.len() < ids.len() {
                        warn!(
                            field,
                            requested = ids.len(),
                            resolved = found.len(),
                            "collection reference only partially resolved; accepting"
                        );
                    }
                    Ok(())
                }
                Err(e) => Err(Rejection::DependencyUnavailable {
                    field,
                    reason: e.to_string(),
                }),
            }
        }));
        self
    }

    /// Runs every check and returns the verdict. When several checks fail,
    /// the first one added wins.
    pub async fn verify(self) -> Verdict {
        let checks = self.checks.len();
        let outcomes = join_all(self.checks).await;
        match outcomes.into_iter().find_map(Result::err) {
            Some(rejection) => {
                warn!(field = rejection.field(), %rejection, "reference verification rejected");
                Verdict::Reject(rejection)
            }
            None => {
                debug!(checks, "reference verification accepted");
                Verdict::Accept
            }
        }
    }
}
