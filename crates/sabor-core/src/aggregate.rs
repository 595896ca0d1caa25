//! Aggregate abstraction.

use crate::EntityId;

/// The domain fields of an aggregate a service owns and persists.
///
/// Identity and the auditing timestamps are not part of the implementor;
/// they live on [`Record`](crate::record::Record), which the store builds
/// on first persist.
pub trait Aggregate: Clone + Send + Sync + std::fmt::Debug + 'static {
    /// Singular, lower-case name used in messages (`"order"`, `"menu item"`).
    const NAME: &'static str;

    /// Identifier of the owning parent used by scoped scans: the restaurant
    /// for most aggregates, the menu for a menu item.
    fn parent_id(&self) -> Option<EntityId> {
        None
    }
}
