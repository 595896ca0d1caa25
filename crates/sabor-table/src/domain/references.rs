//! Foreign references declared by a table.

use sabor_core::client::RemoteEntityClient;
use sabor_core::record::EntityRef;
use sabor_core::verifier::{ReferenceVerifier, Verdict};

use crate::domain::aggregates::Table;

/// Lookup of an entity owned by another service.
pub type ReferenceLookup = dyn RemoteEntityClient<Entity = EntityRef>;

/// The services a table points into.
#[derive(Clone, Copy)]
pub struct TableReferences<'a> {
    /// The restaurant service.
    pub restaurants: &'a ReferenceLookup,
    /// The waiter service.
    pub waiters: &'a ReferenceLookup,
}

impl TableReferences<'_> {
    /// Checks that the restaurant exists and that the waiter list resolves.
    pub async fn verify(&self, table: &Table) -> Verdict {
        ReferenceVerifier::new()
            .single("restaurant_id", self.restaurants, table.restaurant_id)
            .collection("waiters_id", self.waiters, &table.waiters_id)
            .verify()
            .await
    }
}
