//! Foreign references declared by a waiter.

use sabor_core::client::RemoteEntityClient;
use sabor_core::record::EntityRef;
use sabor_core::verifier::{ReferenceVerifier, Verdict};

use crate::domain::aggregates::Waiter;

/// Lookup of an entity owned by another service.
pub type ReferenceLookup = dyn RemoteEntityClient<Entity = EntityRef>;

/// The services a waiter points into.
#[derive(Clone, Copy)]
pub struct WaiterReferences<'a> {
    /// The restaurant service.
    pub restaurants: &'a ReferenceLookup,
    /// The table service.
    pub tables: &'a ReferenceLookup,
}

impl WaiterReferences<'_> {
    /// Checks that the restaurant exists and that the table list resolves.
    pub async fn verify(&self, waiter: &Waiter) -> Verdict {
        ReferenceVerifier::new()
            .single("restaurant_id", self.restaurants, waiter.restaurant_id)
            .collection("tables_id", self.tables, &waiter.tables_id)
            .verify()
            .await
    }
}
