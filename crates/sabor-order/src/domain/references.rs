//! Foreign references declared by an order.

use sabor_core::client::RemoteEntityClient;
use sabor_core::record::EntityRef;
use sabor_core::verifier::{ReferenceVerifier, Verdict};

use crate::domain::aggregates::Order;

/// Lookup of an entity owned by another service.
pub type ReferenceLookup = dyn RemoteEntityClient<Entity = EntityRef>;

/// The services an order points into.
#[derive(Clone, Copy)]
pub struct OrderReferences<'a> {
    /// The restaurant service, for the restaurant.
    pub restaurants: &'a ReferenceLookup,
    /// The table service.
    pub tables: &'a ReferenceLookup,
    /// The waiter service.
    pub waiters: &'a ReferenceLookup,
    /// The restaurant service, for menu items.
    pub menu_items: &'a ReferenceLookup,
}

impl OrderReferences<'_> {
    /// Checks the three singular references and the item list concurrently.
    pub async fn verify(&self, order: &Order) -> Verdict {
        let items = order.item_set();
        ReferenceVerifier::new()
            .single("restaurant_id", self.restaurants, order.restaurant_id)
            .single("table_id", self.tables, order.table_id)
            .single("waiter_id", self.waiters, order.waiter_id)
            .collection("items_id", self.menu_items, &items)
            .verify()
            .await
    }
}
