//! HTTP clients for entities owned by other Sabor Digital services.

mod http_entity_client;

pub use http_entity_client::{HttpEntityClient, build_http_client};
