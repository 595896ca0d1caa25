//! Sabor Digital API library: routes, state, configuration and error types.
//!
//! The same binary runs any one of the four services; `SABOR_SERVICE`
//! selects which router is served.

pub mod app;
pub mod config;
pub mod context;
pub mod error;
pub mod query;
pub mod routes;
pub mod state;
pub mod telemetry;
